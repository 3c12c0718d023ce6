extern crate cartpole;

use cartpole::mdps::*;
use cartpole::*;

fn main() {
    let mut sim = CartPole::new(CartPoleParams::default()).unwrap();
    let policy = UnforcedPolicy;

    let mut s = sim.reset(Some([0., 0., 0.05, 0.]));
    for t in 0..500 {
        s = sim.step(policy.policy(&s));
        if t % 50 == 0 {
            println!(
                "t = {t}: x = {:+.3}, x_dot = {:+.3}, theta = {:+.3}, theta_dot = {:+.3}",
                s[0], s[1], s[2], s[3]
            );
        }
    }
}
