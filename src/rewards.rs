use cartpole::{Continous, State};
use serde::{Deserialize, Serialize};

/// Weights of the quadratic state penalty and the balanced-regime bonus.
///
/// Hand-tuned values, kept as configuration rather than constants.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct RewardWeights {
    pub theta: Continous,
    pub theta_dot: Continous,
    pub x: Continous,
    pub x_dot: Continous,
    /// Flat bonus paid while the state sits inside all three windows below.
    pub balance_bonus: Continous,
    pub theta_window: Continous,
    pub theta_dot_window: Continous,
    pub x_window: Continous,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self {
            theta: 1.,
            theta_dot: 0.1,
            x: 0.05,
            x_dot: 0.01,
            balance_bonus: 5.,
            theta_window: 0.1,
            theta_dot_window: 0.5,
            x_window: 0.2,
        }
    }
}

/// Scores a state: negative weighted quadratic cost, plus the flat bonus
/// when the pole is upright, slow, and centred all at once. Total over all
/// real states.
pub fn reward(w: &RewardWeights, s: &State) -> Continous {
    let [x, x_dot, theta, theta_dot] = *s;

    let mut r = -(w.theta * theta * theta
        + w.theta_dot * theta_dot * theta_dot
        + w.x * x * x
        + w.x_dot * x_dot * x_dot);

    if theta.abs() < w.theta_window && theta_dot.abs() < w.theta_dot_window && x.abs() < w.x_window
    {
        r += w.balance_bonus;
    }

    r
}
