use crate::config::{ConfigError, TrainConfig};
use crate::mdps::q_table::{QRecord, QTable};
use crate::mdps::solver_policy::GreedyTablePolicy;
use crate::mdps::state_grid::StateGrid;
use crate::rewards::reward;
use cartpole::{CartPole, Continous, Discrete, State};
use rand::prelude::*;
use tracing::debug;

/// Linear annealing from `max` down toward `floor` over the run:
/// `max - (episode / episodes) * max + floor`.
pub fn annealed_rate(
    max: Continous,
    floor: Continous,
    episode: usize,
    episodes: usize,
) -> Continous {
    max - (episode as Continous / episodes as Continous) * max + floor
}

/// Epsilon-greedy tabular Q-learning on the discretized cart-pole.
///
/// Refer: Sutton & Barto 2018, ch. 6.5.
pub struct QLearning {
    cfg: TrainConfig,
    env: CartPole,
    grid: StateGrid,
    q: QTable,
    rng: StdRng,
}

impl QLearning {
    /// Validates the whole configuration up front; this is the only place
    /// the core can fail.
    pub fn new(cfg: &TrainConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let env = CartPole::new(cfg.params)?;
        let grid = StateGrid::new(cfg.bins.clone())?;
        let q = QTable::new(grid.n_s(), cfg.actions.len());
        let rng = StdRng::seed_from_u64(cfg.seed);

        Ok(Self {
            cfg: cfg.clone(),
            env,
            grid,
            q,
            rng,
        })
    }

    /// Runs the full training loop, mutating the value table in place.
    /// Returns the final episode's return and the total number of steps
    /// simulated.
    ///
    /// Each episode restarts the simulation from the configured initial
    /// state and runs until the step budget, the track limit, or the tilt
    /// limit is hit. Divergence is not an error; it just ends the episode.
    pub fn exec(&mut self) -> (Continous, usize) {
        let n_a = self.q.n_a();
        let mut total_steps = 0;
        let mut episode_return = 0.;

        for episode in 0..self.cfg.episodes {
            self.env.reset(Some(self.cfg.initial_state));
            let epsilon = annealed_rate(
                self.cfg.epsilon_max,
                self.cfg.epsilon_floor,
                episode,
                self.cfg.episodes,
            );
            let alpha = annealed_rate(
                self.cfg.alpha_max,
                self.cfg.alpha_floor,
                episode,
                self.cfg.episodes,
            );

            episode_return = 0.;
            let mut steps = 0;
            for _ in 0..self.cfg.max_steps {
                let state = self.env.state();
                let s = self.state_index(&state);

                let a = if self.rng.gen::<Continous>() < epsilon {
                    self.rng.gen_range(0..n_a) as Discrete
                } else {
                    self.q.best_action(s)
                };

                let next = self.env.step(self.cfg.actions[a as usize]);
                let ns = self.state_index(&next);
                let r = reward(&self.cfg.weights, &next);

                self.q.td_update(s, a, r, ns, alpha, self.cfg.gamma);
                episode_return += r;
                steps += 1;

                if next[0].abs() > self.cfg.track_limit || next[2].abs() > self.cfg.tilt_limit {
                    break;
                }
            }

            total_steps += steps;
            debug!(episode, epsilon, alpha, steps, episode_return, "episode finished");
        }

        (episode_return, total_steps)
    }

    fn state_index(&self, s: &State) -> Discrete {
        self.grid.flatten(&self.grid.discretize(s))
    }

    pub fn q_star(&self, s: Discrete, a: Discrete) -> Continous {
        self.q.q(s, a)
    }

    pub fn v_star(&self, s: Discrete) -> Continous {
        self.q.max_q(s)
    }

    pub fn pi_star(&self, s: Discrete) -> Discrete {
        self.q.best_action(s)
    }

    /// The table as export records, one per discrete cell.
    pub fn records(&self) -> Vec<QRecord> {
        self.q.records(&self.grid)
    }

    /// Consumes the trainer and hands the learned table to a read-only
    /// greedy controller.
    pub fn into_greedy_policy(self) -> GreedyTablePolicy {
        GreedyTablePolicy {
            grid: self.grid,
            q: self.q,
            actions: self.cfg.actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::*;

    #[test]
    fn schedule_starts_at_max_plus_floor_and_anneals_linearly() {
        assert_float_eq!(annealed_rate(0.2, 0.01, 0, 2000), 0.21, abs <= 1e-12);
        assert_float_eq!(annealed_rate(0.2, 0.01, 1000, 2000), 0.11, abs <= 1e-12);
        assert_float_eq!(
            annealed_rate(0.125, 0.05, 1999, 2000),
            0.125 - 1999. / 2000. * 0.125 + 0.05,
            abs <= 1e-12
        );
    }

    #[test]
    fn invalid_configuration_fails_construction() {
        let cfg = TrainConfig {
            actions: vec![],
            ..Default::default()
        };

        assert!(QLearning::new(&cfg).is_err());
    }

    #[test]
    fn fixed_seed_reproduces_the_run() {
        let cfg = TrainConfig {
            episodes: 20,
            max_steps: 50,
            ..Default::default()
        };

        let mut a = QLearning::new(&cfg).unwrap();
        let mut b = QLearning::new(&cfg).unwrap();

        assert_eq!(a.exec(), b.exec());
        assert_eq!(a.records(), b.records());
    }
}
