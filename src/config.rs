use crate::math::linspace;
use crate::rewards::RewardWeights;
use cartpole::{CartPoleParams, Continous, ModelError, State};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("action set must not be empty")]
    EmptyActionSet,

    #[error("state dimension {0} has no bin boundaries")]
    EmptyBins(usize),

    #[error("bin boundaries for state dimension {0} must be strictly increasing")]
    UnorderedBins(usize),

    #[error("discount factor must be in (0, 1], got {0}")]
    InvalidGamma(Continous),

    #[error("{0} must be non-negative, got {1}")]
    NegativeRate(&'static str, Continous),

    #[error("episode and step counts must be positive")]
    EmptyRun,

    #[error("track and tilt limits must be positive, got {track} and {tilt}")]
    InvalidLimits { track: Continous, tilt: Continous },
}

/// Everything a training run depends on: physics, discretization, action set,
/// schedules, and the RNG seed. `Default` is the reference setup; any subset
/// can be overridden from JSON thanks to `#[serde(default)]`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct TrainConfig {
    pub params: CartPoleParams,
    /// Bin boundaries per state dimension, each strictly increasing.
    pub bins: [Vec<Continous>; 4],
    /// Forces the controller may apply; the index is the action index.
    pub actions: Vec<Continous>,
    pub episodes: usize,
    pub max_steps: usize,
    pub initial_state: State,
    pub gamma: Continous,
    pub alpha_max: Continous,
    pub alpha_floor: Continous,
    pub epsilon_max: Continous,
    pub epsilon_floor: Continous,
    /// An episode ends once `|x|` exceeds this.
    pub track_limit: Continous,
    /// An episode ends once `|theta|` exceeds this.
    pub tilt_limit: Continous,
    pub weights: RewardWeights,
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            params: CartPoleParams::default(),
            bins: [
                linspace(-2.4, 2.4, 10),
                linspace(-3., 3., 10),
                linspace(-PI, PI, 20),
                linspace(-4., 4., 10),
            ],
            actions: vec![-10., 0., 10.],
            episodes: 2000,
            max_steps: 500,
            initial_state: [0., 0., 0.05, 0.],
            gamma: 0.99,
            alpha_max: 0.125,
            alpha_floor: 0.05,
            epsilon_max: 0.2,
            epsilon_floor: 0.01,
            track_limit: 2.4,
            tilt_limit: FRAC_PI_2,
            weights: RewardWeights::default(),
            seed: 2718,
        }
    }
}

impl TrainConfig {
    /// Fail-fast validation of the run parameters. Physical parameters and
    /// bin boundaries get re-checked where they are consumed
    /// (`CartPole::new`, `StateGrid::new`); this covers everything else.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.actions.is_empty() {
            return Err(ConfigError::EmptyActionSet);
        }
        if self.episodes == 0 || self.max_steps == 0 {
            return Err(ConfigError::EmptyRun);
        }
        if !(self.gamma > 0. && self.gamma <= 1.) {
            return Err(ConfigError::InvalidGamma(self.gamma));
        }
        for (name, v) in [
            ("alpha_max", self.alpha_max),
            ("alpha_floor", self.alpha_floor),
            ("epsilon_max", self.epsilon_max),
            ("epsilon_floor", self.epsilon_floor),
        ] {
            if v < 0. {
                return Err(ConfigError::NegativeRate(name, v));
            }
        }
        if self.track_limit <= 0. || self.tilt_limit <= 0. {
            return Err(ConfigError::InvalidLimits {
                track: self.track_limit,
                tilt: self.tilt_limit,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_config_is_valid() {
        assert_eq!(TrainConfig::default().validate(), Ok(()));
    }

    #[test]
    fn reference_config_matches_the_hand_tuned_run() {
        let cfg = TrainConfig::default();

        assert_eq!(cfg.actions, vec![-10., 0., 10.]);
        assert_eq!(cfg.bins[2].len(), 20);
        assert_eq!(cfg.episodes, 2000);
        assert_eq!(cfg.gamma, 0.99);
        assert_eq!(cfg.initial_state, [0., 0., 0.05, 0.]);
    }

    #[test]
    fn empty_action_set_is_rejected() {
        let cfg = TrainConfig {
            actions: vec![],
            ..Default::default()
        };

        assert_eq!(cfg.validate(), Err(ConfigError::EmptyActionSet));
    }

    #[test]
    fn out_of_range_gamma_is_rejected() {
        let cfg = TrainConfig {
            gamma: 1.5,
            ..Default::default()
        };

        assert_eq!(cfg.validate(), Err(ConfigError::InvalidGamma(1.5)));
    }

    #[test]
    fn json_round_trips() {
        let cfg = TrainConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();

        assert_eq!(serde_json::from_str::<TrainConfig>(&json).unwrap(), cfg);
    }

    #[test]
    fn json_overrides_merge_onto_the_defaults() {
        let cfg: TrainConfig =
            serde_json::from_str(r#"{"episodes": 10, "seed": 7}"#).unwrap();

        assert_eq!(cfg.episodes, 10);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.gamma, 0.99);
        assert_eq!(cfg.actions.len(), 3);
    }
}
