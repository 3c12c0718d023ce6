pub mod mdps;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Discrete = i32;
pub type Continous = f64;

/// Continuous cart-pole state: `[x, x_dot, theta, theta_dot]`.
///
/// `x` is the cart position on the track, `theta` the pole angle in radians
/// with 0 = upright. Unbounded; an uncontrolled trajectory diverges.
pub type State = [Continous; 4];

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("cart and pole masses must be positive, got M = {cart}, m = {pole}")]
    NonPositiveMass { cart: Continous, pole: Continous },

    #[error("pole half-length must be positive, got {0}")]
    NonPositiveLength(Continous),

    #[error("integration timestep must be positive, got {0}")]
    NonPositiveTimestep(Continous),

    #[error("friction coefficient must be non-negative, got {0}")]
    NegativeFriction(Continous),
}

/// Physical constants of the cart-pole system. Fixed at construction.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct CartPoleParams {
    pub gravity: Continous,
    pub mass_cart: Continous,
    pub mass_pole: Continous,
    /// Half-length of the pole, measured pivot to centre of mass.
    pub half_length: Continous,
    /// Viscous friction acting on the cart.
    pub friction: Continous,
    pub dt: Continous,
}

impl Default for CartPoleParams {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            mass_cart: 0.5,
            mass_pole: 0.2,
            half_length: 0.3,
            friction: 0.1,
            dt: 0.01,
        }
    }
}

impl CartPoleParams {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.mass_cart <= 0. || self.mass_pole <= 0. {
            return Err(ModelError::NonPositiveMass {
                cart: self.mass_cart,
                pole: self.mass_pole,
            });
        }
        if self.half_length <= 0. {
            return Err(ModelError::NonPositiveLength(self.half_length));
        }
        if self.dt <= 0. {
            return Err(ModelError::NonPositiveTimestep(self.dt));
        }
        if self.friction < 0. {
            return Err(ModelError::NegativeFriction(self.friction));
        }

        Ok(())
    }
}

/// Deterministic cart-pole simulation under an applied horizontal force.
///
/// Refer: https://gymnasium.farama.org/environments/classic_control/cart_pole/
#[derive(Debug)]
pub struct CartPole {
    params: CartPoleParams,
    state: State,
}

impl CartPole {
    pub fn new(params: CartPoleParams) -> Result<Self, ModelError> {
        params.validate()?;

        Ok(Self {
            params,
            state: [0.; 4],
        })
    }

    pub fn params(&self) -> &CartPoleParams {
        &self.params
    }

    /// Sets the state to the given one, or to the origin if omitted, and
    /// returns a copy of it.
    pub fn reset(&mut self, state: Option<State>) -> State {
        self.state = state.unwrap_or([0.; 4]);
        self.state
    }

    /// Returns a copy of the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Advances the simulation by one timestep under `force`.
    ///
    /// Accelerations come from the Lagrangian equations of motion for a
    /// uniform rod pivoted on the cart (the 4/3 inertia factor), with the
    /// centripetal term `m*l*theta_dot^2*sin(theta)` and viscous cart
    /// friction `b*x_dot`. Integration is semi-implicit Euler: velocities
    /// first, positions from the already-updated velocities.
    ///
    /// Any real `force` is accepted; a diverging state is a valid outcome
    /// and is left to the caller to detect.
    pub fn step(&mut self, force: Continous) -> State {
        let [x, x_dot, theta, theta_dot] = self.state;
        let p = &self.params;

        let sin_theta = theta.sin();
        let cos_theta = theta.cos();
        let total_mass = p.mass_cart + p.mass_pole;

        let temp = (force + p.mass_pole * p.half_length * theta_dot * theta_dot * sin_theta
            - p.friction * x_dot)
            / total_mass;
        let theta_acc = (p.gravity * sin_theta - cos_theta * temp)
            / (p.half_length * (4. / 3. - p.mass_pole * cos_theta * cos_theta / total_mass));
        let x_acc = temp - p.mass_pole * p.half_length * theta_acc * cos_theta / total_mass;

        let x_dot = x_dot + x_acc * p.dt;
        let x = x + x_dot * p.dt;
        let theta_dot = theta_dot + theta_acc * p.dt;
        let theta = theta + theta_dot * p.dt;

        self.state = [x, x_dot, theta, theta_dot];
        self.state
    }
}

/// One step of a recorded trajectory: the state reached and its reward.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct EpisodeEvent {
    pub s: State,
    pub r: Continous,
}
