use crate::config::ConfigError;
use cartpole::{Continous, Discrete, State};
use itertools::Itertools;
use std::iter::zip;

/// Discretization grid over the four state dimensions.
///
/// Each dimension has a strictly increasing boundary sequence; bins are
/// right-open, so a value equal to a boundary lands in the bin that starts
/// there. Out-of-range values clamp to the outermost bins, which keeps
/// discretization total over all real states.
#[derive(Clone, Debug)]
pub struct StateGrid {
    bins: [Vec<Continous>; 4],
}

impl StateGrid {
    pub fn new(bins: [Vec<Continous>; 4]) -> Result<Self, ConfigError> {
        for (dim, b) in bins.iter().enumerate() {
            if b.is_empty() {
                return Err(ConfigError::EmptyBins(dim));
            }
            if b.windows(2).any(|w| w[0] >= w[1]) {
                return Err(ConfigError::UnorderedBins(dim));
            }
        }

        Ok(Self { bins })
    }

    pub fn dims(&self) -> [usize; 4] {
        [
            self.bins[0].len(),
            self.bins[1].len(),
            self.bins[2].len(),
            self.bins[3].len(),
        ]
    }

    /// Number of discrete states, the product of the per-dimension bin counts.
    pub fn n_s(&self) -> usize {
        self.bins.iter().map(Vec::len).product()
    }

    /// Maps a continuous state to per-dimension bin indices.
    pub fn discretize(&self, s: &State) -> [usize; 4] {
        let mut idx = [0; 4];
        for (i, (v, b)) in zip(s, &self.bins).enumerate() {
            let d = b.partition_point(|t| t <= v) as isize - 1;
            idx[i] = d.clamp(0, b.len() as isize - 1) as usize;
        }

        idx
    }

    /// Row-major flat index of a discretized state.
    pub fn flatten(&self, idx: &[usize; 4]) -> Discrete {
        let mut s = 0;
        for (i, b) in zip(idx, &self.bins) {
            s = s * b.len() + i;
        }

        s as Discrete
    }

    /// Every discrete cell, in the same row-major order `flatten` uses.
    pub fn cells(&self) -> impl Iterator<Item = [usize; 4]> + '_ {
        self.bins
            .iter()
            .map(|b| 0..b.len())
            .multi_cartesian_product()
            .map(|c| [c[0], c[1], c[2], c[3]])
    }
}
