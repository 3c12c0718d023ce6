use crate::math::argmax_first;
use crate::mdps::state_grid::StateGrid;
use cartpole::{Continous, Discrete};
use ndarray::Array2;
use serde::Serialize;

/// Dense action-value table, one row per discrete state. Zero-initialized;
/// its shape is fixed for the lifetime of a run.
#[derive(Clone, Debug)]
pub struct QTable {
    q: Array2<Continous>,
}

/// One export record: the bin indices of a discrete state followed by that
/// state's value for every action. External writers rely on this exact
/// column order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QRecord {
    pub s: [usize; 4],
    pub q: Vec<Continous>,
}

impl QTable {
    pub fn new(n_s: usize, n_a: usize) -> Self {
        Self {
            q: Array2::zeros((n_s, n_a)),
        }
    }

    pub fn n_a(&self) -> usize {
        self.q.ncols()
    }

    pub fn q(&self, s: Discrete, a: Discrete) -> Continous {
        self.q[(s as usize, a as usize)]
    }

    pub fn set(&mut self, s: Discrete, a: Discrete, value: Continous) {
        self.q[(s as usize, a as usize)] = value;
    }

    /// Largest action value at `s`.
    pub fn max_q(&self, s: Discrete) -> Continous {
        self.q
            .row(s as usize)
            .iter()
            .copied()
            .fold(Continous::NEG_INFINITY, Continous::max)
    }

    /// Greedy action at `s`; ties resolve to the first maximal index.
    pub fn best_action(&self, s: Discrete) -> Discrete {
        argmax_first(self.q.row(s as usize).iter().copied()) as Discrete
    }

    /// One-sample Q-learning backup for the transition `s -a-> ns` with
    /// reward `r`:
    ///
    /// `Q[s][a] <- (1 - alpha) * Q[s][a] + alpha * (r + gamma * max_a' Q[ns][a'])`
    pub fn td_update(
        &mut self,
        s: Discrete,
        a: Discrete,
        r: Continous,
        ns: Discrete,
        alpha: Continous,
        gamma: Continous,
    ) {
        let target = r + gamma * self.max_q(ns);
        let q = self.q(s, a);
        self.set(s, a, (1. - alpha) * q + alpha * target);
    }

    /// All cells of the table in the grid's row-major order, never-visited
    /// cells included.
    pub fn records(&self, grid: &StateGrid) -> Vec<QRecord> {
        grid.cells()
            .map(|cell| QRecord {
                s: cell,
                q: self.q.row(grid.flatten(&cell) as usize).to_vec(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::*;

    #[test]
    fn fresh_table_is_all_zeros() {
        let q = QTable::new(6, 3);

        assert_eq!(q.n_a(), 3);
        assert_eq!(q.q(0, 0), 0.);
        assert_eq!(q.max_q(5), 0.);
    }

    #[test]
    fn td_update_matches_the_backup_formula() {
        let mut q = QTable::new(4, 3);
        q.set(0, 1, 2.);
        q.set(1, 0, 1.);
        q.set(1, 1, 3.);
        q.set(1, 2, 2.);

        q.td_update(0, 1, -1., 1, 0.5, 0.9);

        // (1 - 0.5) * 2 + 0.5 * (-1 + 0.9 * 3) = 1.85
        assert_float_eq!(q.q(0, 1), 1.85, abs <= 1e-12);
    }

    #[test]
    fn td_update_touches_only_the_updated_cell() {
        let mut q = QTable::new(2, 2);
        q.set(1, 1, 4.);

        q.td_update(0, 0, 1., 1, 0.1, 0.99);

        assert_eq!(q.q(0, 1), 0.);
        assert_eq!(q.q(1, 0), 0.);
        assert_eq!(q.q(1, 1), 4.);
    }

    #[test]
    fn best_action_prefers_the_first_maximum() {
        let mut q = QTable::new(2, 3);

        assert_eq!(q.best_action(0), 0);

        q.set(0, 1, 2.);
        q.set(0, 2, 2.);
        assert_eq!(q.best_action(0), 1);
        assert_float_eq!(q.max_q(0), 2., abs <= 1e-12);
    }
}
