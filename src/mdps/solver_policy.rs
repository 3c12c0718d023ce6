use crate::mdps::q_table::QTable;
use crate::mdps::state_grid::StateGrid;
use cartpole::mdps::Policy;
use cartpole::{Continous, State};

/// Greedy lookup into a learned table: discretize, take the first maximal
/// action of the row, return its force. Never mutates the table.
pub struct GreedyTablePolicy {
    pub(crate) grid: StateGrid,
    pub(crate) q: QTable,
    pub(crate) actions: Vec<Continous>,
}

impl Policy for GreedyTablePolicy {
    fn policy(&self, s: &State) -> Continous {
        let idx = self.grid.flatten(&self.grid.discretize(s));
        self.actions[self.q.best_action(idx) as usize]
    }
}
