pub mod q_learning;
pub mod q_table;
pub mod solver_policy;
pub mod state_grid;
