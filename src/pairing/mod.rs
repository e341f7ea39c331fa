pub mod types;
pub mod costs;
pub mod solver;
pub mod roles;
pub mod builder;

pub use types::{PairingWarning, RoundOutcome};
pub use costs::{build_cost_matrix, CostMatrix, CostParams};
pub use solver::{find_optimal_pairs, Matching, SolverLimits};
pub use roles::assign_roles;
pub use builder::build_round;
