pub mod assignments;
pub mod clauses;
mod options;
mod propagation_engine;
mod propagation_statistics;
pub mod variables;
pub mod watch_lists;

pub use assignments::Assignments;
pub use assignments::LiteralValue;
pub use assignments::VariableInfo;
pub use options::PropagatorOptions;
pub use options::SolverMode;
pub use propagation_engine::PropagationEngine;
pub use propagation_statistics::PropagationStatistics;
pub use propagation_statistics::TraversalStatistics;
pub use watch_lists::Watch;
pub use watch_lists::WatchLists;
