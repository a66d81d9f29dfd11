use crate::create_statistics_struct;
#[cfg(doc)]
use crate::engine::SolverMode;

create_statistics_struct!(
    /// The counters maintained by the [`PropagationEngine`]. They only ever increase; resetting
    /// them is up to the owner of the engine.
    ///
    /// [`PropagationEngine`]: crate::PropagationEngine
    PropagationStatistics {
        /// The number of trail entries propagated in [`SolverMode::Search`]
        num_propagations: u64,
        /// The number of trail entries propagated in [`SolverMode::Simplifying`]
        num_simplifying_propagations: u64,
        /// The number of conflicts found in [`SolverMode::Search`]
        num_conflicts: u64,
        /// Clause visits and literal traversals during search
        search: TraversalStatistics,
        /// Clause visits and literal traversals during simplification
        simplifying: TraversalStatistics,
    }
);

create_statistics_struct!(
    /// The expensive counters, only maintained if
    /// [`PropagatorOptions::count_expensive_statistics`] is set.
    ///
    /// [`PropagatorOptions::count_expensive_statistics`]: crate::PropagatorOptions::count_expensive_statistics
    TraversalStatistics {
        /// The number of times a (non-binary) clause was accessed
        num_visited_clauses: u64,
        /// The number of literals inspected while searching for a replacement watch
        num_traversed_literals: u64,
    }
);
