/// Whether the solver is searching or running a simplification pass (e.g. probing).
///
/// The mode is passed explicitly to the assignment and propagation calls. It decides whether
/// phases are saved and which statistics are updated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SolverMode {
    #[default]
    Search,
    Simplifying,
}

/// Options for the [`PropagationEngine`] which determine how it behaves.
///
/// [`PropagationEngine`]: crate::PropagationEngine
#[derive(Debug, Clone, Copy)]
pub struct PropagatorOptions {
    /// Hint the processor to load the watch list of the negation of an assigned literal, which
    /// is the list traversed next.
    pub prefetch_watches: bool,
    /// Count the number of visited clauses and traversed literals. This happens in the
    /// innermost loop of propagation and is therefore disabled by default.
    pub count_expensive_statistics: bool,
}

impl Default for PropagatorOptions {
    fn default() -> Self {
        PropagatorOptions {
            prefetch_watches: true,
            count_expensive_statistics: false,
        }
    }
}
