//! A minimal clause arena. Clauses are referred to through stable [`ClauseReference`]s; deleting
//! a clause only raises its garbage flag, the propagation engine skips such clauses lazily.
mod clause;
mod clause_allocator;
mod clause_reference;

pub use clause::Clause;
pub use clause::POSITION_CACHE_THRESHOLD;
pub use clause_allocator::ClauseAllocator;
pub use clause_reference::ClauseReference;
