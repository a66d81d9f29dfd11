use thiserror::Error;

use crate::engine::variables::Literal;
use crate::engine::variables::Variable;
#[cfg(doc)]
use crate::ClauseAllocator;

/// Errors related to registering clauses in the [`ClauseAllocator`] and the watch lists.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClauseDatabaseError {
    /// Unit and empty clauses are not stored as clauses; units are root assignments.
    #[error("A stored clause needs at least two literals, got {num_literals}")]
    TooFewLiterals { num_literals: usize },
    /// Every variable may occur at most once in a stored clause.
    #[error("Variable {variable} occurs more than once in the clause")]
    RepeatedVariable { variable: Variable },
    /// The literal refers to a variable which has not been created.
    #[error("Literal {literal} refers to a variable which does not exist")]
    UnknownVariable { literal: Literal },
}
