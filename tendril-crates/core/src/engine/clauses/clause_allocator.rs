use std::fmt::Display;
use std::ops::Index;
use std::ops::IndexMut;

use fnv::FnvHashSet;
use log::trace;

use super::Clause;
use super::ClauseReference;
use crate::basic_types::ClauseDatabaseError;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::variables::Literal;
use crate::tendril_assert_moderate;

/// Stores clauses under stable [`ClauseReference`]s.
///
/// Clauses are never physically removed: [`ClauseAllocator::mark_garbage`] only flags them so
/// that the references held in watches and reasons remain valid.
#[derive(Default, Debug, Clone)]
pub struct ClauseAllocator {
    clauses: KeyedVec<ClauseReference, Clause>,
}

impl ClauseAllocator {
    /// Stores the clause; the first two literals become the watched literals.
    pub fn create_clause(
        &mut self,
        literals: Vec<Literal>,
    ) -> Result<ClauseReference, ClauseDatabaseError> {
        if literals.len() < 2 {
            return Err(ClauseDatabaseError::TooFewLiterals {
                num_literals: literals.len(),
            });
        }

        let mut seen_variables = FnvHashSet::default();
        if let Some(literal) = literals
            .iter()
            .find(|literal| !seen_variables.insert(literal.get_variable()))
        {
            return Err(ClauseDatabaseError::RepeatedVariable {
                variable: literal.get_variable(),
            });
        }

        let clause = Clause::new(literals);
        trace!("allocated clause {clause}");
        Ok(self.clauses.push(clause))
    }

    pub fn get_clause(&self, clause_reference: ClauseReference) -> &Clause {
        &self.clauses[clause_reference]
    }

    pub fn get_mutable_clause(&mut self, clause_reference: ClauseReference) -> &mut Clause {
        &mut self.clauses[clause_reference]
    }

    /// Flags the clause for lazy deletion. Its watches are skipped during propagation until they
    /// are flushed by [`PropagationEngine::flush_garbage_watches`].
    ///
    /// [`PropagationEngine::flush_garbage_watches`]: crate::PropagationEngine::flush_garbage_watches
    pub fn mark_garbage(&mut self, clause_reference: ClauseReference) {
        tendril_assert_moderate!(clause_reference.index() < self.clauses.len());
        self.clauses[clause_reference].mark_garbage();
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Iterates over the references of the clauses which are not garbage.
    pub fn iter_live_clauses(&self) -> impl Iterator<Item = ClauseReference> + '_ {
        self.clauses
            .keys()
            .filter(|&clause_reference| !self.clauses[clause_reference].is_garbage())
    }
}

impl Index<ClauseReference> for ClauseAllocator {
    type Output = Clause;

    fn index(&self, clause_reference: ClauseReference) -> &Clause {
        self.get_clause(clause_reference)
    }
}

impl IndexMut<ClauseReference> for ClauseAllocator {
    fn index_mut(&mut self, clause_reference: ClauseReference) -> &mut Clause {
        self.get_mutable_clause(clause_reference)
    }
}

impl Display for ClauseAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let clauses_string = self
            .clauses
            .iter()
            .fold(String::new(), |acc, clause| format!("{acc}{clause}\n"));

        let num_clauses = self.clauses.len();
        write!(f, "Num clauses: {num_clauses}\n{clauses_string}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literals(values: &[i32]) -> Vec<Literal> {
        values.iter().map(|&value| Literal::from_signed(value)).collect()
    }

    #[test]
    fn created_clauses_keep_their_literal_order() {
        let mut allocator = ClauseAllocator::default();

        let clause_reference = allocator
            .create_clause(literals(&[3, -1, 2]))
            .expect("valid clause");

        assert_eq!(
            literals(&[3, -1, 2]).as_slice(),
            allocator[clause_reference].get_literal_slice()
        );
    }

    #[test]
    fn unit_clauses_are_rejected() {
        let mut allocator = ClauseAllocator::default();

        let result = allocator.create_clause(literals(&[1]));

        assert_eq!(
            Err(ClauseDatabaseError::TooFewLiterals { num_literals: 1 }),
            result
        );
    }

    #[test]
    fn repeated_variables_are_rejected() {
        let mut allocator = ClauseAllocator::default();

        let result = allocator.create_clause(literals(&[1, 2, -1]));

        assert_eq!(
            Err(ClauseDatabaseError::RepeatedVariable {
                variable: Literal::from_signed(1).get_variable()
            }),
            result
        );
    }

    #[test]
    fn garbage_clauses_keep_their_reference_but_are_not_live() {
        let mut allocator = ClauseAllocator::default();
        let first = allocator.create_clause(literals(&[1, 2])).unwrap();
        let second = allocator.create_clause(literals(&[-1, 2])).unwrap();

        allocator.mark_garbage(first);

        assert!(allocator[first].is_garbage());
        assert_eq!(2, allocator.num_clauses());
        assert_eq!(vec![second], allocator.iter_live_clauses().collect::<Vec<_>>());
    }
}
