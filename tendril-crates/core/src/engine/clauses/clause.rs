use std::fmt::Display;
use std::ops::Index;

use itertools::Itertools;

use crate::engine::variables::Literal;
use crate::tendril_assert_moderate;
use crate::tendril_assert_simple;

/// Clauses with more literals than this keep the position where the last search for a
/// replacement watch stopped; shorter clauses are always searched from the first unwatched
/// literal.
pub const POSITION_CACHE_THRESHOLD: usize = 3;

/// A disjunction of at least two literals.
///
/// The first two literals are the watched literals. The propagation engine may reorder the
/// literals by swapping, the size of the clause never changes.
#[derive(Clone, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
    is_garbage: bool,
    /// Only present for clauses longer than [`POSITION_CACHE_THRESHOLD`]; always within
    /// `2..=len`.
    search_position: Option<u32>,
}

#[allow(clippy::len_without_is_empty, reason = "clauses are never empty")]
impl Clause {
    pub(crate) fn new(literals: Vec<Literal>) -> Clause {
        tendril_assert_simple!(literals.len() >= 2);

        let search_position = (literals.len() > POSITION_CACHE_THRESHOLD).then_some(2);
        Clause {
            literals,
            is_garbage: false,
            search_position,
        }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn get_literal_slice(&self) -> &[Literal] {
        &self.literals
    }

    pub fn is_garbage(&self) -> bool {
        self.is_garbage
    }

    /// Note that this does _not_ remove the clause, it stays in place until the watches
    /// referring to it have been flushed.
    pub(crate) fn mark_garbage(&mut self) {
        tendril_assert_moderate!(!self.is_garbage, "Clause is already garbage");
        self.is_garbage = true;
    }

    pub fn get_search_position(&self) -> Option<usize> {
        self.search_position.map(|position| position as usize)
    }

    pub(crate) fn set_search_position(&mut self, position: usize) {
        tendril_assert_moderate!(self.search_position.is_some());
        tendril_assert_moderate!((2..=self.literals.len()).contains(&position));
        self.search_position = Some(position as u32);
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.literals.swap(a, b);
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Literal {
        &self.literals[index]
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({})[garbage:{}]",
            self.literals.iter().join(","),
            self.is_garbage
        )
    }
}
