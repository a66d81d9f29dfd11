use std::ops::Index;
use std::ops::IndexMut;

use super::clauses::ClauseAllocator;
use super::clauses::ClauseReference;
use super::variables::Literal;
use crate::containers::KeyedVec;

/// An entry in the watch list of a literal.
///
/// The blocking literal is checked before the clause is touched: when it is true the clause is
/// satisfied and the watch can be kept as is. For binary clauses it is the other literal of the
/// clause, which means those clauses never have to be inspected during propagation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Watch {
    pub(crate) clause_reference: ClauseReference,
    /// The size of the clause at the moment it was watched.
    pub(crate) size: u32,
    pub(crate) blocking_literal: Literal,
}

impl Watch {
    pub fn get_clause_reference(&self) -> ClauseReference {
        self.clause_reference
    }

    pub fn get_size(&self) -> u32 {
        self.size
    }

    pub fn get_blocking_literal(&self) -> Literal {
        self.blocking_literal
    }

    pub fn is_binary(&self) -> bool {
        self.size == 2
    }
}

/// For every literal, the watches of the clauses in which that literal is watched.
#[derive(Clone, Debug, Default)]
pub struct WatchLists {
    watch_lists: KeyedVec<Literal, Vec<Watch>>,
}

impl WatchLists {
    /// Creates the (empty) watch lists of a new variable, once for each polarity.
    pub(crate) fn grow(&mut self) {
        let _ = self.watch_lists.push(vec![]);
        let _ = self.watch_lists.push(vec![]);
    }

    pub(crate) fn watch_literal(
        &mut self,
        literal: Literal,
        blocking_literal: Literal,
        clause_reference: ClauseReference,
        size: u32,
    ) {
        self.watch_lists[literal].push(Watch {
            clause_reference,
            size,
            blocking_literal,
        });
    }

    pub fn num_watches(&self) -> usize {
        self.watch_lists.iter().map(Vec::len).sum()
    }

    pub fn iter_watches(&self) -> impl Iterator<Item = (Literal, &Watch)> + '_ {
        self.watch_lists.keys().flat_map(move |literal| {
            self.watch_lists[literal]
                .iter()
                .map(move |watch| (literal, watch))
        })
    }

    /// Removes the watches of clauses marked as garbage, returns the number of removed watches.
    pub(crate) fn flush_garbage(&mut self, clause_allocator: &ClauseAllocator) -> usize {
        let num_watches_before = self.num_watches();
        for literal in self.watch_lists.keys().collect::<Vec<_>>() {
            self.watch_lists[literal]
                .retain(|watch| !clause_allocator[watch.clause_reference].is_garbage());
        }
        num_watches_before - self.num_watches()
    }

    /// Hint the processor to load the first watch of `literal`.
    ///
    /// Called when assigning the negation of `literal`, since the watches of `literal` are
    /// traversed next during propagation.
    #[inline]
    pub(crate) fn prefetch(&self, literal: Literal) {
        let watch_list = &self.watch_lists[literal];
        if watch_list.is_empty() {
            return;
        }

        let pointer = watch_list.as_ptr();
        #[cfg(target_arch = "x86_64")]
        {
            // SAFETY: the watch list is non-empty, so the pointer is valid. Prefetching has no
            // observable effect besides the cache.
            unsafe {
                std::arch::x86_64::_mm_prefetch(
                    pointer.cast::<i8>(),
                    std::arch::x86_64::_MM_HINT_T0,
                );
            }
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            let _ = pointer;
        }
    }
}

impl Index<Literal> for WatchLists {
    type Output = Vec<Watch>;

    fn index(&self, literal: Literal) -> &Vec<Watch> {
        &self.watch_lists[literal]
    }
}

impl IndexMut<Literal> for WatchLists {
    fn index_mut(&mut self, literal: Literal) -> &mut Vec<Watch> {
        &mut self.watch_lists[literal]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(value: i32) -> Literal {
        Literal::from_signed(value)
    }

    fn watch_lists_with_variables(num_variables: usize) -> WatchLists {
        let mut watch_lists = WatchLists::default();
        for _ in 0..num_variables {
            watch_lists.grow();
        }
        watch_lists
    }

    #[test]
    fn watches_are_stored_per_literal() {
        let mut allocator = ClauseAllocator::default();
        let clause_reference = allocator
            .create_clause(vec![literal(1), literal(-2)])
            .unwrap();
        let mut watch_lists = watch_lists_with_variables(2);

        watch_lists.watch_literal(literal(1), literal(-2), clause_reference, 2);

        assert_eq!(1, watch_lists[literal(1)].len());
        assert!(watch_lists[literal(-1)].is_empty());
        let watch = watch_lists[literal(1)][0];
        assert!(watch.is_binary());
        assert_eq!(literal(-2), watch.get_blocking_literal());
        assert_eq!(clause_reference, watch.get_clause_reference());
    }

    #[test]
    fn flushing_removes_only_garbage_watches() {
        let mut allocator = ClauseAllocator::default();
        let kept = allocator
            .create_clause(vec![literal(1), literal(2), literal(3)])
            .unwrap();
        let removed = allocator
            .create_clause(vec![literal(1), literal(-2), literal(3)])
            .unwrap();
        let mut watch_lists = watch_lists_with_variables(3);
        watch_lists.watch_literal(literal(1), literal(2), kept, 3);
        watch_lists.watch_literal(literal(2), literal(1), kept, 3);
        watch_lists.watch_literal(literal(1), literal(-2), removed, 3);
        watch_lists.watch_literal(literal(-2), literal(1), removed, 3);

        allocator.mark_garbage(removed);
        let num_removed = watch_lists.flush_garbage(&allocator);

        assert_eq!(2, num_removed);
        assert!(watch_lists
            .iter_watches()
            .all(|(_, watch)| watch.get_clause_reference() == kept));
    }

    #[test]
    fn prefetching_an_empty_list_is_a_no_op() {
        let watch_lists = watch_lists_with_variables(1);
        watch_lists.prefetch(literal(1));
        watch_lists.prefetch(literal(-1));
    }
}
