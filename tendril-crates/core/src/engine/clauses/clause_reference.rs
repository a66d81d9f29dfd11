use std::fmt::Display;

use crate::containers::StorageKey;
#[cfg(doc)]
use crate::ClauseAllocator;

/// Opaque, non-owning reference to a clause stored in the [`ClauseAllocator`].
///
/// The reference stays valid for as long as the clause database keeps the clause; it is used as
/// the reason of an assignment, in watches, and as the conflict marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClauseReference {
    id: u32,
}

impl StorageKey for ClauseReference {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        ClauseReference { id: index as u32 }
    }
}

impl Display for ClauseReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c{}", self.id)
    }
}
