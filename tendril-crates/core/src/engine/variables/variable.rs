use std::fmt::Display;

use crate::containers::StorageKey;

/// A propositional variable.
///
/// Variables are numbered from zero internally; externally (e.g. in [`Display`] and
/// [`Literal::from_signed`]) they are numbered from one.
///
/// [`Literal::from_signed`]: crate::Literal::from_signed
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    index: u32,
}

impl Variable {
    pub fn new(index: u32) -> Variable {
        Variable { index }
    }

    pub fn get_index(&self) -> u32 {
        self.index
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index + 1)
    }
}

impl StorageKey for Variable {
    fn index(&self) -> usize {
        self.index as usize
    }

    fn create_from_index(index: usize) -> Self {
        Variable::new(index as u32)
    }
}
