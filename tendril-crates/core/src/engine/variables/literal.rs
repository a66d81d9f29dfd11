use std::fmt::Display;
use std::ops::Not;

use super::Variable;
use crate::containers::StorageKey;
use crate::tendril_assert_simple;

/// A [`Variable`] together with a polarity.
///
/// The literal is stored as `2 * variable + is_positive`, which makes the two literals of a
/// variable neighbours in any structure keyed by literals (see [`StorageKey`]).
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    code: u32,
}

impl Literal {
    pub fn new(variable: Variable, is_positive: bool) -> Literal {
        Literal {
            code: variable.get_index() * 2 + (is_positive as u32),
        }
    }

    /// Creates the literal from its signed (DIMACS-style) representation: the absolute value is
    /// the variable (counting from one) and the sign is the polarity.
    pub fn from_signed(value: i32) -> Literal {
        tendril_assert_simple!(value != 0, "Zero is not a literal");
        Literal::new(Variable::new(value.unsigned_abs() - 1), value > 0)
    }

    /// The inverse of [`Literal::from_signed`].
    pub fn to_signed(self) -> i32 {
        let magnitude = self.get_variable().get_index() as i32 + 1;
        if self.is_positive() {
            magnitude
        } else {
            -magnitude
        }
    }

    pub fn is_positive(&self) -> bool {
        (self.code & 1) == 1
    }

    pub fn is_negative(&self) -> bool {
        (self.code & 1) == 0
    }

    pub fn get_variable(&self) -> Variable {
        Variable::new(self.code / 2)
    }

    pub fn to_u32(self) -> u32 {
        self.code
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal {
            code: self.code ^ 1,
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_signed())
    }
}

impl StorageKey for Literal {
    fn index(&self) -> usize {
        self.code as usize
    }

    fn create_from_index(index: usize) -> Self {
        Literal { code: index as u32 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_representation_is_preserved() {
        for value in [1, -1, 2, -7, 1000] {
            assert_eq!(value, Literal::from_signed(value).to_signed());
        }
    }

    #[test]
    fn negation_flips_polarity_but_not_the_variable() {
        let literal = Literal::from_signed(3);

        assert!(literal.is_positive());
        assert!((!literal).is_negative());
        assert_eq!(literal.get_variable(), (!literal).get_variable());
        assert_eq!(literal, !!literal);
        assert_eq!(Literal::from_signed(-3), !literal);
    }

    #[test]
    fn literals_of_a_variable_are_neighbours_in_storage() {
        let positive = Literal::new(Variable::new(4), true);
        let negative = Literal::new(Variable::new(4), false);

        assert_eq!(8, negative.index());
        assert_eq!(9, positive.index());
        assert_eq!(positive, Literal::create_from_index(9));
    }

    #[test]
    fn display_uses_the_signed_representation() {
        assert_eq!("-5", Literal::from_signed(-5).to_string());
        assert_eq!("5", Literal::from_signed(5).get_variable().to_string());
    }
}
