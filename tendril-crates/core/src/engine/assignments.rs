use std::ops::Not;

use log::trace;

use super::clauses::ClauseReference;
use super::variables::Literal;
use super::variables::Variable;
use super::SolverMode;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::tendril_assert_moderate;
use crate::tendril_assert_simple;

/// The truth value of a literal under the current partial assignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    False,
    #[default]
    Unassigned,
    True,
}

impl LiteralValue {
    pub fn is_true(self) -> bool {
        self == LiteralValue::True
    }

    pub fn is_false(self) -> bool {
        self == LiteralValue::False
    }

    pub fn is_unassigned(self) -> bool {
        self == LiteralValue::Unassigned
    }
}

impl Not for LiteralValue {
    type Output = LiteralValue;

    fn not(self) -> LiteralValue {
        match self {
            LiteralValue::False => LiteralValue::True,
            LiteralValue::Unassigned => LiteralValue::Unassigned,
            LiteralValue::True => LiteralValue::False,
        }
    }
}

/// The information recorded for a variable when it was last assigned.
///
/// After backtracking the entries of unassigned variables are stale; they are only meaningful
/// while the variable is on the trail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariableInfo {
    decision_level: usize,
    trail_position: usize,
    reason: Option<ClauseReference>,
    saved_phase: bool,
    fixed_epoch: u64,
    is_eliminated: bool,
}

impl Default for VariableInfo {
    fn default() -> Self {
        VariableInfo {
            decision_level: 0,
            trail_position: 0,
            reason: None,
            saved_phase: true,
            fixed_epoch: 0,
            is_eliminated: false,
        }
    }
}

impl VariableInfo {
    pub fn get_decision_level(&self) -> usize {
        self.decision_level
    }

    pub fn get_trail_position(&self) -> usize {
        self.trail_position
    }

    /// The clause which forced the assignment, [`None`] for decisions and root assignments
    /// without a clause.
    pub fn get_reason(&self) -> Option<ClauseReference> {
        self.reason
    }

    /// The polarity of the last assignment made during search.
    pub fn get_saved_phase(&self) -> bool {
        self.saved_phase
    }

    /// The number of root-level assignments at the time this variable was assigned. The value
    /// is only recorded here; it is consumed by passes outside of propagation.
    pub fn get_fixed_epoch(&self) -> u64 {
        self.fixed_epoch
    }

    pub fn is_eliminated(&self) -> bool {
        self.is_eliminated
    }
}

/// The value store of the variables together with the trail of assigned literals.
///
/// The value of every literal is stored for both polarities, so that looking up a literal never
/// has to inspect its sign.
#[derive(Clone, Debug, Default)]
pub struct Assignments {
    values: KeyedVec<Literal, LiteralValue>,
    variable_info: KeyedVec<Variable, VariableInfo>,
    trail: Trail<Literal>,
    num_fixed: u64,
}

impl Assignments {
    pub(crate) fn grow(&mut self) -> Variable {
        let variable = self.variable_info.push(VariableInfo::default());
        let _ = self.values.push(LiteralValue::Unassigned);
        let _ = self.values.push(LiteralValue::Unassigned);
        variable
    }

    pub fn num_variables(&self) -> u32 {
        self.variable_info.len() as u32
    }

    pub fn get_literal_value(&self, literal: Literal) -> LiteralValue {
        self.values[literal]
    }

    pub fn is_literal_assigned_true(&self, literal: Literal) -> bool {
        self.values[literal].is_true()
    }

    pub fn is_literal_assigned_false(&self, literal: Literal) -> bool {
        self.values[literal].is_false()
    }

    pub fn is_literal_unassigned(&self, literal: Literal) -> bool {
        self.values[literal].is_unassigned()
    }

    pub fn get_variable_info(&self, variable: Variable) -> &VariableInfo {
        &self.variable_info[variable]
    }

    pub fn get_decision_level(&self) -> usize {
        self.trail.get_decision_level()
    }

    pub fn is_at_the_root_level(&self) -> bool {
        self.get_decision_level() == 0
    }

    pub(crate) fn increase_decision_level(&mut self) {
        self.trail.increase_decision_level()
    }

    pub fn num_trail_entries(&self) -> usize {
        self.trail.len()
    }

    pub fn get_trail_entry(&self, index: usize) -> Literal {
        self.trail[index]
    }

    /// The assigned literals in the order in which they were assigned.
    pub fn get_trail(&self) -> &[Literal] {
        &self.trail
    }

    pub fn get_literals_on_decision_level(&self, decision_level: usize) -> &[Literal] {
        self.trail.values_on_decision_level(decision_level)
    }

    /// The number of assignments made at the root level so far.
    pub fn num_fixed(&self) -> u64 {
        self.num_fixed
    }

    pub(crate) fn mark_eliminated(&mut self, variable: Variable) {
        self.variable_info[variable].is_eliminated = true;
    }

    pub(crate) fn assign(
        &mut self,
        literal: Literal,
        reason: Option<ClauseReference>,
        mode: SolverMode,
    ) {
        let variable = literal.get_variable();
        tendril_assert_simple!(
            self.is_literal_unassigned(literal),
            "Literal {literal} is already assigned"
        );
        tendril_assert_simple!(
            !self.variable_info[variable].is_eliminated || reason.is_none(),
            "Eliminated variable {variable} can only be assigned without a reason"
        );

        let decision_level = self.get_decision_level();
        if decision_level == 0 {
            self.num_fixed += 1;
        }

        let trail_position = self.trail.len();
        let num_fixed = self.num_fixed;
        let info = &mut self.variable_info[variable];
        info.decision_level = decision_level;
        info.trail_position = trail_position;
        info.reason = reason;
        if mode == SolverMode::Search {
            info.saved_phase = literal.is_positive();
        }
        info.fixed_epoch = num_fixed;

        self.values[literal] = LiteralValue::True;
        self.values[!literal] = LiteralValue::False;
        tendril_assert_moderate!(self.is_literal_assigned_false(!literal));

        self.trail.push(literal);
        trace!("assign {literal} at level {decision_level} with reason {reason:?}");
    }

    /// Removes the assignments above `new_decision_level`. The information of the removed
    /// variables is left in place.
    pub(crate) fn synchronise(&mut self, new_decision_level: usize) {
        tendril_assert_simple!(new_decision_level < self.get_decision_level());
        for literal in self.trail.synchronise(new_decision_level) {
            self.values[literal] = LiteralValue::Unassigned;
            self.values[!literal] = LiteralValue::Unassigned;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignments_with_variables(num_variables: usize) -> Assignments {
        let mut assignments = Assignments::default();
        for _ in 0..num_variables {
            let _ = assignments.grow();
        }
        assignments
    }

    #[test]
    fn both_polarities_are_written_on_assignment() {
        let mut assignments = assignments_with_variables(2);
        let literal = Literal::from_signed(-2);

        assignments.assign(literal, None, SolverMode::Search);

        assert_eq!(LiteralValue::True, assignments.get_literal_value(literal));
        assert_eq!(LiteralValue::False, assignments.get_literal_value(!literal));
        assert!(assignments.is_literal_unassigned(Literal::from_signed(1)));
        assert!(assignments.is_literal_unassigned(Literal::from_signed(-1)));
    }

    #[test]
    fn root_assignments_increase_the_fixed_count() {
        let mut assignments = assignments_with_variables(3);

        assignments.assign(Literal::from_signed(1), None, SolverMode::Search);
        assignments.assign(Literal::from_signed(2), None, SolverMode::Search);
        assignments.increase_decision_level();
        assignments.assign(Literal::from_signed(3), None, SolverMode::Search);

        assert_eq!(2, assignments.num_fixed());
        let info = assignments.get_variable_info(Literal::from_signed(3).get_variable());
        assert_eq!(2, info.get_fixed_epoch());
        assert_eq!(1, info.get_decision_level());
        assert_eq!(2, info.get_trail_position());
    }

    #[test]
    fn phase_is_only_saved_during_search() {
        let mut assignments = assignments_with_variables(2);
        assignments.increase_decision_level();

        assignments.assign(Literal::from_signed(-1), None, SolverMode::Search);
        assignments.assign(Literal::from_signed(-2), None, SolverMode::Simplifying);

        let first = assignments.get_variable_info(Literal::from_signed(1).get_variable());
        let second = assignments.get_variable_info(Literal::from_signed(2).get_variable());
        assert!(!first.get_saved_phase());
        assert!(second.get_saved_phase());
    }

    #[test]
    fn synchronising_unassigns_but_keeps_stale_information() {
        let mut assignments = assignments_with_variables(2);
        assignments.assign(Literal::from_signed(1), None, SolverMode::Search);
        assignments.increase_decision_level();
        assignments.assign(Literal::from_signed(-2), None, SolverMode::Search);

        assignments.synchronise(0);

        assert_eq!(&[Literal::from_signed(1)], assignments.get_trail());
        assert!(assignments.is_literal_unassigned(Literal::from_signed(2)));
        assert!(assignments.is_literal_unassigned(Literal::from_signed(-2)));
        let info = assignments.get_variable_info(Literal::from_signed(2).get_variable());
        assert_eq!(1, info.get_decision_level());
        assert!(!info.get_saved_phase());
    }

    #[test]
    #[should_panic]
    fn assigning_an_assigned_literal_panics() {
        let mut assignments = assignments_with_variables(1);
        assignments.assign(Literal::from_signed(1), None, SolverMode::Search);
        assignments.assign(Literal::from_signed(-1), None, SolverMode::Search);
    }

    #[test]
    fn literal_values_negate_symmetrically() {
        assert_eq!(LiteralValue::False, !LiteralValue::True);
        assert_eq!(LiteralValue::True, !LiteralValue::False);
        assert_eq!(LiteralValue::Unassigned, !LiteralValue::Unassigned);
    }
}
