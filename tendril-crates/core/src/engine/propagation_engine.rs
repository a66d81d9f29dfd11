use fnv::FnvHashMap;
use log::debug;
use log::trace;

use super::assignments::Assignments;
use super::assignments::LiteralValue;
use super::clauses::Clause;
use super::clauses::ClauseAllocator;
use super::clauses::ClauseReference;
use super::propagation_statistics::PropagationStatistics;
use super::propagation_statistics::TraversalStatistics;
use super::variables::Literal;
use super::variables::Variable;
use super::watch_lists::WatchLists;
use super::PropagatorOptions;
use super::SolverMode;
use crate::basic_types::ClauseDatabaseError;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::tendril_assert_advanced;
use crate::tendril_assert_eq_simple;
use crate::tendril_assert_moderate;
use crate::tendril_assert_simple;

/// Performs unit propagation over the clauses using two watched literals per clause.
///
/// The engine owns the assignment, the trail and the watch lists; the clauses themselves are
/// owned by a [`ClauseAllocator`] which is passed to the calls that need to inspect them.
///
/// Propagation either reaches a fixpoint or stops at the first falsified clause, which is then
/// kept as the conflict until [`PropagationEngine::clear_conflict`] is called by whoever
/// analyses it.
#[derive(Debug, Default)]
pub struct PropagationEngine {
    assignments: Assignments,
    watch_lists: WatchLists,
    /// The position on the trail of the next literal whose watches have to be inspected.
    next_position_on_trail_to_propagate: usize,
    conflict: Option<ClauseReference>,
    statistics: PropagationStatistics,
    options: PropagatorOptions,
}

impl PropagationEngine {
    pub fn new(options: PropagatorOptions) -> Self {
        PropagationEngine {
            options,
            ..Default::default()
        }
    }

    pub fn create_variable(&mut self) -> Variable {
        self.watch_lists.grow();
        self.assignments.grow()
    }

    pub fn grow(&mut self, num_variables: usize) {
        for _ in 0..num_variables {
            let _ = self.create_variable();
        }
    }

    pub fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    pub fn watch_lists(&self) -> &WatchLists {
        &self.watch_lists
    }

    pub fn statistics(&self) -> &PropagationStatistics {
        &self.statistics
    }

    pub fn options(&self) -> &PropagatorOptions {
        &self.options
    }

    pub fn get_decision_level(&self) -> usize {
        self.assignments.get_decision_level()
    }

    pub fn get_conflict(&self) -> Option<ClauseReference> {
        self.conflict
    }

    /// Removes the conflict marker; the caller is expected to have backtracked.
    pub fn clear_conflict(&mut self) {
        self.conflict = None;
    }

    /// The position on the trail of the next literal to propagate.
    pub fn get_propagation_cursor(&self) -> usize {
        self.next_position_on_trail_to_propagate
    }

    pub fn is_propagation_complete(&self) -> bool {
        self.next_position_on_trail_to_propagate == self.assignments.num_trail_entries()
    }

    /// Only root-level assignments are allowed for eliminated variables afterwards.
    pub fn mark_eliminated(&mut self, variable: Variable) {
        self.assignments.mark_eliminated(variable);
    }

    /// Stores the clause in the allocator and watches its first two literals.
    pub fn add_clause(
        &mut self,
        literals: Vec<Literal>,
        clause_allocator: &mut ClauseAllocator,
    ) -> Result<ClauseReference, ClauseDatabaseError> {
        if let Some(&literal) = literals
            .iter()
            .find(|literal| literal.get_variable().get_index() >= self.assignments.num_variables())
        {
            return Err(ClauseDatabaseError::UnknownVariable { literal });
        }

        let clause_reference = clause_allocator.create_clause(literals)?;
        self.watch_clause(clause_reference, clause_allocator);
        Ok(clause_reference)
    }

    /// Watches the first two literals of a clause which is already stored in the allocator.
    ///
    /// The caller has to make sure that the watched literals are not falsified while the other
    /// literals can still be satisfied.
    pub fn watch_clause(
        &mut self,
        clause_reference: ClauseReference,
        clause_allocator: &ClauseAllocator,
    ) {
        let clause = &clause_allocator[clause_reference];
        tendril_assert_simple!(!clause.is_garbage(), "Cannot watch a garbage clause");

        let size = clause.len() as u32;
        self.watch_lists
            .watch_literal(clause[0], clause[1], clause_reference, size);
        self.watch_lists
            .watch_literal(clause[1], clause[0], clause_reference, size);
    }

    /// Removes the watches of all clauses which are marked as garbage.
    pub fn flush_garbage_watches(&mut self, clause_allocator: &ClauseAllocator) -> usize {
        let num_removed = self.watch_lists.flush_garbage(clause_allocator);
        debug!("flushed {num_removed} watches of garbage clauses");
        num_removed
    }

    pub fn new_decision_level(&mut self) {
        self.assignments.increase_decision_level();
    }

    /// Assigns a literal which holds permanently.
    pub fn assign_unit(&mut self, literal: Literal, mode: SolverMode) {
        tendril_assert_simple!(self.assignments.is_at_the_root_level());
        self.assign_literal(literal, None, mode);
    }

    pub fn assign_decision(&mut self, literal: Literal, mode: SolverMode) {
        tendril_assert_simple!(!self.assignments.is_at_the_root_level());
        tendril_assert_simple!(
            self.is_propagation_complete(),
            "Decisions can only be made at the propagation fixpoint"
        );
        self.assign_literal(literal, None, mode);
    }

    /// Assigns a literal forced by `reason`, e.g. the asserting literal of a learned clause.
    pub fn assign_driving(&mut self, literal: Literal, reason: ClauseReference, mode: SolverMode) {
        self.assign_literal(literal, Some(reason), mode);
    }

    #[inline]
    fn assign_literal(
        &mut self,
        literal: Literal,
        reason: Option<ClauseReference>,
        mode: SolverMode,
    ) {
        self.assignments.assign(literal, reason, mode);

        if self.options.prefetch_watches {
            self.watch_lists.prefetch(!literal);
        }
    }

    /// Undoes all assignments above `new_decision_level`. The conflict marker is left untouched.
    pub fn backtrack(&mut self, new_decision_level: usize) {
        tendril_assert_simple!(new_decision_level < self.get_decision_level());

        self.assignments.synchronise(new_decision_level);
        tendril_assert_eq_simple!(new_decision_level, self.get_decision_level());
        self.next_position_on_trail_to_propagate = self
            .next_position_on_trail_to_propagate
            .min(self.assignments.num_trail_entries());

        debug!("backtracked to level {new_decision_level}");
    }

    /// Propagates the literals on the trail which have not been propagated yet.
    ///
    /// Returns the falsified clause if a conflict is found, in which case it is also stored as
    /// the conflict of the engine and the trail entry being processed stays unpropagated.
    pub fn propagate(
        &mut self,
        clause_allocator: &mut ClauseAllocator,
        mode: SolverMode,
    ) -> Result<(), ClauseReference> {
        tendril_assert_simple!(
            self.conflict.is_none(),
            "Propagation cannot be started while a conflict is set"
        );

        // the counters are updated once propagation stops
        let position_before = self.next_position_on_trail_to_propagate;

        while self.conflict.is_none()
            && self.next_position_on_trail_to_propagate < self.assignments.num_trail_entries()
        {
            let true_literal = self
                .assignments
                .get_trail_entry(self.next_position_on_trail_to_propagate);
            let false_literal = !true_literal;
            trace!("propagating {true_literal}");

            // The watches are compacted in place: the watches which are kept are written back at
            // `end_index`, which never overtakes `current_index`.
            let mut end_index: usize = 0;
            let mut current_index: usize = 0;
            while current_index < self.watch_lists[false_literal].len() {
                let watch = self.watch_lists[false_literal][current_index];
                self.watch_lists[false_literal][end_index] = watch;
                current_index += 1;
                end_index += 1;

                let blocking_value = self.assignments.get_literal_value(watch.blocking_literal);
                if blocking_value.is_true() {
                    continue;
                }

                // the blocking literal of a binary clause is its other literal
                if watch.is_binary() {
                    if blocking_value.is_false() {
                        self.conflict = Some(watch.clause_reference);
                        break;
                    }

                    self.assign_literal(watch.blocking_literal, Some(watch.clause_reference), mode);
                    continue;
                }

                if self.options.count_expensive_statistics {
                    self.traversal_statistics_mut(mode).num_visited_clauses += 1;
                }

                let clause = &mut clause_allocator[watch.clause_reference];
                if clause.is_garbage() {
                    continue;
                }

                // the literal which became false is placed at position 1
                if clause[0] == false_literal {
                    clause.swap(0, 1);
                }
                tendril_assert_moderate!(clause[1] == false_literal);

                let other_watched_literal = clause[0];
                let other_watched_value = self.assignments.get_literal_value(other_watched_literal);
                if other_watched_value.is_true() {
                    self.watch_lists[false_literal][end_index - 1].blocking_literal =
                        other_watched_literal;
                    continue;
                }

                tendril_assert_moderate!(watch.size as usize == clause.len());
                let (replacement_index, replacement_value, num_traversed) =
                    search_replacement_watch(clause, &self.assignments);

                if self.options.count_expensive_statistics {
                    self.traversal_statistics_mut(mode).num_traversed_literals +=
                        num_traversed as u64;
                }

                if replacement_value.is_true() {
                    self.watch_lists[false_literal][end_index - 1].blocking_literal =
                        clause[replacement_index];
                } else if replacement_value.is_unassigned() {
                    clause.swap(1, replacement_index);
                    let new_watched_literal = clause[1];
                    trace!(
                        "moving watch of {} from {false_literal} to {new_watched_literal}",
                        watch.clause_reference
                    );

                    self.watch_lists.watch_literal(
                        new_watched_literal,
                        other_watched_literal,
                        watch.clause_reference,
                        watch.size,
                    );
                    // drop the watch from the list of the false literal
                    end_index -= 1;
                } else if other_watched_value.is_unassigned() {
                    self.assign_literal(other_watched_literal, Some(watch.clause_reference), mode);
                } else {
                    self.conflict = Some(watch.clause_reference);
                    break;
                }
            }

            // keep the watches which were not inspected because of a conflict
            let watch_list = &mut self.watch_lists[false_literal];
            let num_remaining = watch_list.len() - current_index;
            watch_list.copy_within(current_index.., end_index);
            watch_list.truncate(end_index + num_remaining);

            if self.conflict.is_none() {
                self.next_position_on_trail_to_propagate += 1;
            }
        }

        let num_propagated =
            (self.next_position_on_trail_to_propagate - position_before) as u64;
        match mode {
            SolverMode::Search => self.statistics.num_propagations += num_propagated,
            SolverMode::Simplifying => {
                self.statistics.num_simplifying_propagations += num_propagated
            }
        }

        if let Some(conflicting_clause) = self.conflict {
            if mode == SolverMode::Search {
                self.statistics.num_conflicts += 1;
            }
            debug!(
                "conflict in {conflicting_clause}: {}",
                clause_allocator[conflicting_clause]
            );
            return Err(conflicting_clause);
        }

        tendril_assert_advanced!(self.debug_check_state(clause_allocator));
        Ok(())
    }

    fn traversal_statistics_mut(&mut self, mode: SolverMode) -> &mut TraversalStatistics {
        match mode {
            SolverMode::Search => &mut self.statistics.search,
            SolverMode::Simplifying => &mut self.statistics.simplifying,
        }
    }

    pub fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }

    /// Checks the internal state against the clauses, panicking on the first violation.
    ///
    /// Verified are the symmetry of the value store, the placement of the watches, the reasons of
    /// the propagated literals, and, at a fixpoint without conflict, that no clause is falsified
    /// or unit.
    pub fn debug_check_state(&self, clause_allocator: &ClauseAllocator) -> bool {
        let assignments = &self.assignments;

        for index in 0..assignments.num_variables() {
            let literal = Literal::new(Variable::new(index), true);
            assert_eq!(
                assignments.get_literal_value(literal),
                !assignments.get_literal_value(!literal),
                "The value store is not symmetric for variable {}.",
                literal.get_variable()
            );
        }

        assert!(
            self.next_position_on_trail_to_propagate <= assignments.num_trail_entries(),
            "The propagation cursor is beyond the end of the trail."
        );

        // every live clause is watched exactly twice, on its first two literals
        let mut num_watches: FnvHashMap<ClauseReference, usize> = FnvHashMap::default();
        for (literal, watch) in self.watch_lists.iter_watches() {
            let clause = &clause_allocator[watch.get_clause_reference()];
            if clause.is_garbage() {
                continue;
            }

            *num_watches.entry(watch.get_clause_reference()).or_insert(0) += 1;
            assert!(
                clause[0] == literal || clause[1] == literal,
                "Clause {clause} is in the watch list of {literal} which it does not watch."
            );
            assert_eq!(
                watch.get_size() as usize,
                clause.len(),
                "The watch of {clause} records the wrong size."
            );
            assert!(
                clause
                    .get_literal_slice()
                    .contains(&watch.get_blocking_literal()),
                "The blocking literal of the watch of {clause} is not part of the clause."
            );
        }
        for clause_reference in clause_allocator.iter_live_clauses() {
            let count = num_watches.get(&clause_reference).copied().unwrap_or(0);
            // clauses which were never registered are not watched at all
            assert!(
                count == 0 || count == 2,
                "Clause {} is watched {count} times.",
                clause_allocator[clause_reference]
            );
        }

        // the reason of a propagated literal contains the literal and falsifies the others
        for &literal in assignments.get_trail() {
            let Some(reason) = assignments.get_variable_info(literal.get_variable()).get_reason()
            else {
                continue;
            };
            let clause = &clause_allocator[reason];
            if clause.is_garbage() {
                continue;
            }

            assert!(
                clause.get_literal_slice().contains(&literal),
                "The reason {clause} of {literal} does not contain it."
            );
            assert!(
                clause
                    .get_literal_slice()
                    .iter()
                    .filter(|&&other| other != literal)
                    .all(|&other| assignments.is_literal_assigned_false(other)),
                "The reason {clause} of {literal} is not unit."
            );
        }

        if self.conflict.is_none() && self.is_propagation_complete() {
            for clause_reference in num_watches.keys() {
                let clause = &clause_allocator[*clause_reference];
                let is_satisfied = clause
                    .get_literal_slice()
                    .iter()
                    .any(|&literal| assignments.is_literal_assigned_true(literal));
                let num_unassigned = clause
                    .get_literal_slice()
                    .iter()
                    .filter(|&&literal| assignments.is_literal_unassigned(literal))
                    .count();

                assert!(
                    is_satisfied || num_unassigned >= 2,
                    "Propagation missed a conflict or a propagation in {clause}."
                );
            }
        }

        true
    }
}

/// Searches the unwatched literals of the clause for a literal which is not false.
///
/// Returns the position where the search stopped, the value of the literal at that position
/// ([`LiteralValue::False`] if nothing was found) and the number of skipped literals.
///
/// Long clauses resume at their cached position, wrap around to the first unwatched literal,
/// and store where the search stopped. This bounds the accumulated cost of repeatedly searching
/// the same long clause.
#[inline]
fn search_replacement_watch(
    clause: &mut Clause,
    assignments: &Assignments,
) -> (usize, LiteralValue, usize) {
    let size = clause.len();
    let mut value = LiteralValue::False;

    let Some(position) = clause.get_search_position() else {
        let mut index = 2;
        while index < size {
            value = assignments.get_literal_value(clause[index]);
            if !value.is_false() {
                break;
            }
            index += 1;
        }
        return (index, value, index - 2);
    };

    let mut index = position;
    while index < size {
        value = assignments.get_literal_value(clause[index]);
        if !value.is_false() {
            break;
        }
        index += 1;
    }
    let mut num_traversed = index - position;

    if value.is_false() {
        index = 2;
        while index < position {
            value = assignments.get_literal_value(clause[index]);
            if !value.is_false() {
                break;
            }
            index += 1;
        }
        num_traversed += index - 2;
    }

    clause.set_search_position(index);
    (index, value, num_traversed)
}
