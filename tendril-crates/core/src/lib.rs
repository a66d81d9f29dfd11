//! The unit-propagation core of a conflict-driven clause-learning SAT solver.
//!
//! The crate keeps the assignment of the propositional variables together with the decision
//! trail, the two-watched-literal structure over the clauses, and the propagation loop which
//! derives forced assignments until a fixpoint or a conflict is reached. Clause management,
//! branching and conflict analysis are left to the surrounding solver; they interact with the
//! [`PropagationEngine`] through the trail, the reasons and the conflict marker.
//!
//! ```
//! # use tendril_core::ClauseAllocator;
//! # use tendril_core::Literal;
//! # use tendril_core::PropagationEngine;
//! # use tendril_core::SolverMode;
//! let mut engine = PropagationEngine::default();
//! let mut clauses = ClauseAllocator::default();
//! engine.grow(2);
//!
//! let clause = vec![Literal::from_signed(1), Literal::from_signed(2)];
//! let _ = engine.add_clause(clause, &mut clauses).unwrap();
//!
//! engine.new_decision_level();
//! engine.assign_decision(Literal::from_signed(-2), SolverMode::Search);
//! assert!(engine.propagate(&mut clauses, SolverMode::Search).is_ok());
//! assert!(engine.assignments().is_literal_assigned_true(Literal::from_signed(1)));
//! ```
pub(crate) mod asserts;
pub mod basic_types;
pub mod containers;
pub mod engine;
pub mod statistics;

pub use crate::basic_types::ClauseDatabaseError;
pub use crate::engine::clauses::ClauseAllocator;
pub use crate::engine::clauses::ClauseReference;
pub use crate::engine::variables::Literal;
pub use crate::engine::variables::Variable;
pub use crate::engine::PropagationEngine;
pub use crate::engine::PropagatorOptions;
pub use crate::engine::SolverMode;
