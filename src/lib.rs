//! Mathtree: a vectorized equation-set and expression-tree evaluation engine.
//!
//! This crate provides the evaluation core of a small mathematical-expression
//! engine:
//! - an [`EquationSet`] symbol table that registers function and constant
//!   definitions with name-collision validation and derived metadata; and
//! - a [`MathNode`] expression-tree evaluator whose nodes compute vectorized
//!   `f64` results by recursively evaluating children against a [`Domain`]
//!   of variable bindings.
//!
//! The textual expression parser, plotting front ends, and persistence are
//! external collaborators: the parser hands the core pre-split signatures
//! and bottom-up node trees, and the core hands back arrays.
//!
//! Evaluation model
//! - Every variable resolves to an ordered sample sequence; all sequences of
//!   one evaluation call share the domain's sample count.
//! - Trees are immutable and evaluation is pure; interior nodes mutate and
//!   return their first child's buffer, so evaluation allocates only at the
//!   leaves.
//!
//! Error model
//! - Registration failures are recoverable [`MathError`] values; the set is
//!   left untouched.
//! - Malformed trees (arity violations, zero-argument reductions, unbound
//!   variables) abort evaluation with a panic naming the offending node.
//!
//! Example
//! ```
//! use mathtree::{EquationSet, MathNode, NodeKind, SampleDomain};
//!
//! let mut eqs = EquationSet::new();
//! eqs.add_symbol("f(x,y)", "min(x^2, y)").unwrap();
//! assert_eq!(eqs.signature("f").as_deref(), Some("f(x,y)"));
//!
//! let mut domain = SampleDomain::new();
//! domain.insert("x", vec![1.0, 2.0, 3.0]);
//! domain.insert("y", vec![5.0, 5.0, 5.0]);
//!
//! // min(x^2, y), as the parser would build it
//! let tree = MathNode::with_children(
//!     "min",
//!     NodeKind::Min,
//!     vec![
//!         MathNode::with_children(
//!             "pow",
//!             NodeKind::Pow,
//!             vec![
//!                 MathNode::variable("x", "x"),
//!                 MathNode::constant("2", 2.0),
//!             ],
//!         ),
//!         MathNode::variable("y", "y"),
//!     ],
//! );
//! assert_eq!(tree.evaluate(&domain), vec![1.0, 4.0, 5.0]);
//! ```
pub mod domain;
pub mod eqset;
pub mod error;
pub mod nodes;
pub mod signature;

pub use domain::{Domain, SampleDomain};
pub use eqset::{EquationSet, Symbol};
pub use error::{MathError, MathResult};
pub use nodes::{MathNode, NodeKind, NodeOp};
