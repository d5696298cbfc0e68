//! Expression trees and their vectorized evaluation.
//!
//! The external parser builds a [`MathNode`] tree bottom-up; evaluation is a
//! depth-first walk that pulls raw samples from a [`Domain`] at the leaves
//! and combines them elementwise on the way back up. Nodes are immutable
//! after construction and evaluation is pure, so a tree may be evaluated any
//! number of times against different domains.
//!
//! Buffer reuse: a variable leaf copies its samples out of the domain
//! exactly once; every interior node then mutates its first child's buffer
//! in place and returns it, so interior evaluation allocates nothing beyond
//! the leaves. Callers therefore get an owned buffer, but one that started
//! life inside a child evaluation. Assert on values, not on identity.
//!
//! Arity is a property of the variant and is enforced at evaluation time:
//! a tree with missing children is a parser bug, and evaluating it aborts
//! with a panic naming the offending node. See the crate error docs for the
//! split between recoverable and fatal conditions.
use std::fmt;

use strum::{EnumDiscriminants, EnumIs};

use crate::domain::Domain;

/// Operator or leaf carried by a [`MathNode`].
///
/// A closed set: evaluation dispatches on the variant with a `match`, and
/// each variant fixes its own arity (1 for the elementwise functions, 2 for
/// the binary operators, ≥ 1 for the reductions).
#[derive(Debug, Clone, PartialEq, EnumIs, EnumDiscriminants)]
#[strum_discriminants(name(NodeOp))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Literal value, broadcast across the sample count.
    Constant(f64),
    /// Reference to a domain variable.
    Variable(String),

    // Binary elementwise operators.
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,

    // Unary elementwise functions.
    Neg,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Exp,
    Ln,
    Log10,
    Floor,
    Ceil,
    Abs,

    // Variadic reductions.
    Min,
    Max,
}

impl fmt::Display for NodeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeOp::Constant => "const",
            NodeOp::Variable => "var",
            NodeOp::Add => "add",
            NodeOp::Sub => "sub",
            NodeOp::Mul => "mul",
            NodeOp::Div => "div",
            NodeOp::Rem => "rem",
            NodeOp::Pow => "pow",
            NodeOp::Neg => "neg",
            NodeOp::Sin => "sin",
            NodeOp::Cos => "cos",
            NodeOp::Tan => "tan",
            NodeOp::Asin => "asin",
            NodeOp::Acos => "acos",
            NodeOp::Atan => "atan",
            NodeOp::Sqrt => "sqrt",
            NodeOp::Exp => "exp",
            NodeOp::Ln => "ln",
            NodeOp::Log10 => "log10",
            NodeOp::Floor => "floor",
            NodeOp::Ceil => "ceil",
            NodeOp::Abs => "abs",
            NodeOp::Min => "min",
            NodeOp::Max => "max",
        };
        f.write_str(s)
    }
}

/// One node of an expression tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MathNode {
    /// Opaque label, used only in diagnostics.
    id: String,
    kind: NodeKind,
    children: Vec<MathNode>,
}

impl MathNode {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        MathNode {
            id: id.into(),
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(
        id: impl Into<String>,
        kind: NodeKind,
        children: Vec<MathNode>,
    ) -> Self {
        MathNode {
            id: id.into(),
            kind,
            children,
        }
    }

    /// Leaf carrying a literal value.
    pub fn constant(id: impl Into<String>, value: f64) -> Self {
        Self::new(id, NodeKind::Constant(value))
    }

    /// Leaf referencing a domain variable.
    pub fn variable(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Variable(name.into()))
    }

    /// Append a child; the parser builds trees bottom-up with this.
    pub fn push_child(&mut self, child: MathNode) {
        self.children.push(child);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Operator/leaf discriminant, handy for dispatch without matching on
    /// carried data.
    pub fn op(&self) -> NodeOp {
        NodeOp::from(&self.kind)
    }

    pub fn children(&self) -> &[MathNode] {
        &self.children
    }

    /// Whether this node is a genuine multi-argument reduction (a min/max
    /// over more than one child) rather than a single-array pass-through.
    pub fn is_splittable(&self) -> bool {
        matches!(self.kind, NodeKind::Min | NodeKind::Max) && self.children.len() > 1
    }

    /// Evaluate the tree against `domain`, producing one value per domain
    /// sample.
    ///
    /// # Panics
    ///
    /// Panics when the tree is malformed: a node has fewer children than its
    /// variant requires, a reduction has no children at all, or a variable
    /// is unbound or shorter than the domain's sample count. These are
    /// parser bugs, not runtime conditions, and the message names the
    /// offending node's id.
    pub fn evaluate(&self, domain: &dyn Domain) -> Vec<f64> {
        match &self.kind {
            NodeKind::Constant(value) => vec![*value; domain.sample_count()],
            NodeKind::Variable(name) => self.resolve(domain, name),

            NodeKind::Add => self.binary(domain, |a, b| a + b),
            NodeKind::Sub => self.binary(domain, |a, b| a - b),
            NodeKind::Mul => self.binary(domain, |a, b| a * b),
            NodeKind::Div => self.binary(domain, |a, b| a / b),
            NodeKind::Rem => self.binary(domain, |a, b| a % b),
            NodeKind::Pow => self.binary(domain, f64::powf),

            NodeKind::Neg => self.unary(domain, |v| -v),
            NodeKind::Sin => self.unary(domain, f64::sin),
            NodeKind::Cos => self.unary(domain, f64::cos),
            NodeKind::Tan => self.unary(domain, f64::tan),
            NodeKind::Asin => self.unary(domain, f64::asin),
            NodeKind::Acos => self.unary(domain, f64::acos),
            NodeKind::Atan => self.unary(domain, f64::atan),
            NodeKind::Sqrt => self.unary(domain, f64::sqrt),
            NodeKind::Exp => self.unary(domain, f64::exp),
            NodeKind::Ln => self.unary(domain, f64::ln),
            NodeKind::Log10 => self.unary(domain, f64::log10),
            NodeKind::Floor => self.unary(domain, f64::floor),
            NodeKind::Ceil => self.unary(domain, f64::ceil),
            NodeKind::Abs => self.unary(domain, f64::abs),

            NodeKind::Min => self.reduce(domain, f64::INFINITY, f64::min),
            NodeKind::Max => self.reduce(domain, f64::NEG_INFINITY, f64::max),
        }
    }

    /// Copy a variable's samples out of the domain. The single allocation
    /// point of an evaluation besides constants.
    fn resolve(&self, domain: &dyn Domain, name: &str) -> Vec<f64> {
        let count = domain.sample_count();
        let Some(samples) = domain.samples(name) else {
            panic!(
                "node `{}` refers to variable `{name}` which is not bound in the domain",
                self.id
            );
        };
        if samples.len() < count {
            panic!(
                "domain sequence for `{name}` has {} samples, expected {count} (node `{}`)",
                samples.len(),
                self.id
            );
        }
        samples[..count].to_vec()
    }

    /// Child accessor with the arity diagnostic of the evaluation contract.
    fn child(&self, index: usize) -> &MathNode {
        self.children.get(index).unwrap_or_else(|| {
            panic!(
                "{} node `{}` is missing argument {}",
                self.op(),
                self.id,
                index + 1
            )
        })
    }

    fn unary(&self, domain: &dyn Domain, f: impl Fn(f64) -> f64) -> Vec<f64> {
        let mut buf = self.child(0).evaluate(domain);
        for v in &mut buf {
            *v = f(*v);
        }
        buf
    }

    fn binary(&self, domain: &dyn Domain, f: impl Fn(f64, f64) -> f64) -> Vec<f64> {
        let mut lhs = self.child(0).evaluate(domain);
        let rhs = self.child(1).evaluate(domain);
        for (l, r) in lhs.iter_mut().zip(rhs) {
            *l = f(*l, r);
        }
        lhs
    }

    /// Min/max evaluation. One child collapses that child's array to its own
    /// reduction value, broadcast across the buffer; several children reduce
    /// index-by-index across the sibling arrays, seeded with the reduction
    /// identity. NaN and infinity follow `f64::min`/`f64::max`.
    fn reduce(&self, domain: &dyn Domain, seed: f64, f: fn(f64, f64) -> f64) -> Vec<f64> {
        match self.children.len() {
            0 => panic!(
                "{} function `{}` doesn't have any arguments",
                self.op(),
                self.id
            ),
            1 => {
                let mut buf = self.child(0).evaluate(domain);
                let folded = buf.iter().copied().fold(seed, f);
                buf.fill(folded);
                buf
            }
            _ => {
                let mut bufs: Vec<Vec<f64>> = self
                    .children
                    .iter()
                    .map(|child| child.evaluate(domain))
                    .collect();
                let mut out = bufs.swap_remove(0);
                for (i, slot) in out.iter_mut().enumerate() {
                    let mut current = f(seed, *slot);
                    for buf in &bufs {
                        current = f(current, buf[i]);
                    }
                    *slot = current;
                }
                out
            }
        }
    }
}

/// Prefix-form rendering: `min(pow(x,2),y)`.
impl fmt::Display for MathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Constant(value) => write!(f, "{value}"),
            NodeKind::Variable(name) => f.write_str(name),
            _ => {
                write!(f, "{}(", self.op())?;
                for (i, child) in self.children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
        }
    }
}
