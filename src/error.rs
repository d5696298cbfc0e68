//! Error types for symbol registration and signature parsing.
//!
//! Only recoverable conditions live here: a rejected registration leaves the
//! [`EquationSet`](crate::eqset::EquationSet) untouched and the caller may
//! retry with a corrected signature. Malformed expression trees are a
//! different class entirely and abort evaluation; see
//! [`MathNode::evaluate`](crate::nodes::MathNode::evaluate).
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MathError {
    /// One argument name in a candidate signature is already registered as a
    /// symbol.
    #[error(
        "`{symbol}` has a signature argument `{argument}` which is already a defined function"
    )]
    ArgumentShadowsSymbol { symbol: String, argument: String },

    /// Several argument names in a candidate signature are already registered
    /// as symbols.
    #[error(
        "`{symbol}` has arguments {arguments:?} in the signature which are already defined functions"
    )]
    ArgumentsShadowSymbols {
        symbol: String,
        arguments: Vec<String>,
    },

    /// The candidate symbol name already appears as an argument of some
    /// registered symbol.
    #[error(
        "`{symbol}` can't be used as a function, it is already defined as a domain variable"
    )]
    SymbolIsDomainVariable { symbol: String },

    /// The signature text cannot be split into a name and an argument list.
    #[error("signature `{signature}` cannot be split into a name and argument list")]
    MalformedSignature { signature: String },
}

pub type MathResult<T> = Result<T, MathError>;
