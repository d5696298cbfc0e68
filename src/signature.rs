//! Signature scanning and definition classification.
//!
//! The textual expression parser lives outside this crate; the symbol table
//! only needs two derived values from a signature string (`"f(x,y)"` or a
//! bare `"a"`): the symbol name and the ordered argument list. Definitions
//! stay opaque apart from one question, whether they denote a matrix/array
//! value, which decides independent-variable metadata derivation.
use smallvec::SmallVec;

use crate::error::{MathError, MathResult};

/// Metadata key naming the sole independent variable of a matrix-valued
/// symbol with one argument.
pub const INDEPENDENT_VARIABLE: &str = "independent variable";
/// Metadata key naming the first independent variable of a matrix-valued
/// symbol with two arguments.
pub const INDEPENDENT_VARIABLE_1: &str = "independent variable 1";
/// Metadata key naming the second independent variable of a matrix-valued
/// symbol with two arguments.
pub const INDEPENDENT_VARIABLE_2: &str = "independent variable 2";

/// Argument lists are almost always one or two names; keep them inline.
pub type ArgList = SmallVec<[String; 2]>;

/// Extract the symbol name from a signature: `"f(x,y)"` gives `"f"`, a bare
/// `"a"` gives `"a"`.
pub fn function_name(signature: &str) -> MathResult<&str> {
    let signature = signature.trim();
    let name = match signature.find('(') {
        Some(open) => signature[..open].trim_end(),
        None => signature,
    };
    if name.is_empty() {
        return Err(MathError::MalformedSignature {
            signature: signature.to_string(),
        });
    }
    Ok(name)
}

/// Extract the argument names from a signature, in declaration order.
///
/// Bare names and empty parentheses give an empty list (the symbol is a
/// constant). Unbalanced parentheses and blank argument names are rejected.
pub fn function_args(signature: &str) -> MathResult<ArgList> {
    let signature = signature.trim();
    let Some(open) = signature.find('(') else {
        return Ok(ArgList::new());
    };
    let malformed = || MathError::MalformedSignature {
        signature: signature.to_string(),
    };
    let close = signature.rfind(')').ok_or_else(malformed)?;
    if close < open {
        return Err(malformed());
    }
    let inner = signature[open + 1..close].trim();
    if inner.is_empty() {
        return Ok(ArgList::new());
    }
    let mut args = ArgList::new();
    for arg in inner.split(',') {
        let arg = arg.trim();
        if arg.is_empty() {
            return Err(malformed());
        }
        args.push(arg.to_string());
    }
    Ok(args)
}

/// Whether a definition denotes a matrix/array value (an array literal
/// opening with `[`).
pub fn is_matrix(definition: &str) -> bool {
    definition.trim_start().starts_with('[')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_of_function_and_constant() {
        assert_eq!(function_name("f(x,y)").unwrap(), "f");
        assert_eq!(function_name("  a  ").unwrap(), "a");
        assert_eq!(function_name("g (t)").unwrap(), "g");
    }

    #[test]
    fn args_in_declaration_order() {
        let args = function_args("f(x, y)").unwrap();
        assert_eq!(args.as_slice(), ["x".to_string(), "y".to_string()]);
        assert!(function_args("a").unwrap().is_empty());
        assert!(function_args("f()").unwrap().is_empty());
    }

    #[test]
    fn malformed_signatures_are_rejected() {
        assert!(matches!(
            function_name("(x)"),
            Err(MathError::MalformedSignature { .. })
        ));
        assert!(matches!(
            function_args("f(x,y"),
            Err(MathError::MalformedSignature { .. })
        ));
        assert!(matches!(
            function_args("f(x,,y)"),
            Err(MathError::MalformedSignature { .. })
        ));
    }

    #[test]
    fn matrix_classification() {
        assert!(is_matrix("[1 2; 3 4]"));
        assert!(is_matrix("  [0, 1]"));
        assert!(!is_matrix("x + y"));
    }
}
