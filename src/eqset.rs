//! The equation set: an ordered symbol table with collision validation.
//!
//! Given the definition `f(x,y) = x + y`, the symbol is `f`, the arguments
//! are `[x, y]`, the definition is `x + y`, and the signature is `f(x,y)`
//! with no spaces. Symbols with an empty argument list are constants.
//!
//! Registration is order-dependent by design: every candidate validates
//! against all previously admitted symbols, so the set behaves as an
//! explicit registration log where the first writer wins. A name may serve
//! as a symbol or as a domain variable, never both.
use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::error::{MathError, MathResult};
use crate::signature::{
    self, ArgList, INDEPENDENT_VARIABLE, INDEPENDENT_VARIABLE_1, INDEPENDENT_VARIABLE_2,
};

/// A named constant or function registered in an [`EquationSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol {
    /// Identifier, unique within the owning set.
    pub name: String,

    /// Parameter names in declaration order; empty for constants.
    pub arguments: ArgList,

    /// Raw textual right-hand side. Opaque to the engine apart from
    /// matrix/array classification.
    pub definition: String,

    /// Key/value annotations; empty unless supplied at registration or
    /// derived for matrix-valued symbols.
    pub metadata: BTreeMap<String, String>,
}

/// Ordered collection of [`Symbol`]s with name-collision validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquationSet {
    entries: Vec<Symbol>,
}

impl EquationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `(signature, definition)` pairs, registering them in
    /// iteration order.
    pub fn from_definitions<I, S, D>(pairs: I) -> MathResult<Self>
    where
        I: IntoIterator<Item = (S, D)>,
        S: AsRef<str>,
        D: AsRef<str>,
    {
        let mut set = EquationSet::new();
        for (sig, def) in pairs {
            set.add_symbol(sig.as_ref(), def.as_ref())?;
        }
        Ok(set)
    }

    /// Register a symbol from its signature and definition.
    ///
    /// `add_symbol("f(x,y)", "x+y")` registers `f` with arguments `[x, y]`;
    /// `add_symbol("a", "1")` registers the constant `a`.
    ///
    /// Validation runs against everything registered so far: no argument
    /// name may shadow an existing symbol, and the new name must not already
    /// be in use as a domain variable. Re-registering an existing name is a
    /// no-op for the stored arguments and definition (first registration
    /// wins), but validation still runs and matrix-valued definitions still
    /// supplement the symbol's derived metadata.
    pub fn add_symbol(&mut self, sig: &str, definition: &str) -> MathResult<()> {
        let name = signature::function_name(sig)?.to_string();
        let arguments = signature::function_args(sig)?;

        // Argument names may not shadow registered symbols. Deduplicate so
        // f(x,x) reports x once.
        let mut shadowed: Vec<String> = Vec::new();
        for arg in &arguments {
            if self.is_defined(arg) && !shadowed.contains(arg) {
                shadowed.push(arg.clone());
            }
        }
        match shadowed.len() {
            0 => {}
            1 => {
                let argument = shadowed.pop().unwrap_or_default();
                debug!("rejecting `{name}`: argument `{argument}` shadows a symbol");
                return Err(MathError::ArgumentShadowsSymbol {
                    symbol: name,
                    argument,
                });
            }
            _ => {
                debug!("rejecting `{name}`: arguments {shadowed:?} shadow symbols");
                return Err(MathError::ArgumentsShadowSymbols {
                    symbol: name,
                    arguments: shadowed,
                });
            }
        }

        // The new name may not reuse an existing domain variable.
        if self
            .entries
            .iter()
            .any(|sym| sym.arguments.iter().any(|arg| *arg == name))
        {
            debug!("rejecting `{name}`: already a domain variable");
            return Err(MathError::SymbolIsDomainVariable { symbol: name });
        }

        let derived = if signature::is_matrix(definition) {
            independent_variable_metadata(&arguments)
        } else {
            BTreeMap::new()
        };

        match self.entry_mut(&name) {
            Some(existing) => {
                // First registration wins; matrix metadata is still
                // supplemented on the re-registration path.
                existing.metadata.extend(derived);
                debug!("symbol `{name}` already registered, keeping first definition");
            }
            None => {
                debug!("registered `{name}` with {} argument(s)", arguments.len());
                self.entries.push(Symbol {
                    name,
                    arguments,
                    definition: definition.to_string(),
                    metadata: derived,
                });
            }
        }
        Ok(())
    }

    /// Register a symbol together with caller-supplied metadata.
    ///
    /// If the name is already registered this is a full no-op, validation
    /// included. Otherwise the symbol is registered as by
    /// [`add_symbol`](Self::add_symbol) and `metadata` is stored, with the
    /// derived independent-variable keys merged on top for matrix-valued
    /// definitions.
    pub fn add_symbol_with_metadata(
        &mut self,
        sig: &str,
        definition: &str,
        metadata: BTreeMap<String, String>,
    ) -> MathResult<()> {
        let name = signature::function_name(sig)?.to_string();
        if self.is_defined(&name) {
            return Ok(());
        }
        let arguments = signature::function_args(sig)?;
        self.add_symbol(sig, definition)?;

        let mut merged = metadata;
        if signature::is_matrix(definition) {
            merged.extend(independent_variable_metadata(&arguments));
        }
        if let Some(sym) = self.entry_mut(&name) {
            sym.metadata = merged;
        }
        Ok(())
    }

    /// Whether `name` is a registered symbol.
    pub fn is_defined(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Reconstruct the normalized signature of a registered symbol:
    /// `name(a,b)` with no spaces and no trailing comma, or the bare name
    /// for constants.
    pub fn signature(&self, name: &str) -> Option<String> {
        let sym = self.entry(name)?;
        if sym.arguments.is_empty() {
            Some(sym.name.clone())
        } else {
            Some(format!("{}({})", sym.name, sym.arguments.join(",")))
        }
    }

    /// Argument names of a registered symbol, in declaration order.
    pub fn arguments(&self, name: &str) -> Option<&[String]> {
        self.entry(name).map(|sym| sym.arguments.as_slice())
    }

    /// Stored definition of a registered symbol.
    pub fn definition(&self, name: &str) -> Option<&str> {
        self.entry(name).map(|sym| sym.definition.as_str())
    }

    /// Sorted, deduplicated union of every symbol's argument names.
    pub fn all_domain_variables(&self) -> Vec<String> {
        let vars: BTreeSet<&String> = self
            .entries
            .iter()
            .flat_map(|sym| sym.arguments.iter())
            .collect();
        vars.into_iter().cloned().collect()
    }

    /// Normalized signatures of all symbols, in registration order.
    pub fn all_signatures(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|sym| self.signature(&sym.name))
            .collect()
    }

    /// Symbol names in registration order.
    pub fn all_symbols(&self) -> Vec<&str> {
        self.entries.iter().map(|sym| sym.name.as_str()).collect()
    }

    /// Metadata of a symbol; an empty map when none was ever stored (never
    /// absent).
    pub fn metadata(&self, name: &str) -> BTreeMap<String, String> {
        self.entry(name)
            .map(|sym| sym.metadata.clone())
            .unwrap_or_default()
    }

    /// One metadata value of a symbol.
    pub fn metadata_value(&self, name: &str, key: &str) -> Option<&str> {
        self.entry(name)?.metadata.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered symbols in registration order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter()
    }

    fn entry(&self, name: &str) -> Option<&Symbol> {
        self.entries.iter().find(|sym| sym.name == name)
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.entries.iter_mut().find(|sym| sym.name == name)
    }
}

/// Independent-variable metadata for a matrix-valued symbol. One argument
/// names the sole independent variable, two arguments name the first and
/// second; anything else derives nothing.
fn independent_variable_metadata(arguments: &[String]) -> BTreeMap<String, String> {
    let mut meta = BTreeMap::new();
    match arguments {
        [only] => {
            meta.insert(INDEPENDENT_VARIABLE.to_string(), only.clone());
        }
        [first, second] => {
            meta.insert(INDEPENDENT_VARIABLE_1.to_string(), first.clone());
            meta.insert(INDEPENDENT_VARIABLE_2.to_string(), second.clone());
        }
        _ => {}
    }
    meta
}
