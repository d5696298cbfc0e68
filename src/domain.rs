//! Variable domains: the sample sequences expression trees evaluate against.
//!
//! A [`Domain`] resolves each variable name to an ordered `f64` sequence. All
//! sequences involved in one evaluation call carry the same number of
//! samples, the domain's `sample_count`. The engine never mutates a domain;
//! variable leaves copy their samples once and every interior node works on
//! the copies.
use std::collections::HashMap;

/// Source of per-variable sample sequences for vectorized evaluation.
pub trait Domain {
    /// Number of samples every variable sequence carries.
    fn sample_count(&self) -> usize;

    /// Ordered samples for `variable`, or `None` if the variable is unbound.
    fn samples(&self, variable: &str) -> Option<&[f64]>;
}

/// Map-backed [`Domain`] implementation.
///
/// The first inserted sequence fixes the sample count; later sequences must
/// match it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleDomain {
    bindings: HashMap<String, Vec<f64>>,
    sample_count: usize,
}

impl SampleDomain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `variable` to `samples`.
    ///
    /// # Panics
    ///
    /// Panics if `samples` disagrees in length with a previously inserted
    /// sequence.
    pub fn insert(&mut self, variable: impl Into<String>, samples: Vec<f64>) {
        if self.bindings.is_empty() {
            self.sample_count = samples.len();
        } else {
            assert_eq!(
                samples.len(),
                self.sample_count,
                "all domain sequences must share one sample count"
            );
        }
        self.bindings.insert(variable.into(), samples);
    }

    /// Names of all bound variables, in no particular order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }
}

impl Domain for SampleDomain {
    fn sample_count(&self) -> usize {
        self.sample_count
    }

    fn samples(&self, variable: &str) -> Option<&[f64]> {
        self.bindings.get(variable).map(Vec::as_slice)
    }
}

impl FromIterator<(String, Vec<f64>)> for SampleDomain {
    fn from_iter<T: IntoIterator<Item = (String, Vec<f64>)>>(iter: T) -> Self {
        let mut domain = SampleDomain::new();
        for (variable, samples) in iter {
            domain.insert(variable, samples);
        }
        domain
    }
}
