//! Discovered parameter values and the bindings formed from them
use std::collections::{BTreeMap, BTreeSet};

/// Result of merging values into one parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// The parameter had never been observed before this merge
    pub created: bool,
    /// Number of values not previously known
    pub added: usize,
}

impl MergeOutcome {
    /// Returns true if the merge changed the store
    pub fn is_new(&self) -> bool {
        self.created || self.added > 0
    }
}

/// Every value discovered so far, per parameter name
///
/// The store only grows: values are never removed and a parameter, once
/// observed, stays observed even if its value set is empty.
#[derive(Debug, Clone, Default)]
pub struct ParamStore {
    values: BTreeMap<String, BTreeSet<String>>,
}

impl ParamStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if every name in `deps` has been observed
    pub fn contains_all(&self, deps: &[&str]) -> bool {
        deps.iter().all(|name| self.values.contains_key(*name))
    }

    /// Known values of one parameter
    pub fn values(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.values.get(name)
    }

    /// Unions `values` into the parameter `name`, creating it if absent
    pub fn merge<I>(&mut self, name: &str, values: I) -> MergeOutcome
    where
        I: IntoIterator<Item = String>,
    {
        let mut outcome = MergeOutcome {
            created: !self.values.contains_key(name),
            added: 0,
        };
        let known = self.values.entry(name.to_string()).or_default();

        for value in values {
            if known.insert(value) {
                outcome.added += 1;
            }
        }

        outcome
    }

    /// Number of observed parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Total number of known values across all parameters
    pub fn total_values(&self) -> usize {
        self.values.values().map(BTreeSet::len).sum()
    }

    /// Iterates over parameters in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.values.iter().map(|(name, values)| (name.as_str(), values))
    }

    /// Cartesian product of the values of `deps`, in dependency order
    ///
    /// A name listed twice contributes two independent factors. Returns
    /// `None` if some dependency has never been observed. With no
    /// dependencies the product holds exactly one empty binding.
    pub fn bindings(&self, deps: &[&str]) -> Option<Bindings<'_>> {
        if !self.contains_all(deps) {
            return None;
        }
        let factors = deps
            .iter()
            .map(|name| self.values[*name].iter().collect())
            .collect();
        Some(Bindings::new(factors))
    }
}

/// Lazy Cartesian product over parameter value sets
///
/// Tuples are produced in lexicographic order, the last factor varying
/// fastest.
pub struct Bindings<'a> {
    factors: Vec<Vec<&'a String>>,
    indices: Vec<usize>,
    done: bool,
}

impl<'a> Bindings<'a> {
    fn new(factors: Vec<Vec<&'a String>>) -> Self {
        let done = factors.iter().any(Vec::is_empty);
        let indices = vec![0; factors.len()];
        Self {
            factors,
            indices,
            done,
        }
    }

    /// Total number of tuples the product holds
    pub fn cardinality(&self) -> usize {
        self.factors.iter().map(Vec::len).product()
    }
}

impl Iterator for Bindings<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Vec<String>> {
        if self.done {
            return None;
        }

        let tuple = self
            .indices
            .iter()
            .zip(&self.factors)
            .map(|(&i, factor)| factor[i].clone())
            .collect();

        // Advance the odometer
        self.done = true;
        for position in (0..self.indices.len()).rev() {
            self.indices[position] += 1;
            if self.indices[position] < self.factors[position].len() {
                self.done = false;
                break;
            }
            self.indices[position] = 0;
        }

        Some(tuple)
    }
}
