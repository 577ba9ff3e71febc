use std::collections::HashSet;

/// Identity of one concrete request: endpoint position plus bound values
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssuedKey {
    /// Index of the endpoint in declaration order
    pub endpoint: usize,
    /// Values bound to the endpoint's dependencies, in dependency order
    pub values: Vec<String>,
}

impl IssuedKey {
    pub fn new(endpoint: usize, values: Vec<String>) -> Self {
        Self { endpoint, values }
    }
}

/// Requests already issued during this crawl
///
/// Entries are never removed, so a binding is issued at most once no matter
/// how the fetch turned out.
#[derive(Debug, Clone, Default)]
pub struct IssuedSet {
    keys: HashSet<IssuedKey>,
}

impl IssuedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key`, returning false if it was already issued
    pub fn insert(&mut self, key: IssuedKey) -> bool {
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of requests issued for one endpoint
    pub fn count_for(&self, endpoint: usize) -> usize {
        self.keys.iter().filter(|key| key.endpoint == endpoint).count()
    }
}
