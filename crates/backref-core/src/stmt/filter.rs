use super::Value;
use indexmap::IndexMap;

/// Conjunction of `field == value` predicates, keyed by field name.
///
/// Keys are application field names. `pk` is accepted as an alias for the
/// model's primary key; resolving names is left to the driver.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Filter {
    predicates: IndexMap<String, Value>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `name == value` predicate, consuming and returning the filter.
    pub fn eq(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a predicate, returning the value previously bound to `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.predicates.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.predicates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> + '_ {
        self.predicates
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Filter {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut filter = Filter::new();
        for (name, value) in iter {
            filter.insert(name, value);
        }
        filter
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Filter {
    fn from(src: [(K, V); N]) -> Self {
        src.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Filter {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.predicates.iter()
    }
}
