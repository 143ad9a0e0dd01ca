//! tagmap is the map of key, value pairs that rides along with every
//! `Metric`. Tags are only ever displayed, so the map is kept small and
//! sorted rather than hashed.

use std::fmt;
use std::slice::Iter;

/// The tag key, value collection. Keys are unique and kept in ascending
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TagMap {
    inner: Vec<(String, String)>,
}

impl TagMap {
    /// Iterate the key, value pairs in key order.
    pub fn iter(&self) -> Iter<(String, String)> {
        self.inner.iter()
    }

    /// Get a value from the tagmap, if it exists.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.inner.binary_search_by(|probe| probe.0.as_str().cmp(key)) {
            Ok(idx) => Some(self.inner[idx].1.as_str()),
            Err(_) => None,
        }
    }

    /// Insert a key / value into self
    ///
    /// This method will return the value previously stored under the given key,
    /// if there was such a value.
    pub fn insert(&mut self, key: String, val: String) -> Option<String> {
        match self.inner.binary_search_by(|probe| probe.0.cmp(&key)) {
            Ok(idx) => Some(::std::mem::replace(&mut self.inner[idx].1, val)),
            Err(idx) => {
                self.inner.insert(idx, (key, val));
                None
            }
        }
    }

    /// Determine if the tagmap is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Return the length of the tagmap.
    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Renders as `key:value` pairs joined by commas, the pairs sorted as
/// strings. Sorting the rendered pairs rather than the keys matters when one
/// key is a prefix of another: `a.b:2` sorts before `a:1`.
impl fmt::Display for TagMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut pairs: Vec<String> = self.inner
            .iter()
            .map(|&(ref k, ref v)| format!("{}:{}", k, v))
            .collect();
        pairs.sort();
        f.write_str(&pairs.join(","))
    }
}
