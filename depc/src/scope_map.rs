//! Maps organised in a chain of lexical scopes.

use alloc::vec::Vec;
use core::fmt::{self, Debug};
use core::hash::Hash;
use core::iter::FromIterator;
use fnv::FnvBuildHasher;

/// Map of a single scope.
///
/// We use an immutable map in order to make clones cheap,
/// which is used to roll back failed transactions.
pub type Frame<K, V> = im::hashmap::HashMap<K, V, FnvBuildHasher>;

/// Map that may be extended by child scopes.
///
/// A child scope overlays its parent:
/// lookups fall through to the parent, whereas
/// insertions go to the child, leaving the parent untouched.
/// The child borrows its parent, so the parent is guaranteed to
/// outlive all of its children.
///
/// ~~~
/// # use depc::ScopeMap;
/// let mut parent: ScopeMap<&str, u8> = ScopeMap::new();
/// parent.insert("x", 0);
/// parent.insert("y", 1);
///
/// let mut child = parent.extend();
/// child.insert("x", 2);
/// assert_eq!(child.get(&"x"), Some(&2));
/// assert_eq!(child.get(&"y"), Some(&1));
/// assert_eq!(child.values(&"x").copied().collect::<Vec<_>>(), vec![2, 0]);
///
/// drop(child);
/// assert_eq!(parent.get(&"x"), Some(&0));
/// ~~~
#[derive(Clone)]
pub struct ScopeMap<'p, K, V> {
    parent: Option<&'p ScopeMap<'p, K, V>>,
    map: Frame<K, V>,
}

impl<'p, K, V> Default for ScopeMap<'p, K, V> {
    fn default() -> Self {
        Self {
            parent: None,
            map: Default::default(),
        }
    }
}

impl<'p, K: Debug + Eq + Hash, V: Debug> Debug for ScopeMap<'p, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.frames()).finish()
    }
}

impl<'p, K, V> ScopeMap<'p, K, V> {
    /// Frames of all scopes, from the nearest to the outermost scope.
    fn frames(&self) -> Vec<&Frame<K, V>> {
        core::iter::successors(Some(self), |s| s.parent)
            .map(|s| &s.map)
            .collect()
    }
}

impl<'p, K: Clone + Eq + Hash, V: Clone> ScopeMap<'p, K, V> {
    /// Create a map without parent.
    pub fn new() -> Self {
        Default::default()
    }

    /// Create an empty child scope.
    pub fn extend(&self) -> ScopeMap<'_, K, V> {
        ScopeMap {
            parent: Some(self),
            map: Default::default(),
        }
    }

    /// Find the value of the nearest scope that maps the key.
    pub fn get(&self, k: &K) -> Option<&V> {
        self.map.get(k).or_else(|| self.parent?.get(k))
    }

    /// Return true if any scope maps the key.
    pub fn contains_key(&self, k: &K) -> bool {
        self.get(k).is_some()
    }

    /// Values of all scopes that map the key, from the nearest to the outermost.
    pub fn values<'a>(&'a self, k: &'a K) -> impl Iterator<Item = &'a V> + 'a {
        self.frames().into_iter().filter_map(move |m| m.get(k))
    }

    /// Insert a value into the current scope.
    pub fn insert(&mut self, k: K, v: V) -> Option<V> {
        self.map.insert(k, v)
    }

    /// Entries of the current scope.
    pub fn local(&self) -> &Frame<K, V> {
        &self.map
    }

    /// Replace the entries of the current scope.
    pub fn set_local(&mut self, map: Frame<K, V>) {
        self.map = map
    }

    /// Consume the scope, returning its entries.
    pub fn into_local(self) -> Frame<K, V> {
        self.map
    }

    /// Entries of all scopes, from the nearest to the outermost scope.
    ///
    /// Keys shadowed by a nearer scope are yielded multiple times.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.frames().into_iter().flat_map(|m| m.iter())
    }
}

impl<'p, K: Clone + Eq + Hash, V: Clone> FromIterator<(K, V)> for ScopeMap<'p, K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            parent: None,
            map: iter.into_iter().collect(),
        }
    }
}

/// Combine two frames, using `f` to combine values of keys present in both.
pub fn merge<K, V, F>(a: &Frame<K, V>, b: &Frame<K, V>, f: F) -> Frame<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
    F: FnMut(V, V) -> V,
{
    a.clone().union_with(b.clone(), f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested() {
        let mut outer: ScopeMap<u8, u8> = [(0, 0), (1, 1)].into_iter().collect();
        let mut middle = outer.extend();
        middle.insert(1, 10);
        let mut inner = middle.extend();
        inner.insert(2, 20);

        assert_eq!(inner.get(&0), Some(&0));
        assert_eq!(inner.get(&1), Some(&10));
        assert_eq!(inner.get(&2), Some(&20));
        assert_eq!(inner.iter().count(), 4);
        assert_eq!(middle.get(&2), None);

        drop(inner);
        drop(middle);
        outer.insert(2, 2);
        assert_eq!(outer.get(&2), Some(&2));
    }

    #[test]
    fn merge_max() {
        let a: Frame<u8, u8> = [(0, 1), (1, 5)].into_iter().collect();
        let b: Frame<u8, u8> = [(1, 3), (2, 2)].into_iter().collect();
        let m = merge(&a, &b, core::cmp::max);
        assert_eq!(m.get(&0), Some(&1));
        assert_eq!(m.get(&1), Some(&5));
        assert_eq!(m.get(&2), Some(&2));
    }
}
