//! # rtrie
//!
//! A trie indexed on reversed keys.
//!
//! Every key is stored from its last byte to its first, so asking "which
//! stored keys are suffixes of this string" becomes a single walk from the
//! root. That is the lookup needed to resolve a short resource name such as
//! `cam` against names qualified by one or more remotes.
//!
//! ## Example
//!
//! ```
//! use rtrie::Trie;
//!
//! let mut trie = Trie::new();
//! trie.set("c", 1);
//! trie.set("bc", 2);
//! trie.set("abc", 3);
//!
//! // Shortest suffix first, the full query last.
//! assert_eq!(trie.find_suffix("abc"), vec![&1, &2, &3]);
//! assert_eq!(trie.get("bc"), Some(&2));
//! ```
//!
//! ## Empty keys
//!
//! The empty key never stores anything: `set("", ..)` is a no-op and every
//! lookup of `""` misses. Callers are expected to reject empty names before
//! they reach the trie.
//!
//! The trie has no internal synchronization. Mutation goes through
//! `&mut self`; shared lookups may run concurrently.

use std::collections::HashMap;

#[derive(Debug, Clone)]
struct TrieNode<T> {
    children: HashMap<u8, TrieNode<T>>,
    contents: Option<T>,
}

impl<T> TrieNode<T> {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            contents: None,
        }
    }
}

/// Walk `path` (bytes already in reversed key order) without creating anything.
fn descend<T>(root: &TrieNode<T>, path: impl IntoIterator<Item = u8>) -> Option<&TrieNode<T>> {
    path.into_iter()
        .try_fold(root, |node, byte| node.children.get(&byte))
}

fn descend_mut<T>(
    root: &mut TrieNode<T>,
    path: impl IntoIterator<Item = u8>,
) -> Option<&mut TrieNode<T>> {
    path.into_iter()
        .try_fold(root, |node, byte| node.children.get_mut(&byte))
}

fn descend_or_create<'a, T>(root: &'a mut TrieNode<T>, key: &str) -> Option<&'a mut TrieNode<T>> {
    if key.is_empty() {
        return None;
    }
    let mut node = root;
    for byte in key.bytes().rev() {
        node = node.children.entry(byte).or_insert_with(TrieNode::new);
    }
    Some(node)
}

/// A map from string keys to values, indexed from the end of each key.
#[derive(Debug, Clone)]
pub struct Trie<T> {
    root: TrieNode<T>,
    len: usize,
}

impl<T> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Trie<T> {
    /// Create an empty trie
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
            len: 0,
        }
    }

    /// Number of keys holding a value
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no key holds a value
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the value stored under `key`
    pub fn get(&self, key: &str) -> Option<&T> {
        if key.is_empty() {
            return None;
        }
        descend(&self.root, key.bytes().rev())?.contents.as_ref()
    }

    /// Get a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        if key.is_empty() {
            return None;
        }
        descend_mut(&mut self.root, key.bytes().rev())?.contents.as_mut()
    }

    /// Check if `key` holds a value
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Store `value` under `key`, returning the value it replaced
    pub fn set(&mut self, key: &str, value: T) -> Option<T> {
        let node = descend_or_create(&mut self.root, key)?;
        let prev = node.contents.replace(value);
        if prev.is_none() {
            self.len += 1;
        }
        prev
    }

    /// Return the value under `key`, computing and storing it first if absent.
    ///
    /// The flag is `true` when the value already existed. Returns `None` only
    /// for the empty key, in which case `compute` is never called.
    pub fn compute_if_absent<F>(&mut self, key: &str, compute: F) -> Option<(&mut T, bool)>
    where
        F: FnOnce() -> T,
    {
        let node = descend_or_create(&mut self.root, key)?;
        let existed = node.contents.is_some();
        if !existed {
            self.len += 1;
        }
        Some((node.contents.get_or_insert_with(compute), existed))
    }

    /// Remove the value under `key`, returning it.
    ///
    /// Nodes left with neither a value nor children are pruned.
    pub fn delete(&mut self, key: &str) -> Option<T> {
        let path: Vec<u8> = key.bytes().rev().collect();

        // Find the deepest node on the path that must survive the delete: the
        // root, or any node that holds its own value or branches elsewhere.
        let mut cut = 0;
        let mut node = &self.root;
        for (depth, byte) in path.iter().enumerate() {
            if depth > 0 && (node.contents.is_some() || node.children.len() > 1) {
                cut = depth;
            }
            node = node.children.get(byte)?;
        }
        node.contents.as_ref()?;
        let is_leaf = node.children.is_empty();

        let removed = descend_mut(&mut self.root, path.iter().copied())?.contents.take();
        if removed.is_some() {
            self.len -= 1;
        }
        if is_leaf
            && let Some(parent) = descend_mut(&mut self.root, path[..cut].iter().copied())
        {
            parent.children.remove(&path[cut]);
        }
        removed
    }

    /// Values whose keys are suffixes of `query`, shortest suffix first.
    ///
    /// A query of `abc` yields the values for `c`, `bc` and `abc`, in that
    /// order, skipping any that are not stored.
    pub fn find_suffix(&self, query: &str) -> Vec<&T> {
        self.find_suffix_entries(query)
            .into_iter()
            .map(|(_, value)| value)
            .collect()
    }

    /// Like [`Trie::find_suffix`], but also yields the matching suffix of `query`.
    pub fn find_suffix_entries<'q>(&self, query: &'q str) -> Vec<(&'q str, &T)> {
        let mut result = Vec::new();
        let mut node = &self.root;
        for (matched, byte) in query.bytes().rev().enumerate() {
            match node.children.get(&byte) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(contents) = &node.contents
                && let Some(suffix) = query.get(query.len() - matched - 1..)
            {
                result.push((suffix, contents));
            }
        }
        result
    }

    /// Iterate over every stored `(key, value)` pair. Order is unspecified.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            stack: vec![(Vec::new(), &self.root)],
        }
    }

    /// Iterate over every stored key
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterate over every stored value
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter().map(|(_, value)| value)
    }
}

impl<'a, T> IntoIterator for &'a Trie<T> {
    type Item = (String, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Depth-first iterator over a [`Trie`].
///
/// Uses an explicit stack, so key length does not bound recursion depth.
pub struct Iter<'a, T> {
    stack: Vec<(Vec<u8>, &'a TrieNode<T>)>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (String, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((key, node)) = self.stack.pop() {
            for (byte, child) in &node.children {
                // Children sit one byte further toward the front of the key.
                let mut child_key = Vec::with_capacity(key.len() + 1);
                child_key.push(*byte);
                child_key.extend_from_slice(&key);
                self.stack.push((child_key, child));
            }
            if let Some(contents) = &node.contents {
                return Some((String::from_utf8_lossy(&key).into_owned(), contents));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut trie = Trie::new();
        assert_eq!(trie.get("a"), None);

        assert_eq!(trie.set("a", 1), None);
        assert_eq!(trie.set("b", 2), None);
        assert_eq!(trie.set("ab", 12), None);

        assert_eq!(trie.get("a"), Some(&1));
        assert_eq!(trie.get("b"), Some(&2));
        assert_eq!(trie.get("ab"), Some(&12));
        assert_eq!(trie.get("ba"), None);
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn test_set_replaces() {
        let mut trie = Trie::new();
        trie.set("cam", 1);
        assert_eq!(trie.set("cam", 2), Some(1));
        assert_eq!(trie.get("cam"), Some(&2));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_lookup_follows_key_from_the_end() {
        let mut trie = Trie::new();
        trie.set("ab", 1);
        assert_eq!(trie.get("ba"), None);
        assert_eq!(trie.get("b"), None);
        *trie.get_mut("ab").unwrap() += 1;
        assert_eq!(trie.get("ab"), Some(&2));
        assert!(trie.get_mut("xab").is_none());
    }

    #[test]
    fn test_zero_value_is_present() {
        let mut trie = Trie::new();
        trie.set("zero", 0);
        assert_eq!(trie.get("zero"), Some(&0));
        assert!(trie.contains_key("zero"));
        // Intermediate nodes on the path hold nothing.
        assert!(!trie.contains_key("ero"));
    }

    #[test]
    fn test_delete() {
        let mut trie = Trie::new();
        trie.set("b", 2);
        trie.set("ab", 12);

        assert_eq!(trie.delete("b"), Some(2));
        assert_eq!(trie.get("b"), None);
        assert_eq!(trie.get("ab"), Some(&12));

        assert_eq!(trie.delete("ab"), Some(12));
        assert_eq!(trie.get("ab"), None);
        assert_eq!(trie.get("b"), None);
        assert!(trie.is_empty());
    }

    #[test]
    fn test_delete_absent_key() {
        let mut trie: Trie<i32> = Trie::new();
        assert_eq!(trie.delete("missing"), None);

        trie.set("abc", 1);
        // "bc" exists as a path node but holds no value.
        assert_eq!(trie.delete("bc"), None);
        assert_eq!(trie.get("abc"), Some(&1));
    }

    #[test]
    fn test_delete_prunes_empty_nodes() {
        let mut trie = Trie::new();
        trie.set("abc", 1);
        trie.set("xbc", 2);
        trie.set("c", 3);

        trie.delete("abc");
        assert_eq!(trie.get("xbc"), Some(&2));
        assert_eq!(trie.get("c"), Some(&3));

        trie.delete("xbc");
        // Only the node for "c" remains below the root.
        let c = &trie.root.children[&b'c'];
        assert!(c.children.is_empty());

        trie.delete("c");
        assert!(trie.root.children.is_empty());
    }

    #[test]
    fn test_delete_keeps_nodes_with_children() {
        let mut trie = Trie::new();
        trie.set("c", 1);
        trie.set("bc", 2);

        assert_eq!(trie.delete("c"), Some(1));
        assert_eq!(trie.get("bc"), Some(&2));
        assert_eq!(trie.find_suffix("bc"), vec![&2]);
    }

    #[test]
    fn test_compute_if_absent() {
        let mut trie = Trie::new();

        let (value, existed) = trie.compute_if_absent("cam", || 7).unwrap();
        assert_eq!(*value, 7);
        assert!(!existed);

        let (value, existed) = trie
            .compute_if_absent("cam", || panic!("should not compute"))
            .unwrap();
        assert_eq!(*value, 7);
        assert!(existed);

        *value = 8;
        assert_eq!(trie.get("cam"), Some(&8));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_empty_key_is_noop() {
        let mut trie = Trie::new();
        assert_eq!(trie.set("", 1), None);
        assert_eq!(trie.get(""), None);
        assert_eq!(trie.delete(""), None);
        assert!(trie.compute_if_absent("", || 1).is_none());
        assert!(trie.is_empty());
        assert_eq!(trie.iter().count(), 0);
    }

    #[test]
    fn test_find_suffix() {
        let mut trie = Trie::new();
        trie.set("abc", ());
        trie.set("bc", ());
        trie.set("c", ());
        trie.set("ab", ());
        trie.set("a", ());

        assert_eq!(trie.find_suffix("c").len(), 1);
        assert_eq!(trie.find_suffix("bc").len(), 2);
        assert_eq!(trie.find_suffix("abc").len(), 3);
        assert_eq!(trie.find_suffix("zzabc").len(), 3);
        assert!(trie.find_suffix("d").is_empty());
    }

    #[test]
    fn test_find_suffix_order() {
        let mut trie = Trie::new();
        trie.set("abc", 3);
        trie.set("c", 1);
        trie.set("bc", 2);

        assert_eq!(trie.find_suffix("abc"), vec![&1, &2, &3]);
        assert_eq!(
            trie.find_suffix_entries("xabc"),
            vec![("c", &1), ("bc", &2), ("abc", &3)]
        );
    }

    #[test]
    fn test_find_suffix_stops_at_missing_child() {
        let mut trie = Trie::new();
        trie.set("c", 1);
        trie.set("abxc", 2);

        // Walk dies at "bc", so "abxc" is never reached.
        assert_eq!(trie.find_suffix("abc"), vec![&1]);
    }

    #[test]
    fn test_iter_reconstructs_keys() {
        let mut trie = Trie::new();
        trie.set("gateway:arm", 1);
        trie.set("arm", 2);
        trie.set("cam", 3);
        trie.set("kamera-für-dich", 4);

        let mut entries: Vec<(String, i32)> = trie.iter().map(|(k, v)| (k, *v)).collect();
        entries.sort();
        assert_eq!(
            entries,
            vec![
                ("arm".to_string(), 2),
                ("cam".to_string(), 3),
                ("gateway:arm".to_string(), 1),
                ("kamera-für-dich".to_string(), 4),
            ]
        );

        let mut keys: Vec<String> = trie.keys().collect();
        keys.sort();
        assert_eq!(keys.len(), 4);
        assert_eq!(trie.values().sum::<i32>(), 10);
    }

    #[test]
    fn test_iter_deep_key() {
        let mut trie = Trie::new();
        let key = "x".repeat(1_000);
        trie.set(&key, 1);
        trie.set("x", 2);
        let mut entries: Vec<_> = trie.iter().map(|(k, _)| k.len()).collect();
        entries.sort_unstable();
        assert_eq!(entries, vec![1, 1_000]);
    }
}
