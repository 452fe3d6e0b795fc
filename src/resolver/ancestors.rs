// src/resolver/ancestors.rs

//! Path-so-far tracking for depth-first traversal
//!
//! `Ancestors` is an immutable linked chain living on the call stack. Each
//! recursive call extends its parent's chain, so sibling branches never see
//! each other's entries and nothing needs cloning.

/// Names on the path from the traversal root to the current node
#[derive(Debug, Clone, Copy)]
pub struct Ancestors<'a> {
    name: &'a str,
    parent: Option<&'a Ancestors<'a>>,
}

impl<'a> Ancestors<'a> {
    /// A path containing only the root
    pub fn root(name: &'a str) -> Self {
        Self { name, parent: None }
    }

    /// This path extended by one more name
    pub fn push(&'a self, name: &'a str) -> Ancestors<'a> {
        Ancestors {
            name,
            parent: Some(self),
        }
    }

    /// Whether a name occurs anywhere on the path
    pub fn contains(&self, name: &str) -> bool {
        let mut current = Some(self);
        while let Some(node) = current {
            if node.name == name {
                return true;
            }
            current = node.parent;
        }
        false
    }

    /// Path from root to the current node
    pub fn to_vec(&self) -> Vec<&'a str> {
        let mut names = Vec::new();
        let mut current = Some(self);
        while let Some(node) = current {
            names.push(node.name);
            current = node.parent;
        }
        names.reverse();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_along_chain() {
        let root = Ancestors::root("a");
        let b = root.push("b");
        let c = b.push("c");

        assert!(c.contains("a"));
        assert!(c.contains("b"));
        assert!(c.contains("c"));
        assert!(!c.contains("d"));
        assert_eq!(c.to_vec(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_siblings_are_independent() {
        let root = Ancestors::root("a");
        let left = root.push("left");
        let right = root.push("right");

        assert!(left.contains("left"));
        assert!(!left.contains("right"));
        assert!(!right.contains("left"));
    }
}
