//! Union-find over room indices.
//!
//! The set is a flat arena: `parent[i]` is the index of the element `i` hangs under, and roots
//! point at themselves. It lives only for the duration of a single Kruskal run.

/// Disjoint-set forest with path halving and union by rank.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    /// Parent index of every element; roots are their own parent.
    parent: Vec<usize>,
    /// Upper bound on the height of the tree rooted at each element.
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Creates `len` singleton sets, one per index in `0..len`.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    /// Number of elements tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` when the set tracks no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the root of the set containing `element`, or `None` if it is out of range.
    ///
    /// Walks the parent links and halves the path on the way up.
    pub fn find(&mut self, element: usize) -> Option<usize> {
        let mut current = element;
        loop {
            let parent = *self.parent.get(current)?;
            if parent == current {
                return Some(current);
            }

            let grandparent = *self.parent.get(parent)?;
            if let Some(slot) = self.parent.get_mut(current) {
                *slot = grandparent;
            }
            current = grandparent;
        }
    }

    /// Merges the sets containing `left` and `right`.
    ///
    /// Returns `true` if two distinct sets were joined and `false` if they already were one set or
    /// either element is out of range.
    pub fn union(&mut self, left: usize, right: usize) -> bool {
        let (Some(left_root), Some(right_root)) = (self.find(left), self.find(right)) else {
            return false;
        };
        if left_root == right_root {
            return false;
        }

        let left_rank = self.rank.get(left_root).copied().unwrap_or_default();
        let right_rank = self.rank.get(right_root).copied().unwrap_or_default();

        let (child, root) = if left_rank < right_rank {
            (left_root, right_root)
        } else {
            (right_root, left_root)
        };

        if let Some(slot) = self.parent.get_mut(child) {
            *slot = root;
        }
        if left_rank == right_rank {
            if let Some(rank) = self.rank.get_mut(root) {
                *rank = rank.saturating_add(1);
            }
        }

        true
    }

    /// Returns `true` if both elements belong to the same set.
    pub fn connected(&mut self, left: usize, right: usize) -> bool {
        match (self.find(left), self.find(right)) {
            (Some(left_root), Some(right_root)) => left_root == right_root,
            _ => false,
        }
    }
}
