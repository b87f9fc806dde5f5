//! Pre-order traversal over trees of owned children.

/// A node that owns its children directly.
pub trait Family: Sized {
    fn children(&self) -> &[Self];
    fn children_mut(&mut self) -> &mut [Self];
}

/// Returns `root` followed by all of its descendants, depth first.
pub fn family<T: Family>(root: &T) -> Vec<&T> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        out.push(node);
        // reversed so the first child is visited next
        stack.extend(node.children().iter().rev());
    }
    out
}

/// Visits `root` and every descendant in the same order as [`family`].
pub fn walk_mut<T: Family>(root: &mut T, visit: &mut impl FnMut(&mut T)) {
    visit(root);
    for child in root.children_mut() {
        walk_mut(child, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Node {
        id: u32,
        children: Vec<Node>,
    }

    impl Family for Node {
        fn children(&self) -> &[Self] {
            &self.children
        }

        fn children_mut(&mut self) -> &mut [Self] {
            &mut self.children
        }
    }

    fn leaf(id: u32) -> Node {
        Node {
            id,
            children: Vec::new(),
        }
    }

    fn tree() -> Node {
        //      0
        //    / | \
        //   1  4  5
        //  / \
        // 2   3
        Node {
            id: 0,
            children: vec![
                Node {
                    id: 1,
                    children: vec![leaf(2), leaf(3)],
                },
                leaf(4),
                leaf(5),
            ],
        }
    }

    #[test]
    fn family_is_pre_order() {
        let root = tree();
        let ids: Vec<u32> = family(&root).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn walk_mut_matches_family_order() {
        let mut root = tree();
        let mut seen = Vec::new();
        walk_mut(&mut root, &mut |n: &mut Node| {
            seen.push(n.id);
            n.id *= 10;
        });
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
        let ids: Vec<u32> = family(&root).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![0, 10, 20, 30, 40, 50]);
    }

    #[test]
    fn lone_node_is_its_own_family() {
        let root = leaf(7);
        assert_eq!(family(&root).len(), 1);
    }
}
