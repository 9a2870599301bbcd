use crate::SuccessorDelete;

#[derive(Clone, Copy, Default)]
struct Node {
    parent: i64,
    height: i64,
    // Circular list through all nodes of equal height.
    next: i64,
    prev: i64,
    // Circular list through the siblings under one parent.
    left: i64,
    right: i64,
    // Any one child, or -1.
    child: i64,
}

/// Parent-array successor-delete structure extended with child lists and
/// per-node subtree heights. Answers the same queries as the 2-pass
/// array variant, and can additionally report a node of maximum depth in
/// O(max_height), which is what makes adversarial query sequences cheap
/// to produce.
///
/// `by_height[h]` points at one node of height h (-1 if there is none);
/// the rest are reachable through the `next`/`prev` circle. The lists
/// hold every node, not only roots: compression detaches interior nodes,
/// and their new heights have to be filed without a search.
pub struct HeightForest {
    nodes: Vec<Node>,
    by_height: Vec<i64>,
    max_height: i64,
    n: i64,
}

impl HeightForest {
    /// Allocate for universes up to {0, ..., max_n + 1}.
    pub fn new(max_n: i64) -> HeightForest {
        HeightForest {
            nodes: vec![Node::default(); (max_n + 2) as usize],
            by_height: vec![-1; (max_n + 2) as usize],
            max_height: 0,
            n: 0,
        }
    }

    /// Reset to n + 2 singleton trees, all at height 0.
    pub fn init(&mut self, n: i64) {
        for i in 0..n + 2 {
            self.nodes[i as usize] = Node {
                parent: i,
                height: 0,
                next: i + 1,
                prev: i - 1,
                left: i,
                right: i,
                child: -1,
            };
            self.by_height[i as usize] = -1;
        }
        self.nodes[0].prev = n + 1;
        self.nodes[(n + 1) as usize].next = 0;
        self.max_height = 0;
        self.by_height[0] = 0;
        self.n = n;
    }

    /// Remove i from the set. A re-delete reshuffles i under its old
    /// position but leaves every height as it was.
    pub fn delete(&mut self, i: i64) {
        let mut j = self.nodes[i as usize].parent;
        if j > i {
            // i was already linked below some node; detach it together
            // with its subtree and refresh the old ancestors.
            self.unlink(i);
            self.fix_height(j);
            while self.nodes[j as usize].parent != j {
                j = self.nodes[j as usize].parent;
                self.fix_height(j);
            }
        }
        let mut j = i + 1;
        self.link(i, j);
        self.fix_height(j);
        while self.nodes[j as usize].parent != j {
            j = self.nodes[j as usize].parent;
            self.fix_height(j);
        }
        if self.nodes[j as usize].height > self.max_height {
            self.max_height = self.nodes[j as usize].height;
        }
        // Detaching i may also have lowered the tallest tree.
        while self.by_height[self.max_height as usize] == -1 {
            self.max_height -= 1;
        }
    }

    /// 2-pass path compression: find the root, then relink every node of
    /// the traversed path directly below it.
    pub fn successor(&mut self, i: i64) -> i64 {
        let mut root = i;
        while root < self.nodes[root as usize].parent {
            root = self.nodes[root as usize].parent;
        }
        let mut i = i;
        while i < root {
            let parent = self.nodes[i as usize].parent;
            self.unlink(i);
            self.link(i, root);
            self.fix_height(i);
            i = parent;
        }
        self.fix_height(root);
        while self.by_height[self.max_height as usize] == -1 {
            self.max_height -= 1;
        }
        root
    }

    /// A node of maximum depth over the whole forest.
    pub fn deepest_node(&self) -> i64 {
        self.deepest_leaf(self.by_height[self.max_height as usize])
    }

    pub fn max_height(&self) -> i64 {
        self.max_height
    }

    /// Every node currently filed at height h, in list order.
    pub fn nodes_of_height(&self, h: i64) -> Vec<i64> {
        let first = self.by_height[h as usize];
        if first == -1 {
            return Vec::new();
        }
        let mut members = vec![first];
        let mut i = self.nodes[first as usize].next;
        while i != first {
            members.push(i);
            i = self.nodes[i as usize].next;
        }
        members
    }

    /// Make i the newest child of j.
    fn link(&mut self, i: i64, j: i64) {
        debug_assert_eq!(self.nodes[i as usize].parent, i);
        debug_assert!(j > i);
        let right = self.nodes[j as usize].child;
        self.nodes[j as usize].child = i;
        self.nodes[i as usize].parent = j;
        if right >= 0 {
            let left = self.nodes[right as usize].left;
            self.nodes[i as usize].right = right;
            self.nodes[i as usize].left = left;
            self.nodes[right as usize].left = i;
            self.nodes[left as usize].right = i;
        }
    }

    /// Take i out of its parent's child list, restoring i to a singleton
    /// root with singleton sibling links.
    fn unlink(&mut self, i: i64) {
        let j = self.nodes[i as usize].parent;
        debug_assert!(j > i);
        let left = self.nodes[i as usize].left;
        let right = self.nodes[i as usize].right;
        if self.nodes[j as usize].child == i {
            self.nodes[j as usize].child = if right != i { right } else { -1 };
        }
        self.nodes[left as usize].right = right;
        self.nodes[right as usize].left = left;
        self.nodes[i as usize].parent = i;
        self.nodes[i as usize].left = i;
        self.nodes[i as usize].right = i;
    }

    /// Height of i from its children's recorded heights.
    fn height(&self, i: i64) -> i64 {
        let child = self.nodes[i as usize].child;
        if child == -1 {
            return 0;
        }
        let mut c = child;
        let mut highest = self.nodes[c as usize].height;
        while self.nodes[c as usize].right != child {
            c = self.nodes[c as usize].right;
            if self.nodes[c as usize].height > highest {
                highest = self.nodes[c as usize].height;
            }
        }
        1 + highest
    }

    /// Recompute the height of i and refile it in the equal-height
    /// lists.
    fn fix_height(&mut self, i: i64) {
        let h = self.nodes[i as usize].height;
        let next = self.nodes[i as usize].next;
        let prev = self.nodes[i as usize].prev;
        if self.by_height[h as usize] == i {
            self.by_height[h as usize] = if next != i { next } else { -1 };
        }
        if next != i {
            self.nodes[next as usize].prev = prev;
            self.nodes[prev as usize].next = next;
            self.nodes[i as usize].next = i;
            self.nodes[i as usize].prev = i;
        }
        let h = self.height(i);
        self.nodes[i as usize].height = h;
        if self.by_height[h as usize] != -1 {
            let next = self.by_height[h as usize];
            let prev = self.nodes[next as usize].prev;
            self.nodes[i as usize].next = next;
            self.nodes[i as usize].prev = prev;
            self.nodes[next as usize].prev = i;
            self.nodes[prev as usize].next = i;
        }
        self.by_height[h as usize] = i;
    }

    /// Descend from i along children one height level at a time.
    fn deepest_leaf(&self, mut i: i64) -> i64 {
        let mut h = self.nodes[i as usize].height;
        while h > 0 {
            h -= 1;
            i = self.nodes[i as usize].child;
            while self.nodes[i as usize].height != h {
                i = self.nodes[i as usize].right;
            }
        }
        i
    }

    /// Audit every structural invariant; panics on the first breach.
    pub fn validate(&self) {
        let n = self.n;
        let mut uncounted_children: i64 = 0;
        for i in 0..n + 2 {
            let node = self.nodes[i as usize];
            assert!(i <= node.parent && node.parent < n + 2);
            if node.parent != i {
                uncounted_children += 1;
            }
            assert!(node.height >= 0);
            if node.height == 0 {
                assert_eq!(node.child, -1);
            } else {
                assert!(0 <= node.child && node.child < i);
                let mut c = node.child;
                let mut highest = self.nodes[c as usize].height;
                assert_eq!(self.nodes[c as usize].parent, i);
                uncounted_children -= 1;
                while self.nodes[c as usize].right != node.child {
                    c = self.nodes[c as usize].right;
                    assert_eq!(self.nodes[c as usize].parent, i);
                    uncounted_children -= 1;
                    if self.nodes[c as usize].height > highest {
                        highest = self.nodes[c as usize].height;
                    }
                }
                assert_eq!(node.height, highest + 1);
            }
            assert!(0 <= node.next && node.next < n + 2);
            assert!(0 <= node.prev && node.prev < n + 2);
            assert_eq!(self.nodes[node.next as usize].prev, i);
            assert_eq!(self.nodes[node.prev as usize].next, i);
            assert_eq!(node.height, self.nodes[node.next as usize].height);
            assert_eq!(node.height, self.nodes[node.prev as usize].height);

            assert!(0 <= node.left && node.left < n + 2);
            assert!(0 <= node.right && node.right < n + 2);
            assert_eq!(self.nodes[node.right as usize].left, i);
            assert_eq!(self.nodes[node.left as usize].right, i);
            assert_eq!(self.nodes[node.right as usize].parent, node.parent);
            assert_eq!(self.nodes[node.left as usize].parent, node.parent);
        }
        // Every height up to the maximum is populated, every node shows
        // up in exactly one height list, and every non-root was seen in
        // exactly one child list.
        let mut nodes_found: i64 = 0;
        for h in 0..=self.max_height {
            let first = self.by_height[h as usize];
            assert!(0 <= first && first < n + 2);
            assert_eq!(self.nodes[first as usize].height, h);
            nodes_found += 1;
            let mut i = first;
            while self.nodes[i as usize].next != first {
                i = self.nodes[i as usize].next;
                assert_eq!(self.nodes[i as usize].height, h);
                nodes_found += 1;
            }
        }
        assert_eq!(uncounted_children, 0);
        assert_eq!(nodes_found, n + 2);
    }
}

impl SuccessorDelete for HeightForest {
    fn new(max_n: i64) -> HeightForest {
        HeightForest::new(max_n)
    }

    fn name(&self) -> &str {
        "successor, 2-pass, heights"
    }

    fn init(&mut self, n: i64) {
        HeightForest::init(self, n);
    }

    fn delete(&mut self, i: i64) {
        HeightForest::delete(self, i);
    }

    fn successor(&mut self, i: i64) -> i64 {
        HeightForest::successor(self, i)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sequential_deletes_build_a_chain() {
        let mut forest = HeightForest::new(8);
        forest.init(4);
        for i in 1..=4 {
            forest.delete(i);
            forest.validate();
        }
        assert_eq!(forest.max_height(), 4);
        assert_eq!(forest.nodes_of_height(4), vec![5]);
        assert_eq!(forest.deepest_node(), 1);
    }

    #[test]
    fn compression_flattens_the_chain() {
        let mut forest = HeightForest::new(8);
        forest.init(4);
        for i in 1..=4 {
            forest.delete(i);
        }
        assert_eq!(forest.successor(1), 5);
        forest.validate();
        // 1..4 all hang directly below 5 now.
        assert_eq!(forest.max_height(), 1);
        assert_eq!(forest.nodes_of_height(1), vec![5]);
        let mut level0 = forest.nodes_of_height(0);
        level0.sort_unstable();
        assert_eq!(level0, vec![0, 1, 2, 3, 4]);
        assert_eq!(forest.deepest_node(), forest.nodes[5].child);
    }

    #[test]
    fn redelete_restores_heights() {
        let mut forest = HeightForest::new(8);
        forest.init(6);
        for i in [1, 2, 4, 2, 1].iter().cloned() {
            forest.delete(i);
            forest.validate();
        }
        assert_eq!(forest.successor(1), 3);
        forest.validate();
    }

    #[test]
    fn deepest_node_tracks_the_tallest_tree() {
        let mut forest = HeightForest::new(16);
        forest.init(10);
        forest.delete(7);
        forest.delete(6);
        assert_eq!(forest.deepest_node(), 6);
        forest.delete(1);
        assert_eq!(forest.max_height(), 2);
        assert_eq!(forest.deepest_node(), 6);
        forest.delete(5);
        forest.validate();
        // 5, 6, 7 now chain below 8.
        assert_eq!(forest.max_height(), 3);
        assert_eq!(forest.deepest_node(), 5);
    }

    #[test]
    fn successor_results_match_the_plain_array() {
        use crate::array::{ArraySet, TwoPass};
        use crate::SuccessorDelete;

        let n = 32;
        let mut forest = HeightForest::new(n);
        let mut reference = ArraySet::<TwoPass>::new(n);
        forest.init(n);
        reference.init(n);
        for i in (2..=n).step_by(3) {
            forest.delete(i);
            reference.delete(i);
        }
        for i in 0..=n + 1 {
            assert_eq!(HeightForest::successor(&mut forest, i), reference.successor(i));
            forest.validate();
        }
    }
}
