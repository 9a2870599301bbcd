use crate::SuccessorDelete;

#[derive(Clone, Copy)]
struct Node {
    parent: i64,
    weight: i64,
    succ: i64,
}

/// Union-find with union by weight and 2-pass path compression. Each
/// root carries the successor of every element in its tree; deleting i
/// unions i with i + 1, so the root reached from a deleted index always
/// knows the next live element.
pub struct UnionFind {
    nodes: Vec<Node>,
}

impl UnionFind {
    fn find(&mut self, i: i64) -> i64 {
        let mut r = i;
        while self.nodes[r as usize].parent != r {
            r = self.nodes[r as usize].parent;
        }
        let mut i = i;
        while i != r {
            let parent = self.nodes[i as usize].parent;
            self.nodes[i as usize].parent = r;
            i = parent;
        }
        r
    }

    fn union(&mut self, i: i64, j: i64) {
        let r1 = self.find(i);
        let r2 = self.find(j);
        if r1 == r2 {
            return;
        }
        if self.nodes[r1 as usize].weight <= self.nodes[r2 as usize].weight {
            self.nodes[r2 as usize].weight += self.nodes[r1 as usize].weight;
            self.nodes[r1 as usize].parent = r2;
        } else {
            self.nodes[r1 as usize].weight += self.nodes[r2 as usize].weight;
            self.nodes[r2 as usize].parent = r1;
            // j is the right neighbour, so its successor is the one that
            // holds for the merged set.
            self.nodes[r1 as usize].succ = self.nodes[r2 as usize].succ;
        }
    }
}

impl SuccessorDelete for UnionFind {
    fn new(max_n: i64) -> UnionFind {
        let nodes = vec![
            Node {
                parent: 0,
                weight: 0,
                succ: 0,
            };
            (max_n + 2) as usize
        ];
        UnionFind { nodes }
    }

    fn name(&self) -> &str {
        "union find"
    }

    fn init(&mut self, n: i64) {
        for i in 0..n + 2 {
            self.nodes[i as usize] = Node {
                parent: i,
                weight: 1,
                succ: i,
            };
        }
    }

    fn delete(&mut self, i: i64) {
        self.union(i, i + 1);
    }

    fn successor(&mut self, i: i64) -> i64 {
        let r = self.find(i);
        self.nodes[r as usize].succ
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn find_compresses_query_path() {
        let mut uf = UnionFind::new(8);
        uf.init(8);
        for i in 1..=4 {
            uf.delete(i);
        }
        assert_eq!(uf.successor(1), 5);
        let r = uf.find(1);
        assert_eq!(uf.nodes[1].parent, r);
        assert_eq!(uf.nodes[r as usize].parent, r);
    }

    #[test]
    fn succ_propagates_when_left_root_wins() {
        let mut uf = UnionFind::new(8);
        uf.init(8);
        uf.delete(1);
        uf.delete(2);
        // {1, 2}'s root outweighs {3}; the absorbed right root hands
        // over its successor.
        let r = uf.find(1);
        assert_eq!(uf.nodes[r as usize].succ, 3);
        assert_eq!(uf.successor(1), 3);
    }

    #[test]
    fn redelete_is_a_noop() {
        let mut uf = UnionFind::new(8);
        uf.init(8);
        uf.delete(3);
        uf.delete(3);
        assert_eq!(uf.successor(3), 4);
        assert_eq!(uf.successor(2), 2);
    }
}
