use std::mem;

use crate::SuccessorDelete;

/// Number of set elements packed into one microset word.
pub const WORD_SIZE: i64 = 8 * mem::size_of::<u64>() as i64;

/// Word-packed successor-delete set layered over a coarse structure M.
/// Each u64 word holds the liveness bits of WORD_SIZE consecutive
/// elements; M tracks which words are non-zero, at bucket granularity.
/// Word scans go through the count-trailing-zeros instruction, never
/// bit by bit.
pub struct MicroSet<M> {
    words: Vec<u64>,
    macroset: M,
    name: String,
}

impl<M: SuccessorDelete> SuccessorDelete for MicroSet<M> {
    fn new(max_n: i64) -> MicroSet<M> {
        let max_buckets = (max_n + 2 + WORD_SIZE - 1) / WORD_SIZE;
        let macroset = M::new(max_buckets);
        let name = format!("{}, microset", macroset.name());
        MicroSet {
            words: vec![0; max_buckets as usize],
            macroset,
            name,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, n: i64) {
        let buckets = (n + 2 + WORD_SIZE - 1) / WORD_SIZE;
        self.macroset.init(buckets);
        for word in self.words[..buckets as usize].iter_mut() {
            *word = !0;
        }
    }

    fn delete(&mut self, i: i64) {
        let bucket = (i / WORD_SIZE) as usize;
        let mask = 1u64 << (i % WORD_SIZE);
        if self.words[bucket] & mask != 0 {
            self.words[bucket] ^= mask;
            if self.words[bucket] == 0 {
                self.macroset.delete(bucket as i64);
            }
        }
    }

    fn successor(&mut self, i: i64) -> i64 {
        let bucket = i / WORD_SIZE;
        let bit = i % WORD_SIZE;
        let high = self.words[bucket as usize] & !((1u64 << bit) - 1);
        if high != 0 {
            bucket * WORD_SIZE + high.trailing_zeros() as i64
        } else {
            // The word holds nothing at or past i; the next live word is
            // a macroset question. Bucket 0 and the bucket holding n + 1
            // can never die, so the answer is a real bucket.
            let next = self.macroset.successor(bucket + 1);
            next * WORD_SIZE + self.words[next as usize].trailing_zeros() as i64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::array::{ArraySet, TwoPass};
    use crate::quick_find::QuickFind;
    use crate::union_find::UnionFind;

    #[test]
    fn drained_word_forwards_to_next_bucket() {
        let n = 130;
        let mut set = MicroSet::<QuickFind>::new(n);
        set.init(n);
        for i in 1..WORD_SIZE {
            set.delete(i);
        }
        // Element 0 keeps word 0 alive, so successor(0) still answers
        // from the first word; successor(1) must jump straight to the
        // least live element of bucket 1.
        assert_eq!(set.successor(0), 0);
        assert_eq!(set.successor(1), 64);
        assert_eq!(set.successor(63), 64);
        assert_eq!(set.successor(64), 64);
        assert_eq!(set.successor(65), 65);
    }

    #[test]
    fn dead_bucket_is_deleted_in_macroset() {
        let n = 130;
        let mut set = MicroSet::<UnionFind>::new(n);
        set.init(n);
        for i in 64..128 {
            set.delete(i);
        }
        assert_eq!(set.words[1], 0);
        // Word 1 is dead; queries inside it are answered by bucket 2.
        assert_eq!(set.successor(64), 128);
        assert_eq!(set.successor(100), 128);
        assert_eq!(set.successor(63), 63);
    }

    #[test]
    fn names_follow_the_bound_macroset() {
        assert_eq!(MicroSet::<QuickFind>::new(128).name(), "quick find, microset");
        assert_eq!(MicroSet::<UnionFind>::new(128).name(), "union find, microset");
        assert_eq!(
            MicroSet::<ArraySet<TwoPass>>::new(128).name(),
            "successor, 2-pass, microset"
        );
    }

    #[test]
    fn sentinel_word_stays_live() {
        let n = 130;
        let mut set = MicroSet::<ArraySet<TwoPass>>::new(n);
        set.init(n);
        for i in 1..=n {
            set.delete(i);
        }
        assert_eq!(set.successor(1), n + 1);
        assert_eq!(set.successor(n + 1), n + 1);
        assert_eq!(set.successor(0), 0);
    }
}
