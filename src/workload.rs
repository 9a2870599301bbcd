use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::array::{ArraySet, TwoPass};
use crate::forest::HeightForest;
use crate::{SuccessorDelete, MAX_OPERATIONS};

/// One generated test: an operation stream over {0, ..., n + 1} and the
/// reply every query in it must produce. A positive entry x is
/// `successor(x)`, a negative entry -x is `delete(x)`, and a single 0
/// terminates the stream. `output` holds one entry per operation, 0 for
/// deletes.
pub struct Workload {
    pub n: i64,
    pub label: String,
    pub input: Vec<i64>,
    pub output: Vec<i64>,
}

impl Workload {
    fn with_capacity(max_operations: i64) -> Workload {
        Workload {
            n: 0,
            label: String::new(),
            input: Vec::with_capacity(max_operations as usize + 1),
            output: Vec::with_capacity(max_operations as usize),
        }
    }
}

/// Produces the three workload families. The buffers and the scratch
/// structures are allocated once and reused across calls; each method
/// returns the refilled workload.
pub struct Generator {
    forest: HeightForest,
    reference: ArraySet<TwoPass>,
    rng: SmallRng,
    data: Workload,
}

impl Generator {
    pub fn new(max_n: i64) -> Generator {
        Generator {
            forest: HeightForest::new(max_n),
            reference: ArraySet::new(max_n),
            rng: SmallRng::seed_from_u64(5),
            data: Workload::with_capacity(9 * max_n + 1),
        }
    }

    /// Delete 1..n in order, then query successor(1) n times.
    pub fn query_one(&mut self, n: i64) -> &Workload {
        println!("Creating query_one input: n = {}", n);
        assert!(2 * n <= MAX_OPERATIONS);
        self.data.n = n;
        self.data.label = "query_one".to_string();
        self.data.input.clear();
        for i in 1..=n {
            self.data.input.push(-i);
        }
        for _ in 1..=n {
            self.data.input.push(1);
        }
        self.data.input.push(0);
        self.set_output();
        &self.data
    }

    /// Delete 1..n in order, interleaved with queries aimed at the
    /// currently deepest node. Each query is also applied to the forest,
    /// so the next deepest-node answer accounts for the compression the
    /// query causes.
    pub fn worst_case(&mut self, n: i64, alpha: f64) -> &Workload {
        println!("Creating worst_case input: n = {}, alpha = {:.3}", n, alpha);
        assert!(1.0 + n as f64 * (1.0 + alpha) <= MAX_OPERATIONS as f64);
        self.data.n = n;
        self.data.label = format!("worst_case {:.3}", alpha);
        self.data.input.clear();
        self.forest.init(n);
        let mut queries: i64 = 0;
        for i in 1..=n {
            self.forest.delete(i);
            self.data.input.push(-i);
            while (queries as f64) < i as f64 * alpha {
                let j = self.forest.deepest_node();
                self.forest.successor(j);
                self.data.input.push(j);
                queries += 1;
            }
        }
        self.data.input.push(0);
        self.set_output();
        &self.data
    }

    /// n uniformly random deletes (duplicates allowed), interleaved with
    /// deepest-node queries. The queries are not applied to the forest:
    /// its shape evolves through the deletes alone.
    pub fn random(&mut self, n: i64, alpha: f64) -> &Workload {
        println!("Creating random input: n = {}, alpha = {:.3}", n, alpha);
        assert!(1.0 + n as f64 * (1.0 + alpha) <= MAX_OPERATIONS as f64);
        self.data.n = n;
        self.data.label = format!("random {:.3}", alpha);
        self.data.input.clear();
        self.forest.init(n);
        let mut queries: i64 = 0;
        for i in 1..=n {
            let d = self.rng.gen_range(1..n);
            self.forest.delete(d);
            self.data.input.push(-d);
            while (queries as f64) < i as f64 * alpha {
                self.data.input.push(self.forest.deepest_node());
                queries += 1;
            }
        }
        self.data.input.push(0);
        self.set_output();
        &self.data
    }

    /// Fill `output` by replaying `input` on the 2-pass array reference.
    fn set_output(&mut self) {
        let Workload {
            n, input, output, ..
        } = &mut self.data;
        self.reference.init(*n);
        output.clear();
        for &x in input.iter() {
            if x > 0 {
                output.push(self.reference.successor(x));
            } else if x < 0 {
                output.push(0);
                self.reference.delete(-x);
            }
        }
    }
}
