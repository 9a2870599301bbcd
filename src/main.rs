use std::mem;

use succdel::timing::{time_it, CsvSink};
use succdel::workload::Generator;
use succdel::{algorithms, SuccessorDelete, MAX_N, MIN_N};

const DATAFILE: &str = "../data/data.csv";

fn time_query_one(
    algorithms: &mut [Box<dyn SuccessorDelete>],
    generator: &mut Generator,
    sink: &CsvSink,
    trash: &mut i64,
) {
    let mut n = MIN_N;
    while n <= MAX_N {
        let data = generator.query_one(n);
        for (s, alg) in algorithms.iter_mut().enumerate() {
            if s == 0 && n > 65536 {
                continue; // the uncompressed walk is quadratic here
            }
            if s == 1 && n > 65536 {
                continue; // recursion depth would exceed the call stack
            }
            time_it(alg.as_mut(), data, sink, trash);
        }
        n *= 2;
    }
}

fn time_worst_case(
    algorithms: &mut [Box<dyn SuccessorDelete>],
    generator: &mut Generator,
    sink: &CsvSink,
    trash: &mut i64,
) {
    let mut n = MIN_N;
    while n <= MAX_N {
        let mut alpha = 1.0 / 8.0;
        while alpha <= 8.0 {
            let data = generator.worst_case(n, alpha);
            for alg in algorithms.iter_mut().skip(1) {
                time_it(alg.as_mut(), data, sink, trash);
            }
            alpha *= 2.0;
        }
        n *= 2;
    }
}

fn time_random(
    algorithms: &mut [Box<dyn SuccessorDelete>],
    generator: &mut Generator,
    sink: &CsvSink,
    trash: &mut i64,
) {
    let mut n = MIN_N;
    while n <= MAX_N {
        let mut alpha = 1.0 / 8.0;
        while alpha <= 8.0 {
            let data = generator.random(n, alpha);
            for alg in algorithms.iter_mut().skip(1) {
                time_it(alg.as_mut(), data, sink, trash);
            }
            alpha *= 2.0;
        }
        n *= 2;
    }
}

fn main() {
    println!("Values are {} byte integers", mem::size_of::<i64>());

    let mut algorithms = algorithms(MAX_N);
    let mut generator = Generator::new(MAX_N);
    let sink = CsvSink::new(DATAFILE);
    let mut trash: i64 = 0;

    time_random(&mut algorithms, &mut generator, &sink, &mut trash);
    time_query_one(&mut algorithms, &mut generator, &sink, &mut trash);
    time_worst_case(&mut algorithms, &mut generator, &sink, &mut trash);

    println!("Trash (ignore): {}", trash);
}
