use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use crate::workload::Workload;
use crate::SuccessorDelete;

/// Shortest elapsed time a trial may report.
pub const MIN_TEST_TIME: f64 = 1.0;
/// Replays a trial starts with before checking the clock.
pub const MIN_REPEATS: u64 = 5;
/// Independent trials per measurement; the minimum is reported.
pub const BEST_OF: u64 = 3;

/// Replay the stream on a fresh instance and compare every reply with
/// the recorded one. Panics on the first divergence; timed code is
/// known-correct.
pub fn validate(alg: &mut dyn SuccessorDelete, data: &Workload) {
    alg.init(data.n);
    for (&x, &expected) in data.input.iter().zip(data.output.iter()) {
        if x > 0 {
            let got = alg.successor(x);
            assert_eq!(
                got,
                expected,
                "{} diverges on successor({})",
                alg.name(),
                x
            );
        } else if x < 0 {
            assert_eq!(expected, 0);
            assert!(1 <= -x && -x <= data.n);
            alg.delete(-x);
        } else {
            break;
        }
    }
}

/// Best-of-BEST_OF timing. Each trial replays the whole stream until at
/// least MIN_TEST_TIME has elapsed, doubling its replay target as
/// needed, and reports elapsed time over replays completed within the
/// trial. Successor replies are xored into `trash` so the replay loop
/// cannot be optimised away.
pub fn time_it(alg: &mut dyn SuccessorDelete, data: &Workload, sink: &CsvSink, trash: &mut i64) {
    validate(alg, data);

    print!("\"{}\", \"{}\", {}, ", alg.name(), data.label, data.n);
    io::stdout().flush().expect("cannot flush stdout");

    let mut best_time = f64::INFINITY;
    let mut repeats = MIN_REPEATS;
    for _ in 0..BEST_OF {
        let mut replays: u64 = 0;
        let start = Instant::now();
        let seconds = loop {
            while replays < repeats {
                alg.init(data.n);
                for &x in data.input.iter() {
                    if x > 0 {
                        *trash ^= alg.successor(x);
                    } else if x < 0 {
                        alg.delete(-x);
                    } else {
                        break;
                    }
                }
                replays += 1;
            }
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed >= MIN_TEST_TIME {
                break elapsed / replays as f64;
            }
            repeats *= 2;
        };
        if seconds < best_time {
            best_time = seconds;
        }
    }
    println!("{:.10e}", best_time);
    sink.append(alg.name(), &data.label, data.n, best_time)
        .expect("cannot append to the data file");
}

/// Appends one CSV row per measurement, reopening the file each time so
/// every finished row survives a crash.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> CsvSink {
        CsvSink { path: path.into() }
    }

    pub fn append(&self, name: &str, label: &str, n: i64, seconds: f64) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "\"{}\", \"{}\", {}, {:.10e}", name, label, n, seconds)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithms;
    use crate::workload::Generator;

    #[test]
    fn reference_output_validates_everywhere() {
        let mut generator = Generator::new(1 << 8);
        let data = generator.worst_case(1 << 6, 1.0);
        for alg in algorithms(1 << 8).iter_mut() {
            validate(alg.as_mut(), data);
        }
    }

    #[test]
    #[should_panic(expected = "diverges")]
    fn corrupted_output_is_rejected() {
        let data = Workload {
            n: 4,
            label: "query_one".to_string(),
            input: vec![-1, 1, 0],
            // successor(1) is 2 once 1 is gone, not 1
            output: vec![0, 1],
        };
        let mut alg = algorithms(16).remove(2);
        validate(alg.as_mut(), &data);
    }

    #[test]
    fn sink_appends_quoted_rows() {
        let path = std::env::temp_dir().join("succdel_sink_test.csv");
        let _ = std::fs::remove_file(&path);
        let sink = CsvSink::new(&path);
        sink.append("quick find", "random 1.000", 1024, 1.25e-3).unwrap();
        sink.append("union find", "query_one", 2048, 3.5e-2).unwrap();
        let rows = std::fs::read_to_string(&path).unwrap();
        let mut lines = rows.lines();
        assert_eq!(
            lines.next().unwrap(),
            "\"quick find\", \"random 1.000\", 1024, 1.2500000000e-3"
        );
        assert!(lines.next().unwrap().starts_with("\"union find\", \"query_one\", 2048, "));
        assert!(lines.next().is_none());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    #[ignore] // runs for BEST_OF seconds
    fn timing_runs_and_records() {
        let path = std::env::temp_dir().join("succdel_timing_test.csv");
        let _ = std::fs::remove_file(&path);
        let sink = CsvSink::new(&path);
        let mut generator = Generator::new(1 << 8);
        let data = generator.random(1 << 6, 1.0);
        let mut trash = 0;
        let mut alg = algorithms(1 << 8).remove(5);
        time_it(alg.as_mut(), data, &sink, &mut trash);
        let rows = std::fs::read_to_string(&path).unwrap();
        assert!(rows.starts_with("\"quick find\", \"random 1.000\", 64, "));
        let _ = std::fs::remove_file(&path);
    }
}
