use criterion::black_box;
use structopt::StructOpt;

use succdel::array::{ArraySet, Halving, TwoPass, TwoPassChecked};
use succdel::microset::MicroSet;
use succdel::quick_find::QuickFind;
use succdel::union_find::UnionFind;
use succdel::workload::{Generator, Workload};
use succdel::SuccessorDelete;

#[derive(StructOpt)]
struct Profile {
    #[structopt(short = "n", long = "size", default_value = "1048576")]
    size: i64,
    #[structopt(short = "i", long = "iters", default_value = "10")]
    iters: usize,
    #[structopt(short = "a", long = "alpha", default_value = "1")]
    alpha: f64,
    #[structopt(short = "w", long = "workload", default_value = "worst_case")]
    workload: String,
    #[structopt(subcommand)]
    target: Target,
}

#[derive(StructOpt)]
enum Target {
    #[structopt(name = "two_pass")]
    TwoPass,
    #[structopt(name = "two_pass_checked")]
    TwoPassChecked,
    #[structopt(name = "halving")]
    Halving,
    #[structopt(name = "quick_find")]
    QuickFind,
    #[structopt(name = "union_find")]
    UnionFind,
    #[structopt(name = "qf_microset")]
    QfMicroset,
    #[structopt(name = "uf_microset")]
    UfMicroset,
    #[structopt(name = "ds_microset")]
    DsMicroset,
}

fn replay(alg: &mut dyn SuccessorDelete, data: &Workload) -> i64 {
    let mut trash = 0;
    alg.init(data.n);
    for &x in data.input.iter() {
        if x > 0 {
            trash ^= alg.successor(x);
        } else if x < 0 {
            alg.delete(-x);
        } else {
            break;
        }
    }
    trash
}

fn main() {
    let profile = Profile::from_args();

    let mut alg: Box<dyn SuccessorDelete> = match profile.target {
        Target::TwoPass => Box::new(ArraySet::<TwoPass>::new(profile.size)),
        Target::TwoPassChecked => Box::new(ArraySet::<TwoPassChecked>::new(profile.size)),
        Target::Halving => Box::new(ArraySet::<Halving>::new(profile.size)),
        Target::QuickFind => Box::new(QuickFind::new(profile.size)),
        Target::UnionFind => Box::new(UnionFind::new(profile.size)),
        Target::QfMicroset => Box::new(MicroSet::<QuickFind>::new(profile.size)),
        Target::UfMicroset => Box::new(MicroSet::<UnionFind>::new(profile.size)),
        Target::DsMicroset => Box::new(MicroSet::<ArraySet<TwoPass>>::new(profile.size)),
    };

    let mut generator = Generator::new(profile.size);
    let data = match profile.workload.as_str() {
        "query_one" => generator.query_one(profile.size),
        "worst_case" => generator.worst_case(profile.size, profile.alpha),
        "random" => generator.random(profile.size, profile.alpha),
        other => panic!("unknown workload: {}", other),
    };

    dbg!("PROFILING");
    for _ in 0..profile.iters {
        black_box(replay(alg.as_mut(), data));
    }
}
