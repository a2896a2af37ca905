// main.rs

use std::io;
use std::process::ExitCode;

use rand::rngs::StdRng;
use rand::SeedableRng;
use vecadd_bench::harness;
use vecadd_bench::{Accelerator, BenchConfig, Harness, HarnessError};

cfg_if::cfg_if! {
    if #[cfg(feature = "cuda")] {
        fn select_accelerator() -> impl Accelerator {
            vecadd_bench::ForeignAccelerator::cuda()
        }
    } else {
        fn select_accelerator() -> impl Accelerator {
            vecadd_bench::GpuAccelerator::new()
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let mut rng = StdRng::from_entropy();
    let mut harness = Harness::new(select_accelerator(), BenchConfig::default());
    log::debug!("benchmarking against the {} backend", harness.accelerator().name());

    let result = harness.run(&mut rng, &mut io::stdout().lock(), &mut io::stderr().lock());
    // The accelerator failure line is already on stderr
    if let Err(err) = &result {
        if !matches!(err, HarnessError::Accelerator { .. }) {
            eprintln!("{}", err);
        }
    }
    ExitCode::from(harness::exit_status(&result))
}
