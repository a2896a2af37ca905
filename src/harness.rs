//! Generate → reference → accelerate → verify → report.

use std::io::Write;
use std::ops::Range;

use log::{debug, info};
use rand::Rng;

use crate::accelerator::Accelerator;
use crate::config::BenchConfig;
use crate::cpu;
use crate::error::HarnessError;
use crate::inputs::generate_inputs;
use crate::report::Report;
use crate::timing::time_it;
use crate::verify::{verify, VerifyMode};

/// Benchmarks an [`Accelerator`] against the host reference loop.
pub struct Harness<A> {
    accelerator: A,
    config: BenchConfig,
    mode: VerifyMode,
}

impl<A: Accelerator> Harness<A> {
    pub fn new(accelerator: A, config: BenchConfig) -> Self {
        Self {
            accelerator,
            config,
            mode: VerifyMode::default(),
        }
    }

    pub fn with_verify_mode(mut self, mode: VerifyMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn accelerator(&self) -> &A {
        &self.accelerator
    }

    /// Generates inputs from `rng` and runs the benchmark on them.
    ///
    /// The report goes to `out`, diagnostics to `err`.
    pub fn run<R, W, E>(&mut self, rng: &mut R, out: &mut W, err: &mut E) -> Result<Report, HarnessError>
    where
        R: Rng + ?Sized,
        W: Write,
        E: Write,
    {
        let range = self.config.input_range.clone();
        if !valid_input_range(&range) {
            return Err(HarnessError::InvalidInputRange {
                start: range.start,
                end: range.end,
            });
        }

        debug!("generating {} elements per input", self.config.size);
        let (a, b) = generate_inputs(rng, self.config.size, range);
        self.run_with_inputs(&a, &b, out, err)
    }

    /// Runs the benchmark on caller-provided inputs.
    ///
    /// An accelerator failure is written to `err` and returned without
    /// verification or a report. Disagreement between the outputs is not an
    /// error: it shows up as an "incorrect" verdict.
    ///
    /// # Panics
    ///
    /// Panics if `a` and `b` differ in length.
    pub fn run_with_inputs<W, E>(
        &mut self,
        a: &[f32],
        b: &[f32],
        out: &mut W,
        err: &mut E,
    ) -> Result<Report, HarnessError>
    where
        W: Write,
        E: Write,
    {
        let (reference, reference_time) = time_it(|| cpu::add_vectors_cpu(a, b));
        info!("reference addition took {} us", reference_time.micros());

        let accelerator = &mut self.accelerator;
        let (accelerated, accelerated_time) = time_it(|| accelerator.compute(a, b));

        let accelerated = match accelerated {
            Ok(accelerated) => accelerated,
            Err(source) => {
                let backend = self.accelerator.name().to_string();
                debug!("{} backend failed: {}", backend, source);
                writeln!(err, "{} vector addition failed!", backend)?;
                return Err(HarnessError::Accelerator { backend, source });
            }
        };
        info!(
            "{} addition took {} us",
            self.accelerator.name(),
            accelerated_time.micros()
        );

        let verification = verify(&reference, &accelerated, self.config.tolerance, self.mode);
        for line in verification.diagnostics() {
            writeln!(err, "{}", line)?;
        }

        let report = Report {
            size: a.len(),
            reference_time,
            accelerated_time,
            verdict: verification.verdict(),
        };
        if let Some(speedup) = report.speedup() {
            debug!("speedup {:.2}x", speedup);
        }

        writeln!(out, "{}", report)?;
        Ok(report)
    }
}

/// Uniform sampling needs a non-empty range with a finite width.
fn valid_input_range(range: &Range<f32>) -> bool {
    range.start < range.end && (range.end - range.start).is_finite()
}

/// Process exit status for a finished run.
///
/// Any completed run exits 0, whatever its verdict. Only a run that was aborted
/// (accelerator failure, invalid configuration, broken output stream) exits 1.
pub fn exit_status(result: &Result<Report, HarnessError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
