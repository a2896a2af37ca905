use std::fmt;

use crate::timing::TimingSample;
use crate::verify::Verdict;

/// Summary printed at the end of a successful run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    pub size: usize,
    pub reference_time: TimingSample,
    pub accelerated_time: TimingSample,
    pub verdict: Verdict,
}

impl Report {
    /// Reference time over accelerated time. `None` when the accelerated call took under 1 µs.
    pub fn speedup(&self) -> Option<f64> {
        let accelerated = self.accelerated_time.elapsed().as_secs_f64();
        if self.accelerated_time.micros() == 0 {
            return None;
        }
        Some(self.reference_time.elapsed().as_secs_f64() / accelerated)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vector addition of {} elements", self.size)?;
        writeln!(f, "CPU time: {} microseconds", self.reference_time.micros())?;
        writeln!(f, "GPU time: {} microseconds", self.accelerated_time.micros())?;
        write!(f, "Results are {}", self.verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn sample(micros: u64) -> TimingSample {
        let start = Instant::now();
        TimingSample::new(start, start + Duration::from_micros(micros))
    }

    #[test]
    fn renders_four_lines_in_order() {
        let report = Report {
            size: 1_000_000,
            reference_time: sample(1500),
            accelerated_time: sample(300),
            verdict: Verdict::Correct,
        };
        assert_eq!(
            report.to_string(),
            "Vector addition of 1000000 elements\n\
             CPU time: 1500 microseconds\n\
             GPU time: 300 microseconds\n\
             Results are correct"
        );
    }

    #[test]
    fn speedup_ratio() {
        let report = Report {
            size: 4,
            reference_time: sample(1000),
            accelerated_time: sample(250),
            verdict: Verdict::Incorrect,
        };
        let speedup = report.speedup().unwrap();
        assert!((speedup - 4.0).abs() < 1e-9);
        assert!(report.to_string().ends_with("Results are incorrect"));
    }

    #[test]
    fn no_speedup_for_instant_call() {
        let report = Report {
            size: 0,
            reference_time: sample(10),
            accelerated_time: sample(0),
            verdict: Verdict::Correct,
        };
        assert_eq!(report.speedup(), None);
    }
}
