//! Elementwise comparison of reference and accelerated outputs.

use std::fmt;

/// How far the verifier scans once it finds a disagreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifyMode {
    /// Stop at the first index outside tolerance.
    #[default]
    FirstMismatch,
    /// Scan every index and record all disagreements.
    Exhaustive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Correct => f.write_str("correct"),
            Self::Incorrect => f.write_str("incorrect"),
        }
    }
}

/// An index where the two outputs disagree by more than the tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mismatch {
    pub index: usize,
    pub accelerated: f32,
    pub reference: f32,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mismatch at position {}: GPU={}, CPU={}",
            self.index, self.accelerated, self.reference
        )
    }
}

/// Outcome of comparing two output buffers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Verification {
    /// Mismatching indices in ascending order. At most one in `FirstMismatch` mode.
    pub mismatches: Vec<Mismatch>,
    /// `(accelerated, reference)` lengths when they differ.
    pub length_mismatch: Option<(usize, usize)>,
}

impl Verification {
    pub fn verdict(&self) -> Verdict {
        if self.mismatches.is_empty() && self.length_mismatch.is_none() {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }

    pub fn first_mismatch(&self) -> Option<&Mismatch> {
        self.mismatches.first()
    }

    /// One diagnostic line per recorded problem, in scan order.
    pub fn diagnostics(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.mismatches.iter().map(Mismatch::to_string).collect();
        if let Some((accelerated, reference)) = self.length_mismatch {
            lines.push(format!(
                "Length mismatch: GPU={} elements, CPU={} elements",
                accelerated, reference
            ));
        }
        lines
    }
}

/// True when `a` and `b` differ by at most `epsilon`. NaN never matches.
pub fn within_tolerance(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

/// Compares `accelerated` against `reference` element by element.
pub fn verify(reference: &[f32], accelerated: &[f32], epsilon: f32, mode: VerifyMode) -> Verification {
    let mut verification = Verification::default();

    for (index, (&cpu_val, &gpu_val)) in reference.iter().zip(accelerated.iter()).enumerate() {
        if !within_tolerance(gpu_val, cpu_val, epsilon) {
            verification.mismatches.push(Mismatch {
                index,
                accelerated: gpu_val,
                reference: cpu_val,
            });
            if mode == VerifyMode::FirstMismatch {
                break;
            }
        }
    }

    if reference.len() != accelerated.len() {
        verification.length_mismatch = Some((accelerated.len(), reference.len()));
    }

    verification
}
