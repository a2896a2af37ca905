use std::ops::Range;

/// Number of elements in each vector for a default run.
pub const PROBLEM_SIZE: usize = 1_000_000;

/// Maximum absolute difference at which reference and accelerated outputs still agree.
pub const TOLERANCE: f32 = 1e-5;

/// Half-open range the random inputs are drawn from.
pub const INPUT_RANGE: Range<f32> = -100.0..100.0;

/// Parameters of a single benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub size: usize,
    pub tolerance: f32,
    pub input_range: Range<f32>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            size: PROBLEM_SIZE,
            tolerance: TOLERANCE,
            input_range: INPUT_RANGE,
        }
    }
}

impl BenchConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_input_range(mut self, input_range: Range<f32>) -> Self {
        self.input_range = input_range;
        self
    }
}
