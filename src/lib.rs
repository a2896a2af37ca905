//! Benchmarks elementwise vector addition on the host against an accelerator
//! and checks that both agree within a fixed tolerance.

pub mod accelerator;
pub mod config;
pub mod cpu;
pub mod error;
pub mod ffi;
pub mod gpu;
pub mod harness;
pub mod inputs;
pub mod report;
pub mod timing;
pub mod verify;

pub use accelerator::{Accelerator, HostAccelerator};
pub use config::BenchConfig;
pub use error::{AcceleratorError, HarnessError};
pub use ffi::ForeignAccelerator;
pub use gpu::GpuAccelerator;
pub use harness::Harness;
pub use report::Report;
pub use verify::{Verdict, VerifyMode};
