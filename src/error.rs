use thiserror::Error;

/// Reasons an accelerated computation did not produce a result.
#[derive(Debug, Error)]
pub enum AcceleratorError {
    /// The routine ran and reported non-success.
    #[error("{backend} routine reported failure")]
    Failed { backend: String },

    #[error("input vectors differ in length ({a} vs {b})")]
    LengthMismatch { a: usize, b: usize },

    /// The length cannot be expressed in the routine's integer length parameter.
    #[error("vector length {len} exceeds the accelerator's length limit")]
    TooLarge { len: usize },

    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to request wgpu device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("failed to map staging buffer: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),

    #[error("buffer map callback was dropped before completing")]
    ChannelClosed,
}

/// Errors that abort a benchmark run.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("{backend} vector addition failed: {source}")]
    Accelerator {
        backend: String,
        #[source]
        source: AcceleratorError,
    },

    /// Inputs cannot be drawn from an empty or unbounded range.
    #[error("invalid input range {start}..{end}")]
    InvalidInputRange { start: f32, end: f32 },

    #[error("failed to write benchmark output: {0}")]
    Io(#[from] std::io::Error),
}
