use std::borrow::Cow;

use log::debug;
use wgpu::util::DeviceExt;

use crate::accelerator::{check_lengths, Accelerator};
use crate::error::AcceleratorError;

const WORKGROUP_SIZE: usize = 256; // Must match @workgroup_size in the shader
const MAX_WORKGROUPS: usize = 65_535;
// One dispatch per chunk; 16_776_960 f32s stays under the 134 MB storage binding limit
const MAX_CHUNK_SIZE: usize = WORKGROUP_SIZE * MAX_WORKGROUPS;

/// Device, queue and compiled pipeline for the vector addition shader.
pub struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    bind_group_layout: wgpu::BindGroupLayout,
    compute_pipeline: wgpu::ComputePipeline,
}

impl GpuContext {
    pub async fn new() -> Result<Self, AcceleratorError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(AcceleratorError::NoAdapter)?;
        debug!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Vector Addition Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Vector Addition Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!(
                "../shaders/vector_addition.wgsl"
            ))),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Vector Addition Bind Group Layout"),
            entries: &[
                storage_entry(0, true),
                storage_entry(1, true),
                storage_entry(2, false),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Vector Addition Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let compute_pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Vector Addition Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: "main",
            cache: None,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        });

        Ok(Self {
            device,
            queue,
            bind_group_layout,
            compute_pipeline,
        })
    }

    /// Adds `a` and `b` on the device, one chunk at a time.
    pub async fn add_vectors(&self, a: &[f32], b: &[f32]) -> Result<Vec<f32>, AcceleratorError> {
        check_lengths(a, b)?;

        // Zero-sized bindings are rejected by validation
        if a.is_empty() {
            return Ok(Vec::new());
        }

        let mut result = Vec::with_capacity(a.len());

        for chunk_start in (0..a.len()).step_by(MAX_CHUNK_SIZE) {
            let chunk_end = (chunk_start + MAX_CHUNK_SIZE).min(a.len());
            debug!("dispatching elements {}..{}", chunk_start, chunk_end);
            let chunk = self
                .add_chunk(&a[chunk_start..chunk_end], &b[chunk_start..chunk_end])
                .await?;
            result.extend(chunk);
        }

        Ok(result)
    }

    async fn add_chunk(&self, a_chunk: &[f32], b_chunk: &[f32]) -> Result<Vec<f32>, AcceleratorError> {
        let num_elements = a_chunk.len();
        let chunk_size = (num_elements * std::mem::size_of::<f32>()) as u64;

        let input_buffer_a = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Input Buffer A"),
            contents: bytemuck::cast_slice(a_chunk),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let input_buffer_b = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Input Buffer B"),
            contents: bytemuck::cast_slice(b_chunk),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let output_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Output Buffer"),
            size: chunk_size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        let staging_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Staging Buffer"),
            size: chunk_size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Vector Addition Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: input_buffer_a.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: input_buffer_b.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: output_buffer.as_entire_binding(),
                },
            ],
        });

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Vector Addition Command Encoder"),
        });

        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Vector Addition Compute Pass"),
                timestamp_writes: None,
            });
            compute_pass.set_pipeline(&self.compute_pipeline);
            compute_pass.set_bind_group(0, &bind_group, &[]);
            compute_pass.dispatch_workgroups(workgroup_count(num_elements), 1, 1);
        }

        encoder.copy_buffer_to_buffer(&output_buffer, 0, &staging_buffer, 0, chunk_size);
        self.queue.submit(Some(encoder.finish()));

        let slice = staging_buffer.slice(..);
        let (sender, receiver) = futures_intrusive::channel::shared::oneshot_channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            // Receiver only goes away if this chunk was abandoned
            let _ = sender.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);

        receiver
            .receive()
            .await
            .ok_or(AcceleratorError::ChannelClosed)??;

        let data = slice.get_mapped_range();
        let chunk_result: Vec<f32> = bytemuck::cast_slice(&data).to_vec();
        drop(data);
        staging_buffer.unmap();

        Ok(chunk_result)
    }
}

fn storage_entry(binding: u32, read_only: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn workgroup_count(num_elements: usize) -> u32 {
    num_elements.div_ceil(WORKGROUP_SIZE) as u32
}

/// Creates a throwaway GPU context and adds the vectors with it.
pub async fn add_vectors_gpu(a: &[f32], b: &[f32]) -> Result<Vec<f32>, AcceleratorError> {
    let context = GpuContext::new().await?;
    context.add_vectors(a, b).await
}

/// `wgpu` backend. The device is acquired on the first call and reused after.
#[derive(Default)]
pub struct GpuAccelerator {
    context: Option<GpuContext>,
}

impl GpuAccelerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accelerator for GpuAccelerator {
    fn name(&self) -> &str {
        "GPU"
    }

    fn compute(&mut self, a: &[f32], b: &[f32]) -> Result<Vec<f32>, AcceleratorError> {
        pollster::block_on(async {
            let context = match self.context.take() {
                Some(context) => context,
                None => GpuContext::new().await?,
            };
            let result = context.add_vectors(a, b).await;
            self.context = Some(context);
            result
        })
    }
}
