use anyhow::{Context, Result};
use bytemuck::Pod;

use super::{ProgramLinker, RenderCtx};

/// Shared vertex stage (full-screen triangle).
pub const RENDER_VERTEX: &str = include_str!("shaders/render.wgsl");

/// Entry point expected in the vertex source.
pub const VERTEX_ENTRY: &str = "vs_main";

/// Entry point expected in every fragment source.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Configuration of the stock wgpu linker.
#[derive(Debug, Clone)]
pub struct WgpuLinkerConfig {
    /// Size in bytes of the uniform block bound at `@group(0) @binding(0)`.
    ///
    /// Rounded up to a multiple of 16. Must cover the largest block any
    /// variant declares.
    pub uniform_block_size: u64,

    /// Blend state of the color target. `None` writes opaque color.
    pub blend: Option<wgpu::BlendState>,

    /// Prefix for wgpu object labels.
    pub label: String,
}

impl Default for WgpuLinkerConfig {
    fn default() -> Self {
        Self {
            uniform_block_size: 4096,
            blend: None,
            label: "spheira".to_string(),
        }
    }
}

/// A linked render pipeline plus the uniform buffer its fragment stage reads.
#[derive(Debug, Clone)]
pub struct WgpuProgram {
    pipeline: wgpu::RenderPipeline,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl WgpuProgram {
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// Bind group for group 0.
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn uniform_buffer(&self) -> &wgpu::Buffer {
        &self.uniforms
    }

    /// Location of a uniform at `offset` bytes into the block.
    ///
    /// Variants call this from their uniform-location lookup; the offsets come
    /// from their own WGSL struct layout.
    pub fn slot(&self, offset: u64) -> UniformSlot {
        UniformSlot {
            buffer: self.uniforms.clone(),
            offset,
            block_size: self.uniforms.size(),
        }
    }

    /// Records a full-screen draw with this program.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

/// Uniform location of the wgpu backend: a byte offset into a program's block.
#[derive(Debug, Clone)]
pub struct UniformSlot {
    buffer: wgpu::Buffer,
    offset: u64,
    block_size: u64,
}

impl UniformSlot {
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Uploads `value` at this location.
    ///
    /// Fails if the offset or the size of `T` is not a multiple of 4 bytes, or
    /// if the value would run past the end of the uniform block.
    pub fn write<T: Pod>(&self, queue: &wgpu::Queue, value: &T) -> Result<()> {
        self.write_bytes(queue, bytemuck::bytes_of(value))
    }

    /// Uploads a contiguous array starting at this location.
    pub fn write_slice<T: Pod>(&self, queue: &wgpu::Queue, values: &[T]) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        self.write_bytes(queue, bytemuck::cast_slice(values))
    }

    fn write_bytes(&self, queue: &wgpu::Queue, bytes: &[u8]) -> Result<()> {
        check_write(self.offset, bytes.len() as u64, self.block_size)?;
        queue.write_buffer(&self.buffer, self.offset, bytes);
        Ok(())
    }
}

/// Alignment and bounds of a `len`-byte upload at `offset` into a block of
/// `block_size` bytes.
fn check_write(offset: u64, len: u64, block_size: u64) -> Result<()> {
    let align = wgpu::COPY_BUFFER_ALIGNMENT;
    anyhow::ensure!(
        offset % align == 0 && len % align == 0,
        "uniform write of {len} bytes at offset {offset} is not {align}-byte aligned"
    );
    let fits = offset.checked_add(len).is_some_and(|end| end <= block_size);
    anyhow::ensure!(
        fits,
        "uniform write of {len} bytes at offset {offset} overruns the {block_size}-byte block"
    );
    Ok(())
}

/// [`ProgramLinker`] backed by wgpu render pipelines.
///
/// Sources are WGSL. Both stages are checked with naga first for readable
/// messages; object creation then runs inside a validation error scope, so
/// layout and interface mismatches naga cannot see also come back as `Err`
/// instead of reaching the device's uncaptured-error handler.
#[derive(Debug, Clone, Default)]
pub struct WgpuLinker {
    config: WgpuLinkerConfig,
}

impl WgpuLinker {
    pub fn new(config: WgpuLinkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WgpuLinkerConfig {
        &self.config
    }

    fn uniform_block_size(&self) -> u64 {
        self.config.uniform_block_size.max(16).next_multiple_of(16)
    }
}

impl ProgramLinker for WgpuLinker {
    type Context<'a> = RenderCtx<'a>;
    type Program = WgpuProgram;
    type UniformLocation = UniformSlot;

    fn link(
        &self,
        ctx: &RenderCtx<'_>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<WgpuProgram> {
        check_wgsl(vertex_source, naga::ShaderStage::Vertex, VERTEX_ENTRY)
            .context("vertex shader rejected")?;
        check_wgsl(fragment_source, naga::ShaderStage::Fragment, FRAGMENT_ENTRY)
            .context("fragment shader rejected")?;

        let label = self.config.label.as_str();
        let device = ctx.device;
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{label} vertex shader")),
            source: wgpu::ShaderSource::Wgsl(vertex_source.into()),
        });
        let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{label} fragment shader")),
            source: wgpu::ShaderSource::Wgsl(fragment_source.into()),
        });

        let block_size = self.uniform_block_size();

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{label} uniforms bgl")),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} pipeline layout")),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{label} pipeline")),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.target_format,
                    blend: self.config.blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} uniforms")),
            size: block_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} uniforms bind group")),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });

        if let Some(err) = pollster::block_on(scope.pop()) {
            anyhow::bail!("{label} pipeline rejected by the device: {err}");
        }

        Ok(WgpuProgram {
            pipeline,
            uniforms,
            bind_group,
        })
    }

    fn vertex_source(&self) -> &str {
        RENDER_VERTEX
    }
}

/// Parses and validates one WGSL stage and checks its entry point.
fn check_wgsl(source: &str, stage: naga::ShaderStage, entry: &str) -> Result<()> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| anyhow::anyhow!("parse error: {}", e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| anyhow::anyhow!("validation error: {e}"))?;

    let found = module
        .entry_points
        .iter()
        .any(|ep| ep.stage == stage && ep.name == entry);
    anyhow::ensure!(found, "missing {stage:?} entry point `{entry}`");

    Ok(())
}
