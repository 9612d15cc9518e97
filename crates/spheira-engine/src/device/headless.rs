use anyhow::{Context, Result};

use crate::render::RenderCtx;

use super::GpuInit;

/// Device and queue without a surface.
pub struct HeadlessGpu {
    device: wgpu::Device,
    queue: wgpu::Queue,
    target_format: wgpu::TextureFormat,
}

impl HeadlessGpu {
    /// Requests an adapter and device.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(init: GpuInit) -> Result<Self> {
        let GpuInit {
            backends,
            power_preference,
            force_fallback_adapter,
            required_features,
            required_limits,
            target_format,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: None,
                force_fallback_adapter,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        log::debug!("headless adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("spheira headless device"),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        Ok(Self {
            device,
            queue,
            target_format,
        })
    }

    /// Blocking variant of [`HeadlessGpu::new`] for tools without an executor.
    pub fn new_blocking(init: GpuInit) -> Result<Self> {
        pollster::block_on(Self::new(init))
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn target_format(&self) -> wgpu::TextureFormat {
        self.target_format
    }

    /// Borrows the device as a linking/uniform context.
    pub fn render_ctx(&self) -> RenderCtx<'_> {
        RenderCtx::new(&self.device, &self.queue, self.target_format)
    }
}
