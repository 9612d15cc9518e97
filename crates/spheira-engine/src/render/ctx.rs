/// Context handed to the wgpu linker and to variants binding uniforms.
///
/// Borrowed from the host for the duration of one call.
#[derive(Clone, Copy)]
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    /// Color format the programs render into.
    pub target_format: wgpu::TextureFormat,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        target_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            device,
            queue,
            target_format,
        }
    }
}
