/// Initialization parameters for a headless device.
///
/// Keep this small. Add flags only when a backend actually needs one.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends the instance may pick from.
    pub backends: wgpu::Backends,

    /// Adapter power preference.
    pub power_preference: wgpu::PowerPreference,

    /// Allow a software adapter when no hardware adapter is present.
    pub force_fallback_adapter: bool,

    /// Required wgpu features.
    ///
    /// Ray-marched limit sets run on core WGSL; leave this empty unless a
    /// variant really needs more.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Texture format programs are linked against.
    pub target_format: wgpu::TextureFormat,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            target_format: wgpu::TextureFormat::Rgba8UnormSrgb,
        }
    }
}
