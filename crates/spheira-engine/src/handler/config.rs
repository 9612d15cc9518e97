use crate::mesh::StlOptions;
use crate::program::RenderingMode;

/// File name of the exported sphairahedral prism.
pub const PRISM_FILE_NAME: &str = "sphairahedralPrism.stl";

/// File name of the exported spheirahedron.
pub const SURFACE_FILE_NAME: &str = "sphairahedron.stl";

/// Handler configuration.
#[derive(Debug, Clone, Default)]
pub struct HandlerConfig {
    /// Limit-set mode in effect before the first `set_rendering_mode`.
    pub initial_rendering_mode: RenderingMode,

    pub export: ExportConfig,
}

/// Mesh export settings.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Serializer options. Binary STL by default.
    pub stl: StlOptions,
    pub prism_file_name: String,
    pub surface_file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            stl: StlOptions::default(),
            prism_file_name: PRISM_FILE_NAME.to_string(),
            surface_file_name: SURFACE_FILE_NAME.to_string(),
        }
    }
}
