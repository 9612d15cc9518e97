//! Render-resource orchestration for an interactive spheirahedra visualizer.
//!
//! The crate selects among families of parametrized solids, lazily links and
//! caches the GPU programs each family/variant needs, forwards pointer input
//! to the active variant and routes its CSG meshes to STL export.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`handler`] | `SpheirahedraHandler`, its builder and config |
//! | [`family`] | `Family`, `FamilyRegistry` |
//! | [`variant`] | `Variant`, the per-family capability contract |
//! | [`program`] | `ProgramCache`, `ProgramEntry`, cache key types |
//! | [`render`] | `ProgramLinker`, the wgpu linker |
//! | [`mesh`] | `CsgMesh`, STL serialization, file sinks |
//! | [`device`] | headless wgpu device helper |
//! | [`logging`] | `env_logger` setup |

pub mod coords;
pub mod device;
pub mod error;
pub mod family;
pub mod handler;
pub mod logging;
pub mod mesh;
pub mod program;
pub mod render;
pub mod variant;

#[cfg(test)]
pub(crate) mod testing;

pub use error::HandlerError;
pub use family::Family;
pub use handler::{HandlerConfig, SpheirahedraHandler};
pub use variant::Variant;
