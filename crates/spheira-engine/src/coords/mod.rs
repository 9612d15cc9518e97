//! Small vector types shared by interaction forwarding and mesh export.
//!
//! - [`Vec2`]: pointer positions in canvas pixels (origin top-left, +Y down).
//! - [`Vec3`]: model-space positions and normals of exported meshes.

mod vec2;
mod vec3;

pub use vec2::Vec2;
pub use vec3::Vec3;
