//! Mesh export: CSG polygon soup in, STL bytes out, handed to a file sink.

mod csg;
mod sink;
mod stl;

pub use csg::{CsgMesh, CsgPolygon};
pub use sink::{DirectorySink, FileSink, MemorySink};
pub use stl::{serialize_stl, StlOptions};
