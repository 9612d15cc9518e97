//! Geometric families and their variant catalog.

mod name;
mod registry;

pub use name::{Family, UnknownFamily};
pub use registry::{FamilyRegistry, MAX_VARIANTS_PER_FAMILY};
