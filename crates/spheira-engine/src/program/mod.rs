//! Lazily built GPU programs.
//!
//! Programs are cached per render pass under a `(Family, K)` key, where `K` is
//! the pass-specific axis: [`Canvas`] for the surface and prism passes,
//! [`RenderingMode`] for the limit-set pass and the variant index for the
//! parameter-space pass. Entries are built on first request and live as long
//! as the cache.

mod cache;
mod entry;
mod key;

pub use cache::ProgramCache;
pub use entry::{ProgramEntry, ProgramId, UniformLocations};
pub use key::{Canvas, RenderPass, RenderingMode};
