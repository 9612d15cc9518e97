//! GPU program linking.
//!
//! The handler talks to the GPU through [`ProgramLinker`] only. [`WgpuLinker`]
//! is the stock implementation; tests and alternative backends provide their
//! own.
//!
//! Convention for the stock backend:
//! - every program shares the full-screen vertex stage in `shaders/render.wgsl`
//!   (entry point `vs_main`);
//! - fragment sources supplied by variants expose `fs_main` and read their
//!   parameters from a single uniform block at `@group(0) @binding(0)`.

mod ctx;
mod linker;
mod wgpu_linker;

pub use ctx::RenderCtx;
pub use linker::ProgramLinker;
pub use wgpu_linker::{
    UniformSlot, WgpuLinker, WgpuLinkerConfig, WgpuProgram, FRAGMENT_ENTRY, RENDER_VERTEX,
    VERTEX_ENTRY,
};
