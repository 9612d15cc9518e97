use anyhow::Result;

/// External program-building primitive.
///
/// A linker turns a vertex/fragment source pair into a program object of its
/// backend. It also names the backend's context and uniform-location types so
/// variants can bind uniforms without the handler knowing the GPU API.
///
/// All calls happen on the thread that owns the GPU context.
pub trait ProgramLinker {
    /// Borrowed GPU context passed into every call.
    type Context<'a>;

    /// Linked program handle.
    type Program;

    /// Handle of one uniform inside a linked program.
    type UniformLocation;

    /// Links `fragment_source` against `vertex_source`.
    ///
    /// Compilation and link failures are returned as errors; nothing is
    /// retried here.
    fn link(
        &self,
        ctx: &Self::Context<'_>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self::Program>;

    /// Source of the vertex stage shared by every program of this backend.
    fn vertex_source(&self) -> &str;
}
