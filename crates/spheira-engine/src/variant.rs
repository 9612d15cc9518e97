//! Capability contract of one parametrized configuration of a family.
//!
//! Variants are supplied by the host (one type per family, one instance per
//! dihedral-angle configuration). They own all geometry and shader
//! generation; the handler only sequences calls into them.

use anyhow::Result;

use crate::coords::Vec2;
use crate::mesh::CsgMesh;
use crate::program::{RenderingMode, UniformLocations};
use crate::render::ProgramLinker;

/// One variant of a spheirahedron family.
///
/// Shader builders return fragment-stage source for the backend of `L`; the
/// handler links it against the backend's shared vertex stage.
pub trait Variant<L: ProgramLinker> {
    /// Recomputes derived state. Called once every time the variant becomes
    /// active.
    fn update(&mut self);

    /// Pointer press at `point` (canvas pixels). `scale` maps pixels to
    /// parameter units.
    fn select(&mut self, point: Vec2, scale: f32);

    /// Pointer drag to `point`.
    ///
    /// Returns `true` when a parameter changed and the caller should redraw.
    fn move_to(&mut self, point: Vec2) -> bool;

    /// Uniform locations this variant uses in `program`.
    fn uniform_locations(
        &self,
        ctx: &L::Context<'_>,
        program: &L::Program,
    ) -> UniformLocations<L::UniformLocation>;

    /// Uploads uniform values for one draw.
    ///
    /// `pass_index` is opaque to the handler and passed through from the
    /// caller.
    fn set_uniform_values(
        &self,
        ctx: &L::Context<'_>,
        locations: &UniformLocations<L::UniformLocation>,
        pass_index: usize,
        scale: f32,
    );

    fn build_spheirahedra_shader(&self) -> String;

    fn build_prism_shader(&self) -> String;

    fn build_limitset_shader(&self, mode: RenderingMode) -> String;

    fn build_parameter_space_shader(&self) -> String;

    /// Mesh of the sphairahedral prism (the fundamental domain before
    /// inversion).
    fn build_prism_mesh(&self) -> Result<CsgMesh>;

    fn build_spheirahedron_mesh(&self) -> Result<CsgMesh>;
}
