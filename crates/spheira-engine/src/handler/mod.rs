//! Family/variant selection, program caching and export sequencing.
//!
//! [`SpheirahedraHandler`] is driven by the host's draw loop, one call per
//! frame or interaction event, on the thread that owns the GPU context:
//!
//! 1. `select_family` / `select_variant` pick the active variant;
//! 2. `*_program` returns the cached program for a pass, linking it on the
//!    first request for its key;
//! 3. `set_uniform_values` and the pointer methods forward to the active
//!    variant;
//! 4. `export_*_mesh` turn the variant's CSG mesh into an STL file.

mod builder;
mod config;


use std::rc::Rc;

use anyhow::Result;

use crate::coords::Vec2;
use crate::error::HandlerError;
use crate::family::{Family, FamilyRegistry};
use crate::mesh::{serialize_stl, CsgMesh, FileSink};
use crate::program::{
    Canvas, ProgramCache, ProgramEntry, RenderPass, RenderingMode, UniformLocations,
};
use crate::render::ProgramLinker;
use crate::variant::Variant;

pub use builder::HandlerBuilder;
pub use config::{ExportConfig, HandlerConfig, PRISM_FILE_NAME, SURFACE_FILE_NAME};

/// Cached program of backend `L`.
pub type Program<L> =
    ProgramEntry<<L as ProgramLinker>::Program, <L as ProgramLinker>::UniformLocation>;

type Cache<L, K> =
    ProgramCache<<L as ProgramLinker>::Program, <L as ProgramLinker>::UniformLocation, K>;

/// Active family and variant index.
///
/// The index is always valid for the family's variant list.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Selection {
    family: Family,
    index: usize,
}

/// Render-resource orchestrator for the spheirahedra visualizer.
///
/// Owns the variant catalog, the active selection and four program caches:
///
/// | pass | key |
/// |---|---|
/// | surface | (family, canvas) |
/// | prism | (family, canvas) |
/// | limit set | (family, rendering mode) |
/// | parameter space | (family, variant index) |
///
/// Programs are built from whichever variant is active when their key is
/// first requested and are never rebuilt.
pub struct SpheirahedraHandler<L: ProgramLinker> {
    linker: L,
    registry: FamilyRegistry<L>,
    selection: Option<Selection>,
    rendering_mode: RenderingMode,

    surface_programs: Cache<L, Canvas>,
    prism_programs: Cache<L, Canvas>,
    limitset_programs: Cache<L, RenderingMode>,
    parameter_programs: Cache<L, usize>,

    export: ExportConfig,
    sink: Box<dyn FileSink>,
}

impl<L: ProgramLinker> SpheirahedraHandler<L> {
    pub fn builder(linker: L) -> HandlerBuilder<L> {
        HandlerBuilder::new(linker)
    }

    fn from_parts(
        linker: L,
        registry: FamilyRegistry<L>,
        config: HandlerConfig,
        sink: Box<dyn FileSink>,
    ) -> Self {
        Self {
            linker,
            registry,
            selection: None,
            rendering_mode: config.initial_rendering_mode,
            surface_programs: ProgramCache::new(RenderPass::Surface),
            prism_programs: ProgramCache::new(RenderPass::Prism),
            limitset_programs: ProgramCache::new(RenderPass::LimitSet),
            parameter_programs: ProgramCache::new(RenderPass::ParameterSpace),
            export: config.export,
            sink,
        }
    }

    // ── catalog ───────────────────────────────────────────────────────────

    pub fn linker(&self) -> &L {
        &self.linker
    }

    pub fn family_exists(&self, family: Family) -> bool {
        self.registry.family_exists(family)
    }

    pub fn variant_count(&self, family: Family) -> usize {
        self.registry.variant_count(family)
    }

    /// Selectable families.
    pub fn families(&self) -> impl Iterator<Item = Family> + '_ {
        self.registry.families()
    }

    // ── selection ─────────────────────────────────────────────────────────

    /// Activates the first variant of `family` and runs its `update`.
    ///
    /// Unknown or empty families are ignored.
    pub fn select_family(&mut self, family: Family) {
        if !self.registry.family_exists(family) {
            log::trace!("ignoring selection of unregistered family {family}");
            return;
        }
        self.activate(Selection { family, index: 0 });
    }

    /// Like [`select_family`](Self::select_family), by UI key.
    pub fn select_family_by_name(&mut self, name: &str) {
        match Family::from_name(name) {
            Some(family) => self.select_family(family),
            None => log::trace!("ignoring selection of unknown family `{name}`"),
        }
    }

    /// Activates variant `index` of the current family and runs its `update`.
    ///
    /// Ignored when no family is active or `index` is out of range.
    pub fn select_variant(&mut self, index: usize) {
        let Some(current) = self.selection else {
            log::trace!("ignoring variant {index}: no family selected");
            return;
        };
        if index >= self.registry.variant_count(current.family) {
            log::trace!("ignoring variant {index} of {}", current.family);
            return;
        }
        self.activate(Selection {
            family: current.family,
            index,
        });
    }

    fn activate(&mut self, selection: Selection) {
        let Some(variant) = self.registry.variant_mut(selection.family, selection.index) else {
            return;
        };
        variant.update();
        self.selection = Some(selection);
        log::debug!(
            "active: {} variant {}/{}",
            selection.family,
            selection.index,
            self.registry.variant_count(selection.family)
        );
    }

    pub fn current_family(&self) -> Option<Family> {
        self.selection.map(|s| s.family)
    }

    pub fn current_variant_index(&self) -> Option<usize> {
        self.selection.map(|s| s.index)
    }

    pub fn current_variant(&self) -> Option<&dyn Variant<L>> {
        let s = self.selection?;
        self.registry.variant(s.family, s.index)
    }

    pub fn has_active_variant(&self) -> bool {
        self.selection.is_some()
    }

    fn active_variant(&self) -> Result<&dyn Variant<L>> {
        Ok(self.current_variant().ok_or(HandlerError::NoActiveVariant)?)
    }

    fn active_variant_mut(&mut self) -> Result<&mut (dyn Variant<L> + 'static)> {
        let s = self.selection.ok_or(HandlerError::NoActiveVariant)?;
        Ok(self
            .registry
            .variant_mut(s.family, s.index)
            .ok_or(HandlerError::NoActiveVariant)?)
    }

    // ── rendering mode ────────────────────────────────────────────────────

    pub fn rendering_mode(&self) -> RenderingMode {
        self.rendering_mode
    }

    /// Sets the mode used by [`limitset_program`](Self::limitset_program).
    pub fn set_rendering_mode(&mut self, mode: RenderingMode) {
        self.rendering_mode = mode;
    }

    // ── programs ──────────────────────────────────────────────────────────

    /// Spheirahedron surface program of the current family for `canvas`.
    pub fn surface_program(
        &mut self,
        ctx: &L::Context<'_>,
        canvas: Canvas,
    ) -> Result<Rc<Program<L>>> {
        let Self {
            linker,
            registry,
            selection,
            surface_programs,
            ..
        } = self;
        let (active, variant) = selected(registry, *selection)?;
        surface_programs.get_or_try_build(active.family, canvas, || {
            link_for(linker, ctx, variant, &variant.build_spheirahedra_shader())
        })
    }

    /// Sphairahedral prism program of the current family for `canvas`.
    pub fn prism_program(
        &mut self,
        ctx: &L::Context<'_>,
        canvas: Canvas,
    ) -> Result<Rc<Program<L>>> {
        let Self {
            linker,
            registry,
            selection,
            prism_programs,
            ..
        } = self;
        let (active, variant) = selected(registry, *selection)?;
        prism_programs.get_or_try_build(active.family, canvas, || {
            link_for(linker, ctx, variant, &variant.build_prism_shader())
        })
    }

    /// Limit-set program of the current family for the current rendering
    /// mode.
    ///
    /// Set the mode with [`set_rendering_mode`](Self::set_rendering_mode)
    /// before calling; it is part of the cache key.
    pub fn limitset_program(&mut self, ctx: &L::Context<'_>) -> Result<Rc<Program<L>>> {
        let mode = self.rendering_mode;
        let Self {
            linker,
            registry,
            selection,
            limitset_programs,
            ..
        } = self;
        let (active, variant) = selected(registry, *selection)?;
        limitset_programs.get_or_try_build(active.family, mode, || {
            link_for(linker, ctx, variant, &variant.build_limitset_shader(mode))
        })
    }

    /// Parameter-space program of the current family and variant index.
    pub fn parameter_program(&mut self, ctx: &L::Context<'_>) -> Result<Rc<Program<L>>> {
        let Self {
            linker,
            registry,
            selection,
            parameter_programs,
            ..
        } = self;
        let (active, variant) = selected(registry, *selection)?;
        parameter_programs.get_or_try_build(active.family, active.index, || {
            link_for(linker, ctx, variant, &variant.build_parameter_space_shader())
        })
    }

    /// Number of programs built so far for `pass`.
    pub fn cached_program_count(&self, pass: RenderPass) -> usize {
        match pass {
            RenderPass::Surface => self.surface_programs.len(),
            RenderPass::Prism => self.prism_programs.len(),
            RenderPass::LimitSet => self.limitset_programs.len(),
            RenderPass::ParameterSpace => self.parameter_programs.len(),
        }
    }

    // ── forwarding ────────────────────────────────────────────────────────

    /// Pointer press, forwarded to the active variant.
    pub fn select(&mut self, point: Vec2, scale: f32) -> Result<()> {
        self.active_variant_mut()?.select(point, scale);
        Ok(())
    }

    /// Pointer drag, forwarded to the active variant.
    ///
    /// Returns the variant's "parameters changed" flag.
    pub fn move_to(&mut self, point: Vec2) -> Result<bool> {
        Ok(self.active_variant_mut()?.move_to(point))
    }

    /// Uploads the active variant's uniforms for one draw.
    pub fn set_uniform_values(
        &self,
        ctx: &L::Context<'_>,
        locations: &UniformLocations<L::UniformLocation>,
        pass_index: usize,
        scale: f32,
    ) -> Result<()> {
        self.active_variant()?
            .set_uniform_values(ctx, locations, pass_index, scale);
        Ok(())
    }

    // ── export ────────────────────────────────────────────────────────────

    /// Exports the active variant's prism mesh as `sphairahedralPrism.stl`.
    pub fn export_prism_mesh(&mut self) -> Result<()> {
        let mesh = self.active_variant()?.build_prism_mesh()?;
        let file_name = self.export.prism_file_name.clone();
        self.offer_mesh(&mesh, &file_name)
    }

    /// Exports the active variant's spheirahedron mesh as `sphairahedron.stl`.
    pub fn export_surface_mesh(&mut self) -> Result<()> {
        let mesh = self.active_variant()?.build_spheirahedron_mesh()?;
        let file_name = self.export.surface_file_name.clone();
        self.offer_mesh(&mesh, &file_name)
    }

    fn offer_mesh(&mut self, mesh: &CsgMesh, file_name: &str) -> Result<()> {
        let bytes = serialize_stl(mesh, &self.export.stl)?;
        log::debug!(
            "exporting {file_name}: {} triangles, {} bytes",
            mesh.triangle_count(),
            bytes.len()
        );
        self.sink.offer(file_name, bytes)
    }
}

/// Active selection and its variant, or `NoActiveVariant`.
fn selected<L: ProgramLinker>(
    registry: &FamilyRegistry<L>,
    selection: Option<Selection>,
) -> Result<(Selection, &dyn Variant<L>)> {
    let s = selection.ok_or(HandlerError::NoActiveVariant)?;
    let variant = registry
        .variant(s.family, s.index)
        .ok_or(HandlerError::NoActiveVariant)?;
    Ok((s, variant))
}

/// Links `fragment` against the shared vertex stage and asks `variant` for
/// the new program's uniform locations.
fn link_for<L: ProgramLinker>(
    linker: &L,
    ctx: &L::Context<'_>,
    variant: &dyn Variant<L>,
    fragment: &str,
) -> Result<(L::Program, UniformLocations<L::UniformLocation>)> {
    let program = linker.link(ctx, linker.vertex_source(), fragment)?;
    let locations = variant.uniform_locations(ctx, &program);
    Ok((program, locations))
}
