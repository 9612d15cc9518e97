//! Recording doubles for the linker and variant seams.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;

use crate::coords::{Vec2, Vec3};
use crate::mesh::{CsgMesh, CsgPolygon};
use crate::program::{RenderingMode, UniformLocations};
use crate::render::ProgramLinker;
use crate::variant::Variant;

/// Context of the mock backend.
#[derive(Debug, Default)]
pub(crate) struct MockCtx;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MockProgram {
    pub handle: u32,
    pub fragment: String,
}

/// Linker handing out sequential program handles.
///
/// Fragments containing `#error` fail to link.
#[derive(Debug, Default)]
pub(crate) struct MockLinker {
    next_handle: Cell<u32>,
    pub links: RefCell<Vec<String>>,
}

impl MockLinker {
    pub const VERTEX: &'static str = "mock vertex";

    pub fn link_count(&self) -> usize {
        self.links.borrow().len()
    }
}

impl ProgramLinker for MockLinker {
    type Context<'a> = MockCtx;
    type Program = MockProgram;
    type UniformLocation = u32;

    fn link(
        &self,
        _ctx: &MockCtx,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<MockProgram> {
        assert_eq!(vertex_source, Self::VERTEX);
        anyhow::ensure!(
            !fragment_source.contains("#error"),
            "compile error in `{fragment_source}`"
        );
        self.links.borrow_mut().push(fragment_source.to_string());
        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);
        Ok(MockProgram {
            handle,
            fragment: fragment_source.to_string(),
        })
    }

    fn vertex_source(&self) -> &str {
        Self::VERTEX
    }
}

/// Everything a [`MockVariant`] was asked to do.
#[derive(Debug, Default)]
pub(crate) struct VariantLog {
    pub updates: usize,
    pub shader_builds: Vec<String>,
    pub selects: Vec<(Vec2, f32)>,
    pub moves: Vec<Vec2>,
    pub uniform_sets: Vec<(usize, f32, usize)>,
    pub location_queries: Vec<u32>,
}

pub(crate) type SharedLog = Rc<RefCell<VariantLog>>;

/// Variant whose shaders are `"<name>:<pass>"` strings.
///
/// `move_to` reports a change when the pointer is right of the origin.
pub(crate) struct MockVariant {
    pub name: String,
    pub log: SharedLog,
    pub broken_shaders: bool,
    pub broken_meshes: bool,
}

impl MockVariant {
    pub fn new(name: impl Into<String>) -> (Self, SharedLog) {
        let log = SharedLog::default();
        let variant = Self {
            name: name.into(),
            log: Rc::clone(&log),
            broken_shaders: false,
            broken_meshes: false,
        };
        (variant, log)
    }

    /// Variant nobody inspects.
    pub fn detached(name: impl Into<String>) -> Self {
        Self::new(name).0
    }

    fn shader(&self, pass: &str) -> String {
        self.log.borrow_mut().shader_builds.push(pass.to_string());
        let source = format!("{}:{pass}", self.name);
        if self.broken_shaders {
            format!("#error {source}")
        } else {
            source
        }
    }
}

impl Variant<MockLinker> for MockVariant {
    fn update(&mut self) {
        self.log.borrow_mut().updates += 1;
    }

    fn select(&mut self, point: Vec2, scale: f32) {
        self.log.borrow_mut().selects.push((point, scale));
    }

    fn move_to(&mut self, point: Vec2) -> bool {
        self.log.borrow_mut().moves.push(point);
        point.x > 0.0
    }

    fn uniform_locations(&self, _ctx: &MockCtx, program: &MockProgram) -> UniformLocations<u32> {
        self.log.borrow_mut().location_queries.push(program.handle);
        [("u_resolution", 0), ("u_program", program.handle)]
            .into_iter()
            .collect()
    }

    fn set_uniform_values(
        &self,
        _ctx: &MockCtx,
        locations: &UniformLocations<u32>,
        pass_index: usize,
        scale: f32,
    ) {
        self.log
            .borrow_mut()
            .uniform_sets
            .push((pass_index, scale, locations.len()));
    }

    fn build_spheirahedra_shader(&self) -> String {
        self.shader("surface")
    }

    fn build_prism_shader(&self) -> String {
        self.shader("prism")
    }

    fn build_limitset_shader(&self, mode: RenderingMode) -> String {
        self.shader(&format!("limitset{}", mode.get()))
    }

    fn build_parameter_space_shader(&self) -> String {
        self.shader("parameter")
    }

    fn build_prism_mesh(&self) -> Result<CsgMesh> {
        anyhow::ensure!(!self.broken_meshes, "prism of {} is not closed", self.name);
        Ok(CsgMesh::new(vec![CsgPolygon::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ])]))
    }

    fn build_spheirahedron_mesh(&self) -> Result<CsgMesh> {
        anyhow::ensure!(!self.broken_meshes, "spheirahedron of {} is empty", self.name);
        Ok(unit_cube())
    }
}

/// Axis-aligned unit cube, six quads.
pub(crate) fn unit_cube() -> CsgMesh {
    let v = |x: f32, y: f32, z: f32| Vec3::new(x, y, z);
    CsgMesh::new(vec![
        CsgPolygon::new(vec![v(0., 0., 0.), v(0., 1., 0.), v(1., 1., 0.), v(1., 0., 0.)]),
        CsgPolygon::new(vec![v(0., 0., 1.), v(1., 0., 1.), v(1., 1., 1.), v(0., 1., 1.)]),
        CsgPolygon::new(vec![v(0., 0., 0.), v(1., 0., 0.), v(1., 0., 1.), v(0., 0., 1.)]),
        CsgPolygon::new(vec![v(0., 1., 0.), v(0., 1., 1.), v(1., 1., 1.), v(1., 1., 0.)]),
        CsgPolygon::new(vec![v(0., 0., 0.), v(0., 0., 1.), v(0., 1., 1.), v(0., 1., 0.)]),
        CsgPolygon::new(vec![v(1., 0., 0.), v(1., 1., 0.), v(1., 1., 1.), v(1., 0., 1.)]),
    ])
}
