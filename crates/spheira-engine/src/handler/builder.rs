use anyhow::Result;

use crate::family::{Family, FamilyRegistry};
use crate::mesh::{DirectorySink, FileSink};
use crate::render::ProgramLinker;
use crate::variant::Variant;

use super::{HandlerConfig, SpheirahedraHandler};

/// Assembles a [`SpheirahedraHandler`].
///
/// ```rust,ignore
/// let handler = SpheirahedraHandler::builder(WgpuLinker::default())
///     .family(Family::Cube, cube_variants())
///     .family(Family::Tetrahedron, tetrahedron_variants())
///     .file_sink(DirectorySink::new("exports"))
///     .build()?;
/// ```
pub struct HandlerBuilder<L: ProgramLinker> {
    linker: L,
    config: HandlerConfig,
    families: Vec<(Family, Vec<Box<dyn Variant<L>>>)>,
    sink: Option<Box<dyn FileSink>>,
}

impl<L: ProgramLinker> HandlerBuilder<L> {
    pub(super) fn new(linker: L) -> Self {
        Self {
            linker,
            config: HandlerConfig::default(),
            families: Vec::new(),
            sink: None,
        }
    }

    pub fn config(mut self, config: HandlerConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers the variants of one family, in index order.
    pub fn family<I>(mut self, family: Family, variants: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Variant<L>>>,
    {
        self.families.push((family, variants.into_iter().collect()));
        self
    }

    /// Where exported meshes go. Defaults to the working directory.
    pub fn file_sink(mut self, sink: impl FileSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Builds the registry and the handler.
    ///
    /// Fails on a duplicated family or an oversized variant list.
    pub fn build(self) -> Result<SpheirahedraHandler<L>> {
        let registry = FamilyRegistry::from_families(self.families)?;
        let sink = self
            .sink
            .unwrap_or_else(|| Box::new(DirectorySink::new(".")));

        log::debug!(
            "spheirahedra handler ready: {} families",
            registry.families().count()
        );

        Ok(SpheirahedraHandler::from_parts(
            self.linker,
            registry,
            self.config,
            sink,
        ))
    }
}
