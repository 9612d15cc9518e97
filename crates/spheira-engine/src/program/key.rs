use std::fmt;

/// Canvas a surface or prism program draws into.
///
/// The visualizer draws the spheirahedron on two canvases side by side. Each
/// canvas gets its own program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Canvas {
    Primary,
    Secondary,
}

impl Canvas {
    pub const ALL: [Canvas; 2] = [Canvas::Primary, Canvas::Secondary];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Canvas::Primary => 0,
            Canvas::Secondary => 1,
        }
    }

    /// Canvas for a slot number, `None` outside `0..2`.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Canvas::Primary),
            1 => Some(Canvas::Secondary),
            _ => None,
        }
    }
}

/// Limit-set visualization style, `0..=2`.
///
/// The handler treats the value as opaque; only the variant's limit-set
/// shader builder gives it meaning.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct RenderingMode(u8);

impl RenderingMode {
    /// Number of distinct modes.
    pub const COUNT: u8 = 3;

    pub const fn new(mode: u8) -> Option<Self> {
        if mode < Self::COUNT { Some(Self(mode)) } else { None }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = RenderingMode> {
        (0..Self::COUNT).map(RenderingMode)
    }
}

impl TryFrom<u8> for RenderingMode {
    type Error = u8;

    fn try_from(mode: u8) -> Result<Self, u8> {
        Self::new(mode).ok_or(mode)
    }
}

impl fmt::Display for RenderingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mode {}", self.0)
    }
}

/// Render pass kinds, one program cache each.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RenderPass {
    Surface,
    Prism,
    LimitSet,
    ParameterSpace,
}

impl RenderPass {
    pub const ALL: [RenderPass; 4] = [
        RenderPass::Surface,
        RenderPass::Prism,
        RenderPass::LimitSet,
        RenderPass::ParameterSpace,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            RenderPass::Surface => "surface",
            RenderPass::Prism => "prism",
            RenderPass::LimitSet => "limit-set",
            RenderPass::ParameterSpace => "parameter-space",
        }
    }
}

impl fmt::Display for RenderPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
