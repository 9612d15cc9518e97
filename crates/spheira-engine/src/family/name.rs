use std::fmt;
use std::str::FromStr;

/// Closed set of spheirahedron constructions.
///
/// Each family is named after the polyhedron whose faces become the spheres
/// of the construction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Family {
    Cube,
    Tetrahedron,
    PentahedralPyramid,
    PentahedralPrism,
    HexahedralCake1,
    HexahedralCake2,
    HexahedralCake3,
}

impl Family {
    pub const COUNT: usize = 7;

    pub const ALL: [Family; Family::COUNT] = [
        Family::Cube,
        Family::Tetrahedron,
        Family::PentahedralPyramid,
        Family::PentahedralPrism,
        Family::HexahedralCake1,
        Family::HexahedralCake2,
        Family::HexahedralCake3,
    ];

    /// Key used by the UI and in saved URLs.
    pub const fn name(self) -> &'static str {
        match self {
            Family::Cube => "cube",
            Family::Tetrahedron => "tetrahedron",
            Family::PentahedralPyramid => "pentahedralPyramid",
            Family::PentahedralPrism => "pentahedralPrism",
            Family::HexahedralCake1 => "hexahedralCake1",
            Family::HexahedralCake2 => "hexahedralCake2",
            Family::HexahedralCake3 => "hexahedralCake3",
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Family for a UI key, `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for [`Family::from_str`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown spheirahedron family `{0}`")]
pub struct UnknownFamily(pub String);

impl FromStr for Family {
    type Err = UnknownFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownFamily(s.to_string()))
    }
}
