use anyhow::Result;

use crate::error::HandlerError;
use crate::render::ProgramLinker;
use crate::variant::Variant;

use super::Family;

/// Upper bound on variants per family.
///
/// Also the size of the parameter-space key domain.
pub const MAX_VARIANTS_PER_FAMILY: usize = 50;

/// Fixed catalog of variants, indexed by family.
///
/// Built once from externally supplied variant instances and never changed
/// afterwards. Each variant is owned by exactly one slot.
pub struct FamilyRegistry<L: ProgramLinker> {
    slots: [Vec<Box<dyn Variant<L>>>; Family::COUNT],
}

impl<L: ProgramLinker> FamilyRegistry<L> {
    /// Builds the catalog.
    ///
    /// Fails if a family is listed twice or has more than
    /// [`MAX_VARIANTS_PER_FAMILY`] variants. Families that are not listed
    /// stay empty.
    pub fn from_families<I>(families: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Family, Vec<Box<dyn Variant<L>>>)>,
    {
        let mut slots: [Vec<Box<dyn Variant<L>>>; Family::COUNT] = Default::default();
        let mut seen = [false; Family::COUNT];

        for (family, variants) in families {
            if seen[family.index()] {
                return Err(HandlerError::DuplicateFamily(family).into());
            }
            if variants.len() > MAX_VARIANTS_PER_FAMILY {
                return Err(HandlerError::TooManyVariants {
                    family,
                    count: variants.len(),
                }
                .into());
            }
            seen[family.index()] = true;
            slots[family.index()] = variants;
        }

        Ok(Self { slots })
    }

    /// Whether `family` has at least one variant.
    ///
    /// A family registered with an empty list is treated like an unknown one.
    pub fn family_exists(&self, family: Family) -> bool {
        !self.slots[family.index()].is_empty()
    }

    pub fn variant_count(&self, family: Family) -> usize {
        self.slots[family.index()].len()
    }

    /// Families with at least one variant, in [`Family::ALL`] order.
    pub fn families(&self) -> impl Iterator<Item = Family> + '_ {
        Family::ALL.into_iter().filter(|f| self.family_exists(*f))
    }

    pub fn variant(&self, family: Family, index: usize) -> Option<&dyn Variant<L>> {
        self.slots[family.index()].get(index).map(|v| v.as_ref())
    }

    pub fn variant_mut(
        &mut self,
        family: Family,
        index: usize,
    ) -> Option<&mut (dyn Variant<L> + 'static)> {
        self.slots[family.index()].get_mut(index).map(|v| v.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockLinker, MockVariant};

    type Boxed = Box<dyn Variant<MockLinker>>;

    fn variants(n: usize) -> Vec<Boxed> {
        (0..n)
            .map(|i| Box::new(MockVariant::detached(format!("v{i}"))) as Boxed)
            .collect()
    }

    #[test]
    fn counts_and_existence() {
        let registry = FamilyRegistry::<MockLinker>::from_families([
            (Family::Cube, variants(3)),
            (Family::Tetrahedron, variants(1)),
            (Family::HexahedralCake2, variants(0)),
        ])
        .unwrap();

        assert!(registry.family_exists(Family::Cube));
        assert_eq!(registry.variant_count(Family::Cube), 3);
        assert_eq!(registry.variant_count(Family::Tetrahedron), 1);
        assert!(!registry.family_exists(Family::HexahedralCake2));
        assert!(!registry.family_exists(Family::PentahedralPrism));
        assert_eq!(registry.variant_count(Family::PentahedralPrism), 0);
        assert_eq!(
            registry.families().collect::<Vec<_>>(),
            vec![Family::Cube, Family::Tetrahedron]
        );
    }

    #[test]
    fn variant_lookup_is_bounds_checked() {
        let registry =
            FamilyRegistry::<MockLinker>::from_families([(Family::Cube, variants(2))]).unwrap();
        assert!(registry.variant(Family::Cube, 1).is_some());
        assert!(registry.variant(Family::Cube, 2).is_none());
        assert!(registry.variant(Family::Tetrahedron, 0).is_none());
    }

    #[test]
    fn duplicate_family_is_rejected() {
        let err = FamilyRegistry::<MockLinker>::from_families([
            (Family::Cube, variants(1)),
            (Family::Cube, variants(2)),
        ])
        .err()
        .unwrap();
        assert!(matches!(
            err.downcast_ref::<HandlerError>(),
            Some(HandlerError::DuplicateFamily(Family::Cube))
        ));
    }

    #[test]
    fn oversized_family_is_rejected() {
        let err = FamilyRegistry::<MockLinker>::from_families([(
            Family::PentahedralPyramid,
            variants(MAX_VARIANTS_PER_FAMILY + 1),
        )])
        .err()
        .unwrap();
        assert!(matches!(
            err.downcast_ref::<HandlerError>(),
            Some(HandlerError::TooManyVariants { count: 51, .. })
        ));
    }
}
