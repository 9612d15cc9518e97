use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use anyhow::Result;

use crate::family::Family;

use super::{ProgramEntry, ProgramId, RenderPass, UniformLocations};

/// Build-once cache for one render pass.
///
/// Keys are `(Family, K)`. An entry is built the first time its key is
/// requested and then returned unchanged for the lifetime of the cache.
/// Nothing is evicted: the key space is at most 7 families times the size of
/// `K`'s domain.
///
/// A failed build leaves the slot empty; the next request builds again.
///
/// Entries are handed out as `Rc` so callers can hold a program while calling
/// back into the owner. The cache is confined to the thread owning the GPU
/// context.
pub struct ProgramCache<P, U, K> {
    pass: RenderPass,
    entries: HashMap<(Family, K), Rc<ProgramEntry<P, U>>>,
    next_seq: u32,
}

impl<P, U, K> ProgramCache<P, U, K>
where
    K: Copy + Eq + Hash + Debug,
{
    pub fn new(pass: RenderPass) -> Self {
        Self {
            pass,
            entries: HashMap::new(),
            next_seq: 0,
        }
    }

    pub fn pass(&self) -> RenderPass {
        self.pass
    }

    pub fn get(&self, family: Family, key: K) -> Option<Rc<ProgramEntry<P, U>>> {
        self.entries.get(&(family, key)).cloned()
    }

    pub fn contains(&self, family: Family, key: K) -> bool {
        self.entries.contains_key(&(family, key))
    }

    /// Returns the entry at `(family, key)`, building it with `build` first if
    /// the slot is empty.
    ///
    /// `build` runs at most once per successful key. Its error is returned
    /// as is and nothing is stored.
    pub fn get_or_try_build<F>(
        &mut self,
        family: Family,
        key: K,
        build: F,
    ) -> Result<Rc<ProgramEntry<P, U>>>
    where
        F: FnOnce() -> Result<(P, UniformLocations<U>)>,
    {
        match self.entries.entry((family, key)) {
            Entry::Occupied(slot) => Ok(Rc::clone(slot.get())),
            Entry::Vacant(slot) => {
                let (program, uniform_locations) = build()?;
                let id = ProgramId {
                    pass: self.pass,
                    seq: self.next_seq,
                };
                self.next_seq += 1;
                log::debug!("built {} program {} for {family} / {key:?}", self.pass, id.seq);
                let entry = Rc::new(ProgramEntry::new(id, program, uniform_locations));
                Ok(Rc::clone(slot.insert(entry)))
            }
        }
    }

    /// Number of built programs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    type Cache = ProgramCache<&'static str, u32, u8>;

    fn built(name: &'static str) -> Result<(&'static str, UniformLocations<u32>)> {
        Ok((name, UniformLocations::new()))
    }

    // ── build once ────────────────────────────────────────────────────────

    #[test]
    fn second_request_reuses_entry() {
        let mut cache = Cache::new(RenderPass::Surface);
        let calls = Cell::new(0);

        let first = cache
            .get_or_try_build(Family::Cube, 0, || {
                calls.set(calls.get() + 1);
                built("a")
            })
            .unwrap()
            .id();
        let second = cache
            .get_or_try_build(Family::Cube, 0, || {
                calls.set(calls.get() + 1);
                built("b")
            })
            .unwrap();

        assert_eq!(second.id(), first);
        assert!(Rc::ptr_eq(&second, &cache.get(Family::Cube, 0).unwrap()));
        assert_eq!(*second.program(), "a");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn keys_are_independent() {
        let mut cache = Cache::new(RenderPass::Prism);
        let a = cache.get_or_try_build(Family::Cube, 0, || built("a")).unwrap().id();
        let b = cache.get_or_try_build(Family::Cube, 1, || built("b")).unwrap().id();
        let c = cache
            .get_or_try_build(Family::Tetrahedron, 0, || built("c"))
            .unwrap()
            .id();

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(cache.len(), 3);
        assert_eq!(a.pass, RenderPass::Prism);
        assert_eq!((a.seq, b.seq, c.seq), (0, 1, 2));
    }

    // ── failure ───────────────────────────────────────────────────────────

    #[test]
    fn failed_build_stores_nothing() {
        let mut cache = Cache::new(RenderPass::LimitSet);
        let err = cache
            .get_or_try_build(Family::Cube, 2, || Err(anyhow::anyhow!("link failed")))
            .unwrap_err();
        assert_eq!(err.to_string(), "link failed");
        assert!(!cache.contains(Family::Cube, 2));
        assert!(cache.is_empty());

        let entry = cache.get_or_try_build(Family::Cube, 2, || built("ok")).unwrap();
        assert_eq!(*entry.program(), "ok");
        assert_eq!(entry.id().seq, 0);
    }
}
