use std::collections::HashMap;

use super::RenderPass;

/// Identity of a built program, unique within one handler.
///
/// `seq` counts builds of one pass cache in order, starting at 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ProgramId {
    pub pass: RenderPass,
    pub seq: u32,
}

/// Uniform name -> backend location, as reported by a variant for one program.
#[derive(Debug, Clone)]
pub struct UniformLocations<U> {
    by_name: HashMap<String, U>,
}

impl<U> UniformLocations<U> {
    pub fn new() -> Self {
        Self { by_name: HashMap::new() }
    }

    pub fn insert(&mut self, name: impl Into<String>, location: U) -> &mut Self {
        self.by_name.insert(name.into(), location);
        self
    }

    /// Location of `name`, `None` when the program does not use it.
    pub fn get(&self, name: &str) -> Option<&U> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &U)> {
        self.by_name.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<U> Default for UniformLocations<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U, S: Into<String>> FromIterator<(S, U)> for UniformLocations<U> {
    fn from_iter<I: IntoIterator<Item = (S, U)>>(iter: I) -> Self {
        Self {
            by_name: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A linked program paired with its uniform locations.
#[derive(Debug)]
pub struct ProgramEntry<P, U> {
    id: ProgramId,
    program: P,
    uniform_locations: UniformLocations<U>,
}

impl<P, U> ProgramEntry<P, U> {
    pub(crate) fn new(id: ProgramId, program: P, uniform_locations: UniformLocations<U>) -> Self {
        Self {
            id,
            program,
            uniform_locations,
        }
    }

    pub fn id(&self) -> ProgramId {
        self.id
    }

    pub fn program(&self) -> &P {
        &self.program
    }

    pub fn uniform_locations(&self) -> &UniformLocations<U> {
        &self.uniform_locations
    }
}
