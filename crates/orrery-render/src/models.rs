//! Model handles: asset paths interned into small copyable ids.
//!
//! The importer itself lives outside this workspace; bodies only ever carry
//! the path of the model a downstream rasterizer would load.

use rustc_hash::FxHashMap;

/// Opaque handle to a registered model path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub(crate) u32);

impl ModelId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Interns model asset paths. Registering the same path twice hands back the
/// same id, so a shared star model stays one model.
#[derive(Clone, Debug, Default)]
pub struct ModelLibrary {
    paths: Vec<String>,
    index: FxHashMap<String, ModelId>,
}

impl ModelLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, path: &str) -> ModelId {
        if let Some(&id) = self.index.get(path) {
            return id;
        }
        let id = ModelId(self.paths.len() as u32);
        self.paths.push(path.to_string());
        self.index.insert(path.to_string(), id);
        log::debug!("registered model '{path}' as {id:?}");
        id
    }

    pub fn path(&self, id: ModelId) -> Option<&str> {
        self.paths.get(id.index()).map(String::as_str)
    }

    pub fn lookup(&self, path: &str) -> Option<ModelId> {
        self.index.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Registered models in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ModelId, &str)> {
        self.paths
            .iter()
            .enumerate()
            .map(|(index, path)| (ModelId(index as u32), path.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_interns_repeated_paths() {
        let mut library = ModelLibrary::new();
        let a = library.register("assets/sun/scene.gltf");
        let b = library.register("assets/sun/scene.gltf");
        assert_eq!(a, b, "same path must intern to the same id");
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_distinct_paths_get_distinct_ids() {
        let mut library = ModelLibrary::new();
        let sun = library.register("assets/sun/scene.gltf");
        let earth = library.register("assets/earth/Earth.obj");
        assert_ne!(sun, earth);
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_path_round_trips() {
        let mut library = ModelLibrary::new();
        let id = library.register("assets/earth/Earth.obj");
        assert_eq!(library.path(id), Some("assets/earth/Earth.obj"));
        assert_eq!(library.lookup("assets/earth/Earth.obj"), Some(id));
    }

    #[test]
    fn test_lookup_misses_unknown_path() {
        let library = ModelLibrary::new();
        assert_eq!(library.lookup("assets/pluto/scene.gltf"), None);
        assert!(library.is_empty());
    }

    #[test]
    fn test_iter_yields_registration_order() {
        let mut library = ModelLibrary::new();
        library.register("a.obj");
        library.register("b.obj");
        library.register("c.obj");
        let paths: Vec<&str> = library.iter().map(|(_, path)| path).collect();
        assert_eq!(paths, vec!["a.obj", "b.obj", "c.obj"]);
    }
}
