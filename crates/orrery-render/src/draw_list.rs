//! Draw-list extraction: collect, sort, and group per-frame instances so a
//! rasterizer could submit each model once with all its transforms.

use glam::Mat4;
use rustc_hash::FxHashMap;

use orrery_scene::{BodyId, SceneGraph};

use crate::models::ModelId;

/// Which model each body is drawn with. Bodies absent from the map are not
/// drawn.
pub type ModelBindings = FxHashMap<BodyId, ModelId>;

/// One body's model handle and composed transform for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderInstance {
    pub model: ModelId,
    pub transform: Mat4,
}

/// Per-frame list of instances that can be sorted and grouped by model.
#[derive(Debug)]
pub struct DrawList {
    instances: Vec<RenderInstance>,
    sorted: bool,
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
            sorted: false,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            sorted: false,
        }
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
        self.sorted = false;
    }

    /// Walks the scene in update order and emits one instance per bound
    /// body, reading the transforms the last pass composed.
    pub fn extract(&mut self, scene: &SceneGraph, bindings: &ModelBindings) {
        for (id, body) in scene.iter() {
            if let Some(&model) = bindings.get(&id) {
                self.push(RenderInstance {
                    model,
                    transform: body.transform(),
                });
            }
        }
    }

    /// Sorts instances by model id so same-model runs are contiguous.
    pub fn sort(&mut self) {
        self.instances.sort_unstable_by_key(|instance| instance.model);
        self.sorted = true;
    }

    /// Clear for reuse next frame, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.instances.clear();
        self.sorted = false;
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Whether the list has been sorted since the last modification.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    pub fn instances(&self) -> &[RenderInstance] {
        &self.instances
    }

    /// Iterate over contiguous same-model runs.
    ///
    /// For correct grouping, call [`sort`](Self::sort) before calling this
    /// method.
    pub fn groups(&self) -> ModelGroupIter<'_> {
        ModelGroupIter {
            instances: &self.instances,
            cursor: 0,
        }
    }
}

/// A run of instances sharing one model, the shape of an instanced draw.
#[derive(Debug)]
pub struct ModelGroup<'a> {
    /// The model shared by every instance in this group.
    pub model: ModelId,
    /// The instances in this group.
    pub instances: &'a [RenderInstance],
}

impl ModelGroup<'_> {
    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }
}

/// Iterator over [`ModelGroup`]s within a [`DrawList`].
pub struct ModelGroupIter<'a> {
    instances: &'a [RenderInstance],
    cursor: usize,
}

impl<'a> Iterator for ModelGroupIter<'a> {
    type Item = ModelGroup<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.instances.len() {
            return None;
        }

        let start = self.cursor;
        let model = self.instances[start].model;
        while self.cursor < self.instances.len() && self.instances[self.cursor].model == model {
            self.cursor += 1;
        }

        Some(ModelGroup {
            model,
            instances: &self.instances[start..self.cursor],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use orrery_scene::BodySpec;

    fn instance(model: ModelId, x: f32) -> RenderInstance {
        RenderInstance {
            model,
            transform: Mat4::from_translation(glam::Vec3::new(x, 0.0, 0.0)),
        }
    }

    #[test]
    fn test_empty_list_produces_zero_groups() {
        let list = DrawList::new();
        assert!(list.is_empty());
        assert_eq!(list.groups().count(), 0);
    }

    #[test]
    fn test_sort_makes_same_model_runs_contiguous() {
        let mut list = DrawList::new();
        list.push(instance(ModelId(2), 1.0));
        list.push(instance(ModelId(1), 2.0));
        list.push(instance(ModelId(2), 3.0));
        list.push(instance(ModelId(1), 4.0));
        list.sort();
        assert!(list.is_sorted());

        let groups: Vec<_> = list.groups().collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].model, ModelId(1));
        assert_eq!(groups[0].instance_count(), 2);
        assert_eq!(groups[1].model, ModelId(2));
        assert_eq!(groups[1].instance_count(), 2);
    }

    #[test]
    fn test_push_invalidates_sorted_flag() {
        let mut list = DrawList::new();
        list.push(instance(ModelId(1), 0.0));
        list.sort();
        assert!(list.is_sorted());
        list.push(instance(ModelId(0), 0.0));
        assert!(!list.is_sorted());
    }

    #[test]
    fn test_clear_resets_list() {
        let mut list = DrawList::new();
        list.push(instance(ModelId(1), 0.0));
        list.push(instance(ModelId(2), 0.0));
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.groups().count(), 0);
    }

    #[test]
    fn test_extract_emits_only_bound_bodies() {
        let mut scene = SceneGraph::new();
        let sun = scene.insert(BodySpec::root("sun", DVec3::ZERO)).unwrap();
        let earth = scene
            .insert(BodySpec::orbiting("earth", sun, 9.0, 0.005))
            .unwrap();
        let ghost = scene
            .insert(BodySpec::orbiting("ghost", sun, 4.0, 0.01))
            .unwrap();
        scene.advance();

        let mut bindings = ModelBindings::default();
        bindings.insert(sun, ModelId(0));
        bindings.insert(earth, ModelId(1));

        let mut list = DrawList::new();
        list.extract(&scene, &bindings);
        assert_eq!(list.len(), 2, "unbound bodies must not be drawn");
        assert!(
            list.instances().iter().all(|i| i.model != ModelId(2)),
            "ghost body {ghost:?} has no model"
        );
    }

    #[test]
    fn test_extract_carries_composed_transforms() {
        let mut scene = SceneGraph::new();
        let star = scene
            .insert(BodySpec::backdrop("star", DVec3::new(70.0, -12.0, 5.0), 0.2))
            .unwrap();

        let mut bindings = ModelBindings::default();
        bindings.insert(star, ModelId(7));

        let mut list = DrawList::new();
        list.extract(&scene, &bindings);
        assert_eq!(list.len(), 1);
        let expected = scene.get(star).unwrap().transform();
        assert_eq!(list.instances()[0].transform, expected);
        assert_eq!(list.instances()[0].model, ModelId(7));
    }

    #[test]
    fn test_extract_then_sort_groups_shared_models() {
        let mut scene = SceneGraph::new();
        let sun = scene.insert(BodySpec::root("sun", DVec3::ZERO)).unwrap();
        let mut bindings = ModelBindings::default();
        bindings.insert(sun, ModelId(0));
        // Five stars all sharing one model.
        for i in 0..5 {
            let star = scene
                .insert(BodySpec::backdrop(
                    format!("star-{i}"),
                    DVec3::new(60.0 + i as f64, 0.0, 0.0),
                    0.1,
                ))
                .unwrap();
            bindings.insert(star, ModelId(3));
        }

        let mut list = DrawList::new();
        list.extract(&scene, &bindings);
        list.sort();

        let groups: Vec<_> = list.groups().collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].model, ModelId(0));
        assert_eq!(groups[0].instance_count(), 1);
        assert_eq!(groups[1].model, ModelId(3));
        assert_eq!(groups[1].instance_count(), 5);
    }
}
