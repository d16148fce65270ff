//! World container for entities
//!
//! The World is the scene graph: every positioned, styled object plus the lighting.

use slotmap::{new_key_type, SlotMap};

use crate::{Entity, Lighting};

new_key_type! {
    /// Generational key to an entity in the world
    pub struct EntityKey;
}

/// The scene graph containing all entities
pub struct World {
    /// All entities in the world
    entities: SlotMap<EntityKey, Entity>,
    /// Scene lighting
    lighting: Lighting,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            lighting: Lighting::default(),
        }
    }

    /// Create a world with pre-allocated capacity for entities
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: SlotMap::with_capacity_and_key(capacity),
            lighting: Lighting::default(),
        }
    }

    /// Builder: set lighting
    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }

    #[inline]
    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn set_lighting(&mut self, lighting: Lighting) {
        self.lighting = lighting;
    }

    /// Add an entity to the world, returning its key
    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        self.entities.insert(entity)
    }

    /// Remove an entity, returning it if it existed
    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Entity> {
        self.entities.remove(key)
    }

    pub fn get_entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    pub fn get_entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Find the first entity with the given name
    pub fn get_by_name(&self, name: &str) -> Option<(EntityKey, &Entity)> {
        self.entities
            .iter()
            .find(|(_, e)| e.name.as_deref() == Some(name))
    }

    /// Iterate over entities carrying a tag
    pub fn get_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = (EntityKey, &'a Entity)> + 'a {
        self.entities.iter().filter(move |(_, e)| e.has_tag(tag))
    }

    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Total triangle count across all entities
    pub fn triangle_count(&self) -> usize {
        self.entities.values().map(|e| e.mesh.triangle_count()).sum()
    }

    /// Clear all entities from the world
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    pub fn iter_with_keys(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    // --- Dirty tracking ---

    /// True if any entity changed since the last upload
    pub fn has_dirty_entities(&self) -> bool {
        self.entities.values().any(|e| e.is_dirty())
    }

    pub fn clear_all_dirty(&mut self) {
        for entity in self.entities.values_mut() {
            entity.clear_dirty();
        }
    }
}
