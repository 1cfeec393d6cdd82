use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryResult, LoadStatus};

// What a load produced: the entity plus whether it came from the store or
// was created because the store was absent.
#[derive(Debug, PartialEq)]
pub struct Loaded<Entity> {
    pub entity: Entity,
    pub status: LoadStatus,
}

impl<Entity> Loaded<Entity> {
    pub fn new(entity: Entity, status: LoadStatus) -> Self {
        Loaded { entity, status }
    }
}

// Whole-aggregate persistence: the catalog is always read and written as one
// document.
#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // reads the entity, substituting an empty one when the store is absent
    async fn load(&self) -> LibraryResult<Loaded<Entity>>;

    // writes the entity and returns the number of records written
    async fn save(&self, entity: &Entity) -> LibraryResult<usize>;

    // describes where the entity lives, for user-facing messages
    fn location(&self) -> String;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    JsonFile,
    Memory,
}
