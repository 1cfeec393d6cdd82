use std::sync::Mutex;

use async_trait::async_trait;

use crate::books::domain::model::Catalog;
use crate::core::library::{LibraryError, LibraryResult, LoadStatus};
use crate::core::repository::{Loaded, Repository};

// Keeps the last saved catalog in process memory; nothing touches disk.
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    saved: Mutex<Option<Catalog>>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            saved: Mutex::new(Some(catalog)),
        }
    }
}

fn poisoned<T>(_: T) -> LibraryError {
    LibraryError::io("memory store lock poisoned", None)
}

#[async_trait]
impl Repository<Catalog> for MemoryBookRepository {
    async fn load(&self) -> LibraryResult<Loaded<Catalog>> {
        let saved = self.saved.lock().map_err(poisoned)?;
        match saved.as_ref() {
            Some(catalog) => Ok(Loaded::new(catalog.clone(), LoadStatus::Loaded)),
            None => Ok(Loaded::new(Catalog::new(), LoadStatus::CreatedNew)),
        }
    }

    async fn save(&self, catalog: &Catalog) -> LibraryResult<usize> {
        let mut saved = self.saved.lock().map_err(poisoned)?;
        *saved = Some(catalog.clone());
        tracing::debug!(books = catalog.len(), "catalog kept in memory");
        Ok(catalog.len())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::Catalog;
    use crate::books::repository::memory_book_repository::MemoryBookRepository;
    use crate::core::library::LoadStatus;
    use crate::core::repository::Repository;

    #[tokio::test]
    async fn test_should_start_empty() {
        let repo = MemoryBookRepository::new();
        let loaded = repo.load().await.expect("should load");
        assert_eq!(LoadStatus::CreatedNew, loaded.status);
        assert!(loaded.entity.is_empty());
    }

    #[tokio::test]
    async fn test_should_return_saved_catalog() {
        let repo = MemoryBookRepository::new();
        let _ = repo.save(&Catalog::seed()).await.expect("should save");
        let loaded = repo.load().await.expect("should load");
        assert_eq!(LoadStatus::Loaded, loaded.status);
        assert_eq!(Catalog::seed(), loaded.entity);
    }

    #[tokio::test]
    async fn test_should_load_preset_catalog() {
        let repo = MemoryBookRepository::with_catalog(Catalog::seed());
        let loaded = repo.load().await.expect("should load");
        assert_eq!(LoadStatus::Loaded, loaded.status);
        assert_eq!(5, loaded.entity.len());
    }
}
