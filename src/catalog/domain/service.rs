use async_trait::async_trait;
use crate::books::domain::model::{AddOutcome, BookChange, BookRecord, BookRow, Catalog, Stats};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::library::{LibraryResult, LoadStatus, SearchKind, StatsKind};

pub(crate) struct CatalogServiceImpl {
    catalog: Catalog,
    book_repository: Box<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(book_repository: Box<dyn BookRepository>, catalog: Catalog) -> Self {
        Self {
            catalog,
            book_repository,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_or_update_book(&mut self, title: &str, change: BookChange) -> LibraryResult<(AddOutcome, BookRecord)> {
        let outcome = self.catalog.add_or_update(title, change).map_err(|err| {
            tracing::warn!(title, error = %err, "add or update rejected");
            err
        })?;
        tracing::info!(title, outcome = ?outcome, "book stored");
        let record = self.catalog.get(title)?.clone();
        Ok((outcome, record))
    }

    async fn find_book(&self, title: &str) -> LibraryResult<BookRecord> {
        self.catalog.get(title).cloned()
    }

    async fn contains_book(&self, title: &str) -> bool {
        self.catalog.contains(title)
    }

    async fn remove_book(&mut self, title: &str) -> LibraryResult<()> {
        let _ = self.catalog.delete_by_title(title).map_err(|err| {
            tracing::warn!(title, "book to remove not found");
            err
        })?;
        tracing::info!(title, "book removed");
        Ok(())
    }

    async fn remove_books_by_prefix(&mut self, prefix: &str) -> LibraryResult<Vec<String>> {
        let removed = self.catalog.delete_by_prefix(prefix);
        tracing::info!(prefix, removed = removed.len(), "books removed by prefix");
        Ok(removed)
    }

    async fn search_books(&self, kind: SearchKind, query: &str) -> LibraryResult<Vec<String>> {
        let found = self.catalog.search(kind, query);
        tracing::debug!(kind = %kind, query, found = found.len(), "search finished");
        Ok(found)
    }

    async fn get_stats(&self, kind: StatsKind) -> LibraryResult<Stats> {
        Ok(self.catalog.compute_stats(kind))
    }

    async fn list_books(&self) -> LibraryResult<Vec<BookRow>> {
        Ok(self.catalog.list_all())
    }

    async fn save_catalog(&self) -> LibraryResult<usize> {
        self.book_repository.save(&self.catalog).await
    }

    // the current catalog is replaced only once the store was read successfully
    async fn load_catalog(&mut self) -> LibraryResult<LoadStatus> {
        let loaded = self.book_repository.load().await.map_err(|err| {
            tracing::warn!(error = %err, "keeping current catalog");
            err
        })?;
        self.catalog = loaded.entity;
        Ok(loaded.status)
    }

    fn store_location(&self) -> String {
        self.book_repository.location()
    }
}
