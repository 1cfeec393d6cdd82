pub mod service;

use async_trait::async_trait;
use crate::books::domain::model::{AddOutcome, BookChange, BookRecord, BookRow, Stats};
use crate::core::library::{LibraryResult, LoadStatus, SearchKind, StatsKind};

#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn add_or_update_book(&mut self, title: &str, change: BookChange) -> LibraryResult<(AddOutcome, BookRecord)>;
    async fn find_book(&self, title: &str) -> LibraryResult<BookRecord>;
    async fn contains_book(&self, title: &str) -> bool;
    async fn remove_book(&mut self, title: &str) -> LibraryResult<()>;
    async fn remove_books_by_prefix(&mut self, prefix: &str) -> LibraryResult<Vec<String>>;
    async fn search_books(&self, kind: SearchKind, query: &str) -> LibraryResult<Vec<String>>;
    async fn get_stats(&self, kind: StatsKind) -> LibraryResult<Stats>;
    async fn list_books(&self) -> LibraryResult<Vec<BookRow>>;
    async fn save_catalog(&self) -> LibraryResult<usize>;
    async fn load_catalog(&mut self) -> LibraryResult<LoadStatus>;
    fn store_location(&self) -> String;
}
