pub mod json_book_repository;
pub mod memory_book_repository;

use crate::books::domain::model::Catalog;
use crate::core::repository::Repository;

pub trait BookRepository: Repository<Catalog> {}

impl<T: Repository<Catalog>> BookRepository for T {}
