use async_trait::async_trait;
use crate::books::domain::model::{AddOutcome, BookChange, BookRecord, BookUpdate, NewBook};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct AddOrUpdateBookCommand<'a> {
    catalog_service: &'a mut dyn CatalogService,
}

impl<'a> AddOrUpdateBookCommand<'a> {
    pub fn new(catalog_service: &'a mut dyn CatalogService) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub struct AddOrUpdateBookCommandRequest {
    pub title: String,
    pub change: BookChange,
}

impl AddOrUpdateBookCommandRequest {
    pub fn add(title: &str, author: &str, genre: &str, quantity: u64) -> Self {
        Self {
            title: title.to_string(),
            change: BookChange::Create(NewBook::new(author, genre, quantity)),
        }
    }

    pub fn update(title: &str, update: BookUpdate) -> Self {
        Self {
            title: title.to_string(),
            change: BookChange::Update(update),
        }
    }
}

#[derive(Debug)]
pub struct AddOrUpdateBookCommandResponse {
    pub outcome: AddOutcome,
    pub book: BookRecord,
}

impl AddOrUpdateBookCommandResponse {
    pub fn new(outcome: AddOutcome, book: BookRecord) -> Self {
        Self {
            outcome,
            book,
        }
    }
}

#[async_trait]
impl<'a> Command<AddOrUpdateBookCommandRequest, AddOrUpdateBookCommandResponse> for AddOrUpdateBookCommand<'a> {
    async fn execute(&mut self, req: AddOrUpdateBookCommandRequest) -> Result<AddOrUpdateBookCommandResponse, CommandError> {
        self.catalog_service.add_or_update_book(req.title.as_str(), req.change).await
            .map_err(CommandError::from)
            .map(|(outcome, book)| AddOrUpdateBookCommandResponse::new(outcome, book))
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::{AddOutcome, BookUpdate};
    use crate::catalog::command::add_or_update_book_cmd::{AddOrUpdateBookCommand, AddOrUpdateBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::library::BookField;

    #[tokio::test]
    async fn test_should_run_add_book() {
        let mut svc = factory::create_catalog_service(&Configuration::in_memory());
        let res = AddOrUpdateBookCommand::new(svc.as_mut())
            .execute(AddOrUpdateBookCommandRequest::add("Мастер и Маргарита", "Михаил Булгаков", "Роман", 2))
            .await.expect("should add book");
        assert_eq!(AddOutcome::Added, res.outcome);
        assert_eq!(2, res.book.quantity);
    }

    #[tokio::test]
    async fn test_should_run_update_book() {
        let mut svc = factory::create_catalog_service(&Configuration::in_memory());
        let res = AddOrUpdateBookCommand::new(svc.as_mut())
            .execute(AddOrUpdateBookCommandRequest::update("1984", BookUpdate::Genre("Роман".to_string())))
            .await.expect("should update book");
        assert_eq!(AddOutcome::Updated(BookField::Genre), res.outcome);
        assert_eq!(vec!["Роман"], res.book.genres);
        assert_eq!(4, res.book.quantity);
    }

    #[tokio::test]
    async fn test_should_fail_update_of_missing_book() {
        let mut svc = factory::create_catalog_service(&Configuration::in_memory());
        let res = AddOrUpdateBookCommand::new(svc.as_mut())
            .execute(AddOrUpdateBookCommandRequest::update("missing", BookUpdate::Quantity(1)))
            .await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
