use async_trait::async_trait;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct RemoveBookCommand<'a> {
    catalog_service: &'a mut dyn CatalogService,
}

impl<'a> RemoveBookCommand<'a> {
    pub fn new(catalog_service: &'a mut dyn CatalogService) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveMode {
    // exact, case-sensitive title
    Title,
    // every title starting with the pattern, ignoring case
    Prefix,
}

#[derive(Debug)]
pub struct RemoveBookCommandRequest {
    pub pattern: String,
    pub mode: RemoveMode,
}

impl RemoveBookCommandRequest {
    pub fn by_title(title: &str) -> Self {
        Self {
            pattern: title.to_string(),
            mode: RemoveMode::Title,
        }
    }

    pub fn by_prefix(prefix: &str) -> Self {
        Self {
            pattern: prefix.to_string(),
            mode: RemoveMode::Prefix,
        }
    }
}

#[derive(Debug)]
pub struct RemoveBookCommandResponse {
    pub removed: Vec<String>,
}

impl RemoveBookCommandResponse {
    pub fn new(removed: Vec<String>) -> Self {
        Self {
            removed,
        }
    }
}

#[async_trait]
impl<'a> Command<RemoveBookCommandRequest, RemoveBookCommandResponse> for RemoveBookCommand<'a> {
    async fn execute(&mut self, req: RemoveBookCommandRequest) -> Result<RemoveBookCommandResponse, CommandError> {
        match req.mode {
            RemoveMode::Title => {
                self.catalog_service.remove_book(req.pattern.as_str()).await
                    .map_err(CommandError::from)
                    .map(|_| RemoveBookCommandResponse::new(vec![req.pattern]))
            }
            RemoveMode::Prefix => {
                self.catalog_service.remove_books_by_prefix(req.pattern.as_str()).await
                    .map_err(CommandError::from)
                    .map(RemoveBookCommandResponse::new)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::{BookChange, NewBook};
    use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_run_remove_book() {
        let mut svc = factory::create_catalog_service(&Configuration::in_memory());
        let res = RemoveBookCommand::new(svc.as_mut())
            .execute(RemoveBookCommandRequest::by_title("1984")).await.expect("should remove book");
        assert_eq!(vec!["1984"], res.removed);
        assert!(!svc.contains_book("1984").await);
    }

    #[tokio::test]
    async fn test_should_report_missing_title() {
        let mut svc = factory::create_catalog_service(&Configuration::in_memory());
        let res = RemoveBookCommand::new(svc.as_mut())
            .execute(RemoveBookCommandRequest::by_title("Missing")).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_run_remove_by_prefix() {
        let mut svc = factory::create_catalog_service(&Configuration::in_memory());
        let _ = svc.add_or_update_book("Властелин", BookChange::Create(NewBook::new("a", "b", 1)))
            .await.expect("should add book");
        let res = RemoveBookCommand::new(svc.as_mut())
            .execute(RemoveBookCommandRequest::by_prefix("Вл")).await.expect("should remove books");
        assert_eq!(vec!["Властелин колец", "Властелин"], res.removed);
        assert_eq!(4, svc.list_books().await.expect("should list").len());

        let res = RemoveBookCommand::new(svc.as_mut())
            .execute(RemoveBookCommandRequest::by_prefix("Вл")).await.expect("zero removals is fine");
        assert!(res.removed.is_empty());
        assert_eq!(4, svc.list_books().await.expect("should list").len());
    }
}
