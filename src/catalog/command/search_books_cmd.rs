use async_trait::async_trait;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::SearchKind;

pub struct SearchBooksCommand<'a> {
    catalog_service: &'a dyn CatalogService,
}

impl<'a> SearchBooksCommand<'a> {
    pub fn new(catalog_service: &'a dyn CatalogService) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub struct SearchBooksCommandRequest {
    pub kind: SearchKind,
    pub query: String,
}

impl SearchBooksCommandRequest {
    pub fn new(kind: SearchKind, query: &str) -> Self {
        Self {
            kind,
            query: query.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct SearchBooksCommandResponse {
    pub titles: Vec<String>,
}

#[async_trait]
impl<'a> Command<SearchBooksCommandRequest, SearchBooksCommandResponse> for SearchBooksCommand<'a> {
    async fn execute(&mut self, req: SearchBooksCommandRequest) -> Result<SearchBooksCommandResponse, CommandError> {
        self.catalog_service.search_books(req.kind, req.query.as_str()).await
            .map_err(CommandError::from)
            .map(|titles| SearchBooksCommandResponse { titles })
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::search_books_cmd::{SearchBooksCommand, SearchBooksCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::library::SearchKind;

    #[tokio::test]
    async fn test_should_run_search_by_author() {
        let svc = factory::create_catalog_service(&Configuration::in_memory());
        let res = SearchBooksCommand::new(svc.as_ref())
            .execute(SearchBooksCommandRequest::new(SearchKind::Author, "лем")).await.expect("should search");
        assert_eq!(vec!["Солярис"], res.titles);
    }

    #[tokio::test]
    async fn test_should_run_search_with_empty_query() {
        let svc = factory::create_catalog_service(&Configuration::in_memory());
        let res = SearchBooksCommand::new(svc.as_ref())
            .execute(SearchBooksCommandRequest::new(SearchKind::Genre, "")).await.expect("should search");
        assert_eq!(5, res.titles.len());
    }
}
