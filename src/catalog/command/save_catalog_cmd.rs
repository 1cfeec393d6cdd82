use async_trait::async_trait;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct SaveCatalogCommand<'a> {
    catalog_service: &'a dyn CatalogService,
}

impl<'a> SaveCatalogCommand<'a> {
    pub fn new(catalog_service: &'a dyn CatalogService) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default)]
pub struct SaveCatalogCommandRequest {}

#[derive(Debug)]
pub struct SaveCatalogCommandResponse {
    pub saved: usize,
    pub location: String,
}

#[async_trait]
impl<'a> Command<SaveCatalogCommandRequest, SaveCatalogCommandResponse> for SaveCatalogCommand<'a> {
    async fn execute(&mut self, _req: SaveCatalogCommandRequest) -> Result<SaveCatalogCommandResponse, CommandError> {
        let saved = self.catalog_service.save_catalog().await.map_err(CommandError::from)?;
        Ok(SaveCatalogCommandResponse { saved, location: self.catalog_service.store_location() })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use crate::catalog::command::save_catalog_cmd::{SaveCatalogCommand, SaveCatalogCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_run_save_catalog() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = dir.path().join("library.json");
        let svc = factory::create_catalog_service(&Configuration::new(&path));
        let res = SaveCatalogCommand::new(svc.as_ref())
            .execute(SaveCatalogCommandRequest::default()).await.expect("should save");
        assert_eq!(5, res.saved);
        assert_eq!(path.display().to_string(), res.location);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_should_surface_write_failure() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = dir.path().join("no-such-dir").join("library.json");
        let svc = factory::create_catalog_service(&Configuration::new(&path));
        let res = SaveCatalogCommand::new(svc.as_ref())
            .execute(SaveCatalogCommandRequest::default()).await;
        assert!(matches!(res, Err(CommandError::Io { .. })));
    }
}
