use async_trait::async_trait;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::LoadStatus;

pub struct LoadCatalogCommand<'a> {
    catalog_service: &'a mut dyn CatalogService,
}

impl<'a> LoadCatalogCommand<'a> {
    pub fn new(catalog_service: &'a mut dyn CatalogService) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default)]
pub struct LoadCatalogCommandRequest {}

#[derive(Debug)]
pub struct LoadCatalogCommandResponse {
    pub status: LoadStatus,
    pub location: String,
}

#[async_trait]
impl<'a> Command<LoadCatalogCommandRequest, LoadCatalogCommandResponse> for LoadCatalogCommand<'a> {
    async fn execute(&mut self, _req: LoadCatalogCommandRequest) -> Result<LoadCatalogCommandResponse, CommandError> {
        let status = self.catalog_service.load_catalog().await.map_err(CommandError::from)?;
        Ok(LoadCatalogCommandResponse { status, location: self.catalog_service.store_location() })
    }
}
