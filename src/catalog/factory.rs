use crate::books::domain::model::Catalog;
use crate::books::factory;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;

pub fn create_catalog_service(config: &Configuration) -> Box<dyn CatalogService> {
    let book_repo = factory::create_book_repository(config);
    let catalog = if config.seed { Catalog::seed() } else { Catalog::new() };
    Box::new(CatalogServiceImpl::new(book_repo, catalog))
}
