use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::store::AppState;

pub fn create_catalog_service(state: &AppState) -> Box<dyn CatalogService> {
    Box::new(CatalogServiceImpl::new(state.store.clone(), state.publisher.clone()))
}
