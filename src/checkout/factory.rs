use crate::checkout::domain::CheckoutService;
use crate::checkout::domain::service::CheckoutServiceImpl;
use crate::core::store::AppState;

pub fn create_checkout_service(state: &AppState) -> Box<dyn CheckoutService> {
    Box::new(CheckoutServiceImpl::new(&state.config, state.store.clone(), state.publisher.clone()))
}
