//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    sign_in::get_sign_in_page,
    transaction::{get_register_page, get_transactions_page, register_transaction_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::SIGN_IN_VIEW, get(get_sign_in_page))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::TRANSACTIONS_API,
            post(register_transaction_endpoint),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the sign-in page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::SIGN_IN_VIEW)
}
