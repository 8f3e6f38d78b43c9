//! The API endpoints URIs.

/// The root route which redirects to the sign-in page.
pub const ROOT: &str = "/";
/// The landing page shown when the app is opened.
pub const SIGN_IN_VIEW: &str = "/sign_in";
/// The page with the form for registering a transaction.
pub const REGISTER_VIEW: &str = "/register";
/// The page listing the saved transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for registering a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
