pub mod auth;
pub mod authorize;
pub mod cors;
pub mod response;

pub use auth::jwt_auth_middleware;
pub use authorize::{authorize_middleware, AuthorizationPolicy};
pub use cors::cors_layer;
pub use response::{ApiResponse, ApiResult};
