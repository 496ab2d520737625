mod error;
mod guard;
mod http;
mod repository;
mod service;
mod session;

pub use self::error::ErrorResponse;
pub use self::guard::GuardError;
pub use self::http::HttpError;
pub use self::repository::RepositoryError;
pub use self::service::ServiceError;
pub use self::session::SessionError;
