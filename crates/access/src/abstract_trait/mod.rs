mod jwt;
mod session;
mod user;

pub use self::jwt::{DynJwtService, JwtServiceTrait};
pub use self::session::{DynSessionResolver, SessionResolverTrait};
pub use self::user::{DynUserRecordRepository, UserRecordRepositoryTrait};
