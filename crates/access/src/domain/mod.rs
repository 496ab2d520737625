mod credentials;
mod decision;
mod session;

pub use self::credentials::Credentials;
pub use self::decision::{Denial, GuardDecision};
pub use self::session::{Session, SessionClaims};
