mod fee;
mod guard;
mod session;

pub use self::fee::{FeeQuote, PlatformFee};
pub use self::guard::AuthGuard;
pub use self::session::JwtSessionResolver;
