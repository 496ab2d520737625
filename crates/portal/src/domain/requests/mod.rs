mod fee;

pub use self::fee::FeeQuoteRequest;
