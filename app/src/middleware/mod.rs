//! Application middleware

mod logging;

pub use logging::LoggingMiddleware;
