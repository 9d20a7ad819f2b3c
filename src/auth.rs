//! Session credentials: the bearer/refresh pair and its redacting wrapper.

pub mod secret;
pub mod session;

pub use secret::*;
pub use session::*;
