//! Request/reply notification channel: a [`Reporter`] sends an opaque text
//! description, the [`MessageServer`] acknowledges it.

pub mod error;
pub mod framing;
mod reporter;
mod server;

pub use error::MessagingError;
pub use reporter::Reporter;
pub use server::{ACKNOWLEDGEMENT, DEFAULT_PORT, MessageServer};
