pub mod config;
pub mod logging;

pub mod checksum;
pub mod classify;
pub mod error;
pub mod fetch;
pub mod media;

pub use error::{MediaError, MediaResult};
