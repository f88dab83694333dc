pub mod config;
pub mod diagnosis;
pub mod error;
pub mod inference;
pub mod server;

pub use error::{Error, Result};
