pub mod error;
pub mod inbox;
pub mod message;

pub use error::{Error, Result};
