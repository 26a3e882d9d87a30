pub mod entities;
pub mod errors;
pub mod payloads;
pub mod ports;

pub use entities::*;
pub use errors::{DomainError, Result};
