pub mod error;
pub mod helper;
pub mod query;

pub use error::Error;
