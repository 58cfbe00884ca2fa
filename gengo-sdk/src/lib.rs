#![doc = include_str!("../README.md")]

mod client;
pub use client::{API_URL, Client, SANDBOX_API_URL, SUPPORTED_API_VERSIONS};

mod dispatch;
pub use dispatch::{MISSING_ARGUMENT, PreparedCall};

pub mod endpoint;

mod error;
pub use error::{AUTH_ERROR_CODE, Error};

mod ops;
pub use ops::OPERATION_NAMES;

mod payload;
pub use payload::{CanonicalBody, StagedFile};

mod response;

mod types_rs;
pub use types_rs::*;
