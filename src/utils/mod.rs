pub mod error;
#[cfg(feature = "cli")]
pub mod logger;
pub mod printf;
pub mod validation;
