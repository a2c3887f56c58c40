pub mod fast;
pub mod filesize;
pub mod lists;
pub mod locale;
pub mod number;
pub mod time;

pub use crate::domain::model::{Gender, Number, SizeStyle, Unit};
pub use crate::domain::ports::Translator;
pub use crate::utils::error::Result;
