pub mod convert;
pub mod typed_value;

// Re-export all public types
pub use convert::{BindValue, Decoder, Encoder};
pub use typed_value::{TypedValue, ValueError};
