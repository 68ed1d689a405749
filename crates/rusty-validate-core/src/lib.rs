//! Rusty-Validate Core
//!
//! Pure validation functions behind the rusty-validate rule engine: the
//! date/time and range mini-grammars, checksum digits, and structural
//! validators for network addresses, identity numbers, cards and colors.
//! Nothing in here knows about fields, forms or messages.

pub mod checksum;
pub mod color;
pub mod currency;
pub mod date;
pub mod file;
pub mod identity;
pub mod modifiers;
pub mod network;
pub mod password;
pub mod patterns;
pub mod range;
pub mod text;

// Re-export all validators
pub use checksum::*;
pub use color::*;
pub use currency::*;
pub use date::*;
pub use file::*;
pub use identity::*;
pub use modifiers::*;
pub use network::*;
pub use password::*;
pub use range::*;
pub use text::*;
