//! Pure geometry for catalog pages
//!
//! Nothing in here draws. The functions compute where blocks go:
//! - Aspect-preserving fitting and horizontal centering
//! - The per-page vertical cursor ([`PageContext`])
//! - Text wrapping and truncation against a line budget

mod cursor;
mod fit;
mod text;

pub use cursor::*;
pub use fit::*;
pub use text::*;
