//! Decorative drawing primitives
//!
//! Every effect here is composed from the plain [`Canvas`] operations:
//! - Strip-approximated linear gradients
//! - Dotted dividers
//! - Pill badges
//! - Layered shadow and border frames
//! - Watermarks (diagonal brand text, image caption bar)
//!
//! [`Canvas`]: crate::canvas::Canvas

mod badge;
mod divider;
mod frame;
mod gradient;
mod watermark;

pub use badge::*;
pub use divider::*;
pub use frame::*;
pub use gradient::*;
pub use watermark::*;
