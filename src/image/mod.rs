//! Owned image buffers used between pipeline stages, plus file I/O.
//!
//! Every stage allocates and returns a fresh buffer; inputs are borrowed and
//! never mutated.
pub mod f32;
pub mod io;
pub mod resize;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::resize::resize_color;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
