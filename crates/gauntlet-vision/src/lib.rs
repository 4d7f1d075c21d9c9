//! Image cropping for the Gauntlet challenge solver.
//!
//! The challenge widget renders a reference value on the left and a
//! candidate image on the right inside a fixed band of the frame. This
//! crate carves screenshots into those pieces: band cropping, left/right
//! bisection, and uniform-border trimming. All transforms are pure
//! functions over in-memory buffers; callers persist copies for logging.

pub mod cropper;
pub mod error;

pub use cropper::{
    crop_challenge_region, crop_instructions_region, decode_png, encode_jpeg, split_left_right,
    trim_uniform_border,
};
pub use error::{Result, VisionError};
