//! Filter implementations.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W, 1) | u8 | Single luminance channel, 0-255 |
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//! | RGBA8 | (H, W, 4) | u8 | RGB + alpha; the engine splits alpha off before filtering |
//!
//! ## Output Shapes
//!
//! - **Same shape**: invert, blur, gaussian blur, sharpen, flip, half-turn rotate
//! - **Swapped H/W**: quarter-turn rotate
//! - **Single channel**: grayscale (from RGB), edge detection, threshold
//!
//! ## Architecture
//!
//! - Every filter is a pure function `ArrayView3<u8> -> Array3<u8>`
//! - Arithmetic runs in f32 or u32 and is clamped before narrowing to u8
//! - Neighborhood filters fill output rows independently, optionally on
//!   the rayon pool

pub mod core;
pub mod grayscale;
pub mod rotate;
pub mod blur;
pub mod edge;
pub mod sharpen;
pub mod stylize;
pub mod color_adjust;
