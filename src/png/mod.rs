//! Holds all the tools for decoding and re-encoding PNG data.
//!
//! ## Automated PNG Decoding
//! If you just want the pixels, pass the bytes to [`Png::new`]. Decoding never
//! panics and never fails outright. Instead the [`Png`] records how far it got
//! as a [`DecodeState`], along with whatever was decoded up to that point.
//!
//! ```
//! use pngprobe::png::*;
//! let png = Png::new(&[]);
//! assert_eq!(png.state(), DecodeState::Empty);
//! ```
//!
//! ## Decoding a PNG Yourself
//! Each stage is also available on its own, if you want to control the process
//! directly.
//!
//! The general format of a PNG is that the information is stored in "chunks".
//! You iterate the chunks and each one gives you some info that you might
//! decide to use. There's four "critical" chunk types:
//! * **Header** - This has all the important information about the image's
//!   dimensions, pixel format, and if the image is interlaced or not. Using
//!   this information you'll be able to know how many bytes each filtered line
//!   takes.
//! * **Palette** - If an image uses indexed color it will have a palette of
//!   what index values map to what `RGB8` values.
//! * **Image Data** - One or more chunks of compressed data. All of the
//!   compressed data forms a single zlib data stream. All of the image data
//!   chunks should appear one after the other.
//! * **End** - The last chunk, lets you know you had the full PNG and your data
//!   wasn't truncated accidentally.
//!
//! ### Step By Step
//!
//! * [`parse_all`] turns the bytes after the signature into [`PngChunk`]
//!   values, stopping at `IEND`.
//! * [`extract_header`] reads the [`IHDR`] from the first header chunk.
//! * [`decompress_idat`] joins every `IDAT` chunk and inflates the zlib stream.
//! * [`unfilter_image`] reverses the per-line filtering, giving a
//!   [`PixelGrid`](crate::PixelGrid).
//!
//! Going the other way, [`write_png`] builds a new datastream from a header
//! chunk and a pixel grid.

pub(crate) use crate::{parser_helpers::*, PixelGrid, PngError, PngResult};
pub(crate) use alloc::{borrow::Cow, collections::BTreeSet, vec::Vec};
pub(crate) use core::fmt::{Debug, Write};
pub(crate) use log::{debug, trace, warn};

mod crc32;
pub use crc32::*;

mod chunk;
pub use chunk::*;

mod ihdr;
pub use ihdr::*;

mod plte;
pub use plte::*;

mod idat;
pub use idat::*;

mod filter;
pub use filter::*;

mod unfilter;
pub use unfilter::*;

mod options;
pub use options::*;

mod encode;
pub use encode::*;

mod decoder;
pub use decoder::*;


/// The first eight bytes of every PNG datastream.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not*
///   PNG data.
#[inline]
#[must_use]
pub const fn is_png_header_correct(bytes: &[u8]) -> bool {
  match bytes {
    [137, 80, 78, 71, 13, 10, 26, 10, ..] => true,
    _ => false,
  }
}
