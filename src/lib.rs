#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! A crate for picking apart PNG data.
//!
//! The decoder splits a PNG into its chunks, reads the header, inflates and
//! unfilters the image data, and keeps whatever it managed to decode even when
//! a later stage fails. The decoded pixels can then be inspected, edited, and
//! written back out as a fresh PNG.
//!
//! See the [`png`] module for the details.

extern crate alloc;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

mod parser_helpers;

mod pixel_grid;
pub use pixel_grid::*;

pub mod png;
