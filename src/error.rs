use core::fmt;

/// An error from the `pngprobe` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngError {
  /// Chunk framing ran past the end of the data.
  ///
  /// This includes a stream that runs out before an `IEND` chunk is seen.
  TruncatedStream,

  /// At least one chunk's declared CRC doesn't match its content.
  ///
  /// Decoding never stops because of this, it's only reported when asked for.
  ChecksumMismatch,

  /// The `IHDR` chunk is missing or isn't 13 bytes.
  MalformedHeader,

  /// The header names a color type that PNG doesn't define, so the size of a
  /// pixel can't be known.
  UnknownColorType(u8),

  /// The zlib codec rejected the concatenated `IDAT` data.
  Inflate,

  /// A scanline used a filter tag outside of `0..=4`.
  InvalidFilterType(u8),

  /// An indexed pixel points past the end of the palette.
  PaletteIndexOutOfRange {
    /// the sample value that was looked up
    index: u8,
    /// how many entries the palette actually has
    len: usize,
  },

  /// A pixel level query was made on an image that isn't 8 bits per sample.
  UnsupportedBitDepth(u8),

  /// The decompressed data has fewer bytes than the header says it needs.
  NotEnoughImageData,

  /// There's no complete pixel grid to encode.
  NoPixelData,

  /// A chunk's data is longer than `u32::MAX` bytes.
  ChunkTooLarge,
}

impl fmt::Display for PngError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::TruncatedStream => f.write_str("chunk data runs past the end of the stream"),
      Self::ChecksumMismatch => f.write_str("a chunk's CRC doesn't match its content"),
      Self::MalformedHeader => f.write_str("IHDR chunk is missing or malformed"),
      Self::UnknownColorType(t) => write!(f, "unknown color type: {t}"),
      Self::Inflate => f.write_str("the zlib stream could not be decompressed"),
      Self::InvalidFilterType(t) => write!(f, "invalid scanline filter type: {t}"),
      Self::PaletteIndexOutOfRange { index, len } => {
        write!(f, "palette index {index} out of range for a palette of {len} entries")
      }
      Self::UnsupportedBitDepth(d) => write!(f, "bit depth {d} is not supported for pixel queries"),
      Self::NotEnoughImageData => f.write_str("not enough decompressed data for the image size"),
      Self::NoPixelData => f.write_str("no pixel data available to encode"),
      Self::ChunkTooLarge => f.write_str("chunk data is longer than u32::MAX bytes"),
    }
  }
}

/// Result alias used throughout the crate.
pub type PngResult<T> = Result<T, PngError>;
