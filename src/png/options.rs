//! Decoder and encoder options.

/// Options for [`Png::new_with_options`](super::Png::new_with_options).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
  /// Treat unknown scanline filter tags as "no filter" instead of failing.
  lenient_filters: bool,
  /// The most bytes that inflating the image data may produce.
  ///
  /// - Default value: 1 GiB
  inflate_limit: usize,
}
impl Default for DecodeOptions {
  #[inline]
  fn default() -> Self {
    Self { lenient_filters: false, inflate_limit: 1 << 30 }
  }
}
impl DecodeOptions {
  /// Whether unknown filter tags fall back to "no filter".
  #[inline]
  #[must_use]
  pub const fn get_lenient_filters(&self) -> bool {
    self.lenient_filters
  }

  /// Set whether unknown filter tags fall back to "no filter".
  ///
  /// When this is off (the default) an unknown tag stops decoding with
  /// [`PngError::InvalidFilterType`](crate::PngError::InvalidFilterType).
  #[inline]
  #[must_use]
  pub const fn set_lenient_filters(mut self, yes: bool) -> Self {
    self.lenient_filters = yes;
    self
  }

  /// The inflate output limit in bytes.
  #[inline]
  #[must_use]
  pub const fn get_inflate_limit(&self) -> usize {
    self.inflate_limit
  }

  /// Set the inflate output limit in bytes.
  #[inline]
  #[must_use]
  pub const fn set_inflate_limit(mut self, limit: usize) -> Self {
    self.inflate_limit = limit;
    self
  }
}

/// Options for [`Png::serialize_image_with`](super::Png::serialize_image_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
  compression_level: u8,
}
impl Default for EncodeOptions {
  #[inline]
  fn default() -> Self {
    Self { compression_level: 6 }
  }
}
impl EncodeOptions {
  /// The zlib compression level, 0 through 10.
  #[inline]
  #[must_use]
  pub const fn get_compression_level(&self) -> u8 {
    self.compression_level
  }

  /// Set the zlib compression level, values above 10 are clamped.
  #[inline]
  #[must_use]
  pub const fn set_compression_level(mut self, level: u8) -> Self {
    self.compression_level = if level > 10 { 10 } else { level };
    self
  }
}

#[test]
fn test_options_builders() {
  let d = DecodeOptions::default();
  assert!(!d.get_lenient_filters());
  let d = d.set_lenient_filters(true).set_inflate_limit(10);
  assert!(d.get_lenient_filters());
  assert_eq!(d.get_inflate_limit(), 10);
  assert_eq!(EncodeOptions::default().get_compression_level(), 6);
  assert_eq!(EncodeOptions::default().set_compression_level(200).get_compression_level(), 10);
}
