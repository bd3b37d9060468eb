use super::*;

/// The types of color that PNG supports.
///
/// A header can name a color type that PNG doesn't define. That's kept as
/// `Unknown` so the header itself can still be read, and it only becomes an
/// error once the pixel size is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PngColorType {
  /// Greyscale
  Y,
  /// Red, Green, Blue
  RGB,
  /// Index into a palette.
  ///
  /// The palette will have RGB8 data.
  Index,
  /// Greyscale + Alpha
  YA,
  /// Red, Green, Blue, Alpha
  RGBA,
  /// Any other color type byte.
  Unknown(u8),
}
impl PngColorType {
  /// The number of channels in this type of color, `None` if it's unknown.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> Option<usize> {
    Some(match self {
      Self::Y => 1,
      Self::RGB => 3,
      Self::Index => 1,
      Self::YA => 2,
      Self::RGBA => 4,
      Self::Unknown(_) => return None,
    })
  }

  /// The color type byte as stored in an `IHDR`.
  #[inline]
  #[must_use]
  pub const fn to_u8(self) -> u8 {
    match self {
      Self::Y => 0,
      Self::RGB => 2,
      Self::Index => 3,
      Self::YA => 4,
      Self::RGBA => 6,
      Self::Unknown(other) => other,
    }
  }
}
impl From<u8> for PngColorType {
  #[inline]
  fn from(value: u8) -> Self {
    match value {
      0 => PngColorType::Y,
      2 => PngColorType::RGB,
      3 => PngColorType::Index,
      4 => PngColorType::YA,
      6 => PngColorType::RGBA,
      other => PngColorType::Unknown(other),
    }
  }
}

/// Image Header
///
/// The bit depth and the three "method" bytes are kept exactly as they were
/// in the data, even when they aren't values that PNG allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: PngColorType,
  /// should always be 0 (zlib)
  pub compression_method: u8,
  /// should always be 0 (adaptive filtering)
  pub filter_method: u8,
  /// 0 for progressive, 1 for Adam7
  pub interlace_method: u8,
}
impl IHDR {
  /// Bits used by each pixel.
  ///
  /// Indexed images count as 8 bits per pixel no matter their bit depth.
  ///
  /// ## Failure
  /// * An unknown color type.
  #[inline]
  pub const fn bits_per_pixel(&self) -> PngResult<usize> {
    match self.color_type {
      PngColorType::Index => Ok(8),
      other => match other.channel_count() {
        Some(channels) => Ok((self.bit_depth as usize) * channels),
        None => Err(PngError::UnknownColorType(other.to_u8())),
      },
    }
  }

  /// Size of a pixel in bytes, as `(numerator, denominator)`.
  ///
  /// Sub-byte pixels give a fraction, eg: 2-bit greyscale is `(2, 8)`.
  #[inline]
  pub const fn pixel_size_bytes(&self) -> PngResult<(usize, usize)> {
    match self.bits_per_pixel() {
      Ok(bits) => Ok((bits, 8)),
      Err(e) => Err(e),
    }
  }

  /// Number of bytes that the filters treat as one unit.
  ///
  /// Filtering works on whole bytes, so pixels smaller than a byte still use
  /// a unit of 1.
  #[inline]
  pub const fn filter_unit(&self) -> PngResult<usize> {
    match self.bits_per_pixel() {
      Ok(bits) if bits < 8 => Ok(1),
      Ok(bits) => Ok(bits / 8),
      Err(e) => Err(e),
    }
  }

  /// Bytes in one scanline, including the leading filter byte.
  ///
  /// This is `floor(bits_per_pixel * width / 8) + 1`.
  ///
  /// ## Failure
  /// * An unknown color type.
  /// * The size overflows `usize`, so no buffer could hold the data.
  #[inline]
  pub fn bytes_per_filterline(&self) -> PngResult<usize> {
    self
      .bits_per_pixel()?
      .checked_mul(self.width as usize)
      .and_then(|bits| (bits / 8).checked_add(1))
      .ok_or(PngError::NotEnoughImageData)
  }

  /// Bytes of decompressed data the full image needs.
  #[inline]
  pub fn decompressed_len(&self) -> PngResult<usize> {
    self
      .bytes_per_filterline()?
      .checked_mul(self.height as usize)
      .ok_or(PngError::NotEnoughImageData)
  }

  /// If the header says the data is Adam7 interlaced.
  #[inline]
  #[must_use]
  pub const fn is_interlaced(&self) -> bool {
    self.interlace_method == 1
  }
}
impl TryFrom<&[u8]> for IHDR {
  type Error = PngError;
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match value {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method] => {
        Ok(Self {
          width: u32::from_be_bytes([*w0, *w1, *w2, *w3]),
          height: u32::from_be_bytes([*h0, *h1, *h2, *h3]),
          bit_depth: *bit_depth,
          color_type: PngColorType::from(*color_type),
          compression_method: *compression_method,
          filter_method: *filter_method,
          interlace_method: *interlace_method,
        })
      }
      _ => Err(PngError::MalformedHeader),
    }
  }
}
impl TryFrom<&PngChunk<'_>> for IHDR {
  type Error = PngError;
  #[inline]
  fn try_from(chunk: &PngChunk<'_>) -> Result<Self, Self::Error> {
    if chunk.ty != ChunkType::IHDR {
      return Err(PngError::MalformedHeader);
    }
    IHDR::try_from(&chunk.data[..])
  }
}
impl IHDR {
  /// The 13 data bytes of an `IHDR` chunk for this header.
  #[must_use]
  pub fn to_bytes(&self) -> [u8; 13] {
    let mut out = [0; 13];
    out[0..4].copy_from_slice(&self.width.to_be_bytes());
    out[4..8].copy_from_slice(&self.height.to_be_bytes());
    out[8] = self.bit_depth;
    out[9] = self.color_type.to_u8();
    out[10] = self.compression_method;
    out[11] = self.filter_method;
    out[12] = self.interlace_method;
    out
  }
}

/// Extracts the header from the first `IHDR` chunk in the list.
pub fn extract_header(chunks: &[PngChunk<'_>]) -> PngResult<IHDR> {
  let ihdr = find_chunk(chunks, ChunkType::IHDR, 0).ok_or(PngError::MalformedHeader)?;
  IHDR::try_from(ihdr)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn header(color_type: PngColorType, bit_depth: u8, width: u32) -> IHDR {
    IHDR {
      width,
      height: 1,
      bit_depth,
      color_type,
      compression_method: 0,
      filter_method: 0,
      interlace_method: 0,
    }
  }

  #[test]
  fn test_ihdr_parse() {
    let bytes = [0, 0, 1, 0, 0, 0, 0, 7, 8, 6, 0, 0, 1];
    let ihdr = IHDR::try_from(&bytes[..]).unwrap();
    assert_eq!(ihdr.width, 256);
    assert_eq!(ihdr.height, 7);
    assert_eq!(ihdr.bit_depth, 8);
    assert_eq!(ihdr.color_type, PngColorType::RGBA);
    assert!(ihdr.is_interlaced());
    assert_eq!(ihdr.to_bytes(), bytes);
  }

  #[test]
  fn test_ihdr_rejects_bad_input() {
    assert_eq!(IHDR::try_from(&[0_u8; 12][..]), Err(PngError::MalformedHeader));
    assert_eq!(IHDR::try_from(&[0_u8; 14][..]), Err(PngError::MalformedHeader));
    assert_eq!(extract_header(&[]), Err(PngError::MalformedHeader));
  }

  #[test]
  fn test_unknown_color_type() {
    // color type 5 doesn't exist, the header still parses
    let bytes = [0, 0, 0, 1, 0, 0, 0, 1, 8, 5, 0, 0, 0];
    let ihdr = IHDR::try_from(&bytes[..]).unwrap();
    assert_eq!(ihdr.color_type, PngColorType::Unknown(5));
    assert_eq!(ihdr.to_bytes(), bytes);
    assert_eq!(ihdr.bits_per_pixel(), Err(PngError::UnknownColorType(5)));
    assert_eq!(ihdr.filter_unit(), Err(PngError::UnknownColorType(5)));
    assert_eq!(ihdr.bytes_per_filterline(), Err(PngError::UnknownColorType(5)));
    assert_eq!(ihdr.pixel_size_bytes(), Err(PngError::UnknownColorType(5)));
  }

  #[test]
  fn test_odd_bit_depths_are_kept() {
    let bytes = [0, 0, 0, 1, 0, 0, 0, 1, 3, 2, 9, 9, 9];
    let ihdr = IHDR::try_from(&bytes[..]).unwrap();
    assert_eq!(ihdr.bit_depth, 3);
    assert_eq!(ihdr.compression_method, 9);
  }

  #[test]
  fn test_pixel_sizes() {
    assert_eq!(header(PngColorType::RGB, 8, 1).filter_unit(), Ok(3));
    assert_eq!(header(PngColorType::RGBA, 8, 1).filter_unit(), Ok(4));
    assert_eq!(header(PngColorType::RGBA, 16, 1).filter_unit(), Ok(8));
    assert_eq!(header(PngColorType::YA, 8, 1).filter_unit(), Ok(2));
    assert_eq!(header(PngColorType::Y, 2, 1).filter_unit(), Ok(1));
    assert_eq!(header(PngColorType::Y, 2, 1).pixel_size_bytes(), Ok((2, 8)));
    // indexed is always treated as one byte
    assert_eq!(header(PngColorType::Index, 4, 1).bits_per_pixel(), Ok(8));
    assert_eq!(header(PngColorType::Index, 1, 1).filter_unit(), Ok(1));
  }

  #[test]
  fn test_bytes_per_filterline() {
    assert_eq!(header(PngColorType::RGB, 8, 10).bytes_per_filterline(), Ok(31));
    assert_eq!(header(PngColorType::Index, 2, 10).bytes_per_filterline(), Ok(11));
    // sub-byte pixels round down
    assert_eq!(header(PngColorType::Y, 1, 12).bytes_per_filterline(), Ok(2));
    assert_eq!(header(PngColorType::Y, 8, 0).bytes_per_filterline(), Ok(1));
    assert_eq!(header(PngColorType::RGB, 8, 10).decompressed_len(), Ok(31));
  }
}
