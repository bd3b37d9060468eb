use super::*;

/// The four byte tag that names a chunk.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl ChunkType {
  /// Image header
  pub const IHDR: Self = Self(*b"IHDR");
  /// Palette
  pub const PLTE: Self = Self(*b"PLTE");
  /// Image data
  pub const IDAT: Self = Self(*b"IDAT");
  /// Image end
  pub const IEND: Self = Self(*b"IEND");

  /// The tag bytes.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 4] {
    &self.0
  }
}
impl From<[u8; 4]> for ChunkType {
  #[inline]
  fn from(tag: [u8; 4]) -> Self {
    Self(tag)
  }
}
impl Debug for ChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char(self.0[0] as char)?;
    f.write_char(self.0[1] as char)?;
    f.write_char(self.0[2] as char)?;
    f.write_char(self.0[3] as char)?;
    Ok(())
  }
}

/// A single chunk of a PNG datastream.
///
/// Chunks parsed out of a byte slice borrow their data from it, chunks made
/// with [`build_chunk`] own their data.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PngChunk<'b> {
  /// The declared length of the data.
  pub length: u32,
  /// The chunk's type tag.
  pub ty: ChunkType,
  /// The chunk's data bytes.
  pub data: Cow<'b, [u8]>,
  /// The CRC stored after the data (not necessarily correct).
  pub declared_crc: u32,
  /// Position of the chunk's length field within the source bytes.
  pub offset: usize,
}
impl Debug for PngChunk<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngChunk")
      .field("ty", &self.ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .field("offset", &self.offset)
      .finish()
  }
}
impl PngChunk<'_> {
  /// Computes the CRC that the chunk *should* have.
  #[inline]
  #[must_use]
  pub fn compute_actual_crc(&self) -> u32 {
    png_crc(self.ty.0.iter().copied().chain(self.data.iter().copied()))
  }

  /// Checks the declared CRC against the chunk's type and data.
  #[inline]
  #[must_use]
  pub fn verify_checksum(&self) -> bool {
    self.declared_crc == self.compute_actual_crc()
  }

  /// Appends the chunk's bytes (length, type, data, crc) to `out`.
  ///
  /// The declared CRC is written as-is, it is not recomputed.
  pub fn write_to(&self, out: &mut Vec<u8>) {
    out.extend_from_slice(&self.length.to_be_bytes());
    out.extend_from_slice(&self.ty.0);
    out.extend_from_slice(&self.data);
    out.extend_from_slice(&self.declared_crc.to_be_bytes());
  }

  /// The chunk as bytes, the same way it would appear in a PNG.
  #[must_use]
  pub fn serialize(&self) -> Vec<u8> {
    let mut out = Vec::with_capacity(12 + self.data.len());
    self.write_to(&mut out);
    out
  }

  /// Converts into a chunk that owns its data.
  #[must_use]
  pub fn into_owned(self) -> PngChunk<'static> {
    PngChunk {
      length: self.length,
      ty: self.ty,
      data: Cow::Owned(self.data.into_owned()),
      declared_crc: self.declared_crc,
      offset: self.offset,
    }
  }
}

/// Makes a chunk with the correct length and CRC for the data given.
///
/// ## Failure
/// * If `data` is longer than `u32::MAX` bytes, which PNG can't represent.
pub fn build_chunk(ty: ChunkType, data: Vec<u8>) -> PngResult<PngChunk<'static>> {
  let length = u32::try_from(data.len()).map_err(|_| PngError::ChunkTooLarge)?;
  let declared_crc = png_crc(ty.0.iter().copied().chain(data.iter().copied()));
  Ok(PngChunk { length, ty, data: Cow::Owned(data), declared_crc, offset: 0 })
}

/// An iterator that produces successive chunks from PNG bytes.
///
/// * The first 8 bytes are skipped without being checked, see
///   [`is_png_header_correct`] if you want to check them.
/// * After the `IEND` chunk, or after the first error, the iterator is done.
#[derive(Debug, Clone)]
pub struct ChunkIter<'b> {
  bytes: &'b [u8],
  cursor: usize,
  done: bool,
}
impl<'b> ChunkIter<'b> {
  /// Pass the full PNG bytes.
  #[inline]
  pub const fn new(bytes: &'b [u8]) -> Self {
    Self { bytes, cursor: PNG_SIGNATURE.len(), done: false }
  }

  fn take(&mut self, count: usize) -> PngResult<&'b [u8]> {
    let end = self.cursor.checked_add(count).ok_or(PngError::TruncatedStream)?;
    let out = self.bytes.get(self.cursor..end).ok_or(PngError::TruncatedStream)?;
    self.cursor = end;
    Ok(out)
  }

  fn take_u32(&mut self) -> PngResult<u32> {
    let (v, _) = try_pull_u32_be(self.take(4)?)?;
    Ok(v)
  }

  fn read_chunk(&mut self) -> PngResult<PngChunk<'b>> {
    let offset = self.cursor;
    let length = self.take_u32()?;
    let (tag, _) = try_pull_byte_array::<4>(self.take(4)?)?;
    let data = self.take(length as usize)?;
    let declared_crc = self.take_u32()?;
    Ok(PngChunk { length, ty: ChunkType(tag), data: Cow::Borrowed(data), declared_crc, offset })
  }
}
impl<'b> Iterator for ChunkIter<'b> {
  type Item = PngResult<PngChunk<'b>>;
  fn next(&mut self) -> Option<Self::Item> {
    if self.done {
      return None;
    }
    let result = self.read_chunk();
    match &result {
      Ok(chunk) => {
        trace!("chunk {:?} at {}: {} bytes", chunk.ty, chunk.offset, chunk.length);
        if chunk.ty == ChunkType::IEND {
          self.done = true;
        }
      }
      Err(e) => {
        trace!("chunk framing failed at {}: {e}", self.cursor);
        self.done = true;
      }
    }
    Some(result)
  }
}
impl core::iter::FusedIterator for ChunkIter<'_> {}

/// Parses every chunk up to and including `IEND`.
///
/// Checksums are *not* checked here.
pub fn parse_all(bytes: &[u8]) -> PngResult<Vec<PngChunk<'_>>> {
  let mut out = Vec::new();
  for chunk in ChunkIter::new(bytes) {
    out.push(chunk?);
  }
  match out.last() {
    Some(last) if last.ty == ChunkType::IEND => Ok(out),
    _ => Err(PngError::TruncatedStream),
  }
}

/// `true` if every chunk's declared CRC is correct.
#[must_use]
pub fn verify_all(chunks: &[PngChunk<'_>]) -> bool {
  chunks.iter().all(PngChunk::verify_checksum)
}

/// Finds the `index`-th chunk (counting from 0) of the given type.
#[must_use]
pub fn find_chunk<'c, 'b>(
  chunks: &'c [PngChunk<'b>], ty: ChunkType, index: usize,
) -> Option<&'c PngChunk<'b>> {
  chunks.iter().filter(|c| c.ty == ty).nth(index)
}

#[cfg(test)]
mod tests {
  use super::*;
  use alloc::vec;

  fn two_chunk_png() -> Vec<u8> {
    let mut v = PNG_SIGNATURE.to_vec();
    build_chunk(ChunkType(*b"teSt"), vec![1, 2, 3]).unwrap().write_to(&mut v);
    build_chunk(ChunkType::IEND, vec![]).unwrap().write_to(&mut v);
    v
  }

  #[test]
  fn test_parse_all_offsets_and_lengths() {
    let png = two_chunk_png();
    let chunks = parse_all(&png).unwrap();
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].offset, 8);
    assert_eq!(chunks[0].length, 3);
    assert_eq!(&chunks[0].data[..], &[1, 2, 3]);
    assert_eq!(chunks[1].offset, 8 + 12 + 3);
    assert_eq!(chunks[1].ty, ChunkType::IEND);
    assert!(verify_all(&chunks));
  }

  #[test]
  fn test_parse_all_stops_at_iend() {
    let mut png = two_chunk_png();
    // trailing junk after IEND is never looked at
    png.extend_from_slice(&[0xFF; 5]);
    assert_eq!(parse_all(&png).unwrap().len(), 2);
  }

  #[test]
  fn test_parse_all_truncated() {
    let png = two_chunk_png();
    for cut in 0..png.len() {
      assert_eq!(parse_all(&png[..cut]), Err(PngError::TruncatedStream), "cut: {cut}");
    }
  }

  #[test]
  fn test_huge_length_is_truncation() {
    let mut png = PNG_SIGNATURE.to_vec();
    png.extend_from_slice(&u32::MAX.to_be_bytes());
    png.extend_from_slice(b"IDAT");
    png.extend_from_slice(&[0; 16]);
    assert_eq!(parse_all(&png), Err(PngError::TruncatedStream));
  }

  #[test]
  fn test_build_chunk_fills_in_framing() {
    let chunk: PngResult<PngChunk<'static>> = build_chunk(ChunkType::PLTE, vec![1, 2, 3]);
    let chunk = chunk.unwrap();
    assert_eq!(chunk.length, 3);
    assert_eq!(chunk.offset, 0);
    assert_eq!(chunk.declared_crc, chunk.compute_actual_crc());
    assert_eq!(chunk.serialize().len(), 12 + 3);
  }

  #[test]
  fn test_checksum_detects_any_flipped_byte() {
    let chunk = build_chunk(ChunkType::IDAT, vec![9, 8, 7, 6, 5]).unwrap();
    assert!(chunk.verify_checksum());
    for i in 0..chunk.data.len() {
      let mut bad = chunk.clone();
      bad.data.to_mut()[i] ^= 0x01;
      assert!(!bad.verify_checksum(), "flip at {i}");
    }
  }

  #[test]
  fn test_serialize_then_parse_verifies() {
    let a = build_chunk(ChunkType::IHDR, vec![0; 13]).unwrap();
    let b = build_chunk(ChunkType::IEND, vec![]).unwrap();
    let mut png = PNG_SIGNATURE.to_vec();
    png.extend_from_slice(&a.serialize());
    png.extend_from_slice(&b.serialize());
    let chunks = parse_all(&png).unwrap();
    assert!(verify_all(&chunks));
    assert_eq!(chunks[0].data, a.data);
  }

  #[test]
  fn test_find_chunk_by_index() {
    let chunks = vec![
      build_chunk(ChunkType::IHDR, vec![1]).unwrap(),
      build_chunk(ChunkType::IDAT, vec![2]).unwrap(),
      build_chunk(ChunkType::IHDR, vec![3]).unwrap(),
      build_chunk(ChunkType::IEND, vec![]).unwrap(),
    ];
    assert_eq!(&find_chunk(&chunks, ChunkType::IHDR, 0).unwrap().data[..], &[1]);
    assert_eq!(&find_chunk(&chunks, ChunkType::IHDR, 1).unwrap().data[..], &[3]);
    assert!(find_chunk(&chunks, ChunkType::IHDR, 2).is_none());
    assert!(find_chunk(&chunks, ChunkType::PLTE, 0).is_none());
  }

  #[test]
  fn test_chunk_type_debug() {
    assert_eq!(alloc::format!("{:?}", ChunkType::IDAT), "IDAT");
  }
}
