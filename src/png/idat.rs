use super::*;

/// All `IDAT` data, concatenated in chunk order.
///
/// Images can have more than one `IDAT` chunk, and together they form a single
/// zlib stream. Other chunks between them are skipped.
#[must_use]
pub fn concat_idat(chunks: &[PngChunk<'_>]) -> Vec<u8> {
  let mut out = Vec::new();
  for idat in chunks.iter().filter(|c| c.ty == ChunkType::IDAT) {
    out.extend_from_slice(&idat.data);
  }
  out
}

/// Gets the `FLEVEL` hint out of a zlib stream's second byte.
///
/// * 0: fastest
/// * 1: fast
/// * 2: default
/// * 3: maximum compression
#[inline]
#[must_use]
pub fn zlib_level_hint(zlib: &[u8]) -> Option<u8> {
  zlib.get(1).map(|flg| flg >> 6)
}

/// Inflates a zlib stream, producing no more than `limit` bytes.
///
/// ## Failure
/// * Fewer than 2 bytes, which can't even hold the zlib header.
/// * The stream is corrupt, or inflates to more than `limit` bytes.
pub fn inflate_zlib(zlib: &[u8], limit: usize) -> PngResult<Vec<u8>> {
  if zlib.len() < 2 {
    return Err(PngError::Inflate);
  }
  trace!("inflating {} bytes of zlib data", zlib.len());
  let data = miniz_oxide::inflate::decompress_to_vec_zlib_with_limit(zlib, limit).map_err(|e| {
    debug!("inflate failed: {:?}", e.status);
    PngError::Inflate
  })?;
  debug!("inflated to {} bytes", data.len());
  Ok(data)
}

/// Concatenates and inflates the image data.
///
/// Use [`concat_idat`] with [`zlib_level_hint`] and [`inflate_zlib`] directly
/// if you also want the level hint.
#[inline]
pub fn decompress_idat(chunks: &[PngChunk<'_>], limit: usize) -> PngResult<Vec<u8>> {
  inflate_zlib(&concat_idat(chunks), limit)
}
