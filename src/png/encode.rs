use super::*;

/// Makes an `IDAT` chunk holding the whole grid.
///
/// Every line gets filter type 0, the lines are joined, and the result is zlib
/// compressed at `level` (0 through 10).
///
/// ## Failure
/// * The compressed data doesn't fit in one chunk.
pub fn build_idat_chunk(grid: &PixelGrid, level: u8) -> PngResult<PngChunk<'static>> {
  let mut filtered = Vec::with_capacity((grid.row_len() + 1) * grid.height());
  for row in grid.rows() {
    filtered.push(FilterType::None as u8);
    filtered.extend_from_slice(row);
  }
  let zlib = miniz_oxide::deflate::compress_to_vec_zlib(&filtered, level);
  trace!("compressed {} filtered bytes to {}", filtered.len(), zlib.len());
  build_chunk(ChunkType::IDAT, zlib)
}

/// Writes a complete PNG datastream.
///
/// `header`, then `palette` if given, then one `IDAT` built from `grid`, then
/// `end` (or a fresh `IEND` chunk when `None`).
///
/// ## Failure
/// * Same as [`build_idat_chunk`].
pub fn write_png(
  header: &PngChunk<'_>, palette: Option<&PngChunk<'_>>, grid: &PixelGrid,
  end: Option<&PngChunk<'_>>, level: u8,
) -> PngResult<Vec<u8>> {
  let idat = build_idat_chunk(grid, level)?;
  let mut out = Vec::with_capacity(PNG_SIGNATURE.len() + 12 * 4 + idat.data.len() + 13);
  out.extend_from_slice(&PNG_SIGNATURE);
  header.write_to(&mut out);
  if let Some(plte) = palette {
    plte.write_to(&mut out);
  }
  idat.write_to(&mut out);
  match end {
    Some(iend) => iend.write_to(&mut out),
    None => build_chunk(ChunkType::IEND, Vec::new())?.write_to(&mut out),
  }
  Ok(out)
}
