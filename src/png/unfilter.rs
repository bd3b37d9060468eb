use super::*;

/// Given the `header` and the `decompressed` scanlines, unfilters the data
/// into a [`PixelGrid`].
///
/// * Each filter tag that's read goes into `filters_used`, even an invalid one
///   and even if a later line fails.
/// * A line's data is cut down to a whole number of filter units.
/// * An unknown filter tag is an error, unless `lenient` is set, in which case
///   that line is kept as-is (the same as filter type 0).
///
/// ## Failure
/// * The header's color type is unknown.
/// * Any tag outside `0..=4` when not `lenient`.
/// * The `decompressed` buffer running out before `height` lines. You **are**
///   allowed to pass a buffer with extra bytes on the end, they're ignored.
pub fn unfilter_image(
  header: &IHDR, decompressed: &[u8], lenient: bool, filters_used: &mut BTreeSet<u8>,
) -> PngResult<PixelGrid> {
  let bytes_per_filterline = header.bytes_per_filterline()?;
  let unit = header.filter_unit()?;
  let pixels_per_row = (bytes_per_filterline - 1) / unit;
  let row_len = pixels_per_row * unit;
  let height = header.height as usize;

  let mut data: Vec<u8> = Vec::new();
  data.reserve(decompressed.len().min(row_len.saturating_mul(height)));

  let mut filterlines = decompressed.chunks(bytes_per_filterline);
  for y in 0..height {
    let line = match filterlines.next() {
      Some(line) if line.len() == bytes_per_filterline => line,
      _ => {
        debug!("ran out of data at line {y} of {height}");
        return Err(PngError::NotEnoughImageData);
      }
    };
    let (&tag, filtered) = line.split_first().ok_or(PngError::NotEnoughImageData)?;
    filters_used.insert(tag);
    let filter = match FilterType::try_from(tag) {
      Ok(filter) => filter,
      Err(e) if lenient => {
        warn!("line {y}: {e}, keeping the line unfiltered");
        FilterType::None
      }
      Err(e) => return Err(e),
    };

    let start = data.len();
    data.extend_from_slice(&filtered[..row_len]);
    let (above, current) = data.split_at_mut(start);
    let prior = if y == 0 { &[][..] } else { &above[start - row_len..] };
    unfilter_line(filter, unit, prior, current);
  }

  PixelGrid::from_raw(pixels_per_row, unit, height, data).ok_or(PngError::NotEnoughImageData)
}
