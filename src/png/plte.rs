use super::*;

/// Palette data
///
/// Palette entries are always RGB.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PLTE<'b>(&'b [[u8; 3]]);
impl<'b> From<&'b [[u8; 3]]> for PLTE<'b> {
  #[inline]
  fn from(entries: &'b [[u8; 3]]) -> Self {
    Self(entries)
  }
}
impl<'b> From<&'b [u8]> for PLTE<'b> {
  /// Views the bytes as RGB entries. A partial entry on the end is ignored.
  #[inline]
  fn from(data: &'b [u8]) -> Self {
    let whole = data.len() - (data.len() % 3);
    Self(bytemuck::cast_slice(&data[..whole]))
  }
}
impl Debug for PLTE<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // currently prints no more than 4 palette entries
    f.debug_tuple("PLTE").field(&&self.0[..self.0.len().min(4)]).field(&self.0.len()).finish()
  }
}
impl<'b> PLTE<'b> {
  /// Gets the entries as a slice.
  #[inline]
  #[must_use]
  pub fn entries(&self) -> &'b [[u8; 3]] {
    self.0
  }

  /// Looks up an index.
  #[inline]
  pub fn lookup(&self, index: u8) -> PngResult<[u8; 3]> {
    self
      .0
      .get(usize::from(index))
      .copied()
      .ok_or(PngError::PaletteIndexOutOfRange { index, len: self.0.len() })
  }
}
