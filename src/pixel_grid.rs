//! Provides the decoded pixel storage.

use alloc::vec::Vec;

/// Unfiltered pixel data, stored row by row.
///
/// Every pixel is `pixel_size` bytes (the samples of that pixel, in order).
/// For images with less than 8 bits per pixel each "pixel" here is actually one
/// byte of packed samples, since that's the unit that filtering works with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PixelGrid {
  pixels_per_row: usize,
  pixel_size: usize,
  height: usize,
  data: Vec<u8>,
}
impl PixelGrid {
  /// Makes a grid from tightly packed rows.
  ///
  /// Returns `None` if `data` isn't exactly `pixels_per_row * pixel_size *
  /// height` bytes.
  #[must_use]
  pub fn from_raw(
    pixels_per_row: usize, pixel_size: usize, height: usize, data: Vec<u8>,
  ) -> Option<Self> {
    let expected = pixels_per_row.checked_mul(pixel_size)?.checked_mul(height)?;
    if data.len() == expected && pixel_size > 0 {
      Some(Self { pixels_per_row, pixel_size, height, data })
    } else {
      None
    }
  }

  /// Number of rows.
  #[inline]
  #[must_use]
  pub const fn height(&self) -> usize {
    self.height
  }

  /// Number of pixels in each row.
  #[inline]
  #[must_use]
  pub const fn pixels_per_row(&self) -> usize {
    self.pixels_per_row
  }

  /// Bytes per pixel.
  #[inline]
  #[must_use]
  pub const fn pixel_size(&self) -> usize {
    self.pixel_size
  }

  /// Bytes per row.
  #[inline]
  #[must_use]
  pub const fn row_len(&self) -> usize {
    self.pixels_per_row * self.pixel_size
  }

  /// If the grid has no rows.
  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.height == 0
  }

  /// All of the pixel bytes, row after row.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.data
  }

  /// Gets a row, or `None` if `y` is out of bounds.
  #[inline]
  #[must_use]
  pub fn row(&self, y: usize) -> Option<&[u8]> {
    if y < self.height {
      let len = self.row_len();
      self.data.get(y * len..(y + 1) * len)
    } else {
      None
    }
  }

  /// Iterates the rows, top to bottom.
  pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
    (0..self.height).filter_map(move |y| self.row(y))
  }

  /// Iterates every pixel, left to right and top to bottom.
  pub fn pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
    // pixel_size is never 0, so this can't panic
    self.data.chunks_exact(self.pixel_size.max(1))
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
    if x < self.pixels_per_row {
      let start = x * self.pixel_size;
      self.row(y)?.get(start..start + self.pixel_size)
    } else {
      None
    }
  }

  /// Gets the pixel at the position mutably, or `None` if the position is out
  /// of bounds.
  #[inline]
  #[must_use]
  pub fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut [u8]> {
    if x < self.pixels_per_row && y < self.height {
      let start = y * self.row_len() + x * self.pixel_size;
      self.data.get_mut(start..start + self.pixel_size)
    } else {
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use alloc::vec;

  #[test]
  fn test_pixel_grid_indexing() {
    let data: Vec<u8> = (0..12).collect();
    let mut grid = PixelGrid::from_raw(2, 3, 2, data).unwrap();
    assert_eq!(grid.row(1), Some(&[6, 7, 8, 9, 10, 11][..]));
    assert_eq!(grid.pixel(1, 0), Some(&[3, 4, 5][..]));
    assert_eq!(grid.pixel(2, 0), None);
    assert_eq!(grid.pixel(0, 2), None);
    assert_eq!(grid.pixels().count(), 4);
    assert_eq!(grid.rows().count(), 2);
    grid.pixel_mut(0, 1).unwrap().copy_from_slice(&[0xAA; 3]);
    assert_eq!(grid.pixel(0, 1), Some(&[0xAA; 3][..]));
  }

  #[test]
  fn test_pixel_grid_from_raw_checks_len() {
    assert!(PixelGrid::from_raw(2, 3, 2, vec![0; 11]).is_none());
    assert!(PixelGrid::from_raw(2, 0, 2, vec![]).is_none());
    let empty_rows = PixelGrid::from_raw(0, 1, 3, vec![]).unwrap();
    assert_eq!(empty_rows.rows().count(), 3);
    assert_eq!(empty_rows.pixels().count(), 0);
  }
}
