//! The five PNG scanline filters.
//!
//! From the PNG standard:
//!
//! > Filters are applied to **bytes**, not to pixels, regardless of the bit
//! > depth or color type of the image.
//!
//! Each byte is predicted from `a` (the byte one filter unit to the left), `b`
//! (the byte above) and `c` (the byte above and to the left). Anything off the
//! left edge or above the first line counts as 0.

use super::*;

/// The filter applied to a scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FilterType {
  /// No change
  None = 0,
  /// Predict from the left
  Sub = 1,
  /// Predict from above
  Up = 2,
  /// Predict from the average of left and above
  Average = 3,
  /// Predict with the Paeth predictor
  Paeth = 4,
}
impl FilterType {
  /// All filters, in tag order.
  pub const ALL: [Self; 5] = [Self::None, Self::Sub, Self::Up, Self::Average, Self::Paeth];
}
impl TryFrom<u8> for FilterType {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::None,
      1 => Self::Sub,
      2 => Self::Up,
      3 => Self::Average,
      4 => Self::Paeth,
      other => return Err(PngError::InvalidFilterType(other)),
    })
  }
}

/// The Paeth predictor.
#[inline]
#[must_use]
pub const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // The order of these tests is part of the format and must not change.
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

#[inline]
#[must_use]
fn predict(filter: FilterType, a: u8, b: u8, c: u8) -> u8 {
  match filter {
    FilterType::None => 0,
    FilterType::Sub => a,
    FilterType::Up => b,
    FilterType::Average => ((u16::from(a) + u16::from(b)) / 2) as u8,
    FilterType::Paeth => paeth_predict(a, b, c),
  }
}

/// Reverses a filter on one line, in place.
///
/// * `unit` is the filter unit in bytes (see [`IHDR::filter_unit`]).
/// * `prior` is the already unfiltered line above. Pass an empty slice for the
///   first line; any bytes missing from `prior` count as 0.
pub fn unfilter_line(filter: FilterType, unit: usize, prior: &[u8], line: &mut [u8]) {
  let unit = unit.max(1);
  match filter {
    FilterType::None => (),
    FilterType::Sub => {
      for i in unit..line.len() {
        line[i] = line[i].wrapping_add(line[i - unit]);
      }
    }
    FilterType::Up => {
      line.iter_mut().zip(prior.iter().copied()).for_each(|(x, b)| *x = x.wrapping_add(b));
    }
    FilterType::Average | FilterType::Paeth => {
      for i in 0..line.len() {
        let a = if i >= unit { line[i - unit] } else { 0 };
        let b = prior.get(i).copied().unwrap_or(0);
        let c = if i >= unit { prior.get(i - unit).copied().unwrap_or(0) } else { 0 };
        line[i] = line[i].wrapping_add(predict(filter, a, b, c));
      }
    }
  }
}

/// Applies a filter to one line of raw bytes, appending the result to `out`.
///
/// This is the exact inverse of [`unfilter_line`] with the same arguments. The
/// filter tag itself is *not* written.
pub fn filter_line(filter: FilterType, unit: usize, prior: &[u8], raw: &[u8], out: &mut Vec<u8>) {
  let unit = unit.max(1);
  out.reserve(raw.len());
  for (i, x) in raw.iter().copied().enumerate() {
    let a = if i >= unit { raw[i - unit] } else { 0 };
    let b = prior.get(i).copied().unwrap_or(0);
    let c = if i >= unit { prior.get(i - unit).copied().unwrap_or(0) } else { 0 };
    out.push(x.wrapping_sub(predict(filter, a, b, c)));
  }
}
