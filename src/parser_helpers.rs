use crate::{PngError, PngResult};

/// Splits `N` bytes off the front of `bytes`.
#[inline]
pub(crate) fn try_pull_byte_array<const N: usize>(bytes: &[u8]) -> PngResult<([u8; N], &[u8])> {
  match bytes.split_first_chunk::<N>() {
    Some((head, tail)) => Ok((*head, tail)),
    None => Err(PngError::TruncatedStream),
  }
}

/// Reads a big-endian `u32` off the front of `bytes`.
#[inline]
pub(crate) fn try_pull_u32_be(bytes: &[u8]) -> PngResult<(u32, &[u8])> {
  let (head, tail) = try_pull_byte_array::<4>(bytes)?;
  Ok((u32::from_be_bytes(head), tail))
}

#[test]
fn test_try_pull_helpers() {
  let bytes = [0, 0, 1, 2, 9];
  let (v, rest) = try_pull_u32_be(&bytes).unwrap();
  assert_eq!(v, 0x0102);
  assert_eq!(rest, &[9]);
  assert_eq!(try_pull_u32_be(rest), Err(PngError::TruncatedStream));
  let (arr, rest) = try_pull_byte_array::<2>(&bytes).unwrap();
  assert_eq!(arr, [0, 0]);
  assert_eq!(rest.len(), 3);
}
