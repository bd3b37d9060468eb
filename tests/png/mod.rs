use pngprobe::png::*;

/// A 3x1 RGB image with one pixel of each primary.
fn primaries_png() -> Vec<u8> {
  let ihdr = IHDR {
    width: 3,
    height: 1,
    bit_depth: 8,
    color_type: PngColorType::RGB,
    compression_method: 0,
    filter_method: 0,
    interlace_method: 0,
  };
  let raw = [0, 255, 0, 0, 0, 255, 0, 0, 0, 255];
  // level 0 stores the data, and has a FLEVEL of 0
  let zlib = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 0);
  let mut out = PNG_SIGNATURE.to_vec();
  build_chunk(ChunkType::IHDR, ihdr.to_bytes().to_vec()).unwrap().write_to(&mut out);
  build_chunk(ChunkType::IDAT, zlib).unwrap().write_to(&mut out);
  build_chunk(ChunkType::IEND, Vec::new()).unwrap().write_to(&mut out);
  out
}

#[test]
fn test_ChunkIter_no_panics() {
  // even totally random data should never panic the iterator!
  for _ in 0..10 {
    let mut v = PNG_SIGNATURE.to_vec();
    v.extend(super::rand_bytes(1024));
    for _ in ChunkIter::new(&v) {
      //
    }
  }
}

#[test]
fn test_Png_new_no_panics() {
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    let png = Png::new(&v);
    assert!(png.state() <= DecodeState::NotPng);
  }
  // flip random bytes of a good image, decoding degrades but never panics
  let good = primaries_png();
  for _ in 0..200 {
    let r = super::rand_bytes(2);
    let mut v = good.clone();
    let i = 8 + (r[0] as usize % (v.len() - 8));
    v[i] ^= r[1] | 1;
    let png = Png::new(&v);
    assert!(png.state() >= DecodeState::Signature);
    let _ = png.rgb_at(0, 0);
    let _ = png.contains_color([255, 0, 0]);
    let _ = png.serialize_image();
  }
  // and so does cutting it short anywhere
  for len in 0..good.len() {
    let png = Png::new(&good[..len]);
    assert!(png.state() < DecodeState::Chunks);
  }
}

#[test]
fn test_decode_then_reencode() {
  let bytes = primaries_png();
  let mut png = Png::new(&bytes);
  assert_eq!(png.state(), DecodeState::Complete);
  assert!(png.checksums_valid());
  assert_eq!(png.compression_level(), 0);
  assert_eq!(png.rgb_at(0, 0), Ok(Some([255, 0, 0])));
  assert_eq!(png.rgb_at(1, 0), Ok(Some([0, 255, 0])));
  assert_eq!(png.rgb_at(2, 0), Ok(Some([0, 0, 255])));
  assert!(png.contains_color([0, 0, 255]));
  assert!(!png.contains_color([255, 255, 255]));

  png.pixels_mut().pixel_mut(2, 0).unwrap().copy_from_slice(&[255, 255, 255]);
  let out = png.serialize_image().unwrap();
  assert!(is_png_header_correct(&out));
  let again = Png::new(&out);
  assert_eq!(again.state(), DecodeState::Complete);
  assert!(again.contains_color([255, 255, 255]));
  assert!(!again.contains_color([0, 0, 255]));
  assert_eq!(again.header(), png.header());
}

#[test]
fn test_step_by_step() {
  let bytes = primaries_png();
  let chunks = parse_all(&bytes).unwrap();
  assert!(verify_all(&chunks));
  let ihdr = extract_header(&chunks).unwrap();
  assert_eq!(ihdr.bytes_per_filterline(), Ok(10));
  assert_eq!(ihdr.pixel_size_bytes(), Ok((24, 8)));
  assert_eq!(zlib_level_hint(&concat_idat(&chunks)), Some(0));
  let inflated = decompress_idat(&chunks, 1 << 20).unwrap();
  assert_eq!(inflated.len(), 10);
  let mut used = std::collections::BTreeSet::new();
  let grid = unfilter_image(&ihdr, &inflated, false, &mut used).unwrap();
  assert_eq!(grid.pixel(1, 0), Some(&[0, 255, 0][..]));

  let rebuilt = write_png(&chunks[0], None, &grid, Some(&chunks[2]), 6).unwrap();
  assert_eq!(Png::new(&rebuilt).pixels(), &grid);
}
