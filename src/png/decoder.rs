use super::*;

/// How far decoding got.
///
/// The levels only ever go up while decoding. Once a stage fails, the state
/// stays at the last stage that finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum DecodeState {
  /// No bytes at all.
  Empty = 0,
  /// Some bytes, but not the PNG signature.
  NotPng = 1,
  /// The signature is correct, chunks weren't parsed.
  Signature = 2,
  /// All chunks through `IEND` were parsed.
  Chunks = 3,
  /// The header was extracted.
  Header = 4,
  /// The image data was inflated and unfiltered.
  Complete = 10,
}
impl DecodeState {
  /// The numeric level of this state.
  #[inline]
  #[must_use]
  pub const fn level(self) -> u8 {
    self as u8
  }
}

/// A decoded (or partly decoded) PNG.
///
/// Making one never fails. Check [`state`](Png::state) to see how far decoding
/// got, and [`failure`](Png::failure) for the error that stopped it.
#[derive(Debug, Clone)]
pub struct Png<'b> {
  state: DecodeState,
  failure: Option<PngError>,
  chunks: Vec<PngChunk<'b>>,
  header: Option<IHDR>,
  filters_used: BTreeSet<u8>,
  compression_level: u8,
  pixels: PixelGrid,
}
impl<'b> Png<'b> {
  /// Decodes the bytes with the default options.
  #[must_use]
  pub fn new(bytes: &'b [u8]) -> Self {
    Self::new_with_options(bytes, DecodeOptions::default())
  }

  /// Decodes the bytes.
  #[must_use]
  pub fn new_with_options(bytes: &'b [u8], options: DecodeOptions) -> Self {
    let mut png = Self {
      state: DecodeState::Empty,
      failure: None,
      chunks: Vec::new(),
      header: None,
      filters_used: BTreeSet::new(),
      compression_level: 0,
      pixels: PixelGrid::default(),
    };
    if bytes.is_empty() {
      return png;
    }
    png.state = DecodeState::NotPng;
    if !is_png_header_correct(bytes) {
      debug!("signature is wrong: {:?}", &bytes[..bytes.len().min(8)]);
      return png;
    }
    png.state = DecodeState::Signature;
    if let Err(e) = png.run_stages(bytes, options) {
      warn!("decoding stopped at {:?}: {e}", png.state);
      png.failure = Some(e);
    }
    png
  }

  fn run_stages(&mut self, bytes: &'b [u8], options: DecodeOptions) -> PngResult<()> {
    self.chunks = parse_all(bytes)?;
    self.state = DecodeState::Chunks;
    trace!("parsed {} chunks", self.chunks.len());

    let header = extract_header(&self.chunks)?;
    self.header = Some(header);
    self.state = DecodeState::Header;
    debug!("header: {header:?}");
    if header.is_interlaced() {
      warn!("interlaced image data is unfiltered as a single pass");
    }

    let zlib = concat_idat(&self.chunks);
    self.compression_level = zlib_level_hint(&zlib).unwrap_or(0);
    let inflated = inflate_zlib(&zlib, options.get_inflate_limit())?;
    self.pixels = unfilter_image(
      &header,
      &inflated,
      options.get_lenient_filters(),
      &mut self.filters_used,
    )?;
    self.state = DecodeState::Complete;
    Ok(())
  }

  /// How far decoding got.
  #[inline]
  #[must_use]
  pub const fn state(&self) -> DecodeState {
    self.state
  }

  /// The error that stopped decoding, if any.
  ///
  /// This is `None` for a complete decode, and also for input that stopped
  /// before parsing began (empty, or no signature).
  #[inline]
  #[must_use]
  pub const fn failure(&self) -> Option<PngError> {
    self.failure
  }

  /// All of the parsed chunks, in stream order.
  #[inline]
  #[must_use]
  pub fn chunks(&self) -> &[PngChunk<'b>] {
    &self.chunks
  }

  /// Finds the `index`-th chunk of a type.
  #[inline]
  #[must_use]
  pub fn chunk(&self, ty: ChunkType, index: usize) -> Option<&PngChunk<'b>> {
    find_chunk(&self.chunks, ty, index)
  }

  /// The bytes of the `index`-th chunk of a type, as it would appear in a PNG.
  #[must_use]
  pub fn chunk_blob(&self, ty: ChunkType, index: usize) -> Option<Vec<u8>> {
    self.chunk(ty, index).map(PngChunk::serialize)
  }

  /// `true` if every chunk's CRC is correct.
  #[inline]
  #[must_use]
  pub fn checksums_valid(&self) -> bool {
    verify_all(&self.chunks)
  }

  /// Like [`checksums_valid`](Png::checksums_valid), but as a `Result`.
  #[inline]
  pub fn check_checksums(&self) -> PngResult<()> {
    if self.checksums_valid() {
      Ok(())
    } else {
      Err(PngError::ChecksumMismatch)
    }
  }

  /// The header from the first `IHDR` chunk.
  #[inline]
  #[must_use]
  pub const fn header(&self) -> Option<&IHDR> {
    self.header.as_ref()
  }

  /// Parses the `index`-th `IHDR` chunk.
  ///
  /// Index 0 is the header that decoding used. Any others are only reachable
  /// through here.
  pub fn header_at(&self, index: usize) -> PngResult<IHDR> {
    let chunk = self.chunk(ChunkType::IHDR, index).ok_or(PngError::MalformedHeader)?;
    IHDR::try_from(chunk)
  }

  /// The set of filter tags seen while unfiltering, in ascending order.
  #[inline]
  #[must_use]
  pub fn filters_used(&self) -> &BTreeSet<u8> {
    &self.filters_used
  }

  /// The 2-bit compression level hint from the zlib stream header.
  #[inline]
  #[must_use]
  pub const fn compression_level(&self) -> u8 {
    self.compression_level
  }

  /// The unfiltered pixels. Empty unless decoding completed.
  #[inline]
  #[must_use]
  pub const fn pixels(&self) -> &PixelGrid {
    &self.pixels
  }

  /// The unfiltered pixels, for editing before calling
  /// [`serialize_image`](Png::serialize_image).
  #[inline]
  #[must_use]
  pub fn pixels_mut(&mut self) -> &mut PixelGrid {
    &mut self.pixels
  }

  /// The palette from the first `PLTE` chunk, or an empty palette.
  #[inline]
  #[must_use]
  pub fn palette(&self) -> PLTE<'_> {
    self.chunk(ChunkType::PLTE, 0).map(|c| PLTE::from(&c.data[..])).unwrap_or_default()
  }

  /// The palette entries.
  #[inline]
  #[must_use]
  pub fn palette_colors(&self) -> &[[u8; 3]] {
    self.palette().entries()
  }

  /// Errors unless the image has 8 bits per sample.
  #[inline]
  pub fn require_8bit(&self) -> PngResult<&IHDR> {
    match &self.header {
      Some(h) if h.bit_depth == 8 => Ok(h),
      Some(h) => Err(PngError::UnsupportedBitDepth(h.bit_depth)),
      None => Err(PngError::MalformedHeader),
    }
  }

  fn pixel_to_rgb(color_type: PngColorType, plte: PLTE<'_>, pixel: &[u8]) -> PngResult<[u8; 3]> {
    Ok(match (color_type, pixel) {
      (PngColorType::RGB | PngColorType::RGBA, [r, g, b, ..]) => [*r, *g, *b],
      (PngColorType::Y | PngColorType::YA, [y, ..]) => [*y, *y, *y],
      (PngColorType::Index, [i, ..]) => plte.lookup(*i)?,
      (PngColorType::Unknown(t), _) => return Err(PngError::UnknownColorType(t)),
      // a grid built by the decoder always has a full pixel
      _ => return Err(PngError::NotEnoughImageData),
    })
  }

  /// The RGB value of a pixel.
  ///
  /// * Alpha is dropped, indexed pixels are looked up in the palette, and
  ///   greyscale is copied into all three channels.
  /// * Gives `Ok(None)` when the image isn't 8 bits per sample, or the
  ///   position is outside the decoded pixels.
  pub fn rgb_at(&self, x: u32, y: u32) -> PngResult<Option<[u8; 3]>> {
    let Ok(header) = self.require_8bit() else {
      return Ok(None);
    };
    match self.pixels.pixel(x as usize, y as usize) {
      Some(pixel) => Self::pixel_to_rgb(header.color_type, self.palette(), pixel).map(Some),
      None => Ok(None),
    }
  }

  /// If any pixel's RGB value (as from [`rgb_at`](Png::rgb_at)) equals `rgb`.
  ///
  /// Always `false` for images that aren't 8 bits per sample. Indexed pixels
  /// outside the palette never match.
  #[must_use]
  pub fn contains_color(&self, rgb: [u8; 3]) -> bool {
    let Ok(header) = self.require_8bit() else {
      return false;
    };
    let plte = self.palette();
    self
      .pixels
      .pixels()
      .any(|pixel| Self::pixel_to_rgb(header.color_type, plte, pixel) == Ok(rgb))
  }

  /// Re-encodes the image with the default options.
  ///
  /// See [`serialize_image_with`](Png::serialize_image_with).
  #[inline]
  pub fn serialize_image(&self) -> PngResult<Vec<u8>> {
    self.serialize_image_with(EncodeOptions::default())
  }

  /// Re-encodes the image.
  ///
  /// The output has the signature, the first `IHDR`, the first `PLTE` (if
  /// any), one new `IDAT` made from [`pixels`](Png::pixels) with no filtering,
  /// and `IEND`.
  ///
  /// ## Failure
  /// * No header was decoded.
  /// * The pixel grid doesn't have a row for every line of the image.
  /// * The compressed pixels don't fit in one chunk.
  pub fn serialize_image_with(&self, options: EncodeOptions) -> PngResult<Vec<u8>> {
    let header = self.header.ok_or(PngError::MalformedHeader)?;
    let ihdr = self.chunk(ChunkType::IHDR, 0).ok_or(PngError::MalformedHeader)?;
    if self.pixels.height() != header.height as usize {
      return Err(PngError::NoPixelData);
    }
    write_png(
      ihdr,
      self.chunk(ChunkType::PLTE, 0),
      &self.pixels,
      self.chunk(ChunkType::IEND, 0),
      options.get_compression_level(),
    )
  }
}
