use alloc::{collections::BTreeMap, vec::Vec};

use crate::{
  ChunkTypeId, Gamma, GammaOptions, HeaderOptions, ImageData, ImageHeader, Palette,
  PhysicalDimensions, PhysicalSizeOptions, TextEntry, TimeOptions, Timestamp,
};

/// Everything a decode found, and the passthrough input to an encode.
///
/// Each field belongs to exactly one handler. A field is `Some` only if at
/// least one chunk of that type was in the stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkData {
  /// From `IHDR`.
  pub header: Option<ImageHeader>,
  /// From `gAMA`.
  pub gamma: Option<Gamma>,
  /// From `pHYs`.
  pub physical_size: Option<PhysicalDimensions>,
  /// From `PLTE`.
  pub palette: Option<Palette>,
  /// From every `IDAT`, in stream order.
  pub image_data: Option<Vec<ImageData>>,
  /// From `tIME`.
  pub modified: Option<Timestamp>,
  /// From every `tEXt`, in stream order.
  pub text: Option<Vec<TextEntry>>,
  /// Payloads owned by handlers outside this crate, keyed by type, each in
  /// stream order.
  pub custom: BTreeMap<ChunkTypeId, Vec<Vec<u8>>>,
  /// Chunks with no registered handler, in stream order.
  pub unknown: Vec<OpaqueChunk>,
}

/// An unparsed chunk carried through as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpaqueChunk {
  pub ty: ChunkTypeId,
  pub data: Vec<u8>,
}

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeOptions {
  /// Exact payload lengths, occurrence limits, and understanding of all
  /// critical chunks are required. Checksum mismatches become errors.
  ///
  /// Value domain checks happen either way.
  pub strict: bool,
  /// Compare each record's declared CRC against its contents.
  pub verify_checksums: bool,
}
impl Default for DecodeOptions {
  #[inline]
  fn default() -> Self {
    Self { strict: false, verify_checksums: true }
  }
}
impl DecodeOptions {
  #[inline]
  #[must_use]
  pub const fn strict(self, strict: bool) -> Self {
    Self { strict, ..self }
  }
  #[inline]
  #[must_use]
  pub const fn verify_checksums(self, verify_checksums: bool) -> Self {
    Self { verify_checksums, ..self }
  }
}

/// Encoder settings.
///
/// Each chunk type reads only its own sub-section, and a sub-section left as
/// `None` means that chunk type isn't written at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
  pub header: Option<HeaderOptions>,
  pub gamma: Option<GammaOptions>,
  pub physical_size: Option<PhysicalSizeOptions>,
  pub palette: Option<Palette>,
  pub image_data: Option<Vec<ImageData>>,
  pub modified: Option<TimeOptions>,
  pub text: Option<Vec<TextEntry>>,
  /// Payloads for handlers outside this crate, keyed by type.
  pub custom: BTreeMap<ChunkTypeId, Vec<Vec<u8>>>,
  /// Write [`ChunkData::unknown`] back out. Defaults to `true`.
  ///
  /// Entries whose type has a registered handler are skipped, since that
  /// handler already writes its own chunks.
  pub preserve_unknown: bool,
}
impl Default for EncodeOptions {
  #[inline]
  fn default() -> Self {
    Self {
      header: None,
      gamma: None,
      physical_size: None,
      palette: None,
      image_data: None,
      modified: None,
      text: None,
      custom: BTreeMap::new(),
      preserve_unknown: true,
    }
  }
}
impl From<&ChunkData> for EncodeOptions {
  /// Options that write back the same chunks a decode produced.
  fn from(data: &ChunkData) -> Self {
    Self {
      header: data.header.map(HeaderOptions::from),
      gamma: data.gamma.map(GammaOptions::from),
      physical_size: data.physical_size.map(PhysicalSizeOptions::from),
      palette: data.palette.clone(),
      image_data: data.image_data.clone(),
      modified: data.modified.map(TimeOptions::from),
      text: data.text.clone(),
      custom: data.custom.clone(),
      preserve_unknown: true,
    }
  }
}
