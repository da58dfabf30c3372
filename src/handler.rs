//! The contract every chunk type implements.

use alloc::vec::Vec;

use crate::{
  ChunkData, ChunkTypeId, DecodeOptions, EncodeOptions, FormatError, FormatResult, Gamma,
  ImageData, ImageHeader, OpaqueChunk, Palette, PhysicalDimensions, StreamCursor, StreamWriter,
  TextEntry, Timestamp,
};

/// One typed chunk occurrence.
///
/// Produced by [`ChunkHandler::parse`] while decoding and by
/// [`ChunkHandler::encode_data`] while encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkInstance {
  /// `IHDR`
  Header(ImageHeader),
  /// `gAMA`
  Gamma(Gamma),
  /// `pHYs`
  PhysicalSize(PhysicalDimensions),
  /// `PLTE`
  Palette(Palette),
  /// `IDAT`
  ImageData(ImageData),
  /// `tIME`
  Time(Timestamp),
  /// `tEXt`
  Text(TextEntry),
  /// `IEND`
  End,
  /// Any type handled outside this crate, kept as its payload bytes.
  ///
  /// See [`RawChunkHandler`](crate::RawChunkHandler).
  Custom(OpaqueChunk),
}

/// A pluggable handler for one chunk type.
///
/// The decode pipeline calls [`parse`](Self::parse) once per record, then
/// [`decode_data`](Self::decode_data) once per registered handler. The encode
/// pipeline calls [`encode_data`](Self::encode_data) once per registered
/// handler, orders the results by [`sequence`](Self::sequence), then calls
/// [`compose`](Self::compose) once per instance.
///
/// A handler only ever touches its own field of [`ChunkData`] and its own
/// sub-section of [`EncodeOptions`]. Handlers defined outside this crate use
/// the entry for their type in [`ChunkData::custom`] and
/// [`EncodeOptions::custom`].
pub trait ChunkHandler: Send + Sync {
  /// The type tag this handler answers to.
  fn chunk_type(&self) -> ChunkTypeId;

  /// Output ordering key. Must be unique within a registry and must not
  /// depend on any instance's contents.
  fn sequence(&self) -> u32;

  /// How many instances a strict decode allows. `None` means unlimited.
  fn max_occurrences(&self) -> Option<usize> {
    Some(1)
  }

  /// Seeing this chunk ends the record stream.
  fn is_terminal(&self) -> bool {
    false
  }

  /// Reads one instance out of a payload of `length` bytes.
  ///
  /// `payload` is bounded to exactly this record, so anything left unread is
  /// skipped by the pipeline. `previous` holds the instances of this type
  /// parsed so far, in stream order.
  fn parse(
    &self, payload: &mut StreamCursor<'_>, length: usize, previous: &[ChunkInstance],
    options: &DecodeOptions,
  ) -> FormatResult<ChunkInstance>;

  /// Folds all parsed instances of this type into `data`.
  ///
  /// Called even when `instances` is empty, in which case the handler leaves
  /// its field alone.
  fn decode_data(
    &self, data: &mut ChunkData, instances: &[ChunkInstance], options: &DecodeOptions,
  ) -> FormatResult<()>;

  /// Builds the instances this type contributes to an encode.
  fn encode_data(
    &self, data: &ChunkData, options: &EncodeOptions,
  ) -> FormatResult<Vec<ChunkInstance>>;

  /// Writes one instance's payload. Must produce exactly what `parse` reads.
  fn compose(
    &self, out: &mut StreamWriter, options: &EncodeOptions, instance: &ChunkInstance,
  ) -> FormatResult<()>;
}

/// Error for an instance handed to the wrong handler.
#[inline]
#[must_use]
pub(crate) fn mismatched(ty: ChunkTypeId) -> FormatError {
  FormatError::MismatchedInstance { ty }
}
