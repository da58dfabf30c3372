use thiserror::Error;

use crate::ChunkTypeId;

/// An error from the `chunkline` crate.
///
/// Every error is fatal to the decode or encode call that produced it. The
/// pipelines never hand back a partial result alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
  /// The record's payload length is outside what the chunk type allows.
  #[error("the length of chunk {ty} should be {expected}, but got {actual}")]
  InvalidLength {
    /// Chunk type that rejected the length.
    ty: ChunkTypeId,
    /// The exact (strict) or minimum (lenient) length required.
    expected: usize,
    /// The declared payload length.
    actual: usize,
  },

  /// Strict mode: another occurrence of a limited chunk type showed up while
  /// reading records.
  #[error("only {limit} {ty} chunk(s) allowed in the data")]
  DuplicateChunk {
    /// Chunk type.
    ty: ChunkTypeId,
    /// The occurrence limit for the type.
    limit: usize,
  },

  /// Strict mode: the final number of instances of a type is over its limit.
  #[error("not more than {limit} chunk(s) allowed for {ty}, found {count}")]
  MultipleNotAllowed {
    /// Chunk type.
    ty: ChunkTypeId,
    /// The occurrence limit for the type.
    limit: usize,
    /// How many instances were collected.
    count: usize,
  },

  /// A field value is outside its declared domain.
  #[error("value {value} is not valid for field `{field}` of chunk {ty}")]
  InvalidFieldValue {
    /// Chunk type owning the field.
    ty: ChunkTypeId,
    /// Field name.
    field: &'static str,
    /// The rejected value, widened.
    value: u64,
  },

  /// Strict mode: a critical chunk type with no registered handler.
  #[error("unknown critical chunk {ty}")]
  UnknownCriticalChunk {
    /// The unrecognized chunk type.
    ty: ChunkTypeId,
  },

  /// Input ended before a read or a record could complete.
  #[error("unexpected end of input: needed {needed} byte(s), {remaining} remaining")]
  UnexpectedEnd {
    /// Bytes the read required.
    needed: usize,
    /// Bytes that were actually left.
    remaining: usize,
  },

  /// The data doesn't start with the expected file signature.
  #[error("missing or invalid file signature")]
  BadSignature,

  /// Strict mode: a record's declared CRC doesn't match its contents.
  #[error("checksum mismatch in chunk {ty}: declared {declared:#010X}, actual {actual:#010X}")]
  ChecksumMismatch {
    /// Chunk type of the damaged record.
    ty: ChunkTypeId,
    /// CRC stored in the record.
    declared: u32,
    /// CRC computed from the record.
    actual: u32,
  },

  /// A handler was given an instance of some other chunk type.
  #[error("handler for {ty} was given an instance of another chunk type")]
  MismatchedInstance {
    /// Chunk type of the handler.
    ty: ChunkTypeId,
  },

  /// Two handlers were registered for the same chunk type or sequence.
  #[error("a handler conflicting with {ty} is already registered")]
  ConflictingHandler {
    /// Chunk type of the handler that was rejected.
    ty: ChunkTypeId,
  },
}

/// Shorthand for results in this crate.
pub type FormatResult<T> = Result<T, FormatError>;
