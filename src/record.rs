use core::fmt::Debug;

use crate::{chunk_crc, ChunkTypeId, FormatError, FormatResult, StreamCursor, StreamWriter};

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Strips [`PNG_SIGNATURE`] off the front of the data.
#[inline]
pub fn strip_png_signature(bytes: &[u8]) -> FormatResult<&[u8]> {
  match bytes {
    [137, 80, 78, 71, 13, 10, 26, 10, rest @ ..] => Ok(rest),
    _ => Err(FormatError::BadSignature),
  }
}

/// An unparsed chunk record.
///
/// Only the type and length drive dispatch. The declared CRC is carried along
/// so the decoder can verify it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawChunk<'b> {
  pub ty: ChunkTypeId,
  pub data: &'b [u8],
  pub declared_crc: u32,
}
impl<'b> RawChunk<'b> {
  /// The CRC computed from the type and payload.
  #[inline]
  #[must_use]
  pub fn actual_crc(&self) -> u32 {
    chunk_crc(self.ty, self.data)
  }
}
impl Debug for RawChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawChunk")
      .field("ty", &self.ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}

/// An iterator that produces successive raw chunk records.
///
/// Each record is `length (u32 BE)`, `type (4 bytes)`, `payload`,
/// `crc (u32 BE)`. If the input is truncated partway through a record the
/// iterator yields one [`FormatError::UnexpectedEnd`] and then stops.
#[derive(Debug, Clone)]
pub struct RawChunkIter<'b> {
  cursor: StreamCursor<'b>,
  failed: bool,
}
impl<'b> RawChunkIter<'b> {
  /// Iterates bare records, no file signature expected.
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'b [u8]) -> Self {
    Self { cursor: StreamCursor::new(bytes), failed: false }
  }

  /// Bytes after the last record handed out.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> usize {
    self.cursor.remaining()
  }

  fn next_record(&mut self) -> FormatResult<RawChunk<'b>> {
    let length = self.cursor.read_u32_be()? as usize;
    let ty = ChunkTypeId(self.cursor.read_array()?);
    let data = self.cursor.read_bytes(length)?;
    let declared_crc = self.cursor.read_u32_be()?;
    Ok(RawChunk { ty, data, declared_crc })
  }
}
impl<'b> Iterator for RawChunkIter<'b> {
  type Item = FormatResult<RawChunk<'b>>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.failed || self.cursor.is_empty() {
      return None;
    }
    let out = self.next_record();
    if out.is_err() {
      self.failed = true;
    }
    Some(out)
  }
}

/// Frames a payload as a full record, CRC included.
#[inline]
pub fn write_record(out: &mut StreamWriter, ty: ChunkTypeId, payload: &[u8]) -> FormatResult<()> {
  let actual = payload.len();
  let length = u32::try_from(actual)
    .map_err(|_| FormatError::InvalidLength { ty, expected: u32::MAX as usize, actual })?;
  out.write_u32_be(length);
  out.write_bytes(ty.as_bytes());
  out.write_bytes(payload);
  out.write_u32_be(chunk_crc(ty, payload));
  Ok(())
}
