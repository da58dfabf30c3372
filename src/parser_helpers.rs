#![forbid(unsafe_code)]

//! Sequential big-endian reading and writing over byte buffers.

use alloc::vec::Vec;
use bytemuck::{bytes_of, pod_read_unaligned, Pod};
use core::mem::size_of;

use crate::{FormatError, FormatResult};

/// Reads values front to back out of a borrowed byte slice.
///
/// Every read either consumes exactly the bytes it needs or fails with
/// [`FormatError::UnexpectedEnd`] and leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct StreamCursor<'b> {
  bytes: &'b [u8],
  position: usize,
}
impl<'b> StreamCursor<'b> {
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'b [u8]) -> Self {
    Self { bytes, position: 0 }
  }

  /// Bytes consumed so far.
  #[inline]
  #[must_use]
  pub const fn position(&self) -> usize {
    self.position
  }

  /// Bytes not yet consumed.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> usize {
    self.bytes.len() - self.position
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.remaining() == 0
  }

  /// Takes the next `n` bytes as a sub-slice.
  #[inline]
  pub fn read_bytes(&mut self, n: usize) -> FormatResult<&'b [u8]> {
    let remaining = self.remaining();
    if n > remaining {
      return Err(FormatError::UnexpectedEnd { needed: n, remaining });
    }
    let out = &self.bytes[self.position..self.position + n];
    self.position += n;
    Ok(out)
  }

  /// Moves past `n` bytes without looking at them.
  #[inline]
  pub fn skip(&mut self, n: usize) -> FormatResult<()> {
    self.read_bytes(n).map(|_| ())
  }

  /// Takes all the bytes that are left.
  #[inline]
  pub fn read_rest(&mut self) -> &'b [u8] {
    let out = &self.bytes[self.position..];
    self.position = self.bytes.len();
    out
  }

  #[inline]
  pub fn read_array<const N: usize>(&mut self) -> FormatResult<[u8; N]> {
    let mut a = [0_u8; N];
    a.copy_from_slice(self.read_bytes(N)?);
    Ok(a)
  }

  /// Reads a plain-old-data value from unaligned bytes.
  #[inline]
  pub fn read_pod<T: Pod>(&mut self) -> FormatResult<T> {
    self.read_bytes(size_of::<T>()).map(pod_read_unaligned)
  }

  #[inline]
  pub fn read_u8(&mut self) -> FormatResult<u8> {
    self.read_array::<1>().map(|[u]| u)
  }

  #[inline]
  pub fn read_u16_be(&mut self) -> FormatResult<u16> {
    self.read_array().map(u16::from_be_bytes)
  }

  #[inline]
  pub fn read_u32_be(&mut self) -> FormatResult<u32> {
    self.read_array().map(u32::from_be_bytes)
  }
}

/// Appends big-endian values to a growable buffer.
#[derive(Debug, Clone, Default)]
pub struct StreamWriter {
  bytes: Vec<u8>,
}
impl StreamWriter {
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { bytes: Vec::new() }
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  #[inline]
  #[must_use]
  pub fn into_bytes(self) -> Vec<u8> {
    self.bytes
  }

  #[inline]
  pub fn write_bytes(&mut self, bytes: &[u8]) {
    self.bytes.extend_from_slice(bytes);
  }

  #[inline]
  pub fn write_pod<T: Pod>(&mut self, value: &T) {
    self.write_bytes(bytes_of(value));
  }

  #[inline]
  pub fn write_u8(&mut self, u: u8) {
    self.bytes.push(u);
  }

  #[inline]
  pub fn write_u16_be(&mut self, u: u16) {
    self.write_bytes(&u.to_be_bytes());
  }

  #[inline]
  pub fn write_u32_be(&mut self, u: u32) {
    self.write_bytes(&u.to_be_bytes());
  }
}
