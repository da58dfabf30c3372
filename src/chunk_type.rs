use core::fmt::Write;

/// The 4-byte type tag of a chunk.
///
/// The tag doubles as the registry key. Bit 5 of each byte carries a property
/// flag (lowercase letter means the bit is set).
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkTypeId(pub [u8; 4]);
#[allow(nonstandard_style)]
impl ChunkTypeId {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const gAMA: Self = Self(*b"gAMA");
  pub const pHYs: Self = Self(*b"pHYs");
  pub const tIME: Self = Self(*b"tIME");
  pub const tEXt: Self = Self(*b"tEXt");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");

  /// The raw tag bytes.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 4] {
    &self.0
  }

  /// Critical chunks must be understood by a decoder to use the data.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    (self.0[0] & 32) == 0
  }

  /// Public chunks are part of the format's registered set.
  #[inline]
  #[must_use]
  pub const fn is_public(self) -> bool {
    (self.0[1] & 32) == 0
  }

  /// Safe-to-copy chunks may be carried over by editors that don't
  /// understand them, even after critical chunks have changed.
  #[inline]
  #[must_use]
  pub const fn is_safe_to_copy(self) -> bool {
    (self.0[3] & 32) != 0
  }
}
impl core::fmt::Debug for ChunkTypeId {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('\"')?;
    core::fmt::Display::fmt(self, f)?;
    f.write_char('\"')
  }
}
impl core::fmt::Display for ChunkTypeId {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}
impl From<[u8; 4]> for ChunkTypeId {
  #[inline]
  fn from(array: [u8; 4]) -> Self {
    Self(array)
  }
}
