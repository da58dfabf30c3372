//! Checks shared by every handler.
//!
//! Length and occurrence checks bend with the `strict` flag of
//! [`DecodeOptions`](crate::DecodeOptions). Value domain checks never do.

use crate::{ChunkTypeId, FormatError, FormatResult};

/// Fixed-size payloads.
///
/// Strict mode wants exactly `expected` bytes. Lenient mode accepts anything
/// at least that long, and the extra bytes get skipped.
#[inline]
pub fn check_exact_length(
  ty: ChunkTypeId, length: usize, expected: usize, strict: bool,
) -> FormatResult<()> {
  if (strict && length != expected) || length < expected {
    Err(FormatError::InvalidLength { ty, expected, actual: length })
  } else {
    Ok(())
  }
}

/// Variable-size payloads: only a floor, in either mode.
#[inline]
pub fn check_min_length(ty: ChunkTypeId, length: usize, minimum: usize) -> FormatResult<()> {
  if length < minimum {
    Err(FormatError::InvalidLength { ty, expected: minimum, actual: length })
  } else {
    Ok(())
  }
}

/// Run while parsing, before adding one more instance to `already_seen`.
#[inline]
pub fn check_occurrence(
  ty: ChunkTypeId, already_seen: usize, limit: Option<usize>, strict: bool,
) -> FormatResult<()> {
  match limit {
    Some(limit) if strict && already_seen >= limit => {
      Err(FormatError::DuplicateChunk { ty, limit })
    }
    _ => Ok(()),
  }
}

/// Run while aggregating, over the final instance count.
#[inline]
pub fn check_final_count(
  ty: ChunkTypeId, count: usize, limit: Option<usize>, strict: bool,
) -> FormatResult<()> {
  match limit {
    Some(limit) if strict && count > limit => {
      Err(FormatError::MultipleNotAllowed { ty, limit, count })
    }
    _ => Ok(()),
  }
}

/// Rejects `value` unless `is_valid` holds.
#[inline]
pub fn check_domain(
  ty: ChunkTypeId, field: &'static str, value: impl Into<u64>, is_valid: bool,
) -> FormatResult<()> {
  if is_valid {
    Ok(())
  } else {
    Err(FormatError::InvalidFieldValue { ty, field, value: value.into() })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const TY: ChunkTypeId = ChunkTypeId::pHYs;

  #[test]
  fn test_exact_length_strict_and_lenient() {
    assert!(check_exact_length(TY, 9, 9, true).is_ok());
    assert!(check_exact_length(TY, 10, 9, false).is_ok());
    assert_eq!(
      check_exact_length(TY, 10, 9, true),
      Err(FormatError::InvalidLength { ty: TY, expected: 9, actual: 10 })
    );
    assert!(check_exact_length(TY, 8, 9, false).is_err());
    assert!(check_exact_length(TY, 8, 9, true).is_err());
  }

  #[test]
  fn test_occurrence_limits() {
    assert!(check_occurrence(TY, 0, Some(1), true).is_ok());
    assert_eq!(
      check_occurrence(TY, 1, Some(1), true),
      Err(FormatError::DuplicateChunk { ty: TY, limit: 1 })
    );
    assert!(check_occurrence(TY, 1, Some(1), false).is_ok());
    assert!(check_occurrence(TY, 50, None, true).is_ok());

    assert!(check_final_count(TY, 1, Some(1), true).is_ok());
    assert_eq!(
      check_final_count(TY, 2, Some(1), true),
      Err(FormatError::MultipleNotAllowed { ty: TY, limit: 1, count: 2 })
    );
    assert!(check_final_count(TY, 2, Some(1), false).is_ok());
  }

  #[test]
  fn test_domain() {
    assert!(check_domain(TY, "unit", 1_u8, true).is_ok());
    assert_eq!(
      check_domain(TY, "unit", 7_u8, false),
      Err(FormatError::InvalidFieldValue { ty: TY, field: "unit", value: 7 })
    );
  }
}
