//! The built-in chunk handlers.
//!
//! Each file holds one chunk type's value struct, its encode option
//! sub-section, and the unit struct that implements [`ChunkHandler`] for it.

use alloc::{vec, vec::Vec};
use bytemuck::{cast_slice, Pod, Zeroable};
use core::fmt::Debug;

use crate::{
  handler::mismatched,
  validate::{
    check_domain, check_exact_length, check_final_count, check_min_length, check_occurrence,
  },
  ChunkData, ChunkHandler, ChunkInstance, ChunkTypeId, DecodeOptions, EncodeOptions, FormatError,
  FormatResult, OpaqueChunk, StreamCursor, StreamWriter, U16BE, U32BE,
};

mod ihdr;
pub use ihdr::*;

mod gama;
pub use gama::*;

mod phys;
pub use phys::*;

mod plte;
pub use plte::*;

mod idat;
pub use idat::*;

mod time;
pub use time::*;

mod text;
pub use text::*;

mod iend;
pub use iend::*;

mod raw;
pub use raw::*;

/// Picks the instance a single-valued field is built from.
///
/// Nothing parsed gives `None`. Otherwise strict mode enforces the limit and
/// the first instance wins.
fn first_instance<'i>(
  handler: &dyn ChunkHandler, instances: &'i [ChunkInstance], options: &DecodeOptions,
) -> FormatResult<Option<&'i ChunkInstance>> {
  match instances.first() {
    None => Ok(None),
    Some(first) => {
      check_final_count(
        handler.chunk_type(),
        instances.len(),
        handler.max_occurrences(),
        options.strict,
      )?;
      Ok(Some(first))
    }
  }
}

#[cfg(test)]
pub(crate) mod test_util {
  use super::*;

  /// Composes one instance and parses it back.
  pub fn round_trip(
    handler: &dyn ChunkHandler, instance: &ChunkInstance, strict: bool,
  ) -> FormatResult<ChunkInstance> {
    let mut out = StreamWriter::new();
    handler.compose(&mut out, &EncodeOptions::default(), instance)?;
    parse_bytes(handler, out.as_bytes(), &[], strict)
  }

  pub fn parse_bytes(
    handler: &dyn ChunkHandler, bytes: &[u8], previous: &[ChunkInstance], strict: bool,
  ) -> FormatResult<ChunkInstance> {
    let options = DecodeOptions::default().strict(strict);
    handler.parse(&mut StreamCursor::new(bytes), bytes.len(), previous, &options)
  }
}
