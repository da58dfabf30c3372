//! [`EncodeOptions`] in, records out.

use alloc::vec::Vec;
use log::{debug, trace, warn};

use crate::{
  write_record, ChunkData, ChunkHandler, ChunkInstance, ChunkRegistry, ChunkTypeId, EncodeOptions,
  FormatResult, OpaqueChunk, StreamWriter, OPAQUE_SEQUENCE, PNG_SIGNATURE,
};

/// One chunk waiting to be written.
struct Pending<'r> {
  sequence: u32,
  ty: ChunkTypeId,
  source: Source<'r>,
}

enum Source<'r> {
  Handler(&'r dyn ChunkHandler, ChunkInstance),
  /// Written back byte for byte.
  Passthrough(&'r OpaqueChunk),
}

/// Encodes a bare sequence of records (no file signature).
///
/// Every registered handler contributes its instances, passthrough chunks from
/// `data` are added if [`EncodeOptions::preserve_unknown`] is set (skipping any
/// type a handler already owns), and the lot
/// is written in sequence order. Instances of the same type keep the order
/// their handler gave them.
///
/// ## Failure
/// The first error is returned and no output is produced at all.
pub fn encode_chunks(
  registry: &ChunkRegistry, data: &ChunkData, options: &EncodeOptions,
) -> FormatResult<Vec<u8>> {
  let mut pending: Vec<Pending<'_>> = Vec::new();
  for handler in registry.iter() {
    let instances = handler.encode_data(data, options)?;
    trace!("{} contributes {} chunk(s)", handler.chunk_type(), instances.len());
    pending.extend(instances.into_iter().map(|instance| Pending {
      sequence: handler.sequence(),
      ty: handler.chunk_type(),
      source: Source::Handler(handler, instance),
    }));
  }
  if options.preserve_unknown {
    for opaque in &data.unknown {
      if registry.lookup(opaque.ty).is_some() {
        warn!("not passing through {}: a handler is registered for it", opaque.ty);
        continue;
      }
      pending.push(Pending {
        sequence: OPAQUE_SEQUENCE,
        ty: opaque.ty,
        source: Source::Passthrough(opaque),
      });
    }
  }
  // stable, so same-type instances keep their relative order.
  pending.sort_by_key(|p| p.sequence);

  let mut out = StreamWriter::new();
  for p in &pending {
    match &p.source {
      Source::Handler(handler, instance) => {
        let mut payload = StreamWriter::new();
        handler.compose(&mut payload, options, instance)?;
        write_record(&mut out, p.ty, payload.as_bytes())?;
      }
      Source::Passthrough(opaque) => write_record(&mut out, p.ty, &opaque.data)?,
    }
  }
  debug!("encoded {} chunk(s), {} byte(s)", pending.len(), out.len());
  Ok(out.into_bytes())
}

/// Encodes a full PNG datastream with the [standard](ChunkRegistry::standard)
/// handlers, signature included.
pub fn encode_png(data: &ChunkData, options: &EncodeOptions) -> FormatResult<Vec<u8>> {
  let chunks = encode_chunks(&ChunkRegistry::standard(), data, options)?;
  let mut out = Vec::with_capacity(PNG_SIGNATURE.len() + chunks.len());
  out.extend_from_slice(&PNG_SIGNATURE);
  out.extend_from_slice(&chunks);
  Ok(out)
}
