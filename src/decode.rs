//! Records in, [`ChunkData`] out.

use alloc::{collections::BTreeMap, vec::Vec};
use log::{debug, trace, warn};

use crate::{
  strip_png_signature, ChunkData, ChunkInstance, ChunkRegistry, ChunkTypeId, DecodeOptions,
  FormatError, FormatResult, OpaqueChunk, RawChunk, RawChunkIter, StreamCursor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
  Start,
  ReadingRecords,
  Aggregating,
  Done,
}

/// Working set of one decode call.
struct DecodeRun<'r> {
  registry: &'r ChunkRegistry,
  options: DecodeOptions,
  state: DecodeState,
  /// Parsed instances per type, each list in stream order.
  instances: BTreeMap<ChunkTypeId, Vec<ChunkInstance>>,
  unknown: Vec<OpaqueChunk>,
}
impl<'r> DecodeRun<'r> {
  fn new(registry: &'r ChunkRegistry, options: DecodeOptions) -> Self {
    Self {
      registry,
      options,
      state: DecodeState::Start,
      instances: BTreeMap::new(),
      unknown: Vec::new(),
    }
  }

  fn enter(&mut self, next: DecodeState) {
    debug!("decode: {:?} -> {:?}", self.state, next);
    self.state = next;
  }

  fn read_records(&mut self, bytes: &[u8]) -> FormatResult<()> {
    self.enter(DecodeState::ReadingRecords);
    let mut records = RawChunkIter::new(bytes);
    while let Some(raw) = records.next() {
      let raw = raw?;
      if self.read_record(raw)? {
        if records.remaining() > 0 {
          warn!("ignoring {} byte(s) after the {} chunk", records.remaining(), raw.ty);
        }
        break;
      }
    }
    Ok(())
  }

  /// Returns `true` when the record was the terminal chunk.
  fn read_record(&mut self, raw: RawChunk<'_>) -> FormatResult<bool> {
    trace!("record: {raw:?}");
    if self.options.verify_checksums {
      let actual = raw.actual_crc();
      if actual != raw.declared_crc {
        if self.options.strict {
          return Err(FormatError::ChecksumMismatch {
            ty: raw.ty,
            declared: raw.declared_crc,
            actual,
          });
        }
        warn!(
          "checksum mismatch in {}: declared {:#010X}, actual {actual:#010X}",
          raw.ty, raw.declared_crc
        );
      }
    }

    let Some(handler) = self.registry.lookup(raw.ty) else {
      if self.options.strict && raw.ty.is_critical() {
        return Err(FormatError::UnknownCriticalChunk { ty: raw.ty });
      }
      debug!("no handler for {}, keeping {} byte(s) as-is", raw.ty, raw.data.len());
      self.unknown.push(OpaqueChunk { ty: raw.ty, data: raw.data.to_vec() });
      return Ok(false);
    };

    let list = self.instances.entry(raw.ty).or_default();
    let mut payload = StreamCursor::new(raw.data);
    let instance = handler.parse(&mut payload, raw.data.len(), list, &self.options)?;
    if !payload.is_empty() {
      warn!("ignoring {} trailing byte(s) in {}", payload.remaining(), raw.ty);
    }
    list.push(instance);
    Ok(handler.is_terminal())
  }

  fn aggregate(mut self) -> FormatResult<ChunkData> {
    self.enter(DecodeState::Aggregating);
    let mut data = ChunkData::default();
    for handler in self.registry.iter() {
      let instances =
        self.instances.get(&handler.chunk_type()).map(Vec::as_slice).unwrap_or(&[]);
      handler.decode_data(&mut data, instances, &self.options)?;
    }
    data.unknown = core::mem::take(&mut self.unknown);
    self.enter(DecodeState::Done);
    Ok(data)
  }
}

/// Decodes a bare sequence of records (no file signature).
///
/// Reading stops after the registry's terminal chunk or at the end of the
/// input, whichever comes first. Then every registered handler folds its
/// instances into the output, in sequence order.
///
/// ## Failure
/// The first error from any record or handler is returned and nothing else.
pub fn decode_chunks(
  registry: &ChunkRegistry, bytes: &[u8], options: &DecodeOptions,
) -> FormatResult<ChunkData> {
  let mut run = DecodeRun::new(registry, *options);
  run.read_records(bytes)?;
  run.aggregate()
}

/// Decodes a full PNG datastream with the [standard](ChunkRegistry::standard)
/// handlers.
pub fn decode_png(bytes: &[u8], options: &DecodeOptions) -> FormatResult<ChunkData> {
  decode_chunks(&ChunkRegistry::standard(), strip_png_signature(bytes)?, options)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{write_record, PhysicalDimensions, StreamWriter};

  fn records(list: &[(ChunkTypeId, &[u8])]) -> Vec<u8> {
    let mut w = StreamWriter::new();
    for (ty, payload) in list {
      write_record(&mut w, *ty, payload).unwrap();
    }
    w.into_bytes()
  }

  const PHYS: &[u8] = &[0, 0, 0x0B, 0x13, 0, 0, 0x0B, 0x13, 1];
  const PHYS_2: &[u8] = &[0, 0, 0, 2, 0, 0, 0, 3, 0];
  const GAMA: &[u8] = &[0, 0, 0xB1, 0x8F];
  const EMPTY: &[u8] = &[];

  #[test]
  fn test_duplicate_chunks() {
    let bytes = records(&[(ChunkTypeId::pHYs, PHYS), (ChunkTypeId::pHYs, PHYS_2)]);
    let reg = ChunkRegistry::standard();
    assert_eq!(
      decode_chunks(&reg, &bytes, &DecodeOptions::default().strict(true)),
      Err(FormatError::DuplicateChunk { ty: ChunkTypeId::pHYs, limit: 1 })
    );
    let data = decode_chunks(&reg, &bytes, &DecodeOptions::default()).unwrap();
    assert_eq!(data.physical_size, Some(PhysicalDimensions::new(2835, 2835, 1).unwrap()));
  }

  #[test]
  fn test_stops_at_terminal() {
    let mut bytes = records(&[(ChunkTypeId::IEND, EMPTY), (ChunkTypeId::pHYs, PHYS)]);
    bytes.extend_from_slice(b"junk");
    let reg = ChunkRegistry::standard();
    let data = decode_chunks(&reg, &bytes, &DecodeOptions::default()).unwrap();
    assert_eq!(data, ChunkData::default());
  }

  #[test]
  fn test_unknown_chunks() {
    let bytes =
      records(&[(ChunkTypeId(*b"abCd"), &[1, 2, 3][..]), (ChunkTypeId(*b"ABCD"), &[4][..])]);
    let reg = ChunkRegistry::standard();
    let data = decode_chunks(&reg, &bytes, &DecodeOptions::default()).unwrap();
    assert_eq!(
      data.unknown,
      [
        OpaqueChunk { ty: ChunkTypeId(*b"abCd"), data: alloc::vec![1, 2, 3] },
        OpaqueChunk { ty: ChunkTypeId(*b"ABCD"), data: alloc::vec![4] },
      ]
    );
    assert_eq!(
      decode_chunks(&reg, &bytes, &DecodeOptions::default().strict(true)),
      Err(FormatError::UnknownCriticalChunk { ty: ChunkTypeId(*b"ABCD") })
    );
    // ancillary unknowns are fine even when strict
    let bytes = records(&[(ChunkTypeId(*b"abCd"), &[1, 2, 3][..])]);
    assert!(decode_chunks(&reg, &bytes, &DecodeOptions::default().strict(true)).is_ok());
  }

  #[test]
  fn test_checksums() {
    let mut bytes = records(&[(ChunkTypeId::pHYs, PHYS)]);
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    let reg = ChunkRegistry::standard();
    assert!(matches!(
      decode_chunks(&reg, &bytes, &DecodeOptions::default().strict(true)),
      Err(FormatError::ChecksumMismatch { ty: ChunkTypeId::pHYs, .. })
    ));
    assert!(decode_chunks(&reg, &bytes, &DecodeOptions::default()).is_ok());
    let opts = DecodeOptions::default().strict(true).verify_checksums(false);
    assert!(decode_chunks(&reg, &bytes, &opts).is_ok());
  }

  #[test]
  fn test_lenient_trailing_bytes_keep_boundaries() {
    let long = [PHYS, &[0xAA, 0xBB][..]].concat();
    let bytes = records(&[(ChunkTypeId::pHYs, &long[..]), (ChunkTypeId::gAMA, GAMA)]);
    let reg = ChunkRegistry::standard();
    let data = decode_chunks(&reg, &bytes, &DecodeOptions::default()).unwrap();
    assert_eq!(data.physical_size, Some(PhysicalDimensions::new(2835, 2835, 1).unwrap()));
    assert_eq!(data.gamma.map(|g| g.0), Some(45_455));
  }

  #[test]
  fn test_error_aborts_whole_decode() {
    let bytes = records(&[(ChunkTypeId::gAMA, GAMA), (ChunkTypeId::pHYs, &PHYS[..8])]);
    assert!(matches!(
      decode_chunks(&ChunkRegistry::standard(), &bytes, &DecodeOptions::default()),
      Err(FormatError::InvalidLength { ty: ChunkTypeId::pHYs, .. })
    ));
  }
}
