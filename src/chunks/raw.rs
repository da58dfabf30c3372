use super::*;

/// A handler that keeps a chunk type's payloads as bytes.
///
/// Decoded payloads land in [`ChunkData::custom`] under the handler's type,
/// in stream order, and encoding writes whatever
/// [`EncodeOptions::custom`] holds for that type. This is the easy way to
/// teach a registry about a chunk type this crate has no struct for, such as
/// a private critical chunk that strict decoding would otherwise reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawChunkHandler {
  pub ty: ChunkTypeId,
  pub sequence: u32,
  /// `None` for unlimited.
  pub max_occurrences: Option<usize>,
}
impl RawChunkHandler {
  #[inline]
  #[must_use]
  pub const fn new(ty: ChunkTypeId, sequence: u32, max_occurrences: Option<usize>) -> Self {
    Self { ty, sequence, max_occurrences }
  }
}
impl ChunkHandler for RawChunkHandler {
  #[inline]
  fn chunk_type(&self) -> ChunkTypeId {
    self.ty
  }

  #[inline]
  fn sequence(&self) -> u32 {
    self.sequence
  }

  #[inline]
  fn max_occurrences(&self) -> Option<usize> {
    self.max_occurrences
  }

  fn parse(
    &self, payload: &mut StreamCursor<'_>, length: usize, previous: &[ChunkInstance],
    options: &DecodeOptions,
  ) -> FormatResult<ChunkInstance> {
    check_occurrence(self.ty, previous.len(), self.max_occurrences, options.strict)?;
    let data = payload.read_bytes(length)?.to_vec();
    Ok(ChunkInstance::Custom(OpaqueChunk { ty: self.ty, data }))
  }

  fn decode_data(
    &self, data: &mut ChunkData, instances: &[ChunkInstance], options: &DecodeOptions,
  ) -> FormatResult<()> {
    if instances.is_empty() {
      return Ok(());
    }
    check_final_count(self.ty, instances.len(), self.max_occurrences, options.strict)?;
    let payloads = instances
      .iter()
      .map(|inst| match inst {
        ChunkInstance::Custom(c) if c.ty == self.ty => Ok(c.data.clone()),
        _ => Err(mismatched(self.ty)),
      })
      .collect::<FormatResult<Vec<_>>>()?;
    data.custom.insert(self.ty, payloads);
    Ok(())
  }

  fn encode_data(
    &self, _data: &ChunkData, options: &EncodeOptions,
  ) -> FormatResult<Vec<ChunkInstance>> {
    Ok(match options.custom.get(&self.ty) {
      None => Vec::new(),
      Some(payloads) => payloads
        .iter()
        .map(|data| ChunkInstance::Custom(OpaqueChunk { ty: self.ty, data: data.clone() }))
        .collect(),
    })
  }

  fn compose(
    &self, out: &mut StreamWriter, _options: &EncodeOptions, instance: &ChunkInstance,
  ) -> FormatResult<()> {
    match instance {
      ChunkInstance::Custom(c) if c.ty == self.ty => {
        out.write_bytes(&c.data);
        Ok(())
      }
      _ => Err(mismatched(self.ty)),
    }
  }
}
