use super::*;

/// Handler for `IEND` chunks.
///
/// Marks the end of the record stream. It has no data of its own and every
/// encode writes exactly one, last.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageEndHandler;
impl ChunkHandler for ImageEndHandler {
  #[inline]
  fn chunk_type(&self) -> ChunkTypeId {
    ChunkTypeId::IEND
  }

  #[inline]
  fn sequence(&self) -> u32 {
    1000
  }

  #[inline]
  fn is_terminal(&self) -> bool {
    true
  }

  fn parse(
    &self, _payload: &mut StreamCursor<'_>, length: usize, previous: &[ChunkInstance],
    options: &DecodeOptions,
  ) -> FormatResult<ChunkInstance> {
    let ty = self.chunk_type();
    check_occurrence(ty, previous.len(), self.max_occurrences(), options.strict)?;
    check_exact_length(ty, length, 0, options.strict)?;
    Ok(ChunkInstance::End)
  }

  fn decode_data(
    &self, _data: &mut ChunkData, instances: &[ChunkInstance], options: &DecodeOptions,
  ) -> FormatResult<()> {
    first_instance(self, instances, options).map(|_| ())
  }

  fn encode_data(
    &self, _data: &ChunkData, _options: &EncodeOptions,
  ) -> FormatResult<Vec<ChunkInstance>> {
    Ok(vec![ChunkInstance::End])
  }

  fn compose(
    &self, _out: &mut StreamWriter, _options: &EncodeOptions, instance: &ChunkInstance,
  ) -> FormatResult<()> {
    match instance {
      ChunkInstance::End => Ok(()),
      _ => Err(mismatched(self.chunk_type())),
    }
  }
}
