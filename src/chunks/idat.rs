use super::*;

/// `IDAT`: Image data
///
/// * Image data is stored with Zlib compression applied. This crate keeps it
///   as-is.
/// * Images can have more than one IDAT chunk. They should all be stored in a
///   row. Multiple chunks are treated as a single Zlib datastream.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ImageData(pub Vec<u8>);
impl Debug for ImageData {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("ImageData").field(&&self.0[..self.0.len().min(12)]).field(&self.0.len()).finish()
  }
}
impl ImageData {
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.0
  }
}

/// Handler for `IDAT` chunks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDataHandler;
impl ChunkHandler for ImageDataHandler {
  #[inline]
  fn chunk_type(&self) -> ChunkTypeId {
    ChunkTypeId::IDAT
  }

  #[inline]
  fn sequence(&self) -> u32 {
    400
  }

  #[inline]
  fn max_occurrences(&self) -> Option<usize> {
    None
  }

  fn parse(
    &self, payload: &mut StreamCursor<'_>, length: usize, _previous: &[ChunkInstance],
    _options: &DecodeOptions,
  ) -> FormatResult<ChunkInstance> {
    Ok(ChunkInstance::ImageData(ImageData(payload.read_bytes(length)?.to_vec())))
  }

  fn decode_data(
    &self, data: &mut ChunkData, instances: &[ChunkInstance], _options: &DecodeOptions,
  ) -> FormatResult<()> {
    if instances.is_empty() {
      return Ok(());
    }
    let parts = instances
      .iter()
      .map(|inst| match inst {
        ChunkInstance::ImageData(d) => Ok(d.clone()),
        _ => Err(mismatched(self.chunk_type())),
      })
      .collect::<FormatResult<Vec<_>>>()?;
    data.image_data = Some(parts);
    Ok(())
  }

  fn encode_data(
    &self, _data: &ChunkData, options: &EncodeOptions,
  ) -> FormatResult<Vec<ChunkInstance>> {
    Ok(match &options.image_data {
      None => Vec::new(),
      Some(parts) => parts.iter().cloned().map(ChunkInstance::ImageData).collect(),
    })
  }

  fn compose(
    &self, out: &mut StreamWriter, _options: &EncodeOptions, instance: &ChunkInstance,
  ) -> FormatResult<()> {
    let ChunkInstance::ImageData(d) = instance else {
      return Err(mismatched(self.chunk_type()));
    };
    out.write_bytes(&d.0);
    Ok(())
  }
}
