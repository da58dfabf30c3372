use super::*;

/// `PLTE`: Palette
///
/// Palette entries are always RGB, 1 to 256 of them.
///
/// If you want to have a paletted image with transparency then the transparency
/// info goes in a separate transparency chunk.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Palette(Vec<[u8; 3]>);
impl Palette {
  /// ## Failure
  /// * No entries, or more than 256.
  pub fn new(entries: &[[u8; 3]]) -> FormatResult<Self> {
    check_palette_length(entries.len() * 3)?;
    Ok(Self(entries.to_vec()))
  }

  /// Gets the entries as a slice.
  #[inline]
  #[must_use]
  pub fn entries(&self) -> &[[u8; 3]] {
    &self.0
  }
}
impl Debug for Palette {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // currently prints no more than 4 palette entries
    f.debug_tuple("Palette").field(&&self.0[..self.0.len().min(4)]).field(&self.0.len()).finish()
  }
}

/// A whole number of entries, at least one and at most 256.
fn check_palette_length(length: usize) -> FormatResult<()> {
  let expected = if length < 3 {
    3
  } else if length > 768 {
    768
  } else {
    length - (length % 3)
  };
  if expected == length {
    Ok(())
  } else {
    Err(FormatError::InvalidLength { ty: ChunkTypeId::PLTE, expected, actual: length })
  }
}

/// Handler for `PLTE` chunks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaletteHandler;
impl ChunkHandler for PaletteHandler {
  #[inline]
  fn chunk_type(&self) -> ChunkTypeId {
    ChunkTypeId::PLTE
  }

  #[inline]
  fn sequence(&self) -> u32 {
    300
  }

  fn parse(
    &self, payload: &mut StreamCursor<'_>, length: usize, previous: &[ChunkInstance],
    options: &DecodeOptions,
  ) -> FormatResult<ChunkInstance> {
    check_occurrence(self.chunk_type(), previous.len(), self.max_occurrences(), options.strict)?;
    check_palette_length(length)?;
    let entries: &[[u8; 3]] = cast_slice(payload.read_bytes(length)?);
    Ok(ChunkInstance::Palette(Palette(entries.to_vec())))
  }

  fn decode_data(
    &self, data: &mut ChunkData, instances: &[ChunkInstance], options: &DecodeOptions,
  ) -> FormatResult<()> {
    match first_instance(self, instances, options)? {
      None => Ok(()),
      Some(ChunkInstance::Palette(p)) => {
        data.palette = Some(p.clone());
        Ok(())
      }
      Some(_) => Err(mismatched(self.chunk_type())),
    }
  }

  fn encode_data(
    &self, _data: &ChunkData, options: &EncodeOptions,
  ) -> FormatResult<Vec<ChunkInstance>> {
    match &options.palette {
      None => Ok(Vec::new()),
      Some(p) => {
        check_palette_length(p.0.len() * 3)?;
        Ok(vec![ChunkInstance::Palette(p.clone())])
      }
    }
  }

  fn compose(
    &self, out: &mut StreamWriter, _options: &EncodeOptions, instance: &ChunkInstance,
  ) -> FormatResult<()> {
    let ChunkInstance::Palette(p) = instance else {
      return Err(mismatched(self.chunk_type()));
    };
    out.write_bytes(cast_slice(&p.0));
    Ok(())
  }
}
