use super::*;

/// `gAMA`: Image gamma
///
/// Values are stored as an integer 100,000 the floating point value.
///
/// **Example:** A gamma of 1/2.2 would be stored as the integer 45,455.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gamma(pub u32);
impl Default for Gamma {
  #[inline]
  fn default() -> Self {
    Self(45_455)
  }
}
impl Gamma {
  /// Zero isn't a usable gamma.
  #[inline]
  pub fn new(gamma: u32) -> FormatResult<Self> {
    check_domain(ChunkTypeId::gAMA, "gamma", gamma, gamma != 0)?;
    Ok(Self(gamma))
  }
}

/// Encoder sub-section for `gAMA`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GammaOptions {
  /// Defaults to 45,455 (1/2.2).
  pub gamma: Option<u32>,
}
impl From<Gamma> for GammaOptions {
  #[inline]
  fn from(g: Gamma) -> Self {
    Self { gamma: Some(g.0) }
  }
}

/// Handler for `gAMA` chunks.
#[derive(Debug, Clone, Copy, Default)]
pub struct GammaHandler;
impl ChunkHandler for GammaHandler {
  #[inline]
  fn chunk_type(&self) -> ChunkTypeId {
    ChunkTypeId::gAMA
  }

  #[inline]
  fn sequence(&self) -> u32 {
    100
  }

  fn parse(
    &self, payload: &mut StreamCursor<'_>, length: usize, previous: &[ChunkInstance],
    options: &DecodeOptions,
  ) -> FormatResult<ChunkInstance> {
    let ty = self.chunk_type();
    check_occurrence(ty, previous.len(), self.max_occurrences(), options.strict)?;
    check_exact_length(ty, length, 4, options.strict)?;
    Gamma::new(payload.read_u32_be()?).map(ChunkInstance::Gamma)
  }

  fn decode_data(
    &self, data: &mut ChunkData, instances: &[ChunkInstance], options: &DecodeOptions,
  ) -> FormatResult<()> {
    match first_instance(self, instances, options)? {
      None => Ok(()),
      Some(ChunkInstance::Gamma(g)) => {
        data.gamma = Some(*g);
        Ok(())
      }
      Some(_) => Err(mismatched(self.chunk_type())),
    }
  }

  fn encode_data(
    &self, _data: &ChunkData, options: &EncodeOptions,
  ) -> FormatResult<Vec<ChunkInstance>> {
    match &options.gamma {
      None => Ok(Vec::new()),
      Some(GammaOptions { gamma }) => {
        let g = Gamma::new(gamma.unwrap_or(Gamma::default().0))?;
        Ok(vec![ChunkInstance::Gamma(g)])
      }
    }
  }

  fn compose(
    &self, out: &mut StreamWriter, _options: &EncodeOptions, instance: &ChunkInstance,
  ) -> FormatResult<()> {
    let ChunkInstance::Gamma(g) = instance else {
      return Err(mismatched(self.chunk_type()));
    };
    out.write_u32_be(g.0);
    Ok(())
  }
}
