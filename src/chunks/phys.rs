use super::*;

/// Unit of a [`PhysicalDimensions`] value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PhysicalUnit {
  /// The two values only describe the pixel aspect ratio.
  #[default]
  Unspecified = 0,
  /// The two values are pixels per meter.
  Meter = 1,
}
impl TryFrom<u8> for PhysicalUnit {
  type Error = FormatError;
  /// The one place a unit byte is validated, whatever its source.
  #[inline]
  fn try_from(u: u8) -> FormatResult<Self> {
    match u {
      0 => Ok(Self::Unspecified),
      1 => Ok(Self::Meter),
      _ => Err(FormatError::InvalidFieldValue {
        ty: ChunkTypeId::pHYs,
        field: "unit",
        value: u64::from(u),
      }),
    }
  }
}

/// `pHYs`: Physical pixel dimensions
///
/// Specifies the intended pixel size or aspect ratio for display of the image.
///
/// When `unit` is [`PhysicalUnit::Meter`] then `ppu_x` and `ppu_y` are in
/// pixels per meter. Otherwise they have no unit and define an aspect ratio
/// only.
///
/// A default value is `1` pixel per unit on both axes with an unspecified
/// unit, meaning square pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicalDimensions {
  pub ppu_x: u32,
  pub ppu_y: u32,
  pub unit: PhysicalUnit,
}
impl Default for PhysicalDimensions {
  #[inline]
  fn default() -> Self {
    Self { ppu_x: 1, ppu_y: 1, unit: PhysicalUnit::Unspecified }
  }
}
impl PhysicalDimensions {
  /// Builds a value from a raw unit byte.
  #[inline]
  pub fn new(ppu_x: u32, ppu_y: u32, unit: u8) -> FormatResult<Self> {
    Ok(Self { ppu_x, ppu_y, unit: PhysicalUnit::try_from(unit)? })
  }

  /// Sets the unit from a raw unit byte.
  ///
  /// ## Failure
  /// Anything other than `0` or `1` is rejected and the value is unchanged.
  #[inline]
  pub fn set_unit(&mut self, unit: u8) -> FormatResult<()> {
    self.unit = PhysicalUnit::try_from(unit)?;
    Ok(())
  }

  #[inline]
  #[must_use]
  pub const fn is_unit_unknown(&self) -> bool {
    matches!(self.unit, PhysicalUnit::Unspecified)
  }

  #[inline]
  #[must_use]
  pub const fn is_unit_in_meters(&self) -> bool {
    matches!(self.unit, PhysicalUnit::Meter)
  }
}

/// Encoder sub-section for `pHYs`.
///
/// Any field left as `None` takes the [`PhysicalDimensions`] default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PhysicalSizeOptions {
  pub ppu_x: Option<u32>,
  pub ppu_y: Option<u32>,
  /// Raw unit byte, `0` (unspecified) or `1` (meter).
  pub unit: Option<u8>,
}
impl PhysicalSizeOptions {
  /// Fills in defaults and validates.
  pub fn to_dimensions(&self) -> FormatResult<PhysicalDimensions> {
    let mut out = PhysicalDimensions::default();
    if let Some(ppu_x) = self.ppu_x {
      out.ppu_x = ppu_x;
    }
    if let Some(ppu_y) = self.ppu_y {
      out.ppu_y = ppu_y;
    }
    if let Some(unit) = self.unit {
      out.set_unit(unit)?;
    }
    Ok(out)
  }
}
impl From<PhysicalDimensions> for PhysicalSizeOptions {
  #[inline]
  fn from(p: PhysicalDimensions) -> Self {
    Self { ppu_x: Some(p.ppu_x), ppu_y: Some(p.ppu_y), unit: Some(p.unit as u8) }
  }
}

/// Wire layout of the payload.
#[derive(Debug, Clone, Copy, Zeroable, Pod)]
#[repr(C)]
struct PhysPayload {
  ppu_x: U32BE,
  ppu_y: U32BE,
  unit: u8,
}
const PHYS_PAYLOAD_LEN: usize = core::mem::size_of::<PhysPayload>();

/// Handler for `pHYs` chunks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicalSizeHandler;
impl ChunkHandler for PhysicalSizeHandler {
  #[inline]
  fn chunk_type(&self) -> ChunkTypeId {
    ChunkTypeId::pHYs
  }

  #[inline]
  fn sequence(&self) -> u32 {
    140
  }

  fn parse(
    &self, payload: &mut StreamCursor<'_>, length: usize, previous: &[ChunkInstance],
    options: &DecodeOptions,
  ) -> FormatResult<ChunkInstance> {
    let ty = self.chunk_type();
    check_occurrence(ty, previous.len(), self.max_occurrences(), options.strict)?;
    check_exact_length(ty, length, PHYS_PAYLOAD_LEN, options.strict)?;
    let raw: PhysPayload = payload.read_pod()?;
    PhysicalDimensions::new(raw.ppu_x.to_u32(), raw.ppu_y.to_u32(), raw.unit)
      .map(ChunkInstance::PhysicalSize)
  }

  fn decode_data(
    &self, data: &mut ChunkData, instances: &[ChunkInstance], options: &DecodeOptions,
  ) -> FormatResult<()> {
    match first_instance(self, instances, options)? {
      None => Ok(()),
      Some(ChunkInstance::PhysicalSize(p)) => {
        data.physical_size = Some(*p);
        Ok(())
      }
      Some(_) => Err(mismatched(self.chunk_type())),
    }
  }

  fn encode_data(
    &self, _data: &ChunkData, options: &EncodeOptions,
  ) -> FormatResult<Vec<ChunkInstance>> {
    match &options.physical_size {
      None => Ok(Vec::new()),
      Some(o) => Ok(vec![ChunkInstance::PhysicalSize(o.to_dimensions()?)]),
    }
  }

  fn compose(
    &self, out: &mut StreamWriter, _options: &EncodeOptions, instance: &ChunkInstance,
  ) -> FormatResult<()> {
    let ChunkInstance::PhysicalSize(p) = instance else {
      return Err(mismatched(self.chunk_type()));
    };
    out.write_pod(&PhysPayload {
      ppu_x: U32BE::from_u32(p.ppu_x),
      ppu_y: U32BE::from_u32(p.ppu_y),
      unit: p.unit as u8,
    });
    Ok(())
  }
}
