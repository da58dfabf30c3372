use super::*;

/// `IHDR`: Image header
///
/// Gives the image's dimensions and how its pixel data is stored. This crate
/// doesn't decode pixels, so the values are only checked for being a
/// combination the format allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHeader {
  pub width: u32,
  pub height: u32,
  pub bit_depth: u8,
  pub color_type: u8,
  pub is_interlaced: bool,
}
impl Default for ImageHeader {
  /// A 1x1 non-interlaced RGBA8 image.
  #[inline]
  fn default() -> Self {
    Self { width: 1, height: 1, bit_depth: 8, color_type: 6, is_interlaced: false }
  }
}
impl ImageHeader {
  /// Checks every field against the allowed values.
  pub fn validate(&self) -> FormatResult<()> {
    let ty = ChunkTypeId::IHDR;
    check_domain(ty, "width", self.width, self.width != 0)?;
    check_domain(ty, "height", self.height, self.height != 0)?;
    check_domain(ty, "color_type", self.color_type, matches!(self.color_type, 0 | 2 | 3 | 4 | 6))?;
    let depth_ok = match self.color_type {
      0 => matches!(self.bit_depth, 1 | 2 | 4 | 8 | 16),
      3 => matches!(self.bit_depth, 1 | 2 | 4 | 8),
      _ => matches!(self.bit_depth, 8 | 16),
    };
    check_domain(ty, "bit_depth", self.bit_depth, depth_ok)
  }
}

/// Encoder sub-section for `IHDR`.
///
/// Any field left as `None` takes the [`ImageHeader`] default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HeaderOptions {
  pub width: Option<u32>,
  pub height: Option<u32>,
  pub bit_depth: Option<u8>,
  pub color_type: Option<u8>,
  pub is_interlaced: Option<bool>,
}
impl HeaderOptions {
  pub fn to_header(&self) -> FormatResult<ImageHeader> {
    let d = ImageHeader::default();
    let out = ImageHeader {
      width: self.width.unwrap_or(d.width),
      height: self.height.unwrap_or(d.height),
      bit_depth: self.bit_depth.unwrap_or(d.bit_depth),
      color_type: self.color_type.unwrap_or(d.color_type),
      is_interlaced: self.is_interlaced.unwrap_or(d.is_interlaced),
    };
    out.validate()?;
    Ok(out)
  }
}
impl From<ImageHeader> for HeaderOptions {
  #[inline]
  fn from(h: ImageHeader) -> Self {
    Self {
      width: Some(h.width),
      height: Some(h.height),
      bit_depth: Some(h.bit_depth),
      color_type: Some(h.color_type),
      is_interlaced: Some(h.is_interlaced),
    }
  }
}

#[derive(Debug, Clone, Copy, Zeroable, Pod)]
#[repr(C)]
struct IhdrPayload {
  width: U32BE,
  height: U32BE,
  bit_depth: u8,
  color_type: u8,
  compression_method: u8,
  filter_method: u8,
  interlace_method: u8,
}
const IHDR_PAYLOAD_LEN: usize = core::mem::size_of::<IhdrPayload>();

/// Handler for `IHDR` chunks.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderHandler;
impl ChunkHandler for HeaderHandler {
  #[inline]
  fn chunk_type(&self) -> ChunkTypeId {
    ChunkTypeId::IHDR
  }

  #[inline]
  fn sequence(&self) -> u32 {
    0
  }

  fn parse(
    &self, payload: &mut StreamCursor<'_>, length: usize, previous: &[ChunkInstance],
    options: &DecodeOptions,
  ) -> FormatResult<ChunkInstance> {
    let ty = self.chunk_type();
    check_occurrence(ty, previous.len(), self.max_occurrences(), options.strict)?;
    check_exact_length(ty, length, IHDR_PAYLOAD_LEN, options.strict)?;
    let raw: IhdrPayload = payload.read_pod()?;
    check_domain(ty, "compression_method", raw.compression_method, raw.compression_method == 0)?;
    check_domain(ty, "filter_method", raw.filter_method, raw.filter_method == 0)?;
    check_domain(ty, "interlace_method", raw.interlace_method, raw.interlace_method <= 1)?;
    let header = ImageHeader {
      width: raw.width.to_u32(),
      height: raw.height.to_u32(),
      bit_depth: raw.bit_depth,
      color_type: raw.color_type,
      is_interlaced: raw.interlace_method == 1,
    };
    header.validate()?;
    Ok(ChunkInstance::Header(header))
  }

  fn decode_data(
    &self, data: &mut ChunkData, instances: &[ChunkInstance], options: &DecodeOptions,
  ) -> FormatResult<()> {
    match first_instance(self, instances, options)? {
      None => Ok(()),
      Some(ChunkInstance::Header(h)) => {
        data.header = Some(*h);
        Ok(())
      }
      Some(_) => Err(mismatched(self.chunk_type())),
    }
  }

  fn encode_data(
    &self, _data: &ChunkData, options: &EncodeOptions,
  ) -> FormatResult<Vec<ChunkInstance>> {
    match &options.header {
      None => Ok(Vec::new()),
      Some(o) => Ok(vec![ChunkInstance::Header(o.to_header()?)]),
    }
  }

  fn compose(
    &self, out: &mut StreamWriter, _options: &EncodeOptions, instance: &ChunkInstance,
  ) -> FormatResult<()> {
    let ChunkInstance::Header(h) = instance else {
      return Err(mismatched(self.chunk_type()));
    };
    out.write_pod(&IhdrPayload {
      width: U32BE::from_u32(h.width),
      height: U32BE::from_u32(h.height),
      bit_depth: h.bit_depth,
      color_type: h.color_type,
      compression_method: 0,
      filter_method: 0,
      interlace_method: u8::from(h.is_interlaced),
    });
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::chunks::test_util::{parse_bytes, round_trip};

  const H: HeaderHandler = HeaderHandler;

  #[test]
  fn test_compose_then_parse() {
    let h =
      ImageHeader { width: 640, height: 480, bit_depth: 16, color_type: 2, is_interlaced: true };
    let inst = ChunkInstance::Header(h);
    assert_eq!(round_trip(&H, &inst, true), Ok(inst));
  }

  #[test]
  fn test_rejects_bad_fields() {
    //        width       height      depth color comp filt intl
    let good = [0, 0, 0, 4, 0, 0, 0, 4, 8, 3, 0, 0, 0];
    assert!(parse_bytes(&H, &good, &[], true).is_ok());
    for (i, v, field) in [
      (9, 5, "color_type"),
      (8, 16, "bit_depth"),
      (10, 1, "compression_method"),
      (11, 1, "filter_method"),
      (12, 2, "interlace_method"),
      (3, 0, "width"),
    ] {
      let mut bad = good;
      bad[i] = v;
      assert!(
        matches!(
          parse_bytes(&H, &bad, &[], false),
          Err(FormatError::InvalidFieldValue { field: f, .. }) if f == field
        ),
        "byte {i} = {v}"
      );
    }
  }

  #[test]
  fn test_options_defaults() {
    assert_eq!(HeaderOptions::default().to_header(), Ok(ImageHeader::default()));
    let o = HeaderOptions { height: Some(0), ..Default::default() };
    assert!(matches!(o.to_header(), Err(FormatError::InvalidFieldValue { field: "height", .. })));
  }
}
