use super::*;

/// `tEXt`: Textual data
///
/// Both parts are Latin-1 bytes. The keyword is 1 to 79 printable bytes
/// (32 to 126 and 161 to 255), with no leading, trailing, or doubled spaces.
/// Any number of these chunks may appear.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextEntry {
  pub keyword: Vec<u8>,
  pub text: Vec<u8>,
}
impl TextEntry {
  pub fn new(keyword: &[u8], text: &[u8]) -> FormatResult<Self> {
    let out = Self { keyword: keyword.to_vec(), text: text.to_vec() };
    out.validate()?;
    Ok(out)
  }

  pub fn validate(&self) -> FormatResult<()> {
    let ty = ChunkTypeId::tEXt;
    let len = self.keyword.len();
    check_domain(ty, "keyword", len as u64, (1..=79).contains(&len))?;
    if let Some(&bad) = self.keyword.iter().find(|&&b| !is_keyword_byte(b)) {
      return Err(FormatError::InvalidFieldValue { ty, field: "keyword", value: bad.into() });
    }
    let spaced = self.keyword.first() == Some(&b' ')
      || self.keyword.last() == Some(&b' ')
      || self.keyword.windows(2).any(|w| w == b"  ");
    check_domain(ty, "keyword", b' ', !spaced)
  }
}

/// Printable Latin-1, which includes the space.
#[inline]
#[must_use]
const fn is_keyword_byte(b: u8) -> bool {
  matches!(b, 32..=126 | 161..=255)
}

/// Handler for `tEXt` chunks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextHandler;
impl ChunkHandler for TextHandler {
  #[inline]
  fn chunk_type(&self) -> ChunkTypeId {
    ChunkTypeId::tEXt
  }

  #[inline]
  fn sequence(&self) -> u32 {
    500
  }

  #[inline]
  fn max_occurrences(&self) -> Option<usize> {
    None
  }

  fn parse(
    &self, payload: &mut StreamCursor<'_>, length: usize, _previous: &[ChunkInstance],
    _options: &DecodeOptions,
  ) -> FormatResult<ChunkInstance> {
    // one keyword byte and the separator
    check_min_length(self.chunk_type(), length, 2)?;
    let bytes = payload.read_bytes(length)?;
    let Some(split) = bytes.iter().position(|&b| b == 0) else {
      return Err(FormatError::InvalidFieldValue {
        ty: self.chunk_type(),
        field: "keyword",
        value: length as u64,
      });
    };
    let entry = TextEntry { keyword: bytes[..split].to_vec(), text: bytes[split + 1..].to_vec() };
    entry.validate()?;
    Ok(ChunkInstance::Text(entry))
  }

  fn decode_data(
    &self, data: &mut ChunkData, instances: &[ChunkInstance], _options: &DecodeOptions,
  ) -> FormatResult<()> {
    if instances.is_empty() {
      return Ok(());
    }
    let entries = instances
      .iter()
      .map(|inst| match inst {
        ChunkInstance::Text(t) => Ok(t.clone()),
        _ => Err(mismatched(self.chunk_type())),
      })
      .collect::<FormatResult<Vec<_>>>()?;
    data.text = Some(entries);
    Ok(())
  }

  fn encode_data(
    &self, _data: &ChunkData, options: &EncodeOptions,
  ) -> FormatResult<Vec<ChunkInstance>> {
    let Some(entries) = &options.text else {
      return Ok(Vec::new());
    };
    entries
      .iter()
      .map(|t| {
        t.validate()?;
        Ok(ChunkInstance::Text(t.clone()))
      })
      .collect()
  }

  fn compose(
    &self, out: &mut StreamWriter, _options: &EncodeOptions, instance: &ChunkInstance,
  ) -> FormatResult<()> {
    let ChunkInstance::Text(t) = instance else {
      return Err(mismatched(self.chunk_type()));
    };
    out.write_bytes(&t.keyword);
    out.write_u8(0);
    out.write_bytes(&t.text);
    Ok(())
  }
}
