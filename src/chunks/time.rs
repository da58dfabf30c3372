use super::*;

/// `tIME`: Image last-modification time.
///
/// Last image modification time, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
  /// 4-digit year.
  pub year: u16,
  /// 1-12
  pub month: u8,
  /// 1-31
  pub day: u8,
  /// 0-23
  pub hour: u8,
  /// 0-59
  pub minute: u8,
  /// 0-60 (use 60 for leap seconds)
  pub second: u8,
}
impl Default for Timestamp {
  #[inline]
  fn default() -> Self {
    Self::UNIX_EPOCH
  }
}
impl Timestamp {
  /// The default used when encoding with no fields given.
  pub const UNIX_EPOCH: Self =
    Self { year: 1970, month: 1, day: 1, hour: 0, minute: 0, second: 0 };

  pub fn validate(&self) -> FormatResult<()> {
    let ty = ChunkTypeId::tIME;
    check_domain(ty, "month", self.month, (1..=12).contains(&self.month))?;
    check_domain(ty, "day", self.day, (1..=31).contains(&self.day))?;
    check_domain(ty, "hour", self.hour, self.hour <= 23)?;
    check_domain(ty, "minute", self.minute, self.minute <= 59)?;
    check_domain(ty, "second", self.second, self.second <= 60)
  }
}

/// Encoder sub-section for `tIME`.
///
/// Any field left as `None` takes its value from [`Timestamp::UNIX_EPOCH`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimeOptions {
  pub year: Option<u16>,
  pub month: Option<u8>,
  pub day: Option<u8>,
  pub hour: Option<u8>,
  pub minute: Option<u8>,
  pub second: Option<u8>,
}
impl TimeOptions {
  pub fn to_timestamp(&self) -> FormatResult<Timestamp> {
    let e = Timestamp::UNIX_EPOCH;
    let out = Timestamp {
      year: self.year.unwrap_or(e.year),
      month: self.month.unwrap_or(e.month),
      day: self.day.unwrap_or(e.day),
      hour: self.hour.unwrap_or(e.hour),
      minute: self.minute.unwrap_or(e.minute),
      second: self.second.unwrap_or(e.second),
    };
    out.validate()?;
    Ok(out)
  }
}
impl From<Timestamp> for TimeOptions {
  #[inline]
  fn from(t: Timestamp) -> Self {
    Self {
      year: Some(t.year),
      month: Some(t.month),
      day: Some(t.day),
      hour: Some(t.hour),
      minute: Some(t.minute),
      second: Some(t.second),
    }
  }
}

#[derive(Debug, Clone, Copy, Zeroable, Pod)]
#[repr(C)]
struct TimePayload {
  year: U16BE,
  month: u8,
  day: u8,
  hour: u8,
  minute: u8,
  second: u8,
}
const TIME_PAYLOAD_LEN: usize = core::mem::size_of::<TimePayload>();

/// Handler for `tIME` chunks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeHandler;
impl ChunkHandler for TimeHandler {
  #[inline]
  fn chunk_type(&self) -> ChunkTypeId {
    ChunkTypeId::tIME
  }

  #[inline]
  fn sequence(&self) -> u32 {
    160
  }

  fn parse(
    &self, payload: &mut StreamCursor<'_>, length: usize, previous: &[ChunkInstance],
    options: &DecodeOptions,
  ) -> FormatResult<ChunkInstance> {
    let ty = self.chunk_type();
    check_occurrence(ty, previous.len(), self.max_occurrences(), options.strict)?;
    check_exact_length(ty, length, TIME_PAYLOAD_LEN, options.strict)?;
    let raw: TimePayload = payload.read_pod()?;
    let t = Timestamp {
      year: raw.year.to_u16(),
      month: raw.month,
      day: raw.day,
      hour: raw.hour,
      minute: raw.minute,
      second: raw.second,
    };
    t.validate()?;
    Ok(ChunkInstance::Time(t))
  }

  fn decode_data(
    &self, data: &mut ChunkData, instances: &[ChunkInstance], options: &DecodeOptions,
  ) -> FormatResult<()> {
    match first_instance(self, instances, options)? {
      None => Ok(()),
      Some(ChunkInstance::Time(t)) => {
        data.modified = Some(*t);
        Ok(())
      }
      Some(_) => Err(mismatched(self.chunk_type())),
    }
  }

  fn encode_data(
    &self, _data: &ChunkData, options: &EncodeOptions,
  ) -> FormatResult<Vec<ChunkInstance>> {
    match &options.modified {
      None => Ok(Vec::new()),
      Some(o) => Ok(vec![ChunkInstance::Time(o.to_timestamp()?)]),
    }
  }

  fn compose(
    &self, out: &mut StreamWriter, _options: &EncodeOptions, instance: &ChunkInstance,
  ) -> FormatResult<()> {
    let ChunkInstance::Time(t) = instance else {
      return Err(mismatched(self.chunk_type()));
    };
    out.write_pod(&TimePayload {
      year: U16BE::from_u16(t.year),
      month: t.month,
      day: t.day,
      hour: t.hour,
      minute: t.minute,
      second: t.second,
    });
    Ok(())
  }
}
