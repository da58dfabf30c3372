use crate::ChunkTypeId;

const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      if (c & 1) != 0 {
        c = 0xEDB8_8320_u32 ^ (c >> 1);
      } else {
        c >>= 1;
      }
      //
      k += 1;
    }
    out[n] = c;
    //
    n += 1;
  }
  out
}

fn update_crc(mut crc: u32, iter: impl Iterator<Item = u8>) -> u32 {
  for byte in iter {
    let i = (crc ^ u32::from(byte)) as u8 as usize;
    crc = CRC_TABLE[i] ^ (crc >> 8);
  }
  crc
}

/// CRC-32 of a chunk: covers the type tag and the payload, not the length.
#[inline]
#[must_use]
pub fn chunk_crc(ty: ChunkTypeId, payload: &[u8]) -> u32 {
  let iter = ty.0.iter().copied().chain(payload.iter().copied());
  update_crc(u32::MAX, iter) ^ u32::MAX
}

#[test]
fn test_chunk_crc_known_values() {
  // the CRC of an empty IEND is fixed in every PNG file ever written.
  assert_eq!(chunk_crc(ChunkTypeId::IEND, &[]), 0xAE42_6082);
  // check value of the standard CRC-32 ("123456789" split over type and data)
  assert_eq!(chunk_crc(ChunkTypeId(*b"1234"), b"56789"), 0xCBF4_3926);
}
