use std::collections::BTreeMap;

use chunkline::*;

const PHYS_METRIC_2835: [u8; 9] = [0x00, 0x00, 0x0B, 0x13, 0x00, 0x00, 0x0B, 0x13, 0x01];

fn strict() -> DecodeOptions {
  DecodeOptions::default().strict(true)
}

fn full_options() -> EncodeOptions {
  EncodeOptions {
    header: Some(HeaderOptions { width: Some(32), height: Some(16), ..Default::default() }),
    gamma: Some(GammaOptions::default()),
    physical_size: Some(PhysicalSizeOptions {
      ppu_x: Some(2835),
      ppu_y: Some(2835),
      unit: Some(PhysicalUnit::Meter as u8),
    }),
    palette: Some(Palette::new(&[[0, 0, 0], [255, 255, 255]]).unwrap()),
    image_data: Some(vec![ImageData(vec![0x78, 0x9C, 0x01]), ImageData(vec![0x02, 0x03])]),
    modified: Some(TimeOptions { year: Some(2015), month: Some(6), ..Default::default() }),
    text: Some(vec![
      TextEntry::new(b"Title", b"chunks").unwrap(),
      TextEntry::new(b"Author", b"someone").unwrap(),
    ]),
    custom: BTreeMap::new(),
    preserve_unknown: true,
  }
}

/// Signature plus the given records.
fn png_of(records: &[(ChunkTypeId, &[u8])]) -> Vec<u8> {
  let mut w = StreamWriter::new();
  for (ty, data) in records {
    write_record(&mut w, *ty, data).unwrap();
  }
  let mut bytes = Vec::from(PNG_SIGNATURE);
  bytes.extend_from_slice(w.as_bytes());
  bytes
}

#[test]
fn test_phys_only_encode_is_exact() {
  let options = EncodeOptions {
    physical_size: Some(PhysicalSizeOptions {
      ppu_x: Some(2835),
      ppu_y: Some(2835),
      unit: Some(1),
    }),
    ..Default::default()
  };
  let bytes = encode_chunks(&ChunkRegistry::standard(), &ChunkData::default(), &options).unwrap();
  let records: Vec<RawChunk<'_>> = RawChunkIter::new(&bytes).collect::<Result<_, _>>().unwrap();
  let phys: Vec<_> = records.iter().filter(|r| r.ty == ChunkTypeId::pHYs).collect();
  assert_eq!(phys.len(), 1);
  assert_eq!(phys[0].data, &PHYS_METRIC_2835);

  let data = decode_chunks(&ChunkRegistry::standard(), &bytes, &strict()).unwrap();
  assert_eq!(data.physical_size.map(PhysicalSizeOptions::from), options.physical_size);
}

#[test]
fn test_full_round_trip_through_png() {
  let options = full_options();
  let png = encode_png(&ChunkData::default(), &options).unwrap();
  let data = decode_png(&png, &strict()).unwrap();

  let header = data.header.unwrap();
  assert_eq!((header.width, header.height), (32, 16));
  assert_eq!(data.gamma, Some(Gamma(45_455)));
  assert_eq!(data.physical_size, Some(PhysicalDimensions::new(2835, 2835, 1).unwrap()));
  let modified = data.modified.unwrap();
  assert_eq!((modified.year, modified.month, modified.day), (2015, 6, 1));
  assert_eq!(data.text.as_deref().map(<[_]>::len), Some(2));
  assert_eq!(data.palette.as_ref().map(Palette::entries), Some(&[[0, 0, 0], [255, 255, 255]][..]));
  assert_eq!(data.image_data.as_deref().map(<[_]>::len), Some(2));
  assert!(data.unknown.is_empty());

  // options rebuilt from the decode write the same bytes again
  let again = encode_png(&data, &EncodeOptions::from(&data)).unwrap();
  assert_eq!(again, png);
}

#[test]
fn test_unknown_chunks_survive_a_round_trip() {
  let mut bytes = Vec::from(PNG_SIGNATURE);
  let mut w = StreamWriter::new();
  write_record(&mut w, ChunkTypeId(*b"prVt"), b"private data").unwrap();
  write_record(&mut w, ChunkTypeId::pHYs, &PHYS_METRIC_2835).unwrap();
  write_record(&mut w, ChunkTypeId::IEND, &[]).unwrap();
  bytes.extend_from_slice(w.as_bytes());

  let data = decode_png(&bytes, &strict()).unwrap();
  assert_eq!(data.unknown.len(), 1);
  assert_eq!(data.unknown[0].data, b"private data");

  let out = encode_png(&data, &EncodeOptions::from(&data)).unwrap();
  let tys: Vec<ChunkTypeId> = RawChunkIter::new(&out[8..]).map(|r| r.unwrap().ty).collect();
  // passthrough chunks move after the known ancillary chunks
  assert_eq!(tys, [ChunkTypeId::pHYs, ChunkTypeId(*b"prVt"), ChunkTypeId::IEND]);
}

#[test]
fn test_omitted_types_stay_absent() {
  let reg = ChunkRegistry::standard();
  let bytes = encode_chunks(&reg, &ChunkData::default(), &EncodeOptions::default()).unwrap();
  let data = decode_chunks(&reg, &bytes, &strict()).unwrap();
  assert_eq!(data, ChunkData::default());
}

#[test]
fn test_bad_signature() {
  assert_eq!(decode_png(b"GIF89a..", &DecodeOptions::default()), Err(FormatError::BadSignature));
}

#[test]
fn test_registry_only_decodes_what_it_knows() {
  let png = encode_png(&ChunkData::default(), &full_options()).unwrap();
  let reg = ChunkRegistry::new()
    .with(Box::new(PhysicalSizeHandler))
    .and_then(|r| r.with(Box::new(ImageEndHandler)))
    .unwrap();
  let body = &png[PNG_SIGNATURE.len()..];
  // IHDR is critical, so a strict decode without its handler gives up.
  assert_eq!(
    decode_chunks(&reg, body, &strict()),
    Err(FormatError::UnknownCriticalChunk { ty: ChunkTypeId::IHDR })
  );
  let data = decode_chunks(&reg, body, &DecodeOptions::default()).unwrap();
  assert!(data.header.is_none());
  assert!(data.physical_size.is_some());
  let unknown: Vec<ChunkTypeId> = data.unknown.iter().map(|o| o.ty).collect();
  assert_eq!(
    unknown,
    [
      ChunkTypeId::IHDR,
      ChunkTypeId::gAMA,
      ChunkTypeId::tIME,
      ChunkTypeId::PLTE,
      ChunkTypeId::IDAT,
      ChunkTypeId::IDAT,
      ChunkTypeId::tEXt,
      ChunkTypeId::tEXt,
    ]
  );
}

#[test]
fn test_strict_decode_of_a_minimal_image() {
  let header: [u8; 13] = [0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0];
  let png = png_of(&[
    (ChunkTypeId::IHDR, &header[..]),
    (ChunkTypeId::pHYs, &PHYS_METRIC_2835[..]),
    (ChunkTypeId::IDAT, &[0x78, 0x9C][..]),
    (ChunkTypeId::IDAT, &[0x63, 0x60][..]),
    (ChunkTypeId::IEND, &[][..]),
  ]);
  let data = decode_png(&png, &strict()).unwrap();
  assert_eq!(data.header, Some(ImageHeader::default()));
  assert_eq!(data.physical_size, Some(PhysicalDimensions::new(2835, 2835, 1).unwrap()));
  let parts: Vec<&[u8]> = data.image_data.iter().flatten().map(ImageData::as_bytes).collect();
  assert_eq!(parts, [&[0x78, 0x9C][..], &[0x63, 0x60][..]]);
  assert!(data.unknown.is_empty());

  let again = encode_png(&data, &EncodeOptions::from(&data)).unwrap();
  assert_eq!(again, png);
}

#[test]
fn test_strict_palette_length() {
  let header: [u8; 13] = [0, 0, 0, 1, 0, 0, 0, 1, 8, 3, 0, 0, 0];
  let png = png_of(&[
    (ChunkTypeId::IHDR, &header[..]),
    (ChunkTypeId::PLTE, &[1, 2, 3, 4][..]),
    (ChunkTypeId::IEND, &[][..]),
  ]);
  assert_eq!(
    decode_png(&png, &strict()),
    Err(FormatError::InvalidLength { ty: ChunkTypeId::PLTE, expected: 3, actual: 4 })
  );
}

#[test]
fn test_outside_handler_owns_custom_data() {
  let private = ChunkTypeId(*b"PrIv");
  let png = png_of(&[(private, &b"one"[..]), (private, &b"two"[..]), (ChunkTypeId::IEND, &[][..])]);
  let body = &png[PNG_SIGNATURE.len()..];
  // critical and unknown to the standard registry
  assert_eq!(
    decode_chunks(&ChunkRegistry::standard(), body, &strict()),
    Err(FormatError::UnknownCriticalChunk { ty: private })
  );

  let handler = RawChunkHandler::new(private, 50, None);
  let reg = ChunkRegistry::standard().with(Box::new(handler)).unwrap();
  let data = decode_chunks(&reg, body, &strict()).unwrap();
  assert_eq!(data.custom.get(&private), Some(&vec![b"one".to_vec(), b"two".to_vec()]));
  assert!(data.unknown.is_empty());

  let again = encode_chunks(&reg, &data, &EncodeOptions::from(&data)).unwrap();
  assert_eq!(again, body);
}

#[test]
fn test_random_bytes_never_panic() {
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    let _ = decode_chunks(&ChunkRegistry::standard(), &v, &DecodeOptions::default());
    let _ = decode_chunks(&ChunkRegistry::standard(), &v, &strict());
    for _ in RawChunkIter::new(&v) {
      //
    }
  }
}
