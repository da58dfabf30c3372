#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![deny(unused_attributes)]

//! Decoding and encoding of chunked binary containers, PNG being the one
//! this crate ships handlers for.
//!
//! A container is a series of records, each one `length`, `type`, `payload`,
//! and `crc`. This crate doesn't hard-code what any record means. Instead a
//! [`ChunkRegistry`] maps each chunk type to a [`ChunkHandler`], and two
//! pipelines drive the handlers:
//!
//! * [`decode_chunks`]: every record is [parsed](ChunkHandler::parse) by its
//!   handler into a [`ChunkInstance`], then every handler
//!   [folds](ChunkHandler::decode_data) its instances into one [`ChunkData`].
//! * [`encode_chunks`]: every handler [builds](ChunkHandler::encode_data)
//!   instances from its part of the [`EncodeOptions`], the instances are
//!   sorted by [sequence](ChunkHandler::sequence), and each one is
//!   [composed](ChunkHandler::compose) into a record.
//!
//! [`decode_png`] and [`encode_png`] do the same with the PNG file signature
//! and the standard handlers.
//!
//! ## Strictness
//!
//! Setting `strict` in [`DecodeOptions`] makes fixed-size chunks require their exact size,
//! enforces how many of a chunk type may appear, makes unknown critical
//! chunks an error, and turns checksum mismatches into errors. Lenient mode
//! skips all of that but still rejects field values the format doesn't
//! allow.
//!
//! ```
//! use chunkline::*;
//! let options = EncodeOptions {
//!   physical_size: Some(PhysicalSizeOptions {
//!     ppu_x: Some(2835),
//!     ppu_y: Some(2835),
//!     unit: Some(1),
//!   }),
//!   ..Default::default()
//! };
//! let png = encode_png(&ChunkData::default(), &options).unwrap();
//! let data = decode_png(&png, &DecodeOptions::default().strict(true)).unwrap();
//! assert!(data.physical_size.unwrap().is_unit_in_meters());
//! ```

extern crate alloc;

mod error;
pub use error::*;

mod chunk_type;
pub use chunk_type::*;

mod int_endian;
pub use int_endian::*;

mod parser_helpers;
pub use parser_helpers::*;

mod crc32;
pub use crc32::*;

mod record;
pub use record::*;

pub mod validate;

mod handler;
pub use handler::*;

mod registry;
pub use registry::*;

mod data;
pub use data::*;

mod chunks;
pub use chunks::*;

mod decode;
pub use decode::*;

mod encode;
pub use encode::*;
