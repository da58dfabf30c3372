use chunkline::{decode_png, strip_png_signature, DecodeOptions, RawChunkIter};

fn main() {
  env_logger::init();
  let args: Vec<String> = std::env::args().collect();
  println!("ARGS: {args:?}");
  for file_arg in args[1..].iter() {
    let path = std::path::Path::new(file_arg);
    print!("Reading `{}`... ", path.display());
    let bytes = match std::fs::read(path) {
      Ok(bytes) => {
        println!("got {} bytes.", bytes.len());
        bytes
      }
      Err(e) => {
        println!("{e:?}");
        continue;
      }
    };
    match strip_png_signature(&bytes) {
      Ok(body) => {
        for (n, raw_chunk) in RawChunkIter::new(body).enumerate() {
          println!("{n}: {raw_chunk:?}");
        }
      }
      Err(e) => println!("{e}"),
    }
    for strict in [false, true] {
      let options = DecodeOptions::default().strict(strict);
      println!("strict={strict}: {:?}", decode_png(&bytes, &options));
    }
  }
}
