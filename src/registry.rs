use alloc::{boxed::Box, vec::Vec};

use crate::{
  ChunkHandler, ChunkTypeId, FormatError, FormatResult, GammaHandler, HeaderHandler,
  ImageDataHandler, ImageEndHandler, PaletteHandler, PhysicalSizeHandler, TextHandler, TimeHandler,
};

/// Sequence number used for passthrough chunks when re-encoding.
///
/// Sits after every standard ancillary type and before the image end.
pub const OPAQUE_SEQUENCE: u32 = 900;

/// Maps chunk type tags to their handlers.
///
/// Handlers are kept sorted by [`ChunkHandler::sequence`], so iteration order
/// is output order. Type tags and sequence numbers are both unique.
#[derive(Default)]
pub struct ChunkRegistry {
  handlers: Vec<Box<dyn ChunkHandler>>,
}
impl ChunkRegistry {
  /// A registry with no handlers at all.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { handlers: Vec::new() }
  }

  /// A registry with every built-in handler.
  #[must_use]
  pub fn standard() -> Self {
    let handlers: Vec<Box<dyn ChunkHandler>> = alloc::vec![
      Box::new(HeaderHandler),
      Box::new(GammaHandler),
      Box::new(PhysicalSizeHandler),
      Box::new(PaletteHandler),
      Box::new(ImageDataHandler),
      Box::new(TimeHandler),
      Box::new(TextHandler),
      Box::new(ImageEndHandler),
    ];
    // already in sequence order, and none of them collide.
    Self { handlers }
  }

  /// Adds a handler.
  ///
  /// [`ChunkInstance`](crate::ChunkInstance) and [`ChunkData`](crate::ChunkData)
  /// only have dedicated slots for the built-in types. A handler from outside
  /// this crate produces [`ChunkInstance::Custom`](crate::ChunkInstance::Custom)
  /// and keeps its decoded payloads in
  /// [`ChunkData::custom`](crate::ChunkData::custom) under its own type. The
  /// [`RawChunkHandler`](crate::RawChunkHandler) does exactly that.
  ///
  /// ## Failure
  /// * The type tag is already registered.
  /// * The sequence number is already used, or is [`OPAQUE_SEQUENCE`].
  pub fn register(&mut self, handler: Box<dyn ChunkHandler>) -> FormatResult<()> {
    let ty = handler.chunk_type();
    let sequence = handler.sequence();
    if sequence == OPAQUE_SEQUENCE
      || self.handlers.iter().any(|h| h.chunk_type() == ty || h.sequence() == sequence)
    {
      return Err(FormatError::ConflictingHandler { ty });
    }
    let at = self.handlers.partition_point(|h| h.sequence() < sequence);
    log::trace!("registered {ty} at sequence {sequence}");
    self.handlers.insert(at, handler);
    Ok(())
  }

  /// Builder form of [`register`](Self::register).
  #[inline]
  pub fn with(mut self, handler: Box<dyn ChunkHandler>) -> FormatResult<Self> {
    self.register(handler)?;
    Ok(self)
  }

  #[inline]
  #[must_use]
  pub fn lookup(&self, ty: ChunkTypeId) -> Option<&dyn ChunkHandler> {
    self.handlers.iter().find(|h| h.chunk_type() == ty).map(|h| &**h)
  }

  /// Handlers in sequence order.
  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = &dyn ChunkHandler> + '_ {
    self.handlers.iter().map(|h| &**h)
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.handlers.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.handlers.is_empty()
  }
}
impl core::fmt::Debug for ChunkRegistry {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_list().entries(self.handlers.iter().map(|h| (h.chunk_type(), h.sequence()))).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::RawChunkHandler;

  #[test]
  fn test_standard_registry_is_sorted_and_unique() {
    let reg = ChunkRegistry::standard();
    let seqs: Vec<u32> = reg.iter().map(|h| h.sequence()).collect();
    assert!(seqs.windows(2).all(|w| w[0] < w[1]), "{seqs:?}");
    assert!(!seqs.contains(&OPAQUE_SEQUENCE));
    let tys: Vec<ChunkTypeId> = reg.iter().map(|h| h.chunk_type()).collect();
    for (i, ty) in tys.iter().enumerate() {
      assert!(!tys[i + 1..].contains(ty));
    }
    assert_eq!(reg.lookup(ChunkTypeId::pHYs).map(|h| h.sequence()), Some(140));
    assert!(reg.lookup(ChunkTypeId(*b"zzZz")).is_none());
  }

  #[test]
  fn test_register_keeps_sequence_order() {
    let reg = ChunkRegistry::new()
      .with(Box::new(ImageEndHandler))
      .and_then(|r| r.with(Box::new(PhysicalSizeHandler)))
      .and_then(|r| r.with(Box::new(HeaderHandler)))
      .unwrap();
    let tys: Vec<ChunkTypeId> = reg.iter().map(|h| h.chunk_type()).collect();
    assert_eq!(tys, [ChunkTypeId::IHDR, ChunkTypeId::pHYs, ChunkTypeId::IEND]);
  }

  #[test]
  fn test_register_rejects_conflicts() {
    let mut reg = ChunkRegistry::standard();
    assert_eq!(
      reg.register(Box::new(PhysicalSizeHandler)),
      Err(FormatError::ConflictingHandler { ty: ChunkTypeId::pHYs })
    );
    assert_eq!(reg.len(), 8);
  }

  #[test]
  fn test_register_rejects_taken_sequences() {
    let mut reg = ChunkRegistry::standard();
    let same_seq = RawChunkHandler::new(ChunkTypeId(*b"teSt"), 140, None);
    assert_eq!(
      reg.register(Box::new(same_seq)),
      Err(FormatError::ConflictingHandler { ty: ChunkTypeId(*b"teSt") })
    );
    let opaque_seq = RawChunkHandler::new(ChunkTypeId(*b"teSt"), OPAQUE_SEQUENCE, None);
    assert_eq!(
      reg.register(Box::new(opaque_seq)),
      Err(FormatError::ConflictingHandler { ty: ChunkTypeId(*b"teSt") })
    );
    assert_eq!(reg.len(), 8);
    assert!(reg.lookup(ChunkTypeId(*b"teSt")).is_none());

    let free_seq = RawChunkHandler::new(ChunkTypeId(*b"teSt"), 141, None);
    reg.register(Box::new(free_seq)).unwrap();
    assert_eq!(reg.len(), 9);
  }
}
