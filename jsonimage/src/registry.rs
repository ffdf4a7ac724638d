//! Ordered collection of decoder factories

use parking_lot::RwLock;

use std::sync::OnceLock;

use crate::context::DecodingContext;
use crate::error::DecodeError;
use crate::image::{DefaultDecoder, ImageContainer, ImageDecoding};

/// Builds a decoder for the context, or `None` to let the next factory try.
pub type DecoderFactory =
    Box<dyn Fn(&DecodingContext<'_>) -> Option<Box<dyn ImageDecoding>> + Send + Sync>;

pub trait RegisterDecoder {
    fn register(&self, factory: DecoderFactory);
}

static SHARED: OnceLock<DecoderRegistry> = OnceLock::new();

#[derive(Default)]
pub struct DecoderRegistry {
    factories: RwLock<Vec<DecoderFactory>>,
}

impl std::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("factories", &self.len())
            .finish()
    }
}

fn default_factory(context: &DecodingContext<'_>) -> Option<Box<dyn ImageDecoding>> {
    DefaultDecoder::from_context(context).map(|d| Box::new(d) as Box<dyn ImageDecoding>)
}

impl DecoderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that already knows the general purpose image formats.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(Box::new(default_factory));
        registry
    }

    /// The process-wide registry.
    pub fn shared() -> &'static Self {
        SHARED.get_or_init(Self::with_defaults)
    }

    pub fn register_fn<F>(&self, factory: F)
    where
        F: Fn(&DecodingContext<'_>) -> Option<Box<dyn ImageDecoding>> + Send + Sync + 'static,
    {
        self.register(Box::new(factory));
    }

    pub fn len(&self) -> usize {
        self.factories.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First decoder, in registration order, that accepts the context.
    pub fn decoder(&self, context: &DecodingContext<'_>) -> Option<Box<dyn ImageDecoding>> {
        self.factories
            .read()
            .iter()
            .find_map(|factory| factory(context))
    }

    pub fn decode(&self, context: &DecodingContext<'_>) -> Result<ImageContainer, DecodeError> {
        let decoder = self.decoder(context).ok_or(DecodeError::NoDecoder)?;
        decoder.decode(context.data())
    }
}

impl RegisterDecoder for DecoderRegistry {
    fn register(&self, factory: DecoderFactory) {
        self.factories.write().push(factory);
    }
}
