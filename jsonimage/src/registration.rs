//! One-time installation of the JSON decoder into a registry

use parking_lot::Mutex;

use std::sync::atomic::{AtomicBool, Ordering};

use crate::context::DecodingContext;
use crate::image::ImageDecoding;
use crate::json::JsonDecoder;
use crate::registry::{DecoderRegistry, RegisterDecoder};

/// Process-wide state for [`ensure_registered`].
static JSON_DECODER: Registration = Registration::new();

fn json_factory(context: &DecodingContext<'_>) -> Option<Box<dyn ImageDecoding>> {
    JsonDecoder::from_context(context).map(|d| Box::new(d) as Box<dyn ImageDecoding>)
}

/// Unregistered -> Registered, exactly once.
///
/// The flag is the fast path; the mutex makes racing first callers wait
/// until the factory is actually installed.
#[derive(Debug)]
pub struct Registration {
    registered: AtomicBool,
    guard: Mutex<()>,
}

impl Default for Registration {
    fn default() -> Self {
        Self::new()
    }
}

impl Registration {
    pub const fn new() -> Self {
        Self {
            registered: AtomicBool::new(false),
            guard: parking_lot::const_mutex(()),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::Acquire)
    }

    /// Install the JSON decoder factory into `registry` unless this
    /// registration already did. Returns whether this call installed it.
    pub fn ensure<R>(&self, registry: &R) -> bool
    where
        R: RegisterDecoder + ?Sized,
    {
        if self.is_registered() {
            return false;
        }

        let _guard = self.guard.lock();
        if self.is_registered() {
            return false;
        }

        registry.register(Box::new(json_factory));
        self.registered.store(true, Ordering::Release);

        log::info!("Registered JSON image decoder");
        true
    }
}

/// Register the JSON decoder in [`DecoderRegistry::shared`]. Safe to call
/// from anywhere, any number of times.
pub fn ensure_registered() -> bool {
    JSON_DECODER.ensure(DecoderRegistry::shared())
}
