//! One generation of a registered key.
//!
//! A [`Binding`] is an `Arc` handle: the registry clones it out of its table and
//! releases the table lock before the factory runs. Replacing a key installs a
//! fresh `Binding`, so a singleton's cached value dies with its generation.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::{Args, Lifetime, Maker, RegistryError, Value};

#[derive(Clone, Debug)]
pub(crate) enum Binding {
    Transient(Maker),
    Singleton(Arc<Singleton>),
}

/// Once-only materialization state of one singleton generation.
///
/// The cell moves Empty -> Computing -> Done. A failed computation leaves it
/// Empty, and the next caller (possibly one that was blocked on the same cell)
/// runs the factory with its own arguments.
#[derive(Debug)]
pub(crate) struct Singleton {
    maker: Maker,
    value: OnceCell<Value>,
}

/// Outcome of a resolution, reported to tracing and the trace callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// A cached singleton value was returned.
    Cached,
    /// The factory ran during this call.
    Invoked,
}

impl Binding {
    pub(crate) fn new(maker: Maker, lifetime: Lifetime) -> Self {
        match lifetime {
            Lifetime::Transient => Binding::Transient(maker),
            Lifetime::Singleton => Binding::Singleton(Arc::new(Singleton {
                maker,
                value: OnceCell::new(),
            })),
        }
    }

    pub(crate) fn lifetime(&self) -> Lifetime {
        match self {
            Binding::Transient(_) => Lifetime::Transient,
            Binding::Singleton(_) => Lifetime::Singleton,
        }
    }

    /// Returns `true` once a singleton generation holds a value.
    pub(crate) fn is_materialized(&self) -> bool {
        match self {
            Binding::Transient(_) => false,
            Binding::Singleton(singleton) => singleton.value.get().is_some(),
        }
    }

    pub(crate) fn resolve(&self, args: &Args) -> (Result<Value, RegistryError>, Resolution) {
        match self {
            Binding::Transient(maker) => (maker.call(args), Resolution::Invoked),
            Binding::Singleton(singleton) => singleton.resolve(args),
        }
    }
}

impl Singleton {
    fn resolve(&self, args: &Args) -> (Result<Value, RegistryError>, Resolution) {
        // Lock-free once published.
        if let Some(value) = self.value.get() {
            return (Ok(value.clone()), Resolution::Cached);
        }

        let mut invoked = false;
        let result = self.value.get_or_try_init(|| {
            invoked = true;
            self.maker.call(args)
        });

        let resolution = if invoked {
            Resolution::Invoked
        } else {
            Resolution::Cached
        };
        (result.cloned(), resolution)
    }
}
