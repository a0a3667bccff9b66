//! A thread-safe keyed registry of transient and singleton factories.
//! Designed for a register-at-startup, resolve-many pattern, while staying
//! correct when bindings are replaced at runtime.
//!
//! # Examples
//!
//! ```
//! use binding_registry::{args, Injector, Registry, RegistryError};
//! use std::sync::Arc;
//!
//! struct Pool {
//!     size: usize,
//! }
//!
//! let registry = Registry::new();
//! registry.bind_singleton("pool", |args: &binding_registry::Args| {
//!     let size = *args.arg::<usize>(0)?;
//!     Ok::<_, RegistryError>(Pool { size })
//! });
//!
//! let first: Arc<Pool> = registry.resolve("pool", args![8usize]).unwrap();
//! let again: Arc<Pool> = registry.resolve("pool", args![64usize]).unwrap();
//! assert_eq!(again.size, 8);
//! assert!(Arc::ptr_eq(&first, &again));
//! ```

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};

use crate::binding::{Binding, Resolution};
use crate::{Args, Injector, Key, Lifetime, Maker, RegistryError, RegistryEvent, Value};

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `RegistryEvent` every time the registry is
/// interacted with. It must be thread-safe because the registry is shared across threads.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Keyed container of bindings.
///
/// The binding table is a sharded concurrent map. Resolution clones the binding
/// handle out of its shard and releases it before a factory runs, so factories
/// may resolve other keys and readers of different keys never contend on one
/// lock. Registration is serialized and replaces the entry in one step: a
/// concurrent resolution sees either the old or the new binding.
pub struct Registry {
    bindings: DashMap<Key, Binding>,
    registration: Mutex<()>,
    trace: RwLock<Option<Arc<TraceCallback>>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("bindings", &self.len())
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty registry with room for `capacity` bindings.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bindings: DashMap::with_capacity(capacity),
            registration: Mutex::new(()),
            trace: RwLock::new(None),
        }
    }

    /// Checks whether `key` has a binding.
    pub fn contains(&self, key: impl Into<Key>) -> bool {
        self.bindings.contains_key(&key.into())
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The lifetime `key` is currently bound with.
    pub fn lifetime_of(&self, key: impl Into<Key>) -> Option<Lifetime> {
        self.binding(&key.into()).map(|b| b.lifetime())
    }

    /// Whether `key` is a singleton whose current generation holds a value.
    pub fn is_materialized(&self, key: impl Into<Key>) -> bool {
        self.binding(&key.into())
            .is_some_and(|b| b.is_materialized())
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing callback support
    // -------------------------------------------------------------------------------------------------

    /// Sets a tracing callback invoked on every bind, make and materialization.
    ///
    /// The callback runs without any registry lock held, so it may call back into
    /// the registry.
    pub fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        *self.trace.write() = Some(Arc::new(callback));
    }

    /// Clears the tracing callback (disables registry tracing).
    pub fn clear_trace_callback(&self) {
        *self.trace.write() = None;
    }

    /// Emits the event produced by `event` if a callback is set.
    fn emit_event(&self, event: impl FnOnce() -> RegistryEvent) {
        let callback = self.trace.read().clone();
        if let Some(callback) = callback {
            callback(&event());
        }
    }

    fn binding(&self, key: &Key) -> Option<Binding> {
        self.bindings.get(key).map(|entry| entry.value().clone())
    }
}

impl Injector for Registry {
    fn bind_maker(&self, key: impl Into<Key>, maker: Maker, lifetime: Lifetime) -> &Self {
        let key = key.into();
        let binding = Binding::new(maker, lifetime);

        let previous = {
            let _registration = self.registration.lock();
            self.bindings.insert(key.clone(), binding)
        };
        let replaced = previous.is_some();
        // The old generation may own a cached value; drop it outside the locks.
        drop(previous);

        tracing::debug!(key = %key, %lifetime, replaced, "binding installed");
        self.emit_event(|| RegistryEvent::Bind {
            key,
            lifetime,
            replaced,
        });

        self
    }

    fn make_with(&self, key: &Key, args: &Args) -> Result<Value, RegistryError> {
        let Some(binding) = self.binding(key) else {
            tracing::trace!(key = %key, "no binding");
            self.emit_event(|| RegistryEvent::Make {
                key: key.clone(),
                found: false,
            });
            return Err(RegistryError::NotFound { key: key.clone() });
        };

        self.emit_event(|| RegistryEvent::Make {
            key: key.clone(),
            found: true,
        });

        let lifetime = binding.lifetime();
        let (result, resolution) = binding.resolve(args);
        tracing::trace!(key = %key, %lifetime, ?resolution, "resolved");

        if lifetime == Lifetime::Singleton && resolution == Resolution::Invoked {
            let cached = result.is_ok();
            if cached {
                tracing::debug!(key = %key, "singleton materialized");
            }
            self.emit_event(|| RegistryEvent::Materialize {
                key: key.clone(),
                cached,
            });
        }

        if let Err(err) = &result {
            tracing::warn!(key = %key, %lifetime, error = %err, "factory failed");
        }

        result
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
