//! # Binding Registry
//!
//! A thread-safe dependency registry mapping arbitrary keys to lazily-constructed
//! values. Designed for a register-at-startup, resolve-many pattern.
//!
//! Each key is bound to a factory with one of two lifetimes:
//!
//! - **Transient**: the factory runs on every resolution
//! - **Singleton**: the factory runs until it succeeds once, and that value is
//!   shared by every later resolution of the same binding
//!
//! ## Quick Start
//!
//! ```rust
//! use binding_registry::{args, Args, Injector, Registry, RegistryError};
//! use std::sync::Arc;
//!
//! struct Config {
//!     url: String,
//! }
//!
//! let registry = Registry::new();
//! registry
//!     .bind_singleton("config", |args: &Args| {
//!         let url = args.arg::<&str>(0)?;
//!         Ok::<_, RegistryError>(Config { url: url.to_string() })
//!     })
//!     .bind("request-id", |args: &Args| Ok::<_, RegistryError>(*args.arg::<u64>(0)?));
//!
//! let config: Arc<Config> = registry.resolve("config", args!["postgres://localhost"]).unwrap();
//! assert_eq!(config.url, "postgres://localhost");
//!
//! let err = registry.make("missing", Args::new()).unwrap_err();
//! assert!(err.is_not_found());
//! ```
//!
//! ## Features
//!
//! - **Thread-safe**: bind and resolve from any thread; a singleton factory runs
//!   once even under concurrent resolution
//! - **Retry on failure**: a failed singleton factory is not cached
//! - **Replace atomically**: rebinding a key discards its cached singleton value
//! - **Typed access**: [`Injector::resolve`] downcasts with a checked
//!   [`RegistryError::TypeMismatch`]
//! - **Tracing support**: `tracing` events and an optional per-registry callback
//!
//! ## Main Items
//!
//! - [`Registry`] - the container
//! - [`Injector`] - bind and resolve operations
//! - [`Key`] - type-erased binding key
//! - [`Args`] / [`args!`] - factory arguments
//! - [`RegistryError`] - failure kinds

mod args;
mod binding;
mod key;
mod macros;
mod maker;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;

pub use args::Args;
pub use key::Key;
pub use maker::{BoxError, Lifetime, Maker, Value};
pub use registry::{Registry, TraceCallback};
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
pub use registry_trait::Injector;
