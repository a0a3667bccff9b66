//! Core trait defining registry behavior.
//!
//! This module provides the `Injector` trait. Implementors supply two primitives,
//! installing a [`Maker`] under a key and resolving a key, and get every other
//! operation (transient and singleton binding, fallible, aborting and typed
//! resolution) as a provided method.
//!
//! The registry is key-based: each [`Key`] has at most one binding at any time.
//! Binding a key again replaces the previous binding.

use std::sync::Arc;

use crate::{Args, BoxError, Key, Lifetime, Maker, RegistryError, Value};

/// Core trait defining registry behavior.
///
/// Code that only needs to resolve or register dependencies can accept
/// `&impl Injector` instead of a concrete [`Registry`](crate::Registry).
pub trait Injector {
    // -------------------------------------------------------------------------------------------------
    // Required
    // -------------------------------------------------------------------------------------------------

    /// Installs `maker` under `key`, replacing any previous binding together with
    /// its cached singleton value.
    fn bind_maker(&self, key: impl Into<Key>, maker: Maker, lifetime: Lifetime) -> &Self;

    /// Resolves `key` with `args`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] if `key` has no binding
    /// - whatever the factory failed with
    fn make_with(&self, key: &Key, args: &Args) -> Result<Value, RegistryError>;

    // -------------------------------------------------------------------------------------------------
    // Binding
    // -------------------------------------------------------------------------------------------------

    /// Bind a transient factory: it runs on every resolution.
    fn bind<F, T, E>(&self, key: impl Into<Key>, factory: F) -> &Self
    where
        F: Fn(&Args) -> Result<T, E> + Send + Sync + 'static,
        T: Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.bind_maker(key, Maker::new(factory), Lifetime::Transient)
    }

    /// Bind a singleton factory.
    ///
    /// The factory runs until it succeeds once for this binding; every later
    /// resolution returns that same value and ignores its arguments. A failure is
    /// not cached, so the next resolution retries.
    fn bind_singleton<F, T, E>(&self, key: impl Into<Key>, factory: F) -> &Self
    where
        F: Fn(&Args) -> Result<T, E> + Send + Sync + 'static,
        T: Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.bind_maker(key, Maker::new(factory), Lifetime::Singleton)
    }

    // -------------------------------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------------------------------

    /// Resolve `key`, returning the type-erased value.
    fn make(&self, key: impl Into<Key>, args: Args) -> Result<Value, RegistryError> {
        self.make_with(&key.into(), &args)
    }

    /// Resolve `key` or abort.
    ///
    /// # Panics
    ///
    /// Panics if `key` has no binding or its factory fails. The panic payload is
    /// the [`RegistryError`], so it can be recovered with `downcast` after
    /// `std::panic::catch_unwind`.
    fn must_make(&self, key: impl Into<Key>, args: Args) -> Value {
        match self.make(key, args) {
            Ok(value) => value,
            Err(err) => abort(err),
        }
    }

    /// Resolve `key` and downcast the value to `T`.
    ///
    /// # Errors
    ///
    /// Same as [`Injector::make`], plus [`RegistryError::TypeMismatch`] when the
    /// bound factory produces something other than `T`.
    fn resolve<T: Send + Sync + 'static>(
        &self,
        key: impl Into<Key>,
        args: Args,
    ) -> Result<Arc<T>, RegistryError> {
        let key = key.into();
        self.make_with(&key, &args)?
            .downcast::<T>()
            .map_err(|_| RegistryError::TypeMismatch {
                key,
                expected: std::any::type_name::<T>(),
            })
    }

    /// Resolve `key` as `T` or abort.
    ///
    /// # Panics
    ///
    /// Panics with the [`RegistryError`] as payload, see [`Injector::must_make`].
    fn must_resolve<T: Send + Sync + 'static>(&self, key: impl Into<Key>, args: Args) -> Arc<T> {
        match self.resolve(key, args) {
            Ok(value) => value,
            Err(err) => abort(err),
        }
    }
}

#[cold]
fn abort(err: RegistryError) -> ! {
    tracing::error!(error = %err, "unrecoverable dependency resolution failure");
    std::panic::panic_any(err)
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
