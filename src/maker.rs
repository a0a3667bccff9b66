//! Factories and the values they produce.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{Args, RegistryError};

/// A resolved, type-erased value. Identity is `Arc::ptr_eq`.
pub type Value = Arc<dyn Any + Send + Sync>;

/// The error type a factory may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

type MakerFn = dyn Fn(&Args) -> Result<Value, RegistryError> + Send + Sync;

/// Memoization policy of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// The factory runs on every resolution.
    Transient,
    /// The factory runs until it succeeds once; the result is shared afterwards.
    Singleton,
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifetime::Transient => f.write_str("transient"),
            Lifetime::Singleton => f.write_str("singleton"),
        }
    }
}

/// A shareable factory producing a [`Value`] from [`Args`].
///
/// # Examples
///
/// ```
/// use binding_registry::{Args, Maker, RegistryError};
///
/// let maker = Maker::new(|args: &Args| {
///     let n = *args.arg::<i32>(0)?;
///     Ok::<_, RegistryError>(n * 2)
/// });
///
/// let value = maker.call(&Args::new().with(21i32)).unwrap();
/// assert_eq!(value.downcast_ref::<i32>(), Some(&42));
/// ```
#[derive(Clone)]
pub struct Maker(Arc<MakerFn>);

impl Maker {
    /// Wraps a typed factory. The produced `T` is boxed into a [`Value`], unless
    /// `T` already is a [`Value`], which is kept as is so that a factory delegating
    /// to another binding returns that binding's value.
    ///
    /// A factory error that is itself a [`RegistryError`] (for example a `NotFound`
    /// raised while the factory resolved one of its own dependencies) is passed
    /// through unchanged; any other error becomes [`RegistryError::Factory`].
    pub fn new<F, T, E>(factory: F) -> Self
    where
        F: Fn(&Args) -> Result<T, E> + Send + Sync + 'static,
        T: Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self(Arc::new(move |args: &Args| {
            factory(args)
                .map(into_value)
                .map_err(into_registry_error)
        }))
    }

    /// Wraps a factory that already returns a type-erased [`Value`].
    pub fn from_value_fn<F, E>(factory: F) -> Self
    where
        F: Fn(&Args) -> Result<Value, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self(Arc::new(move |args: &Args| {
            factory(args).map_err(into_registry_error)
        }))
    }

    /// Invokes the factory.
    #[inline]
    pub fn call(&self, args: &Args) -> Result<Value, RegistryError> {
        (self.0)(args)
    }
}

impl fmt::Debug for Maker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Maker(..)")
    }
}

fn into_value<T: Send + Sync + 'static>(value: T) -> Value {
    match (&value as &dyn Any).downcast_ref::<Value>() {
        Some(erased) => erased.clone(),
        None => Arc::new(value),
    }
}

fn into_registry_error<E: Into<BoxError>>(err: E) -> RegistryError {
    match err.into().downcast::<RegistryError>() {
        Ok(err) => *err,
        Err(err) => RegistryError::Factory(err),
    }
}
