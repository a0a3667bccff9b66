//! Positional arguments handed to a factory on each resolution.

use std::any::Any;
use std::fmt;

use crate::RegistryError;

/// An ordered, type-erased argument list.
///
/// Arguments only live for the duration of one resolution, so they need not be
/// `Send` or `Sync`. A materialized singleton ignores the arguments of every
/// resolution after the one that created it.
///
/// # Examples
///
/// ```
/// use binding_registry::{args, Args};
///
/// let args = args![5i32, "label"];
/// assert_eq!(args.get::<i32>(0), Some(&5));
/// assert_eq!(args.get::<&str>(1), Some(&"label"));
/// assert!(args.get::<i64>(0).is_none());
///
/// let same = Args::new().with(5i32).with("label");
/// assert_eq!(same.len(), args.len());
/// ```
#[derive(Default)]
pub struct Args {
    values: Vec<Box<dyn Any>>,
}

impl Args {
    /// Creates an empty argument list.
    #[inline]
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Appends an argument, builder style.
    #[inline]
    pub fn with<T: 'static>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    /// Appends an argument.
    #[inline]
    pub fn push<T: 'static>(&mut self, value: T) {
        self.values.push(Box::new(value));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the argument at `index` if it exists and has type `T`.
    pub fn get<T: 'static>(&self, index: usize) -> Option<&T> {
        self.values.get(index)?.downcast_ref::<T>()
    }

    /// Like [`Args::get`], but reports a missing or ill-typed argument as
    /// [`RegistryError::Argument`] so factories can use `?`.
    pub fn arg<T: 'static>(&self, index: usize) -> Result<&T, RegistryError> {
        self.get(index).ok_or(RegistryError::Argument {
            index,
            expected: std::any::type_name::<T>(),
        })
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Args;
    use crate::RegistryError;

    #[test]
    fn test_empty_args() {
        let args = Args::new();
        assert!(args.is_empty());
        assert_eq!(args.len(), 0);
        assert!(args.get::<i32>(0).is_none());
    }

    #[test]
    fn test_positional_access() {
        let mut args = Args::new().with(1u8);
        args.push(String::from("two"));

        assert_eq!(args.len(), 2);
        assert_eq!(args.get::<u8>(0), Some(&1));
        assert_eq!(args.get::<String>(1).map(String::as_str), Some("two"));
        assert!(args.get::<String>(0).is_none());
    }

    #[test]
    fn test_arg_reports_index_and_type() {
        let args = Args::new().with(1u8);

        assert_eq!(args.arg::<u8>(0).copied().unwrap(), 1);

        let err = args.arg::<i32>(0).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Argument {
                index: 0,
                expected: "i32"
            }
        ));

        let err = args.arg::<u8>(3).unwrap_err();
        assert_eq!(err.to_string(), "argument 3 is missing or is not a u8");
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", Args::new().with(1)), "Args { len: 1 }");
    }
}
