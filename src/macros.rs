//! Macros for building factory arguments.

/// Builds an [`Args`](crate::Args) list from a comma-separated sequence of values.
///
/// # Examples
///
/// ```rust
/// use binding_registry::{args, Injector, Registry, RegistryError};
///
/// let registry = Registry::new();
/// registry.bind("greeting", |args: &binding_registry::Args| {
///     let name = args.arg::<&str>(0)?;
///     let times = *args.arg::<usize>(1)?;
///     Ok::<_, RegistryError>(format!("hello {name}! ").repeat(times))
/// });
///
/// let text = registry.must_resolve::<String>("greeting", args!["ann", 2usize]);
/// assert_eq!(text.as_str(), "hello ann! hello ann! ");
///
/// // No arguments at all
/// assert!(args![].is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut args = $crate::Args::new();
        $(args.push($value);)+
        args
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_args_macro() {
        let args = args![1u8, String::from("two"), 3.0f64];
        assert_eq!(args.len(), 3);
        assert_eq!(args.get::<u8>(0), Some(&1));
        assert_eq!(args.get::<String>(1).map(String::as_str), Some("two"));
        assert_eq!(args.get::<f64>(2), Some(&3.0));
    }

    #[test]
    fn test_args_macro_trailing_comma() {
        let args = args![1u8,];
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_empty_args_macro() {
        assert!(args![].is_empty());
    }
}
