use crate::{Key, Lifetime};

/// Events emitted by a registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use binding_registry::{Key, Lifetime, RegistryEvent};
///
/// let event = RegistryEvent::Bind {
///     key: Key::from("db"),
///     lifetime: Lifetime::Singleton,
///     replaced: false,
/// };
/// assert_eq!(
///     event.to_string(),
///     "bind { key: \"db\", lifetime: singleton, replaced: false }"
/// );
/// ```
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    /// A binding was installed.
    Bind {
        key: Key,
        lifetime: Lifetime,
        /// Whether an earlier binding for the key was replaced
        replaced: bool,
    },

    /// A key was resolved.
    Make {
        key: Key,
        /// Whether a binding existed for the key
        found: bool,
    },

    /// A singleton factory ran.
    Materialize {
        key: Key,
        /// Whether the factory succeeded and its value was cached
        cached: bool,
    },
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Bind {
                key,
                lifetime,
                replaced,
            } => {
                write!(
                    f,
                    "bind {{ key: {}, lifetime: {}, replaced: {} }}",
                    key, lifetime, replaced
                )
            }
            RegistryEvent::Make { key, found } => {
                write!(f, "make {{ key: {}, found: {} }}", key, found)
            }
            RegistryEvent::Materialize { key, cached } => {
                write!(f, "materialize {{ key: {}, cached: {} }}", key, cached)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_event_display() {
        let event = RegistryEvent::Make {
            key: Key::from("A"),
            found: true,
        };
        assert_eq!(event.to_string(), "make { key: \"A\", found: true }");

        let event = RegistryEvent::Materialize {
            key: Key::from(7u32),
            cached: false,
        };
        assert_eq!(event.to_string(), "materialize { key: 7, cached: false }");

        let event = RegistryEvent::Bind {
            key: Key::from("B"),
            lifetime: Lifetime::Transient,
            replaced: true,
        };
        assert_eq!(
            event.to_string(),
            "bind { key: \"B\", lifetime: transient, replaced: true }"
        );
    }

    #[test]
    fn test_registry_event_clone() {
        let event = RegistryEvent::Make {
            key: Key::from("A"),
            found: false,
        };
        let cloned = event.clone();
        assert_eq!(format!("{:?}", event), format!("{:?}", cloned));
    }
}
