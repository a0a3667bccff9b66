//! Type-erased binding keys.
//!
//! A [`Key`] wraps any `Eq + Hash + Debug + Send + Sync + 'static` value. Two keys
//! are equal only when they hold the same concrete type and equal values after
//! normalization, so `Key::from(1u8)` and `Key::from(1i64)` never collide.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

trait DynKey: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn DynKey) -> bool;
    fn dyn_hash(&self, state: &mut dyn Hasher);
    fn dyn_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T> DynKey for T
where
    T: Eq + Hash + fmt::Debug + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DynKey) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }

    fn dyn_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Key derived from a Rust type. Compares by `TypeId`, prints the type name.
#[derive(Clone, Copy)]
struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type {}", self.name)
    }
}

/// Opaque identifier of a binding.
///
/// Cloning is cheap (one reference count). String-like inputs are normalized
/// to `String`, signed integers to `i64` and unsigned integers to `u64` by the
/// `From` conversions, so `"db"` and `String::from("db")` name the same binding.
/// [`Key::new`] applies the same normalization.
///
/// # Examples
///
/// ```
/// use binding_registry::Key;
///
/// assert_eq!(Key::from("db"), Key::from(String::from("db")));
/// assert_eq!(Key::from(7i32), Key::from(7i64));
/// assert_ne!(Key::from(7i32), Key::from(7u32));
///
/// struct Database;
/// assert_eq!(Key::of::<Database>(), Key::of::<Database>());
/// ```
#[derive(Clone)]
pub struct Key(Arc<dyn DynKey>);

impl Key {
    /// Wraps an arbitrary hashable value.
    ///
    /// Strings and integers are normalized as by the `From` conversions, and an
    /// existing `Key` is returned as is rather than nested.
    pub fn new<T>(value: T) -> Self
    where
        T: Eq + Hash + fmt::Debug + Send + Sync + 'static,
    {
        macro_rules! widen {
            ($any:expr, $as:ty => $($int:ty),*) => {
                $(
                    if let Some(n) = $any.downcast_ref::<$int>() {
                        return Self::wrap(*n as $as);
                    }
                )*
            };
        }

        let any = &value as &dyn Any;
        if let Some(key) = any.downcast_ref::<Key>() {
            return key.clone();
        }
        if let Some(text) = any.downcast_ref::<&'static str>() {
            return Self::wrap(text.to_string());
        }
        widen!(any, i64 => i8, i16, i32, isize);
        widen!(any, u64 => u8, u16, u32, usize);
        Self::wrap(value)
    }

    fn wrap<T>(value: T) -> Self
    where
        T: Eq + Hash + fmt::Debug + Send + Sync + 'static,
    {
        Self(Arc::new(value))
    }

    /// Builds a key from the type `T` itself.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::wrap(TypeKey {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        })
    }

    /// Returns the wrapped value if it has type `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(&*other.0)
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.as_any().type_id().hash(state);
        self.0.dyn_hash(state);
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.dyn_fmt(f)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.dyn_fmt(f)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::wrap(value.to_owned())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::wrap(value)
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Self::wrap(value.clone())
    }
}

impl From<char> for Key {
    fn from(value: char) -> Self {
        Self::wrap(value)
    }
}

macro_rules! key_from_int {
    ($as:ty => $($int:ty),*) => {
        $(
            impl From<$int> for Key {
                fn from(value: $int) -> Self {
                    Self::wrap(value as $as)
                }
            }
        )*
    };
}

key_from_int!(i64 => i8, i16, i32, i64, isize);
key_from_int!(u64 => u8, u16, u32, u64, usize);
