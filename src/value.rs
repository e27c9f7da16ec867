//! Dynamic value model.
//!
//! [`Value`] is a self-describing datum built on the persistent collections.
//! It distinguishes an *undefined* value from an explicit *null*, carries
//! floating-point numbers including NaN, and nests lists and maps, so it can
//! express every input the operations in [`crate::ops`] give meaning to:
//! absent keys in `defaults`, falsey values in `compact`, nested paths in `at`.
//!
//! # Equality
//!
//! Numbers compare with SameValueZero semantics: `NaN` equals `NaN` and `-0`
//! equals `+0`. This keeps [`Value`] a lawful `Eq + Hash` key, which is what
//! the grouping and de-duplicating operations need.
//!
//! # Examples
//!
//! ```rust
//! use lambars_ops::value::Value;
//!
//! let record = Value::map([("name", Value::from("lambars")), ("tags", Value::list(["fp", "rust"]))]);
//! assert_eq!(record.get("name"), Some(&Value::from("lambars")));
//! assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::persistent::{PersistentOrderedMap, PersistentVector};

/// A dynamically typed, immutable value.
#[derive(Clone, Default)]
pub enum Value {
    /// A value that was never set.
    #[default]
    Undefined,
    /// An explicit empty value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A double-precision number; may be NaN.
    Number(f64),
    /// A text value.
    String(String),
    /// An ordered sequence of values.
    List(PersistentVector<Self>),
    /// A mapping from values to values, iterated in insertion order.
    Map(PersistentOrderedMap<Self, Self>),
}

impl Value {
    /// Builds a [`Value::List`] from anything convertible into values.
    #[must_use]
    pub fn list<I, T>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::List(elements.into_iter().map(Into::into).collect())
    }

    /// Builds a [`Value::Map`] from key/value pairs convertible into values.
    ///
    /// Later pairs overwrite earlier ones with an equal key.
    #[must_use]
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Self>,
        V: Into<Self>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Returns `true` for [`Value::Undefined`].
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for a number that is NaN.
    #[must_use]
    pub const fn is_nan(&self) -> bool {
        matches!(self, Self::Number(number) if number.is_nan())
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(boolean) => Some(*boolean),
            _ => None,
        }
    }

    /// Returns the number, if this is one.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the text, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the list, if this is one.
    #[must_use]
    pub const fn as_list(&self) -> Option<&PersistentVector<Self>> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the map, if this is one.
    #[must_use]
    pub const fn as_map(&self) -> Option<&PersistentOrderedMap<Self, Self>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up one step below this value.
    ///
    /// Maps are indexed by a string key and lists by a decimal position;
    /// any other value has no children.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_ops::value::Value;
    ///
    /// let list = Value::list([10, 20]);
    /// assert_eq!(list.get("1"), Some(&Value::from(20)));
    /// assert_eq!(list.get("x"), None);
    /// ```
    #[must_use]
    pub fn get(&self, segment: &str) -> Option<&Self> {
        match self {
            Self::Map(map) => map.get(&Self::String(segment.to_owned())),
            Self::List(list) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| list.get(index)),
            _ => None,
        }
    }

    const fn kind_tag(&self) -> u8 {
        match self {
            Self::Undefined => 0,
            Self::Null => 1,
            Self::Bool(_) => 2,
            Self::Number(_) => 3,
            Self::String(_) => 4,
            Self::List(_) => 5,
            Self::Map(_) => 6,
        }
    }
}

/// SameValueZero: NaN equals itself, signed zeros are equal.
fn same_value_zero(left: f64, right: f64) -> bool {
    #[allow(clippy::float_cmp)]
    let equal = left == right;
    equal || (left.is_nan() && right.is_nan())
}

/// Bit pattern that is stable under [`same_value_zero`].
fn canonical_bits(number: f64) -> u64 {
    if number.is_nan() {
        f64::NAN.to_bits()
    } else if number == 0.0 {
        0
    } else {
        number.to_bits()
    }
}

// =============================================================================
// Equality, Ordering, Hashing
// =============================================================================

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Number(left), Self::Number(right)) => same_value_zero(*left, *right),
            (Self::String(left), Self::String(right)) => left == right,
            (Self::List(left), Self::List(right)) => left == right,
            (Self::Map(left), Self::Map(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for Value {}

/// Values of the same kind are ordered; values of different kinds, maps, and
/// NaN against a number are unordered.
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        match (self, other) {
            (Self::Bool(left), Self::Bool(right)) => left.partial_cmp(right),
            (Self::Number(left), Self::Number(right)) => left.partial_cmp(right),
            (Self::String(left), Self::String(right)) => left.partial_cmp(right),
            (Self::List(left), Self::List(right)) => left.iter().partial_cmp(right.iter()),
            _ => None,
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind_tag().hash(state);
        match self {
            Self::Undefined | Self::Null => {}
            Self::Bool(boolean) => boolean.hash(state),
            Self::Number(number) => canonical_bits(*number).hash(state),
            Self::String(text) => text.hash(state),
            Self::List(list) => list.hash(state),
            Self::Map(map) => map.hash(state),
        }
    }
}

// =============================================================================
// Formatting
// =============================================================================

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => formatter.write_str("undefined"),
            Self::Null => formatter.write_str("null"),
            Self::Bool(boolean) => write!(formatter, "{boolean}"),
            Self::Number(number) => write!(formatter, "{number}"),
            Self::String(text) => write!(formatter, "{text:?}"),
            Self::List(list) => formatter.debug_list().entries(list.iter()).finish(),
            Self::Map(map) => formatter.debug_map().entries(map.iter()).finish(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(text) => formatter.write_str(text),
            other => write!(formatter, "{other:?}"),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(boolean: bool) -> Self {
        Self::Bool(boolean)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<f32> for Value {
    fn from(number: f32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<u32> for Value {
    fn from(number: u32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(number: i64) -> Self {
        Self::Number(number as f64)
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(number: usize) -> Self {
        Self::Number(number as f64)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<PersistentVector<Self>> for Value {
    fn from(list: PersistentVector<Self>) -> Self {
        Self::List(list)
    }
}

impl From<PersistentOrderedMap<Self, Self>> for Value {
    fn from(map: PersistentOrderedMap<Self, Self>) -> Self {
        Self::Map(map)
    }
}

/// `None` becomes [`Value::Undefined`].
impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Undefined, Into::into)
    }
}

impl<T: Into<Self>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::list(iter)
    }
}

// =============================================================================
// Serde Support
// =============================================================================

/// `Undefined` and `Null` both serialize as a unit (JSON `null`); a
/// deserialized unit is always `Null`.
#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Undefined | Self::Null => serializer.serialize_unit(),
            Self::Bool(boolean) => serializer.serialize_bool(*boolean),
            Self::Number(number) => serializer.serialize_f64(*number),
            Self::String(text) => serializer.serialize_str(text),
            Self::List(list) => serde::Serialize::serialize(list, serializer),
            Self::Map(map) => serde::Serialize::serialize(map, serializer),
        }
    }
}

#[cfg(feature = "serde")]
struct ValueVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any value")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde::Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E>(self, boolean: bool) -> Result<Self::Value, E> {
        Ok(Value::Bool(boolean))
    }

    fn visit_i64<E>(self, number: i64) -> Result<Self::Value, E> {
        Ok(Value::from(number))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E>(self, number: u64) -> Result<Self::Value, E> {
        Ok(Value::Number(number as f64))
    }

    fn visit_f64<E>(self, number: f64) -> Result<Self::Value, E> {
        Ok(Value::Number(number))
    }

    fn visit_str<E>(self, text: &str) -> Result<Self::Value, E> {
        Ok(Value::from(text))
    }

    fn visit_string<E>(self, text: String) -> Result<Self::Value, E> {
        Ok(Value::String(text))
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut list = PersistentVector::new();
        while let Some(element) = access.next_element()? {
            list = list.push_back(element);
        }
        Ok(Value::List(list))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = PersistentOrderedMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map = map.insert(key, value);
        }
        Ok(Value::Map(map))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}
