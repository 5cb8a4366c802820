use std::fmt::{self, Display};

use crate::{Error, Result, Tag};

/// An owned, fully decoded NBT value.
///
/// Names are not stored on the value itself. A compound owns the names of its
/// children and a [`Document`](crate::Document) owns the name of its root, so
/// list elements are the only values without a name.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Value {
    pub const fn tag(&self) -> Tag {
        match self {
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::String(_) => Tag::String,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
            Value::IntArray(_) => Tag::IntArray,
            Value::LongArray(_) => Tag::LongArray,
        }
    }

    /// Everything except lists and compounds, arrays included.
    #[inline]
    pub const fn is_scalar(&self) -> bool {
        !self.tag().is_composite()
    }

    #[inline]
    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Widens any primitive number to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Byte(value) => Some(value as f64),
            Value::Short(value) => Some(value as f64),
            Value::Int(value) => Some(value as f64),
            Value::Long(value) => Some(value as f64),
            Value::Float(value) => Some(value as f64),
            Value::Double(value) => Some(value),
            _ => None,
        }
    }

    /// Looks up a child by name if this value is a compound.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_compound().and_then(|compound| compound.get(key))
    }
}

/// The canonical string form of a value.
///
/// Numbers print in decimal. Floats are widened to `f64` and keep a trailing
/// `.0` when integral. Arrays print their elements (`[1, -2, 3]`); lists and
/// compounds print as a short summary.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Byte(value) => write!(f, "{value}"),
            Value::Short(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Long(value) => write!(f, "{value}"),
            Value::Float(value) => write_float(f, *value as f64),
            Value::Double(value) => write_float(f, *value),
            Value::ByteArray(value) => write_elements(f, value),
            Value::String(value) => f.write_str(value),
            Value::List(list) => write!(f, "[{} {}(s)]", list.len(), list.element_tag().name()),
            Value::Compound(compound) => write!(f, "{{{} entries}}", compound.len()),
            Value::IntArray(value) => write_elements(f, value),
            Value::LongArray(value) => write_elements(f, value),
        }
    }
}

/// Shortest round-trip form with a trailing `.0` on integral values.
///
/// Below `1e-4` and from `1e16` upward the exponent is signed and at least
/// two digits (`1e+16`, `1.5e-05`). Non-finite values print as `nan`, `inf`
/// and `-inf`.
fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("nan");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "inf" } else { "-inf" });
    }
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-4..1e16).contains(&magnitude) {
        return write!(f, "{value:?}");
    }
    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return f.write_str(&scientific);
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    write!(f, "{mantissa}e{sign}{digits:0>2}")
}

fn write_elements<T: Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    f.write_str("]")
}

/// Named children kept in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Compound {
    entries: Vec<(String, Value)>,
}

impl Compound {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts a child, replacing (in place) and returning any previous value
    /// with the same name.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut compound = Compound::new();
        for (key, value) in iter {
            compound.insert(key, value);
        }
        compound
    }
}

/// Unnamed elements of a single declared kind.
#[derive(Clone, Debug, PartialEq)]
pub struct List {
    tag: Tag,
    items: Vec<Value>,
}

impl Default for List {
    #[inline]
    fn default() -> Self {
        Self::new(Tag::End)
    }
}

impl List {
    /// Creates an empty list of `tag` elements.
    #[inline]
    pub const fn new(tag: Tag) -> Self {
        Self {
            tag,
            items: Vec::new(),
        }
    }

    /// Builds a list whose element kind is taken from the first value.
    pub fn try_from_values(items: Vec<Value>) -> Result<Self> {
        let mut list = Self::new(items.first().map_or(Tag::End, Value::tag));
        list.items.reserve(items.len());
        for value in items {
            list.push(value)?;
        }
        Ok(list)
    }

    /// Appends `value`, failing if its kind differs from the list's.
    ///
    /// An empty `End` list adopts the kind of its first element.
    pub fn push(&mut self, value: Value) -> Result<()> {
        if self.tag == Tag::End && self.items.is_empty() {
            self.tag = value.tag();
        }
        if value.tag() != self.tag {
            return Err(Error::TagMismatch(self.tag as u8, value.tag() as u8));
        }
        self.items.push(value);
        Ok(())
    }

    #[inline]
    pub const fn element_tag(&self) -> Tag {
        self.tag
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
    List => List,
    Compound => Compound,
    Vec<i8> => ByteArray,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Byte(value as i8)
    }
}
