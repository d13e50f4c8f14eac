//! Widget tree types for converted dialogs.

use indexmap::IndexMap;
use std::fmt;

/// Ordered property map of a widget. Insertion order is significant.
pub type Properties = IndexMap<String, PropertyValue>;

/// One node of the source widget hierarchy.
///
/// An empty `class_name` or `id` stands for a missing field; the walker
/// rejects such trees before emitting anything.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WidgetNode {
    /// Source widget class (e.g. `Static`, `Dialog`, `QPushButton`)
    #[cfg_attr(feature = "serde", serde(default))]
    pub class_name: String,
    /// Resource identifier (e.g. `IDC_STATIC`)
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub geometry: Geometry,
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: Properties,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<WidgetNode>,
}

impl WidgetNode {
    /// Create a widget with no geometry, properties or children.
    pub fn new(class_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            id: id.into(),
            geometry: Geometry::default(),
            properties: Properties::new(),
            children: Vec::new(),
        }
    }

    /// Set the geometry.
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Append a property. Setting an existing name keeps its original position.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Append a child widget.
    pub fn with_child(mut self, child: WidgetNode) -> Self {
        self.children.push(child);
        self
    }

    /// Get a property value.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Total number of widgets in this subtree, including `self`.
    pub fn widget_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.iter());
        }
        count
    }
}

impl Drop for WidgetNode {
    // Flatten the subtree so dropping a deep tree does not recurse per level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.children);
        }
    }
}

/// Position and size of a widget, in dialog units of the source resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

/// A property value carried by a widget or emitted to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawValue", into = "RawValue"))]
pub enum PropertyValue {
    Text(String),
    Number(i64),
    Boolean(bool),
    /// Enumerated token such as `QFrame::Panel` or `Qt::AlignLeft`
    Enum(String),
    /// Item list, e.g. the entries of a combo box
    TextList(Vec<String>),
}

impl PropertyValue {
    /// Create an enumerated token value.
    pub fn enumeration(token: impl Into<String>) -> Self {
        PropertyValue::Enum(token.into())
    }

    /// Textual form of `Text` and `Enum` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) | PropertyValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Classify free text: scoped tokens (`Foo::Bar`, no spaces) are enums.
    pub fn classify(text: impl Into<String>) -> Self {
        let text = text.into();
        if is_enum_token(&text) {
            PropertyValue::Enum(text)
        } else {
            PropertyValue::Text(text)
        }
    }
}

/// Whether `text` looks like a scoped enumeration token.
///
/// Only spaces disqualify a token; `Qt::AlignLeft|Qt::AlignTop` is one token.
pub fn is_enum_token(text: &str) -> bool {
    text.contains("::") && !text.contains(' ')
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) | PropertyValue::Enum(s) => f.write_str(s),
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::TextList(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Number(n)
    }
}

impl From<i32> for PropertyValue {
    fn from(n: i32) -> Self {
        PropertyValue::Number(n.into())
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(items: Vec<String>) -> Self {
        PropertyValue::TextList(items)
    }
}

/// Serialized shape of a property value. Strings are classified on the way in.
///
/// Numbers must be 64-bit integers; anything else is caught as `Float` and
/// rejected with `ConfigError::NonIntegerNumber`.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum RawValue {
    Boolean(bool),
    Number(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

#[cfg(feature = "serde")]
impl TryFrom<RawValue> for PropertyValue {
    type Error = crate::errors::ConfigError;

    fn try_from(raw: RawValue) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawValue::Boolean(b) => PropertyValue::Boolean(b),
            RawValue::Number(n) => PropertyValue::Number(n),
            RawValue::Float(value) => {
                return Err(crate::errors::ConfigError::NonIntegerNumber {
                    value: value.to_string(),
                })
            }
            RawValue::Text(s) => PropertyValue::classify(s),
            RawValue::List(items) => PropertyValue::TextList(items),
        })
    }
}

#[cfg(feature = "serde")]
impl From<PropertyValue> for RawValue {
    fn from(value: PropertyValue) -> Self {
        match value {
            PropertyValue::Boolean(b) => RawValue::Boolean(b),
            PropertyValue::Number(n) => RawValue::Number(n),
            PropertyValue::Text(s) | PropertyValue::Enum(s) => RawValue::Text(s),
            PropertyValue::TextList(items) => RawValue::List(items),
        }
    }
}
