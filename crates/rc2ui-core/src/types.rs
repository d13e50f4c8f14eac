//! Custom widget descriptors.

use crate::errors::ConfigError;
use std::fmt;

/// Where a header include is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IncludeLocation {
    /// `<foo.h>`
    Global,
    /// `"foo.h"`
    Local,
}

/// A header include, written either `<foo.h>` or `"foo.h"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct HeaderRef {
    /// Include path without the surrounding delimiters
    pub path: String,
    pub location: IncludeLocation,
}

impl HeaderRef {
    /// Parse an include reference, including its delimiters.
    pub fn parse(include: &str) -> Result<Self, ConfigError> {
        let malformed = || ConfigError::MalformedHeader {
            header: include.to_string(),
        };

        let location = match include.chars().next() {
            Some('<') if include.len() > 2 && include.ends_with('>') => IncludeLocation::Global,
            Some('"') if include.len() > 2 && include.ends_with('"') => IncludeLocation::Local,
            _ => return Err(malformed()),
        };

        Ok(Self {
            path: include[1..include.len() - 1].to_string(),
            location,
        })
    }

    pub fn is_global(&self) -> bool {
        self.location == IncludeLocation::Global
    }
}

impl fmt::Display for HeaderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            IncludeLocation::Global => write!(f, "<{}>", self.path),
            IncludeLocation::Local => write!(f, "\"{}\"", self.path),
        }
    }
}

impl TryFrom<String> for HeaderRef {
    type Error = ConfigError;

    fn try_from(include: String) -> Result<Self, Self::Error> {
        HeaderRef::parse(&include)
    }
}

impl From<HeaderRef> for String {
    fn from(header: HeaderRef) -> Self {
        header.to_string()
    }
}

/// Declaration of a widget class the target format does not know natively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CustomWidget {
    /// Class emitted in place of the source class
    pub class_name: String,
    /// Known class the custom widget extends
    pub base_class_name: String,
    pub header: HeaderRef,
    /// Whether the widget can hold child widgets
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_container: bool,
}

impl CustomWidget {
    /// Create a descriptor, validating the header include.
    pub fn new(
        class_name: impl Into<String>,
        base_class_name: impl Into<String>,
        header: &str,
        is_container: bool,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            class_name: class_name.into(),
            base_class_name: base_class_name.into(),
            header: HeaderRef::parse(header)?,
            is_container,
        })
    }
}
