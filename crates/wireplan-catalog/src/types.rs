//! Type identities and parameter shapes
//!
//! Shapes use a compact source-like syntax when parsed from text:
//! - `vehicle.Engine` - plain declared type
//! - `util.List<vehicle.Seat>` - generic declared type
//! - `util.List<? extends vehicle.Seat>` - bounded wildcard argument
//! - `vehicle.Seat[]` - array of a plain element type

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Dotted-path identity of a declared type, e.g. `vehicle.Car`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypePath(String);

impl TypePath {
    /// Create a type path from its dotted form
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The full dotted path
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text after the last `.`, or the whole path when there is none
    pub fn simple_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for TypePath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// A type argument supplied to a generic parameter shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArg {
    /// A concrete argument, possibly generic itself
    Shape(ParamShape),
    /// Upper-bounded wildcard (`? extends X`)
    WildcardExtends(TypePath),
    /// Lower-bounded wildcard (`? super X`)
    WildcardSuper(TypePath),
    /// Wildcard with no usable bound
    Wildcard,
}

impl fmt::Display for TypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeArg::Shape(shape) => shape.fmt(f),
            TypeArg::WildcardExtends(bound) => write!(f, "? extends {}", bound),
            TypeArg::WildcardSuper(bound) => write!(f, "? super {}", bound),
            TypeArg::Wildcard => f.write_str("?"),
        }
    }
}

/// Shape of a constructor or method parameter as reported by the host
///
/// Serializes as the compact text form, so catalog dumps carry shapes like
/// `"util.List<? extends vehicle.Seat>"` rather than a structured tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ParamShape {
    /// A declared type with zero or more type arguments
    Declared {
        /// Path of the declared type
        path: TypePath,
        /// Type arguments, empty for non-generic use
        args: Vec<TypeArg>,
    },
    /// An array of some element type
    Array {
        /// Element type path
        element: TypePath,
    },
}

impl ParamShape {
    /// Non-generic declared shape
    pub fn declared(path: impl Into<TypePath>) -> Self {
        Self::Declared {
            path: path.into(),
            args: Vec::new(),
        }
    }

    /// Declared shape with type arguments
    pub fn generic(path: impl Into<TypePath>, args: Vec<TypeArg>) -> Self {
        Self::Declared {
            path: path.into(),
            args,
        }
    }

    /// Array shape with the given element type
    pub fn array(element: impl Into<TypePath>) -> Self {
        Self::Array {
            element: element.into(),
        }
    }

    /// Parse a shape from the compact syntax
    ///
    /// # Examples
    ///
    /// ```
    /// use wireplan_catalog::ParamShape;
    ///
    /// let shape = ParamShape::parse("util.List<? extends vehicle.Seat>").unwrap();
    /// assert_eq!(shape.to_string(), "util.List<? extends vehicle.Seat>");
    /// ```
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::shape_syntax(text, "empty shape"));
        }

        if let Some(element) = trimmed.strip_suffix("[]") {
            let element = element.trim();
            validate_path(element, text)?;
            return Ok(Self::array(element));
        }

        match trimmed.find('<') {
            None => {
                validate_path(trimmed, text)?;
                Ok(Self::declared(trimmed))
            }
            Some(open) => {
                let Some(inner) = trimmed[open + 1..].strip_suffix('>') else {
                    return Err(CatalogError::shape_syntax(text, "expected closing '>'"));
                };
                let path = trimmed[..open].trim();
                validate_path(path, text)?;
                if inner.trim().is_empty() {
                    return Err(CatalogError::shape_syntax(text, "empty type argument list"));
                }
                let args = split_args(inner, text)?
                    .into_iter()
                    .map(|piece| parse_arg(piece, text))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::generic(path, args))
            }
        }
    }
}

impl fmt::Display for ParamShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamShape::Declared { path, args } => {
                path.fmt(f)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        arg.fmt(f)?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            ParamShape::Array { element } => write!(f, "{}[]", element),
        }
    }
}

impl FromStr for ParamShape {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ParamShape> for String {
    fn from(shape: ParamShape) -> Self {
        shape.to_string()
    }
}

impl TryFrom<String> for ParamShape {
    type Error = CatalogError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

/// Parse one type argument: a wildcard form or a nested shape
fn parse_arg(text: &str, whole: &str) -> Result<TypeArg, CatalogError> {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix('?') {
        let rest = rest.trim_start();
        if rest.is_empty() {
            return Ok(TypeArg::Wildcard);
        }
        if let Some(bound) = rest.strip_prefix("extends ") {
            let bound = bound.trim();
            validate_path(bound, whole)?;
            return Ok(TypeArg::WildcardExtends(TypePath::new(bound)));
        }
        if let Some(bound) = rest.strip_prefix("super ") {
            let bound = bound.trim();
            validate_path(bound, whole)?;
            return Ok(TypeArg::WildcardSuper(TypePath::new(bound)));
        }
        return Err(CatalogError::shape_syntax(whole, "unrecognized wildcard form"));
    }
    Ok(TypeArg::Shape(ParamShape::parse(trimmed)?))
}

/// Split a type argument list on top-level commas
fn split_args<'a>(inner: &'a str, whole: &str) -> Result<Vec<&'a str>, CatalogError> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (idx, ch) in inner.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| CatalogError::shape_syntax(whole, "unbalanced '>'"))?;
            }
            ',' if depth == 0 => {
                pieces.push(&inner[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(CatalogError::shape_syntax(whole, "unbalanced '<'"));
    }
    pieces.push(&inner[start..]);
    Ok(pieces)
}

/// A plain path has no generic, wildcard, or separator characters
fn validate_path(path: &str, whole: &str) -> Result<(), CatalogError> {
    if path.is_empty() {
        return Err(CatalogError::shape_syntax(whole, "empty type path"));
    }
    if path.contains(['<', '>', ',', '?', '[', ']']) || path.contains(char::is_whitespace) {
        return Err(CatalogError::shape_syntax(
            whole,
            "expected a plain dotted type path",
        ));
    }
    Ok(())
}
