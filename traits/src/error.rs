use alloc::{boxed::Box, string::String};

use thiserror::Error;

use crate::Value;

/// The type of a JSON value.
///
/// https://datatracker.ietf.org/doc/html/rfc8259#section-3 defines all possible values.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Type {
  /// An object.
  Object,
  /// An array.
  Array,
  /// A string.
  String,
  /// A RFC-8259 number.
  Number,
  /// A boolean.
  Bool,
  /// The `null` unit value.
  Null,
}

impl Type {
  /// Classify a value.
  pub fn of(value: &Value) -> Self {
    match value {
      Value::Object(_) => Type::Object,
      Value::Array(_) => Type::Array,
      Value::String(_) => Type::String,
      Value::Number(_) => Type::Number,
      Value::Bool(_) => Type::Bool,
      Value::Null => Type::Null,
    }
  }
}

impl core::fmt::Display for Type {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(match self {
      Type::Object => "an object",
      Type::Array => "an array",
      Type::String => "a string",
      Type::Number => "a number",
      Type::Bool => "a boolean",
      Type::Null => "null",
    })
  }
}

/// An error incurred when deserializing.
///
/// Errors raised within a nested value are wrapped with where they occurred (`InField`,
/// `AtIndex`, `InKey`), outermost first.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JsonError {
  /// The text was not well-formed JSON.
  #[error("malformed JSON at line {line}, column {column}: {message}")]
  Syntax {
    /// The line the parser stopped at, one-indexed.
    line: usize,
    /// The column the parser stopped at, one-indexed.
    column: usize,
    /// The parser's description of the problem.
    message: String,
  },
  /// The value was of a different type than the one expected.
  #[error("expected {expected}, found {found}")]
  TypeMismatch {
    /// The type expected.
    expected: Type,
    /// The type present.
    found: Type,
  },
  /// The value was a number which wasn't representable by the expected numeric type.
  #[error("number not representable as `{expected}`")]
  InvalidNumber {
    /// The name of the numeric type expected.
    expected: &'static str,
  },
  /// An array had a different length than the fixed length expected.
  #[error("expected an array of length {expected}, found length {found}")]
  LengthMismatch {
    /// The length expected.
    expected: usize,
    /// The length present.
    found: usize,
  },
  /// A field declared as required was not present.
  #[error("missing required field `{0}`")]
  MissingField(&'static str),
  /// An error within the value of a structure's field.
  #[error("in field `{field}`: {source}")]
  InField {
    /// The name of the field.
    field: &'static str,
    /// The error within the field's value.
    source: Box<JsonError>,
  },
  /// An error within an element of an array.
  #[error("at index {index}: {source}")]
  AtIndex {
    /// The index of the element.
    index: usize,
    /// The error within the element.
    source: Box<JsonError>,
  },
  /// An error within the value of a map's entry.
  #[error("in key {key:?}: {source}")]
  InKey {
    /// The key of the entry.
    key: String,
    /// The error within the entry's value.
    source: Box<JsonError>,
  },
}

impl JsonError {
  /// The error for when `value` wasn't of the `expected` type.
  pub fn type_mismatch(expected: Type, value: &Value) -> Self {
    JsonError::TypeMismatch { expected, found: Type::of(value) }
  }

  pub(crate) fn in_field(self, field: &'static str) -> Self {
    JsonError::InField { field, source: Box::new(self) }
  }

  pub(crate) fn at_index(self, index: usize) -> Self {
    JsonError::AtIndex { index, source: Box::new(self) }
  }

  pub(crate) fn in_key(self, key: &str) -> Self {
    JsonError::InKey { key: key.into(), source: Box::new(self) }
  }

  /// The innermost error, with the location wrappers removed.
  pub fn root_cause(&self) -> &JsonError {
    match self {
      JsonError::InField { source, .. } |
      JsonError::AtIndex { source, .. } |
      JsonError::InKey { source, .. } => source.root_cause(),
      _ => self,
    }
  }
}

impl From<serde_json::Error> for JsonError {
  fn from(error: serde_json::Error) -> Self {
    use alloc::string::ToString;
    JsonError::Syntax { line: error.line(), column: error.column(), message: error.to_string() }
  }
}

#[test]
fn error_path() {
  use alloc::string::ToString;

  let error = JsonError::TypeMismatch { expected: Type::Number, found: Type::String }
    .at_index(2)
    .in_field("values");
  assert_eq!(
    error.to_string(),
    "in field `values`: at index 2: expected a number, found a string",
  );
  assert!(matches!(
    error.root_cause(),
    JsonError::TypeMismatch { expected: Type::Number, found: Type::String }
  ));
}
