#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![cfg_attr(not(test), no_std)]

extern crate alloc;
#[cfg(all(feature = "std", not(test)))]
extern crate std;

use alloc::string::String;

mod error;
mod named;
mod structure;
mod tuples;

mod primitives;
mod float;
mod string;
mod option;
mod boxed;
mod sequences;
mod maps;

pub use serde_json::{Map, Value};

pub use error::{Type, JsonError};
pub use named::{FieldName, NamedField, Named};
pub use structure::{
  FieldView, FieldViewMut, Fields, FieldsMut, Structure, serialize_structure,
  deserialize_structure,
};

/// An item which can be serialized as JSON.
pub trait JsonSerialize {
  /// Serialize this item as JSON.
  ///
  /// The serialization is yielded character by character, without any insignificant whitespace.
  fn serialize(&self) -> impl Iterator<Item = char>;
}

/// An item which can be deserialized from a JSON value.
pub trait JsonDeserialize: Sized {
  /// Decode this item from a `Value`.
  ///
  /// This will deserialize the value present without limitation. This should be kept in mind
  /// when deserializing into types which allocate.
  fn deserialize(value: &Value) -> Result<Self, JsonError>;
}

/// Serialize a value as JSON text.
///
/// Objects have their keys in declaration order and the text contains no insignificant
/// whitespace.
pub fn to_json<T: ?Sized + JsonSerialize>(value: &T) -> String {
  value.serialize().collect()
}

/// Deserialize a value from a parsed JSON value.
pub fn from_value<T: JsonDeserialize>(value: &Value) -> Result<T, JsonError> {
  T::deserialize(value)
}

/// Deserialize a value from JSON text.
pub fn from_json<T: JsonDeserialize>(json: &str) -> Result<T, JsonError> {
  let value = serde_json::from_str::<Value>(json).map_err(|e| {
    log::debug!("rejecting malformed JSON: {e}");
    JsonError::from(e)
  })?;
  T::deserialize(&value)
}

/// Deserialize a value from UTF-8 encoded JSON.
pub fn from_slice<T: JsonDeserialize>(json: &[u8]) -> Result<T, JsonError> {
  let value = serde_json::from_slice::<Value>(json).map_err(|e| {
    log::debug!("rejecting malformed JSON: {e}");
    JsonError::from(e)
  })?;
  T::deserialize(&value)
}

#[test]
fn entry_points() {
  assert_eq!(to_json(&[1u8, 2, 3]), "[1,2,3]");
  assert_eq!(from_json::<Vec<u8>>(" [1, 2,\n3] ").unwrap(), vec![1, 2, 3]);
  assert!(from_slice::<bool>(b"true").unwrap());
  assert_eq!(from_value::<String>(&Value::String("abc".into())).unwrap(), "abc");

  assert!(matches!(from_json::<Vec<u8>>("[1, 2"), Err(JsonError::Syntax { line: 1, .. })));
  assert!(matches!(
    from_json::<Vec<u8>>("{}"),
    Err(JsonError::TypeMismatch { expected: Type::Array, found: Type::Object })
  ));
}
