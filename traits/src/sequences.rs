use alloc::{vec::Vec, collections::VecDeque};

use crate::{Value, JsonError, Type, JsonDeserialize, JsonSerialize};

/// Serialize a sequence of items as a JSON array.
fn serialize_sequence<'serializing, T: 'serializing + JsonSerialize>(
  iter: impl Iterator<Item = &'serializing T>,
) -> impl Iterator<Item = char> {
  let items = iter.enumerate().flat_map(|(i, item)| {
    (i != 0).then_some(',').into_iter().chain(item.serialize())
  });
  core::iter::once('[').chain(items).chain(core::iter::once(']'))
}

/// Deserialize each element of a JSON array, in order.
fn deserialize_sequence<T: JsonDeserialize>(
  value: &Value,
) -> Result<impl '_ + Iterator<Item = Result<T, JsonError>>, JsonError> {
  let array = value.as_array().ok_or_else(|| JsonError::type_mismatch(Type::Array, value))?;
  Ok(
    array
      .iter()
      .enumerate()
      .map(|(i, item)| T::deserialize(item).map_err(|e| e.at_index(i))),
  )
}

impl<T: JsonSerialize> JsonSerialize for [T] {
  fn serialize(&self) -> impl Iterator<Item = char> {
    serialize_sequence(self.iter())
  }
}

impl<T: JsonSerialize, const N: usize> JsonSerialize for [T; N] {
  fn serialize(&self) -> impl Iterator<Item = char> {
    serialize_sequence(self.iter())
  }
}

impl<T: JsonDeserialize, const N: usize> JsonDeserialize for [T; N] {
  fn deserialize(value: &Value) -> Result<Self, JsonError> {
    let items = deserialize_sequence::<T>(value)?.collect::<Result<Vec<_>, _>>()?;
    <[T; N]>::try_from(items)
      .map_err(|items| JsonError::LengthMismatch { expected: N, found: items.len() })
  }
}

impl<T: JsonSerialize> JsonSerialize for Vec<T> {
  fn serialize(&self) -> impl Iterator<Item = char> {
    serialize_sequence(self.iter())
  }
}

impl<T: JsonDeserialize> JsonDeserialize for Vec<T> {
  fn deserialize(value: &Value) -> Result<Self, JsonError> {
    deserialize_sequence(value)?.collect()
  }
}

impl<T: JsonSerialize> JsonSerialize for VecDeque<T> {
  fn serialize(&self) -> impl Iterator<Item = char> {
    serialize_sequence(self.iter())
  }
}

impl<T: JsonDeserialize> JsonDeserialize for VecDeque<T> {
  fn deserialize(value: &Value) -> Result<Self, JsonError> {
    deserialize_sequence(value)?.collect()
  }
}

#[test]
fn sequences() {
  use serde_json::json;

  assert_eq!(Vec::<u8>::new().serialize().collect::<String>(), "[]");
  let nested = vec![vec![1u8], vec![], vec![2, 3]];
  assert_eq!(nested.serialize().collect::<String>(), "[[1],[],[2,3]]");
  assert_eq!(["a", "b"].serialize().collect::<String>(), r#"["a","b"]"#);

  assert_eq!(Vec::<u8>::deserialize(&json!([])).unwrap(), Vec::<u8>::new());
  assert_eq!(VecDeque::<u8>::deserialize(&json!([3, 1, 2])).unwrap(), [3, 1, 2]);
  assert_eq!(<[u8; 3]>::deserialize(&json!([3, 1, 2])).unwrap(), [3, 1, 2]);
  assert!(matches!(
    <[u8; 3]>::deserialize(&json!([3, 1])),
    Err(JsonError::LengthMismatch { expected: 3, found: 2 })
  ));
  assert!(matches!(
    Vec::<u8>::deserialize(&json!({})),
    Err(JsonError::TypeMismatch { expected: Type::Array, found: Type::Object })
  ));

  let error = Vec::<u8>::deserialize(&json!([1, 2, "3"])).unwrap_err();
  assert!(matches!(error, JsonError::AtIndex { index: 2, .. }));
}
