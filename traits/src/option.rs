use crate::{Value, JsonError, JsonDeserialize, JsonSerialize};

impl<T: JsonDeserialize> JsonDeserialize for Option<T> {
  /// This will accept `null` as a representation of `None`.
  fn deserialize(value: &Value) -> Result<Self, JsonError> {
    if value.is_null() {
      return Ok(None);
    }
    T::deserialize(value).map(Some)
  }
}

impl<T: JsonSerialize> JsonSerialize for Option<T> {
  /// This will serialize `Some(value)` as `value` and `None` as `null`.
  fn serialize(&self) -> impl Iterator<Item = char> {
    self
      .as_ref()
      .map(|value| T::serialize(value))
      .into_iter()
      .flatten()
      .chain(self.is_none().then(|| "null".chars()).into_iter().flatten())
  }
}

#[test]
fn option() {
  assert_eq!(Some(5u8).serialize().collect::<String>(), "5");
  assert_eq!(None::<u8>.serialize().collect::<String>(), "null");
  assert_eq!(Option::<u8>::deserialize(&Value::Null).unwrap(), None);
  assert_eq!(Option::<u8>::deserialize(&Value::from(5)).unwrap(), Some(5));
  assert!(Option::<u8>::deserialize(&Value::from("5")).is_err());
}
