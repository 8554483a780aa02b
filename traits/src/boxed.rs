use alloc::boxed::Box;

use crate::{Value, JsonError, JsonDeserialize, JsonSerialize};

impl<T: JsonDeserialize> JsonDeserialize for Box<T> {
  fn deserialize(value: &Value) -> Result<Self, JsonError> {
    T::deserialize(value).map(Box::new)
  }
}

impl<T: ?Sized + JsonSerialize> JsonSerialize for Box<T> {
  fn serialize(&self) -> impl Iterator<Item = char> {
    T::serialize(self)
  }
}

impl<T: ?Sized + JsonSerialize> JsonSerialize for &T {
  fn serialize(&self) -> impl Iterator<Item = char> {
    T::serialize(self)
  }
}
