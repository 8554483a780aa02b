use alloc::{string::String, collections::BTreeMap};
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::{Value, JsonError, Type, JsonDeserialize, JsonSerialize};

type YieldedEntry<T> = Result<(String, T), JsonError>;
fn deserialize_map<T: JsonDeserialize>(
  value: &Value,
) -> Result<impl '_ + Iterator<Item = YieldedEntry<T>>, JsonError> {
  let object = value.as_object().ok_or_else(|| JsonError::type_mismatch(Type::Object, value))?;
  Ok(object.iter().map(|(key, value)| match T::deserialize(value) {
    Ok(value) => Ok((key.clone(), value)),
    Err(e) => Err(e.in_key(key)),
  }))
}

fn serialize_entry<'serializing>(
  (key, value): (&'serializing str, &'serializing (impl 'serializing + JsonSerialize)),
) -> impl Iterator<Item = char> {
  key.serialize().chain(core::iter::once(':')).chain(value.serialize())
}

#[rustfmt::skip]
fn serialize_map<'serializing>(
  mut iter: impl Iterator<Item = (&'serializing str, &'serializing (impl 'serializing + JsonSerialize))>,
) -> impl Iterator<Item = char> {
  let entries = iter.next().map(|first_entry| {
    let first_entry = serialize_entry(first_entry);
    let next_entries =
      iter.flat_map(|next_entry| core::iter::once(',').chain(serialize_entry(next_entry)));
    first_entry.chain(next_entries)
  });
  core::iter::once('{').chain(entries.into_iter().flatten()).chain(core::iter::once('}'))
}

impl<T: JsonDeserialize> JsonDeserialize for BTreeMap<String, T> {
  fn deserialize(value: &Value) -> Result<Self, JsonError> {
    deserialize_map::<T>(value)?.collect()
  }
}
impl<K: AsRef<str>, T: JsonSerialize> JsonSerialize for BTreeMap<K, T> {
  fn serialize(&self) -> impl Iterator<Item = char> {
    serialize_map(self.iter().map(|(key, value)| (key.as_ref(), value)))
  }
}

#[cfg(feature = "std")]
impl<T: JsonDeserialize> JsonDeserialize for HashMap<String, T> {
  fn deserialize(value: &Value) -> Result<Self, JsonError> {
    deserialize_map::<T>(value)?.collect()
  }
}
#[cfg(feature = "std")]
impl<K: AsRef<str>, T: JsonSerialize> JsonSerialize for HashMap<K, T> {
  fn serialize(&self) -> impl Iterator<Item = char> {
    serialize_map(self.iter().map(|(key, value)| (key.as_ref(), value)))
  }
}

#[test]
fn btree_map() {
  assert_eq!(BTreeMap::<String, u16>::new().serialize().collect::<String>().as_str(), "{}");
  let test_map = |map: BTreeMap<String, u16>| {
    let json = map.serialize().collect::<String>();
    assert_eq!(crate::from_json::<BTreeMap<String, u16>>(&json).unwrap(), map);
  };
  test_map(BTreeMap::from([("key1".to_string(), 1)]));
  test_map(BTreeMap::from([("key1".to_string(), 1), ("key2".to_string(), 2)]));
  test_map(BTreeMap::from([("\"quoted\"".to_string(), 3)]));

  assert_eq!(
    BTreeMap::from([("b", 2u8), ("a", 1)]).serialize().collect::<String>(),
    r#"{"a":1,"b":2}"#
  );

  let error = BTreeMap::<String, u16>::deserialize(&serde_json::json!({ "k": -1 })).unwrap_err();
  assert!(matches!(error, JsonError::InKey { ref key, .. } if key == "k"));
}

#[cfg(feature = "std")]
#[test]
fn hash_map() {
  assert_eq!(HashMap::<String, u16>::new().serialize().collect::<String>().as_str(), "{}");
  let test_map = |map: HashMap<String, u16>| {
    let json = map.serialize().collect::<String>();
    assert_eq!(crate::from_json::<HashMap<String, u16>>(&json).unwrap(), map);
  };
  test_map(HashMap::from([("key1".to_string(), 1)]));
  test_map(HashMap::from([("key1".to_string(), 1), ("key2".to_string(), 2)]));
}
