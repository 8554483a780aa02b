use alloc::{boxed::Box, vec::Vec};

use crate::{Value, JsonError, Type, JsonSerialize, JsonDeserialize, FieldName, Named};

/// A type-erased view of a field, for serialization.
///
/// This borrows the field and is only valid as long as the structure it was taken from is.
pub trait FieldView {
  /// The key this field is serialized under.
  fn name(&self) -> &'static str;
  /// Render this field's value as JSON.
  fn render(&self) -> Box<dyn '_ + Iterator<Item = char>>;
}

/// A type-erased view of a field, for deserialization.
pub trait FieldViewMut {
  /// The key this field is deserialized from.
  fn name(&self) -> &'static str;
  /// If this field must be present when deserializing.
  fn required(&self) -> bool;
  /// Assign this field from a JSON value.
  fn assign(&mut self, value: &Value) -> Result<(), JsonError>;
}

impl<N: FieldName, T: JsonSerialize> FieldView for Named<N, T> {
  fn name(&self) -> &'static str {
    N::NAME
  }
  fn render(&self) -> Box<dyn '_ + Iterator<Item = char>> {
    Box::new(T::serialize(&**self))
  }
}

impl<N: FieldName, T: JsonDeserialize> FieldViewMut for Named<N, T> {
  fn name(&self) -> &'static str {
    N::NAME
  }
  fn required(&self) -> bool {
    N::REQUIRED
  }
  fn assign(&mut self, value: &Value) -> Result<(), JsonError> {
    **self = T::deserialize(value)?;
    Ok(())
  }
}

/// Views of every field within a structure, in declaration order.
pub type Fields<'structure> = Vec<&'structure dyn FieldView>;
/// Mutable views of every field within a structure, in declaration order.
pub type FieldsMut<'structure> = Vec<&'structure mut dyn FieldViewMut>;

/// A structure composed of named fields.
///
/// This is implemented by `#[derive(Structure)]` from `named-json-derive`, and for tuples of
/// up to twelve [`Named`] values.
pub trait Structure: Default {
  /// The keys of this structure's fields, in declaration order.
  const FIELDS: &'static [&'static str];

  /// A build-time assertion that no two fields share a key.
  ///
  /// This is evaluated when a structure is serialized or deserialized, failing the build if it
  /// has duplicate keys.
  const UNIQUE_FIELDS: () = assert!(unique(Self::FIELDS), "structure has duplicate field names");

  /// The fields within this structure.
  fn fields(&self) -> Fields<'_>;

  /// The fields within this structure, mutably.
  fn fields_mut(&mut self) -> FieldsMut<'_>;
}

const fn str_eq(a: &str, b: &str) -> bool {
  let (a, b) = (a.as_bytes(), b.as_bytes());
  if a.len() != b.len() {
    return false;
  }
  let mut i = 0;
  while i < a.len() {
    if a[i] != b[i] {
      return false;
    }
    i += 1;
  }
  true
}

const fn unique(names: &[&str]) -> bool {
  let mut i = 0;
  while i < names.len() {
    let mut j = i + 1;
    while j < names.len() {
      if str_eq(names[i], names[j]) {
        return false;
      }
      j += 1;
    }
    i += 1;
  }
  true
}

/// Serialize a structure as a JSON object, with its keys in declaration order.
pub fn serialize_structure<S: Structure>(structure: &S) -> impl Iterator<Item = char> {
  let () = S::UNIQUE_FIELDS;
  let fields = structure.fields().into_iter().enumerate().flat_map(|(i, field)| {
    (i != 0)
      .then_some(',')
      .into_iter()
      .chain(field.name().serialize())
      .chain(core::iter::once(':'))
      .chain(field.render())
  });
  core::iter::once('{').chain(fields).chain(core::iter::once('}'))
}

/// Deserialize a structure from a JSON object.
///
/// Fields whose key is absent are left to their `Default` initialization, unless they're
/// required. Keys which don't correspond to a field are ignored.
pub fn deserialize_structure<S: Structure>(value: &Value) -> Result<S, JsonError> {
  let () = S::UNIQUE_FIELDS;
  let object = value.as_object().ok_or_else(|| JsonError::type_mismatch(Type::Object, value))?;

  let mut result = S::default();
  for field in result.fields_mut() {
    let name = field.name();
    match object.get(name) {
      Some(value) => field.assign(value).map_err(|e| e.in_field(name))?,
      None if field.required() => Err(JsonError::MissingField(name))?,
      None => log::trace!("field `{name}` absent, left to its default"),
    }
  }

  if log::log_enabled!(log::Level::Trace) {
    let declared = |key: &&alloc::string::String| S::FIELDS.iter().any(|field| *field == *key);
    for key in object.keys().filter(|key| !declared(key)) {
      log::trace!("ignoring unknown key {key:?}");
    }
  }

  Ok(result)
}

#[cfg(test)]
mod tests {
  use super::*;

  crate::field_names! {
    X = "x";
    Y = "y";
  }

  #[derive(Default, PartialEq, Debug)]
  struct Point {
    x: Named<X, i32>,
    y: Named<Y, i32>,
  }

  impl Structure for Point {
    const FIELDS: &'static [&'static str] = &[X::NAME, Y::NAME];
    fn fields(&self) -> Fields<'_> {
      let Self { x, y } = self;
      Vec::from([x as &dyn FieldView, y as &dyn FieldView])
    }
    fn fields_mut(&mut self) -> FieldsMut<'_> {
      let Self { x, y } = self;
      Vec::from([x as &mut dyn FieldViewMut, y as &mut dyn FieldViewMut])
    }
  }

  #[test]
  fn unique_names() {
    assert!(unique(&[]));
    assert!(unique(&["a", "b", "ab"]));
    assert!(!unique(&["a", "b", "a"]));
    assert!(!unique(&["", ""]));
  }

  #[test]
  fn views() {
    let mut point = Point { x: 1.into(), y: 2.into() };
    let names = point.fields().iter().map(|field| field.name()).collect::<Vec<_>>();
    assert_eq!(names, ["x", "y"]);
    let rendered = point.fields()[1].render().collect::<String>();
    assert_eq!(rendered, "2");

    point.fields_mut()[0].assign(&Value::from(7)).unwrap();
    assert_eq!(*point.x, 7);
    assert!(point.fields_mut()[1].assign(&Value::from("7")).is_err());
  }

  #[test]
  fn structural() {
    let point = Point { x: (-1).into(), y: 2.into() };
    assert_eq!(serialize_structure(&point).collect::<String>(), r#"{"x":-1,"y":2}"#);

    let value = serde_json::json!({ "z": true, "y": 2, "x": -1 });
    assert_eq!(deserialize_structure::<Point>(&value).unwrap(), point);

    let value = serde_json::json!({ "y": 5 });
    let point = deserialize_structure::<Point>(&value).unwrap();
    assert_eq!(point, Point { x: 0.into(), y: 5.into() });

    let value = serde_json::json!({ "x": "1" });
    let error = deserialize_structure::<Point>(&value).unwrap_err();
    assert!(matches!(error, JsonError::InField { field: "x", .. }));

    assert!(matches!(
      deserialize_structure::<Point>(&serde_json::json!([1, 2])),
      Err(JsonError::TypeMismatch { expected: Type::Object, found: Type::Array })
    ));
  }
}
