use alloc::vec::Vec;

use crate::{
  Value, JsonError, JsonSerialize, JsonDeserialize, NamedField, FieldView, FieldViewMut, Fields,
  FieldsMut, Structure, serialize_structure, deserialize_structure,
};

/*
  A tuple of named fields is an anonymous structure, serialized as an object. Each arity is
  destructured into one binding per element, which are then erased in order.
*/
macro_rules! tuple_structure {
  ($($field: ident: $Field: ident),*) => {
    impl<$($Field),*> Structure for ($($Field,)*)
    where
      $($Field: Default + NamedField + FieldView + FieldViewMut,)*
    {
      const FIELDS: &'static [&'static str] = &[$($Field::NAME),*];

      #[allow(unused_variables)]
      fn fields(&self) -> Fields<'_> {
        let ($($field,)*) = self;
        Vec::from([$($field as &dyn FieldView),*])
      }

      #[allow(unused_variables)]
      fn fields_mut(&mut self) -> FieldsMut<'_> {
        let ($($field,)*) = self;
        Vec::from([$($field as &mut dyn FieldViewMut),*])
      }
    }

    impl<$($Field),*> JsonSerialize for ($($Field,)*)
    where
      $($Field: Default + NamedField + FieldView + FieldViewMut,)*
    {
      fn serialize(&self) -> impl Iterator<Item = char> {
        serialize_structure(self)
      }
    }

    impl<$($Field),*> JsonDeserialize for ($($Field,)*)
    where
      $($Field: Default + NamedField + FieldView + FieldViewMut,)*
    {
      fn deserialize(value: &Value) -> Result<Self, JsonError> {
        deserialize_structure(value)
      }
    }
  };
}

tuple_structure!();
tuple_structure!(a: A);
tuple_structure!(a: A, b: B);
tuple_structure!(a: A, b: B, c: C);
tuple_structure!(a: A, b: B, c: C, d: D);
tuple_structure!(a: A, b: B, c: C, d: D, e: E);
tuple_structure!(a: A, b: B, c: C, d: D, e: E, f: F);
tuple_structure!(a: A, b: B, c: C, d: D, e: E, f: F, g: G);
tuple_structure!(a: A, b: B, c: C, d: D, e: E, f: F, g: G, h: H);
tuple_structure!(a: A, b: B, c: C, d: D, e: E, f: F, g: G, h: H, i: I);
tuple_structure!(a: A, b: B, c: C, d: D, e: E, f: F, g: G, h: H, i: I, j: J);
tuple_structure!(a: A, b: B, c: C, d: D, e: E, f: F, g: G, h: H, i: I, j: J, k: K);
tuple_structure!(a: A, b: B, c: C, d: D, e: E, f: F, g: G, h: H, i: I, j: J, k: K, l: L);

#[cfg(test)]
mod tests {
  use crate::{Named, to_json, from_json};

  crate::field_names! {
    Name = "name";
    Age = "age";
    Tags = "tags";
  }

  type Person = (Named<Name, String>, Named<Age, u8>, Named<Tags, Vec<String>>);

  #[test]
  fn tuple() {
    let person: Person = ("Ada".to_string().into(), 36.into(), vec!["math".to_string()].into());
    let json = to_json(&person);
    assert_eq!(json, r#"{"name":"Ada","age":36,"tags":["math"]}"#);
    assert_eq!(from_json::<Person>(&json).unwrap(), person);
    assert_eq!(from_json::<Person>(r#"{"age":36}"#).unwrap().1, Named::from(36));
  }

  #[test]
  fn unit() {
    assert_eq!(to_json(&()), "{}");
    from_json::<()>(r#"{"anything":1}"#).unwrap();
  }
}
