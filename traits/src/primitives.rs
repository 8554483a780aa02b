use crate::{Value, JsonError, Type, JsonDeserialize, JsonSerialize};

macro_rules! deserialize_integer {
  ($($int: ident via $as: ident,)*) => {
    $(
      impl JsonDeserialize for $int {
        fn deserialize(value: &Value) -> Result<Self, JsonError> {
          let Value::Number(number) = value else {
            return Err(JsonError::type_mismatch(Type::Number, value));
          };
          number
            .$as()
            .and_then(|number| number.try_into().ok())
            .ok_or(JsonError::InvalidNumber { expected: stringify!($int) })
        }
      }
    )*
  };
}
deserialize_integer! {
  i8 via as_i64,
  i16 via as_i64,
  i32 via as_i64,
  i64 via as_i64,
  isize via as_i64,
  u8 via as_u64,
  u16 via as_u64,
  u32 via as_u64,
  u64 via as_u64,
  usize via as_u64,
}

impl JsonDeserialize for bool {
  fn deserialize(value: &Value) -> Result<Self, JsonError> {
    value.as_bool().ok_or_else(|| JsonError::type_mismatch(Type::Bool, value))
  }
}

struct IntIterator {
  buf: [u8; 20],
  i: usize,
  len: usize,
}
impl IntIterator {
  fn new(value: impl core::fmt::Display) -> Self {
    use core::fmt::Write;

    /// A `core::fmt::Write` which writes to a slice.
    ///
    /// We use this to achieve a non-allocating `core::fmt::Write` for primitives we know a bound
    /// for.
    struct SliceWrite<'a>(&'a mut [u8], usize);
    impl Write for SliceWrite<'_> {
      #[inline(always)]
      fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let remaining = self.0.len() - self.1;
        if remaining < s.len() {
          Err(core::fmt::Error)?;
        }
        self.0[self.1 .. (self.1 + s.len())].copy_from_slice(s.as_bytes());
        self.1 += s.len();
        Ok(())
      }
    }

    let mut buf = [0; 20];
    let mut writer = SliceWrite(&mut buf, 0);
    // Every integer this is used with has at most 20 base-10 digits, including the sign
    let _ = write!(&mut writer, "{}", value);
    let len = writer.1;

    IntIterator { buf, i: 0, len }
  }
}
impl Iterator for IntIterator {
  type Item = char;
  fn next(&mut self) -> Option<Self::Item> {
    if self.i == self.len {
      None?;
    }
    let result = self.buf[self.i];
    self.i += 1;
    // This is a safe cast so long as Rust's display of an integer yields ASCII
    Some(result as char)
  }
  fn size_hint(&self) -> (usize, Option<usize>) {
    let remaining = self.len - self.i;
    (remaining, Some(remaining))
  }
}

macro_rules! serialize_integer {
  ($($int: ident),*) => {
    $(
      impl JsonSerialize for $int {
        fn serialize(&self) -> impl Iterator<Item = char> {
          IntIterator::new(*self)
        }
      }
    )*
  };
}
serialize_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl JsonSerialize for bool {
  fn serialize(&self) -> impl Iterator<Item = char> {
    (if *self { "true" } else { "false" }).chars()
  }
}

#[test]
fn test_int_iterator() {
  assert_eq!(JsonSerialize::serialize(&0u8).collect::<String>(), "0");
  assert_eq!(JsonSerialize::serialize(&1u8).collect::<String>(), "1");
  assert_eq!(JsonSerialize::serialize(&-1i8).collect::<String>(), "-1");
  assert_eq!(JsonSerialize::serialize(&u64::MAX).collect::<String>(), format!("{}", u64::MAX));
  assert_eq!(JsonSerialize::serialize(&i64::MAX).collect::<String>(), format!("{}", i64::MAX));
  assert_eq!(JsonSerialize::serialize(&i64::MIN).collect::<String>(), format!("{}", i64::MIN));
}

#[test]
fn integer_ranges() {
  use serde_json::json;

  assert_eq!(u8::deserialize(&json!(255)).unwrap(), 255);
  assert!(matches!(
    u8::deserialize(&json!(256)),
    Err(JsonError::InvalidNumber { expected: "u8" })
  ));
  assert!(matches!(u32::deserialize(&json!(-1)), Err(JsonError::InvalidNumber { .. })));
  assert!(matches!(i32::deserialize(&json!(1.5)), Err(JsonError::InvalidNumber { .. })));
  assert_eq!(i64::deserialize(&json!(i64::MIN)).unwrap(), i64::MIN);
  assert_eq!(u64::deserialize(&json!(u64::MAX)).unwrap(), u64::MAX);
  assert!(matches!(
    i32::deserialize(&json!("1")),
    Err(JsonError::TypeMismatch { expected: Type::Number, found: Type::String })
  ));
}

#[test]
fn booleans() {
  assert_eq!(true.serialize().collect::<String>(), "true");
  assert_eq!(false.serialize().collect::<String>(), "false");
  assert!(!bool::deserialize(&Value::Bool(false)).unwrap());
  assert!(matches!(
    bool::deserialize(&Value::Null),
    Err(JsonError::TypeMismatch { expected: Type::Bool, found: Type::Null })
  ));
}
