use crate::{Value, JsonError, Type, JsonDeserialize, JsonSerialize};

/// The characters of a float formatted by `ryu`.
///
/// `ryu` yields us a string slice borrowing its `Buffer` when we need an owned value to iterate,
/// so the formatted string is copied into our own buffer (of equivalent size).
struct FloatIterator {
  buf: [u8; core::mem::size_of::<ryu::Buffer>()],
  i: usize,
  len: usize,
}

impl FloatIterator {
  fn new(value: impl ryu::Float) -> Self {
    let mut buffer = ryu::Buffer::new();
    let result = buffer.format_finite(value).as_bytes();
    let mut buf = [0; core::mem::size_of::<ryu::Buffer>()];
    buf[.. result.len()].copy_from_slice(result);
    FloatIterator { buf, i: 0, len: result.len() }
  }
}

impl Iterator for FloatIterator {
  type Item = char;
  fn next(&mut self) -> Option<Self::Item> {
    if self.i == self.len {
      None?;
    }
    let result = self.buf[self.i];
    self.i += 1;
    // Safe to cast to char as `ryu` yields human-readable ASCII characters
    Some(result as char)
  }
}

impl JsonSerialize for f64 {
  /// JSON can't represent `NaN` or the infinities, so those are serialized as `null`.
  fn serialize(&self) -> impl Iterator<Item = char> {
    let finite = self.is_finite();
    finite
      .then(|| FloatIterator::new(*self))
      .into_iter()
      .flatten()
      .chain((!finite).then(|| "null".chars()).into_iter().flatten())
  }
}

impl JsonSerialize for f32 {
  /// JSON can't represent `NaN` or the infinities, so those are serialized as `null`.
  fn serialize(&self) -> impl Iterator<Item = char> {
    let finite = self.is_finite();
    finite
      .then(|| FloatIterator::new(*self))
      .into_iter()
      .flatten()
      .chain((!finite).then(|| "null".chars()).into_iter().flatten())
  }
}

impl JsonDeserialize for f64 {
  fn deserialize(value: &Value) -> Result<Self, JsonError> {
    let Value::Number(number) = value else {
      return Err(JsonError::type_mismatch(Type::Number, value));
    };
    number.as_f64().ok_or(JsonError::InvalidNumber { expected: "f64" })
  }
}

impl JsonDeserialize for f32 {
  fn deserialize(value: &Value) -> Result<Self, JsonError> {
    let value = f64::deserialize(value)?;
    #[allow(clippy::cast_possible_truncation)]
    let narrowed = value as f32;
    if narrowed.is_infinite() {
      Err(JsonError::InvalidNumber { expected: "f32" })?;
    }
    Ok(narrowed)
  }
}

#[test]
fn floats() {
  let serialize = |value: f64| value.serialize().collect::<String>();
  assert_eq!(serialize(0.0), "0.0");
  assert_eq!(serialize(-1.5), "-1.5");
  assert_eq!(serialize(1e300), "1e300");
  assert_eq!(serialize(f64::NAN), "null");
  assert_eq!(serialize(f64::INFINITY), "null");
  assert_eq!(2.5f32.serialize().collect::<String>(), "2.5");

  for value in [0.1, -123.456, f64::MAX, f64::MIN_POSITIVE, f64::EPSILON] {
    let reparsed = serde_json::from_str::<Value>(&serialize(value)).unwrap();
    assert_eq!(f64::deserialize(&reparsed).unwrap().to_bits(), value.to_bits());
  }

  assert_eq!(f64::deserialize(&serde_json::json!(3)).unwrap().to_bits(), 3.0f64.to_bits());
  assert!(matches!(
    f32::deserialize(&serde_json::json!(1e300)),
    Err(JsonError::InvalidNumber { expected: "f32" })
  ));
  assert!(matches!(
    f64::deserialize(&Value::Null),
    Err(JsonError::TypeMismatch { expected: Type::Number, found: Type::Null })
  ));
}
