use alloc::string::String;

use crate::{Value, JsonError, Type, JsonDeserialize, JsonSerialize};

impl JsonDeserialize for String {
  fn deserialize(value: &Value) -> Result<Self, JsonError> {
    value.as_str().map(Into::into).ok_or_else(|| JsonError::type_mismatch(Type::String, value))
  }
}

impl JsonDeserialize for char {
  /// A `char` is represented as a string of exactly one character.
  fn deserialize(value: &Value) -> Result<Self, JsonError> {
    let str = value.as_str().ok_or_else(|| JsonError::type_mismatch(Type::String, value))?;
    let mut chars = str.chars();
    match (chars.next(), chars.next()) {
      (Some(char), None) => Ok(char),
      _ => Err(JsonError::LengthMismatch { expected: 1, found: str.chars().count() }),
    }
  }
}

/// Escape characters for use within a JSON string.
///
/// `"`, `\`, and control characters are escaped. All other characters, including non-ASCII
/// characters, are yielded as-is.
struct CharIterator<I: Iterator<Item = char>> {
  iter: I,
  buf: [char; 6],
  queued: usize,
}
impl<I: Iterator<Item = char>> Iterator for CharIterator<I> {
  type Item = char;
  fn next(&mut self) -> Option<Self::Item> {
    // If we don't have a character in progress, fetch the next character
    if self.queued == 0 {
      let char = self.iter.next()?;

      match u32::from(char) {
        // Unescaped
        0x20 ..= 0x21 | 0x23 ..= 0x5b | 0x5d ..= 0x10ffff => {
          self.buf[5] = char;
          self.queued = 1;
        }
        // Escaped with a short form
        0x08 | 0x09 | 0x0a | 0x0c | 0x0d | 0x22 | 0x5c => {
          self.buf[4] = '\\';
          self.buf[5] = match char {
            '\u{8}' => 'b',
            '\t' => 't',
            '\n' => 'n',
            '\u{c}' => 'f',
            '\r' => 'r',
            // `"` and `\` are their own aliases
            _ => char,
          };
          self.queued = 2;
        }
        // The remaining control characters, escaped as `\u00XX`
        code => {
          self.buf = ['\\', 'u', '0', '0', '0', '0'];
          for (i, shift) in [(4, 4), (5, 0)] {
            let nibble = (code >> shift) & 0b1111;
            self.buf[i] = char::from_digit(nibble, 16).unwrap_or('0');
          }
          self.queued = 6;
        }
      }
    }

    // Yield the next character queued
    let res = self.buf[6 - self.queued];
    self.queued -= 1;
    Some(res)
  }
}

/// Quote a sequence of characters as a JSON string.
fn quote(chars: impl Iterator<Item = char>) -> impl Iterator<Item = char> {
  core::iter::once('"')
    .chain(CharIterator { iter: chars, buf: ['\\', 'u', '0', '0', '0', '0'], queued: 0 })
    .chain(core::iter::once('"'))
}

impl JsonSerialize for str {
  fn serialize(&self) -> impl Iterator<Item = char> {
    quote(self.chars())
  }
}

impl JsonSerialize for String {
  fn serialize(&self) -> impl Iterator<Item = char> {
    self.as_str().serialize()
  }
}

impl JsonSerialize for char {
  fn serialize(&self) -> impl Iterator<Item = char> {
    quote(core::iter::once(*self))
  }
}

#[test]
fn escaping() {
  let serialize = |str: &str| str.serialize().collect::<String>();
  assert_eq!(serialize(""), r#""""#);
  assert_eq!(serialize("abc"), r#""abc""#);
  assert_eq!(serialize(r#"a "quoted" \ path/"#), r#""a \"quoted\" \\ path/""#);
  assert_eq!(serialize("line\nbreak\ttab\r\u{8}\u{c}"), r#""line\nbreak\ttab\r\b\f""#);
  assert_eq!(serialize("\u{0}\u{1f}"), r#""\u0000\u001f""#);
  assert_eq!(serialize("\u{7f}"), "\"\u{7f}\"");
  assert_eq!(serialize("snowman ☃ 𝄞"), "\"snowman ☃ 𝄞\"");

  for str in ["", "plain", "\"\\\u{0}\u{1}\n", "mixed ☃ \u{1b}[0m \u{10ffff}"] {
    let json = serialize(str);
    assert_eq!(serde_json::from_str::<String>(&json).unwrap(), str);
    assert_eq!(String::deserialize(&serde_json::from_str(&json).unwrap()).unwrap(), str);
  }
}

#[test]
fn chars() {
  assert_eq!('a'.serialize().collect::<String>(), r#""a""#);
  assert_eq!('"'.serialize().collect::<String>(), r#""\"""#);
  assert_eq!(char::deserialize(&Value::from("☃")).unwrap(), '☃');
  assert!(matches!(
    char::deserialize(&Value::from("ab")),
    Err(JsonError::LengthMismatch { expected: 1, found: 2 })
  ));
  assert!(matches!(char::deserialize(&Value::from(1)), Err(JsonError::TypeMismatch { .. })));
}
