use std::collections::BTreeMap;

use rand_core::{RngCore, OsRng};
use serde_json::{Map, Value};

use named_json::{Named, field_names};
use named_json_derive::Structure;

field_names! {
  pub Id = "id", required;
  pub Label = "label";
  pub Score = "score";
  pub Delta = "delta";
  pub Flags = "flags";
  pub Tags = "tags";
  pub Parent = "parent";
  pub Children = "children";
}

/// A recursive structure exercising every kind of value.
#[derive(Clone, PartialEq, Debug, Default, Structure)]
pub struct Sample {
  pub id: Named<Id, u64>,
  pub label: Named<Label, String>,
  pub score: Named<Score, f64>,
  pub delta: Named<Delta, i32>,
  pub flags: Named<Flags, Vec<bool>>,
  pub tags: Named<Tags, BTreeMap<String, i64>>,
  pub parent: Named<Parent, Option<Box<Sample>>>,
  pub children: Named<Children, Vec<Sample>>,
}

#[allow(clippy::cast_possible_truncation)]
pub fn random_string() -> String {
  let mut res = String::new();
  for _ in 0 .. (OsRng.next_u64() % 32) {
    if (OsRng.next_u64() % 2) == 1 {
      // ASCII, including the control characters
      res.push(char::from_u32((OsRng.next_u64() % 128) as u32).unwrap());
    } else {
      // Unicode
      res.push(loop {
        if let Some(char) = char::from_u32(OsRng.next_u64() as u32) {
          if char.is_ascii() {
            continue;
          }
          break char;
        }
      });
    }
  }
  res
}

pub fn random_f64() -> f64 {
  loop {
    let float = f64::from_bits(OsRng.next_u64());
    // Non-finite values are serialized as `null`, which doesn't deserialize back to an `f64`
    if float.is_finite() {
      break float;
    }
  }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn random_sample(depth: usize) -> Sample {
  // Only recurse for the first few levels, so the sample remains reasonably sized
  let recurse = (depth < 3) && ((OsRng.next_u64() % 2) == 1);
  Sample {
    id: OsRng.next_u64().into(),
    label: random_string().into(),
    score: random_f64().into(),
    delta: (OsRng.next_u32() as i32).into(),
    flags: (0 .. (OsRng.next_u64() % 8))
      .map(|_| (OsRng.next_u64() % 2) == 1)
      .collect::<Vec<_>>()
      .into(),
    tags: (0 .. (OsRng.next_u64() % 4))
      .map(|_| (random_string(), OsRng.next_u64() as i64))
      .collect::<BTreeMap<_, _>>()
      .into(),
    parent: recurse.then(|| Box::new(random_sample(depth + 1))).into(),
    children: (0 .. if recurse { OsRng.next_u64() % 3 } else { 0 })
      .map(|_| random_sample(depth + 1))
      .collect::<Vec<_>>()
      .into(),
  }
}

/// Build the `Value` a `Sample` is expected to serialize as, without `named-json`.
pub fn expected_value(sample: &Sample) -> Value {
  let mut object = Map::new();
  object.insert("id".to_string(), Value::from(*sample.id));
  object.insert("label".to_string(), Value::from(sample.label.as_str()));
  object.insert("score".to_string(), Value::from(*sample.score));
  object.insert("delta".to_string(), Value::from(*sample.delta));
  object.insert("flags".to_string(), Value::from(sample.flags.to_vec()));
  let tags = sample.tags.iter().map(|(key, value)| (key.clone(), Value::from(*value)));
  object.insert("tags".to_string(), Value::Object(tags.collect()));
  let parent = sample.parent.as_deref().map_or(Value::Null, expected_value);
  object.insert("parent".to_string(), parent);
  let children = sample.children.iter().map(expected_value);
  object.insert("children".to_string(), Value::Array(children.collect()));
  Value::Object(object)
}

fn whitespace() -> &'static str {
  ["", " ", "\t", "\n", "\r\n", "  "][usize::try_from(OsRng.next_u64() % 6).unwrap()]
}

/// Serialize a `Value` with its objects' keys in a random order and random whitespace between
/// tokens.
pub fn serialize_permuted(value: &Value) -> String {
  let mut res = whitespace().to_string();
  match value {
    Value::Array(array) => {
      res.push('[');
      for (i, value) in array.iter().enumerate() {
        if i != 0 {
          res.push(',');
        }
        res.push_str(&serialize_permuted(value));
      }
      res.push_str(whitespace());
      res.push(']');
    }
    Value::Object(object) => {
      let mut entries = object.iter().collect::<Vec<_>>();
      // Fisher-Yates
      for i in (1 .. entries.len()).rev() {
        let j = usize::try_from(OsRng.next_u64() % (u64::try_from(i).unwrap() + 1)).unwrap();
        entries.swap(i, j);
      }
      res.push('{');
      for (i, (key, value)) in entries.into_iter().enumerate() {
        if i != 0 {
          res.push(',');
        }
        res.push_str(whitespace());
        res.push_str(&Value::from(key.as_str()).to_string());
        res.push_str(whitespace());
        res.push(':');
        res.push_str(&serialize_permuted(value));
      }
      res.push_str(whitespace());
      res.push('}');
    }
    _ => res.push_str(&value.to_string()),
  }
  res.push_str(whitespace());
  res
}

#[cfg(test)]
mod tests {
  use named_json::{JsonError, Structure, to_json, from_json, from_slice, from_value};
  use super::*;

  #[test]
  fn differential() {
    for i in 0 .. 100 {
      dbg!(i);
      let sample = random_sample(0);
      let json = to_json(&sample);

      // The serialization is compact and leads with the first declared field
      assert!(json.starts_with(r#"{"id":"#), "{json}");
      assert_eq!(serde_json::from_str::<Value>(&json).unwrap().to_string().len(), json.len());

      assert_eq!(serde_json::from_str::<Value>(&json).unwrap(), expected_value(&sample));
      assert_eq!(from_json::<Sample>(&json).unwrap(), sample);
      assert_eq!(from_slice::<Sample>(json.as_bytes()).unwrap(), sample);
    }
  }

  #[test]
  fn permuted() {
    for _ in 0 .. 100 {
      let sample = random_sample(0);
      let json = serialize_permuted(&expected_value(&sample));
      assert_eq!(from_json::<Sample>(&json).unwrap(), sample, "{json}");
    }
  }

  #[test]
  fn missing_fields() {
    let defaults = expected_value(&Sample::default());
    for _ in 0 .. 10 {
      let sample = random_sample(0);
      let expected = expected_value(&sample);
      for name in Sample::FIELDS {
        let mut object = expected.as_object().unwrap().clone();
        object.remove(*name);
        let result = from_value::<Sample>(&Value::Object(object));

        if *name == "id" {
          assert!(matches!(result, Err(JsonError::MissingField("id"))));
          continue;
        }
        let mut reference = expected.clone();
        reference[*name] = defaults[*name].clone();
        assert_eq!(expected_value(&result.unwrap()), reference);
      }
    }
  }

  #[test]
  fn unknown_keys() {
    for _ in 0 .. 100 {
      let sample = random_sample(0);
      let mut value = expected_value(&sample);
      let object = value.as_object_mut().unwrap();
      for _ in 0 .. (OsRng.next_u64() % 4) {
        let key = random_string();
        if Sample::FIELDS.iter().any(|field| *field == key) {
          continue;
        }
        object.insert(key, expected_value(&random_sample(2)));
      }
      assert_eq!(from_json::<Sample>(&serialize_permuted(&value)).unwrap(), sample);
    }
  }

  #[test]
  fn strings() {
    for _ in 0 .. 1000 {
      let string = random_string();
      let json = to_json(&string);
      // Escaping matches `serde_json` exactly
      assert_eq!(json, Value::from(string.as_str()).to_string());
      assert_eq!(from_json::<String>(&json).unwrap(), string);
    }
  }

  #[test]
  fn floats() {
    for _ in 0 .. 1000 {
      let float = random_f64();
      let json = to_json(&float);
      assert_eq!(serde_json::from_str::<f64>(&json).unwrap().to_bits(), float.to_bits());
      assert_eq!(from_json::<f64>(&json).unwrap().to_bits(), float.to_bits());
    }
  }
}
