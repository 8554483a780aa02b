use named_json_serde_json_tests::{Sample, random_sample, expected_value};

fn main() {
  // Generate an array of samples which will be ~64 MB once serialized
  let mut array = vec![];
  let mut len = 0;
  while len < (64 * 1024 * 1024) {
    let sample = random_sample(0);
    len += named_json::to_json(&sample).len();
    array.push(sample);
  }
  let values = serde_json::Value::Array(array.iter().map(expected_value).collect());

  {
    let start = std::time::Instant::now();
    let _ = core::hint::black_box(serde_json::to_string(&values).unwrap());
    println!("serde_json took {}ms to serialize a 64 MB object array", start.elapsed().as_millis());
  }

  {
    let start = std::time::Instant::now();
    let _ = core::hint::black_box(named_json::to_json(&array));
    println!(
      "named-json took {}ms to serialize a 64 MB structure array",
      start.elapsed().as_millis()
    );
  }

  let serialization = named_json::to_json(&array);

  {
    let start = std::time::Instant::now();
    let _ =
      core::hint::black_box(serde_json::from_str::<serde_json::Value>(&serialization).unwrap());
    println!(
      "serde_json took {}ms to deserialize a 64 MB object array",
      start.elapsed().as_millis()
    );
  }

  {
    let start = std::time::Instant::now();
    let _ = core::hint::black_box(named_json::from_json::<Vec<Sample>>(&serialization).unwrap());
    println!(
      "named-json took {}ms to deserialize a 64 MB structure array",
      start.elapsed().as_millis()
    );
  }
}
