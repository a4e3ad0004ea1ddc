use std::str::FromStr;

use yaml_manifest::{Encoder, Mapping, Number, Value};

fn main() {
    let mut data = Mapping::new();
    data.insert("threshold".into(), Value::Number(Number::from_str("0.75").unwrap()));
    data.insert("retries".into(), Value::from(5));
    data.insert("enabled".into(), Value::from("true"));

    let config_map: Value = [
        ("apiVersion", Value::from("v1")),
        ("kind", Value::from("ConfigMap")),
        ("metadata", [("name", "tuning")].into_iter().collect()),
        ("data", Value::Mapping(data)),
    ]
    .into_iter()
    .collect();

    println!("{}", Encoder::new().encode(&config_map).unwrap());
    println!("{}", serde_json::to_string_pretty(&config_map).unwrap());
}
