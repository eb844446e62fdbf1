use std::env;
use std::fs;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use uuid::Uuid;

const DEFAULT_INPUT: &str = "./roomdata.json";
const DEFAULT_OUTPUT: &str = "./roomdata-ids.json";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.iter().skip(1).any(|a| a == "-h" || a == "--help") {
        println!("Usage: room-ids [input.json] [output.json]");
        println!("Defaults: {DEFAULT_INPUT} -> {DEFAULT_OUTPUT}");
        return Ok(());
    }
    let input = args.get(1).map(String::as_str).unwrap_or(DEFAULT_INPUT);
    let output = args.get(2).map(String::as_str).unwrap_or(DEFAULT_OUTPUT);

    println!("Reading file: {input}");
    let txt = fs::read_to_string(input).with_context(|| format!("Error reading file {input}"))?;
    let mut doc: Value =
        serde_json::from_str(&txt).with_context(|| format!("Error parsing JSON in {input}"))?;

    let assigned = assign_ids(&mut doc, || Uuid::new_v4().to_string())?;

    let pretty = serde_json::to_string_pretty(&doc)?;
    fs::write(output, pretty).with_context(|| format!("Error writing file {output}"))?;
    println!("File successfully written to {output} ({assigned} rooms)");
    Ok(())
}

/// Overwrite the `id` of every object in the top-level `rooms` array.
/// Existing ids are replaced; every other field is kept as-is.
fn assign_ids(doc: &mut Value, mut next_id: impl FnMut() -> String) -> Result<usize> {
    let Some(rooms) = doc.get_mut("rooms").and_then(Value::as_array_mut) else {
        bail!("Invalid file format: \"rooms\" array not found.");
    };
    let mut assigned = 0;
    for room in rooms.iter_mut() {
        if let Some(obj) = room.as_object_mut() {
            obj.insert("id".to_string(), Value::String(next_id()));
            assigned += 1;
        }
    }
    Ok(assigned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn counter() -> impl FnMut() -> String {
        let mut n = 0;
        move || {
            n += 1;
            format!("id-{n}")
        }
    }

    #[test]
    fn replaces_existing_ids_and_keeps_other_fields() {
        let mut doc = json!({
            "version": 2,
            "rooms": [
                { "id": "old", "name": "Library", "chess": "Rook" },
                { "name": "Parlor" }
            ]
        });
        assert_eq!(assign_ids(&mut doc, counter()).unwrap(), 2);
        assert_eq!(doc["rooms"][0]["id"], "id-1");
        assert_eq!(doc["rooms"][0]["chess"], "Rook");
        assert_eq!(doc["rooms"][1]["id"], "id-2");
        assert_eq!(doc["version"], 2);
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let mut doc = json!({ "rooms": [ 1, { "name": "Hall" } ] });
        assert_eq!(assign_ids(&mut doc, counter()).unwrap(), 1);
        assert_eq!(doc["rooms"][0], 1);
        assert_eq!(doc["rooms"][1]["id"], "id-1");
    }

    #[test]
    fn missing_rooms_array_is_an_error() {
        let mut doc = json!({ "rooms": "none" });
        let err = assign_ids(&mut doc, counter()).unwrap_err();
        assert!(err.to_string().contains("\"rooms\" array not found"));
    }

    #[test]
    fn generated_ids_are_unique_uuids() {
        let mut doc = json!({ "rooms": [ {}, {} ] });
        assign_ids(&mut doc, || Uuid::new_v4().to_string()).unwrap();
        let a = doc["rooms"][0]["id"].as_str().unwrap();
        let b = doc["rooms"][1]["id"].as_str().unwrap();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a).is_ok());
    }
}
