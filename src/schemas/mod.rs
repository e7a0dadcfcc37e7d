pub(crate) mod attempt;
pub(crate) mod enrollment;
pub(crate) mod module;
pub(crate) mod quiz;
pub(crate) mod user;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Backend references are sometimes populated objects and sometimes bare id
/// strings; either way only the id matters client-side.
pub(crate) fn deserialize_id_ref<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(id) => Ok(id),
        Value::Object(map) => map
            .get("_id")
            .or_else(|| map.get("id"))
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| D::Error::custom("reference object missing _id")),
        other => Err(D::Error::custom(format!("invalid reference: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "super::deserialize_id_ref")]
        module: String,
    }

    #[test]
    fn id_ref_accepts_bare_string() {
        let holder: Holder = serde_json::from_value(serde_json::json!({"module": "m1"})).unwrap();
        assert_eq!(holder.module, "m1");
    }

    #[test]
    fn id_ref_accepts_populated_object() {
        let holder: Holder =
            serde_json::from_value(serde_json::json!({"module": {"_id": "m2", "title": "Algebra"}}))
                .unwrap();
        assert_eq!(holder.module, "m2");
    }
}
