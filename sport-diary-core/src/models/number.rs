//! Lenient reading of persisted numbers.
//!
//! JSON has no NaN or infinity, so a non-finite `f64` is written as `null`.
//! Required numeric fields read `null` back as zero instead of rejecting the
//! whole record.

use serde::{Deserialize, Deserializer};

pub(crate) fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "null_as_zero")]
        value: f64,
    }

    #[test]
    fn test_null_reads_as_zero() {
        let sample: Sample = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(sample.value, 0.0);
    }

    #[test]
    fn test_numbers_pass_through() {
        let sample: Sample = serde_json::from_str(r#"{"value": 42.5}"#).unwrap();
        assert_eq!(sample.value, 42.5);
    }

    #[test]
    fn test_non_finite_survives_json_as_zero() {
        let json = serde_json::json!({ "value": f64::NAN }).to_string();
        assert_eq!(json, r#"{"value":null}"#);

        let sample: Sample = serde_json::from_str(&json).unwrap();
        assert_eq!(sample.value, 0.0);
    }
}
