use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

/// Deserializes an optional query parameter through `FromStr`, treating an
/// empty string (`?teacher_id=`) as absent.
pub fn deserialize_optional_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "deserialize_optional_from_str")]
        count: Option<u32>,
    }

    #[test]
    fn test_empty_is_none() {
        let p: Params = serde_json::from_str(r#"{"count":""}"#).unwrap();
        assert_eq!(p.count, None);
        let p: Params = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.count, None);
    }

    #[test]
    fn test_value_is_parsed() {
        let p: Params = serde_json::from_str(r#"{"count":" 7 "}"#).unwrap();
        assert_eq!(p.count, Some(7));
        assert!(serde_json::from_str::<Params>(r#"{"count":"x"}"#).is_err());
    }
}
