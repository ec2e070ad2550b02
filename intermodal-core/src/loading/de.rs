use serde::Deserialize;

/// Parse a boolean column, accepting the spellings of common database exports
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "" | "0" | "f" | "F" | "false" | "False" | "FALSE" | "n" | "no" => Some(false),
        "1" | "t" | "T" | "true" | "True" | "TRUE" | "y" | "yes" => Some(true),
        _ => None,
    }
}

pub(super) fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagRepr {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match FlagRepr::deserialize(deserializer)? {
        FlagRepr::Bool(value) => Ok(value),
        FlagRepr::Int(value) => Ok(value != 0),
        FlagRepr::Text(text) => parse_flag(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid boolean '{text}'"))),
    }
}

/// Parse a nullable id column. Empty text and null mean no id; integers are
/// accepted as written or as text.
pub(super) fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Int(i64),
        Text(String),
    }

    match Option::<IdRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdRepr::Int(id)) => Ok(Some(id)),
        Some(IdRepr::Text(text)) => match text.trim() {
            "" => Ok(None),
            trimmed => trimmed
                .parse::<i64>()
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid id '{trimmed}': {e}"))),
        },
    }
}
