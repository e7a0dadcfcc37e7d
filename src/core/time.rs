use time::{
    format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime,
    PrimitiveDateTime,
};

pub(crate) fn format_offset(value: OffsetDateTime) -> String {
    value.format(&Rfc3339).unwrap_or_else(|_| value.to_string())
}

/// Backend timestamps are RFC3339 in practice but occasionally arrive without
/// an offset or without fractional seconds.
pub(crate) fn parse_offset_datetime_flexible(raw: &str) -> Option<OffsetDateTime> {
    if let Ok(value) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(value);
    }
    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    ) {
        return Some(value.assume_utc());
    }
    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Some(value.assume_utc());
    }

    None
}

pub(crate) fn deserialize_offset_datetime_flexible<'de, D>(
    deserializer: D,
) -> Result<OffsetDateTime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;
    use serde::Deserialize as _;

    let raw = String::deserialize(deserializer)?;
    parse_offset_datetime_flexible(&raw)
        .ok_or_else(|| D::Error::custom(format!("invalid datetime: {raw}")))
}

pub(crate) fn deserialize_option_offset_datetime_flexible<'de, D>(
    deserializer: D,
) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;
    use serde::Deserialize as _;

    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        Some(value) => parse_offset_datetime_flexible(&value)
            .ok_or_else(|| D::Error::custom(format!("invalid datetime: {value}")))
            .map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_offset_datetime_flexible("2025-01-02T10:20:30Z").expect("rfc3339");
        assert_eq!(parsed.unix_timestamp(), 1735813230);
    }

    #[test]
    fn parses_datetime_without_offset() {
        let parsed = parse_offset_datetime_flexible("2025-01-02T10:20:30").expect("no offset");
        assert_eq!(format_offset(parsed), "2025-01-02T10:20:30Z");
    }

    #[test]
    fn parses_datetime_with_fractional_seconds() {
        let parsed =
            parse_offset_datetime_flexible("2025-01-02T10:20:30.123").expect("fractional");
        assert_eq!(parsed.millisecond(), 123);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_offset_datetime_flexible("not-a-date").is_none());
    }
}
