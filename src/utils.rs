use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Lowercase slug: alphanumerics kept, everything else folds to
/// single dashes.
pub fn slugify(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.trim().to_lowercase().chars() {
        if c.is_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

/// Case-insensitive containment.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

/// Accepts RFC 3339, naive ISO date-times, `YYYY-MM-DD` and `DD/MM/YYYY`.
/// Naive values are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Backend Engineer - Acme"), "backend-engineer-acme");
        assert_eq!(slugify("  Ingeniería de Datos!! "), "ingeniería-de-datos");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_contains_ci() {
        assert!(contains_ci("Santiago, Chile", "chile"));
        assert!(contains_ci("Santiago, Chile", " SANTIAGO "));
        assert!(!contains_ci("Lima, Perú", "chile"));
    }

    #[test]
    fn test_parse_timestamp() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-05T00:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-05T00:00:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-05"), Some(expected));
        assert_eq!(parse_timestamp("05/03/2024"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-03-05T03:00:00+03:00"),
            Some(expected)
        );
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
