pub(crate) fn normalize_unit_number(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Statuses are display-only, so they are canonicalized to `UPPER_SNAKE` and defaulted.
pub(crate) fn normalize_status(value: Option<&str>) -> String {
    let collapsed = value
        .map(|raw| raw.split_whitespace().collect::<Vec<_>>().join("_"))
        .unwrap_or_default();

    if collapsed.is_empty() {
        "ACTIVE".to_string()
    } else {
        collapsed.to_ascii_uppercase()
    }
}

pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "no" | "n" => Some(false),
        "true" | "1" | "yes" | "y" => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_numbers_lose_stray_whitespace_and_bom() {
        assert_eq!(normalize_unit_number("\u{feff} Unit   104 "), "Unit 104");
    }

    #[test]
    fn statuses_are_upper_snake_with_default() {
        assert_eq!(normalize_status(Some("in  shop")), "IN_SHOP");
        assert_eq!(normalize_status(Some("active")), "ACTIVE");
        assert_eq!(normalize_status(Some("   ")), "ACTIVE");
        assert_eq!(normalize_status(None), "ACTIVE");
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("YES"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
