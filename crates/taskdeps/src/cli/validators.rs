//! Input validators used as clap value parsers.
//!
//! Each validator returns the cleaned value on success, or a message clap
//! will show to the user on failure. Domain validation rules live in
//! [`crate::domain`]; these wrappers adapt them to clap's
//! `Result<T, String>` shape.

use crate::domain;

/// Validate a task title argument.
///
/// Returns the trimmed title.
pub fn validate_title(s: &str) -> Result<String, String> {
    domain::validate_title(s)?;
    Ok(s.trim().to_string())
}

/// Validate a project name argument.
///
/// Returns the trimmed name.
pub fn validate_project_name(s: &str) -> Result<String, String> {
    domain::validate_project_name(s)?;
    Ok(s.trim().to_string())
}

/// Validate a project color argument (`#rrggbb`).
pub fn validate_color(s: &str) -> Result<String, String> {
    domain::validate_color(s)?;
    Ok(s.to_string())
}

/// Validate a numeric id argument. Ids are positive integers.
pub fn validate_id(s: &str) -> Result<u64, String> {
    let id: u64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid numeric id"))?;
    if id == 0 {
        return Err("Ids start at 1".to_string());
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn title_is_trimmed() {
        assert_eq!(validate_title("  fix the build  ").unwrap(), "fix the build");
    }

    #[test]
    fn empty_title_is_rejected() {
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn overlong_title_is_rejected() {
        let long = "x".repeat(201);
        assert!(validate_title(&long).is_err());
    }

    #[rstest]
    #[case::simple("1", 1)]
    #[case::large("9001", 9001)]
    fn valid_ids(#[case] input: &str, #[case] expected: u64) {
        assert_eq!(validate_id(input).unwrap(), expected);
    }

    #[rstest]
    #[case::zero("0")]
    #[case::negative("-3")]
    #[case::text("abc")]
    #[case::empty("")]
    fn invalid_ids(#[case] input: &str) {
        assert!(validate_id(input).is_err());
    }

    #[test]
    fn color_round_trips() {
        assert_eq!(validate_color("#2196f3").unwrap(), "#2196f3");
        assert!(validate_color("blue").is_err());
    }

    #[test]
    fn project_name_is_trimmed() {
        assert_eq!(validate_project_name(" Work ").unwrap(), "Work");
    }
}
