//! Casing conversions for generated file names.
//!
//! Some generator targets rename output files (the Go target uses lower
//! underscore, though not consistently), so candidate grammar names have to
//! be compared under several casing conventions.

use std::sync::LazyLock;

use regex::Regex;

static UPPER_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)(\p{Lu})").expect("valid pattern"));

/// Converts the given string to lower underscore casing.
pub fn to_lower_underscore(s: &str) -> String {
    UPPER_BOUNDARY
        .replace_all(s, "${1}_${2}")
        .to_lowercase()
}
