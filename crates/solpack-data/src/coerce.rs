//! Lenient conversion of raw field text into typed values.
//!
//! Real datasets are patchy: empty fields, stray text in numeric columns and
//! mixed date formats are all common. Nothing here fails; anything that cannot
//! be read is treated as missing.

/// Characters that cannot appear in a body id.
const ID_UNSAFE: [char; 4] = [' ', '/', '(', ')'];

/// Reads a finite number. Empty, unparseable and non-finite text is missing.
pub fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads a boolean flag: `TRUE`, `true` (in any case) and `1` are true,
/// everything else is false.
pub fn parse_flag(raw: &str) -> bool {
    let raw = raw.trim();
    raw.eq_ignore_ascii_case("true") || raw == "1"
}

/// Reads optional text; blank text is missing.
pub fn parse_text(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    (!raw.is_empty()).then_some(raw)
}

/// Turns a display name into a string usable as a body id and as an SVG id
/// by replacing spaces, slashes and parentheses with `-`.
pub fn id_safe(name: &str) -> String {
    name.trim().replace(ID_UNSAFE, "-")
}

/// Reads the discovery year from the last four characters of a date, which
/// covers both `1610` and `7/1/1610` style values.
pub fn discovery_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    let tail_start = raw
        .char_indices()
        .rev()
        .nth(3)
        .map_or(0, |(idx, _)| idx);
    raw[tail_start..].parse().ok()
}
