//! Free-text quantity parsing.
//!
//! Requests and pledges carry quantities as informal strings ("50 kg",
//! "100 meals"). Aggregation only needs a magnitude, so the parser strips
//! every non-digit character and reads the remaining run as one base-10
//! integer.

/// Extract the numeric magnitude of a free-text quantity string.
///
/// Total over all inputs: a string without digits parses to 0, as does a
/// digit run too long for `i64`. The stripping is boundary-blind on purpose,
/// so "5 0" parses as 50 and "1,000" as 1000; stored free-text data relies
/// on exactly this behavior.
pub fn parse_quantity(raw: &str) -> i64 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}
