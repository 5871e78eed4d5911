//! Log-level ranking
//!
//! Sibling instances may each declare a verbosity for the analysis engine.
//! The merged value is the most verbose one, decided by mapping level names
//! to integer ranks where a lower rank means more verbose.

/// Rank returned for names that are not a known level.
pub const UNRANKED: i32 = -1;

/// Map a named log level to its rank. Unknown names are unranked (negative).
///
/// Case-insensitive; lower rank is more verbose and always wins a merge.
pub fn level_rank(name: &str) -> i32 {
    match name.trim().to_ascii_lowercase().as_str() {
        "debug" => 0,
        "info" => 1,
        "warning" => 2,
        "error" => 3,
        "fatal" => 4,
        _ => UNRANKED,
    }
}
