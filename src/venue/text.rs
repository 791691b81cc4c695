//! Text helpers shared by the indexes, the loader and the console

/// Strips one trailing carriage return left behind by CRLF input.
///
/// Stored keys are compared through this so that files with mixed line
/// endings still match what the user types.
pub fn normalize(s: &str) -> &str {
    s.strip_suffix('\r').unwrap_or(s)
}

/// Splits a comma separated category list.
///
/// Surrounding whitespace is trimmed and empty entries are dropped, so both
/// `"Pizza, Italian"` and `"Pizza,Italian"` yield the same list.
pub fn parse_category_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
