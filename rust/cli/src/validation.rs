//! Parsing of user-supplied name lists.

/// Splits a name file into one name per line, trimming each entry and
/// dropping blank lines. Order and duplicates are kept; commas are part of
/// the name.
///
/// # Example
///
/// ```rust
/// # use luckydraw_cli::validation::parse_names;
/// assert_eq!(parse_names("Doe, Jane\n\n Jo \n"), vec!["Doe, Jane", "Jo"]);
/// ```
pub fn parse_names(text: &str) -> Vec<String> {
    split_trimmed(text, &['\n'])
}

/// Inline `--names` form: entries may be separated by commas as well as
/// newlines.
pub fn parse_name_list(text: &str) -> Vec<String> {
    split_trimmed(text, &['\n', ','])
}

fn split_trimmed(text: &str, separators: &[char]) -> Vec<String> {
    text.split(separators)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Names that appear more than once, in first-seen order.
///
/// Winners are tracked by value, so duplicates are reported to the user
/// rather than rejected.
pub fn duplicate_names(names: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut dups = Vec::new();
    for name in names {
        if !seen.insert(name.as_str()) && !dups.contains(name) {
            dups.push(name.clone());
        }
    }
    dups
}
