//! File name sanitizing

/// Make `name` safe to use as a single path component
///
/// Keeps ASCII letters, digits, `.`, `_`, and `-`; collapses `..` sequences
/// and strips leading dots so the result can never walk out of its directory
/// or be hidden.
pub fn sanitize_filename(name: &str) -> String {
    let mut out: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    while out.contains("..") {
        out = out.replace("..", ".");
    }

    out.trim_start_matches('.').to_string()
}
