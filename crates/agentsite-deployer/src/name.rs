//! Project name sanitization.

/// Longest project name the platform accepts.
const MAX_NAME_LEN: usize = 63;

/// Normalize a project name to the platform's `[a-z0-9-]` constraint.
///
/// Lowercases, maps every other character to `-`, collapses dash runs,
/// strips edge dashes, and truncates to 63 characters. Truncation can land
/// on a dash, so the trailing strip runs once more afterwards; the function
/// is idempotent.
pub fn sanitize_project_name(name: &str) -> String {
    let mut collapsed = String::with_capacity(name.len());
    let mut prev_dash = false;
    for c in name.chars() {
        let c = c.to_ascii_lowercase();
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            c
        } else {
            '-'
        };
        if c == '-' {
            if !prev_dash {
                collapsed.push('-');
            }
            prev_dash = true;
        } else {
            collapsed.push(c);
            prev_dash = false;
        }
    }

    let trimmed = collapsed.trim_matches('-');
    let truncated: String = trimmed.chars().take(MAX_NAME_LEN).collect();
    truncated.trim_end_matches('-').to_string()
}
