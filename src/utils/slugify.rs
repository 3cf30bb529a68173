//! Filename token normalization.

/// Token used when a value is JSON `null`.
pub const NONE_TOKEN: &str = "none";

/// Token used when a value sanitizes to nothing.
pub const EMPTY_TOKEN: &str = "empty";

/// Normalize a value for use as one `_`-separated token of a file name.
///
/// Lowercases, turns `_` and every character outside `[a-z0-9-]` into `-`,
/// collapses repeated hyphens and strips them from both ends. Underscores
/// therefore only ever appear between tokens, never inside one.
pub fn sanitize_filename_token(value: Option<&str>) -> String {
    let Some(value) = value else {
        return NONE_TOKEN.to_string();
    };

    let lowered = value.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut prev_was_dash = false;

    for ch in lowered.chars() {
        let c = match ch {
            'a'..='z' | '0'..='9' => ch,
            _ => '-',
        };

        if c == '-' {
            if out.is_empty() || prev_was_dash {
                continue;
            }
            prev_was_dash = true;
        } else {
            prev_was_dash = false;
        }
        out.push(c);
    }

    while out.ends_with('-') {
        out.pop();
    }

    if out.is_empty() {
        EMPTY_TOKEN.to_string()
    } else {
        out
    }
}
