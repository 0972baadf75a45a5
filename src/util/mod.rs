/// URL slug sanitization shared by every add/edit path:
/// lowercase, whitespace runs become a single hyphen, everything outside
/// `[a-z0-9-]` is dropped.
pub(crate) fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            pending_hyphen = !out.is_empty();
            continue;
        }

        for lower in ch.to_lowercase() {
            if lower.is_ascii_alphanumeric() || lower == '-' {
                if pending_hyphen {
                    out.push('-');
                    pending_hyphen = false;
                }
                out.push(lower);
            }
        }
    }

    out
}
