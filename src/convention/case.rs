//! Identifier to URL-segment case conversion.
//!
//! Follows go-strcase `KebabCase`, which existing route tables were derived
//! with. Only ASCII letters take part in word splitting and lowercasing;
//! digits never start a word (`Md5Hash` → `md5hash`).

fn is_delimiter(c: char) -> bool {
    matches!(c, '-' | '_' | ' ')
}

/// Converts an identifier such as `OnlyMethod` or `HTTPServer` into a
/// lowercase, hyphen-separated segment (`only-method`, `http-server`).
///
/// A capital starts a new word after a lowercase letter, or when it is the
/// last capital of an acronym followed by a lowercase letter. Runs of `-`,
/// `_` or space become one `-`; a delimiter in last position is kept as is.
pub fn kebab_case(ident: &str) -> String {
    let chars: Vec<char> = ident.trim().chars().collect();
    let mut out = String::with_capacity(chars.len() + 3);

    for (i, &c) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let is_last = next.is_none();

        if is_delimiter(c) && !is_last {
            if !prev.is_some_and(is_delimiter) {
                out.push('-');
            }
            continue;
        }

        if c.is_ascii_uppercase() {
            let after_lower = prev.is_some_and(|p| p.is_ascii_lowercase());
            let acronym_end = prev.is_some_and(|p| p.is_ascii_uppercase())
                && next.is_some_and(|n| n.is_ascii_lowercase());
            if after_lower || acronym_end {
                out.push('-');
            }
        }

        out.push(c.to_ascii_lowercase());
    }

    out
}
