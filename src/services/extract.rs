//! Fixed-pattern lookups against the router's HTML.
//!
//! Each helper matches exactly one markup shape emitted by the FX2000 admin
//! pages.

const TOKEN_MARKER: &str = "id=\"gSecureToken\" value=\"";
const INPUT_DIV_OPEN: &str = "<div class=\"input\"";
const DIV_CLOSE: &str = "</div>";

/// Find the login token in `id="gSecureToken" value="<token>"`.
///
/// Returns the first non-empty value.
pub fn find_secure_token(body: &str) -> Option<&str> {
    body.match_indices(TOKEN_MARKER).find_map(|(pos, _)| {
        let rest = &body[pos + TOKEN_MARKER.len()..];
        let end = rest.find('"')?;
        (end > 0).then(|| &rest[..end])
    })
}

/// Find the text of the first `<div class="input" id="<id>">text</div>`.
///
/// At least one whitespace character must separate the class and id
/// attributes. The text may not contain `<` and is returned trimmed.
pub fn find_labeled_value<'a>(body: &'a str, id: &str) -> Option<&'a str> {
    let id_attr = format!("id=\"{id}\">");

    body.match_indices(INPUT_DIV_OPEN).find_map(|(pos, _)| {
        let rest = &body[pos + INPUT_DIV_OPEN.len()..];
        let attrs = rest.trim_start();
        if attrs.len() == rest.len() {
            return None;
        }

        let inner = attrs.strip_prefix(id_attr.as_str())?;
        let end = inner.find('<')?;
        if end == 0 || !inner[end..].starts_with(DIV_CLOSE) {
            return None;
        }
        Some(inner[..end].trim())
    })
}
