//! Low-level helpers for extracting the JSON payload from a response body.
//!
//! Bodies fetched with a browser request profile can arrive wrapped in a
//! rendering artifact: an HTML page with the JSON inside the first `<pre>`
//! element, lightly entity-escaped. These functions use manual string
//! scanning rather than an HTML parser to stay dependency-light. See
//! [`crate::client`] for how they compose into the fetch path.

/// Extracts the JSON payload from `body`.
///
/// A body that already starts with a JSON value passes through trimmed.
/// Otherwise the content of the first `<pre>` block is returned with HTML
/// entities unescaped. Returns `None` when the body is neither.
#[must_use]
pub(crate) fn extract_json_payload(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Some(trimmed.to_owned());
    }
    extract_pre_block(trimmed).map(unescape_entities)
}

/// Returns the trimmed content of the first `<pre ...>` element, or `None`
/// when no complete block exists. Matching is ASCII case-insensitive so
/// index arithmetic stays valid on the original slice.
fn extract_pre_block(body: &str) -> Option<&str> {
    let lower = body.to_ascii_lowercase();
    let open = lower.find("<pre")?;
    let tag_end = lower[open..].find('>')?;
    let content_start = open + tag_end + 1;
    let close = lower[content_start..].find("</pre")?;
    Some(body[content_start..content_start + close].trim())
}

/// Reverses the entity escaping a renderer applies inside `<pre>` content.
/// `&amp;` is handled last so double-escaped sequences survive one level.
fn unescape_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // extract_json_payload
    // -----------------------------------------------------------------------

    #[test]
    fn plain_object_passes_through() {
        assert_eq!(
            extract_json_payload(r#"{"meta":{"length":3}}"#).as_deref(),
            Some(r#"{"meta":{"length":3}}"#)
        );
    }

    #[test]
    fn plain_array_passes_through() {
        assert_eq!(extract_json_payload("[1,2,3]").as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn leading_whitespace_is_trimmed() {
        assert_eq!(extract_json_payload("\n  [] \n").as_deref(), Some("[]"));
    }

    #[test]
    fn pre_wrapped_payload_is_extracted() {
        let body = "<html><body><pre>{\"id\": 1}</pre></body></html>";
        assert_eq!(extract_json_payload(body).as_deref(), Some("{\"id\": 1}"));
    }

    #[test]
    fn pre_tag_with_attributes() {
        let body = r#"<pre style="word-wrap: break-word;">[{"id": 2}]</pre>"#;
        assert_eq!(extract_json_payload(body).as_deref(), Some(r#"[{"id": 2}]"#));
    }

    #[test]
    fn pre_tag_case_insensitive() {
        let body = "<PRE>[]</PRE>";
        assert_eq!(extract_json_payload(body).as_deref(), Some("[]"));
    }

    #[test]
    fn html_without_pre_returns_none() {
        assert!(extract_json_payload("<html><body>403 Forbidden</body></html>").is_none());
    }

    #[test]
    fn unclosed_pre_returns_none() {
        assert!(extract_json_payload("<pre>{\"id\": 1}").is_none());
    }

    #[test]
    fn empty_body_returns_none() {
        assert!(extract_json_payload("").is_none());
    }

    #[test]
    fn entities_are_unescaped() {
        let body = "<pre>{&quot;title&quot;: &quot;Cars &amp; Trucks&quot;}</pre>";
        assert_eq!(
            extract_json_payload(body).as_deref(),
            Some(r#"{"title": "Cars & Trucks"}"#)
        );
    }

    #[test]
    fn whitespace_inside_pre_is_trimmed() {
        let body = "<pre>\n  [{\"id\": 3}]\n</pre>";
        assert_eq!(extract_json_payload(body).as_deref(), Some("[{\"id\": 3}]"));
    }

    #[test]
    fn extraction_is_stable_on_already_extracted_payload() {
        let body = "<pre>{\"id\": 1}</pre>";
        let once = extract_json_payload(body).unwrap();
        let twice = extract_json_payload(&once).unwrap();
        assert_eq!(once, twice);
    }
}
