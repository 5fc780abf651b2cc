//! Root element the client mounts on.

/// `<div id="app" data-page="…"></div>` with the page JSON attribute-escaped.
pub fn render_app(page_json: &str) -> String {
    format!(
        r#"<div id="app" data-page="{}"></div>"#,
        html_escape::encode_double_quoted_attribute(page_json)
    )
}
