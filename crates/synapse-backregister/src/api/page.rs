//! HTML page served for every request.

use crate::outcome::Outcome;
use axum::response::{Html, IntoResponse, Response};

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
	<title>Synapse Registration</title>
</head>
<body>
<h1>Synapse Registration</h1>
"#;

const PAGE_FORM: &str = r#"
	<br>
	<form method="POST">
		Username: <br>
		<input type="text" name="Username" /><br>
		Password: <br>
		<input type="password" name="Password" /><br>
		<input type="submit" name="Submit" />
	</form>

</body>
</html>
"#;

/// Render the registration page with an optional notice above the form.
pub fn render_page(notice: Option<&str>) -> String {
    let mut page = String::with_capacity(PAGE_HEAD.len() + PAGE_FORM.len() + 64);
    page.push_str(PAGE_HEAD);
    if let Some(notice) = notice {
        page.push_str("\t<h2>");
        page.push_str(&escape_html(notice));
        page.push_str("</h2>\n");
    }
    page.push_str(PAGE_FORM);
    page
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        (self.status(), Html(render_page(self.notice()))).into_response()
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
