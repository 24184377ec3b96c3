use pulldown_cmark::{html, Options, Parser};
use ammonia::{Builder, UrlRelative};

/// Converts Markdown content to sanitized HTML to prevent XSS attacks.
pub fn safe_markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let parser = Parser::new_ext(markdown, options);

    let mut raw_html = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut raw_html, parser);

    sanitize_html(&raw_html)
}

/// Strips scripts, event handlers and relative links from rendered HTML.
pub fn sanitize_html(content: &str) -> String {
    Builder::default()
        .link_rel(Some("nofollow noopener noreferrer"))
        .url_relative(UrlRelative::Deny)
        .clean(content)
        .to_string()
}
