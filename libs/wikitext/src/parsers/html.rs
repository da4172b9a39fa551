use pulldown_cmark::{html, Options, Parser};

/// Renders markdown to HTML with the plain CommonMark rule set.
///
/// Nothing is cached and nothing is sanitized beyond what the renderer escapes itself, so callers
/// always get output that matches the current source text.
pub fn render_markdown(md: &str) -> String {
    let parser = Parser::new_ext(md, Options::empty());
    // markdown tends to grow a bit once it's tagged up
    let mut body = String::with_capacity(md.len() + md.len() / 2);
    html::push_html(&mut body, parser);
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_plain_paragraph() {
        assert_eq!(
            render_markdown("Here is some content!!!"),
            "<p>Here is some content!!!</p>\n"
        );
    }

    #[test]
    fn renders_headings_and_emphasis() {
        assert_eq!(
            render_markdown("# Title\n\nsome *emphasis* here"),
            "<h1>Title</h1>\n<p>some <em>emphasis</em> here</p>\n"
        );
    }

    #[test]
    fn escapes_text_but_passes_raw_html_through() {
        assert_eq!(render_markdown("a < b & c"), "<p>a &lt; b &amp; c</p>\n");
        assert_eq!(render_markdown("<div>hi</div>\n"), "<div>hi</div>\n");
    }

    #[test]
    fn leaves_gfm_extensions_alone() {
        assert_eq!(render_markdown("~~gone~~"), "<p>~~gone~~</p>\n");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(render_markdown(""), "");
    }
}
