use std::io;
use std::io::ErrorKind;

use markdown::{CompileOptions, Options};

/// Tags every code block with the configured syntax theme so the stylesheet
/// for that theme can target it.
pub fn apply_highlight_theme(html: &str, theme: &str) -> String {
    html.replace("<pre>", &format!(r#"<pre class="highlight" data-theme="{}">"#, theme))
}

/// GFM with raw HTML kept as written, HTML comments included.
pub fn render_markdown(md_text: &str, highlight_theme: &str) -> io::Result<String> {
    let options = Options {
        compile: CompileOptions {
            allow_dangerous_html: true,
            ..CompileOptions::gfm()
        },
        ..Options::gfm()
    };

    match markdown::to_html_with_options(md_text, &options) {
        Ok(html) => Ok(apply_highlight_theme(&html, highlight_theme)),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use crate::content::front_matter::split_front_matter;
    use crate::test_data::POST_HELLO_WORLD;

    use super::*;

    #[test]
    fn test_render_markdown_with_theme() {
        let (_, body) = split_front_matter(POST_HELLO_WORLD).unwrap();
        let html = render_markdown(body, "github-dark").unwrap();
        assert!(html.contains("<p>Welcome to the new site.</p>"));
        assert!(html.contains("<!-- note to self: add a photo -->"));
        assert!(!html.contains("&lt;!--"));
        assert!(html.contains(r#"<pre class="highlight" data-theme="github-dark"><code class="language-rust">"#));
    }

    #[test]
    fn test_gfm_extensions() {
        let html = render_markdown("~~old~~ new", "github-dark").unwrap();
        assert!(html.contains("<p><del>old</del> new</p>"));
    }

    #[test]
    fn test_comments_in_code_are_kept() {
        let html = render_markdown("```html\n<!-- header -->\n<div></div>\n```\n", "github-dark").unwrap();
        assert!(html.contains("&lt;!-- header --&gt;\n&lt;div&gt;&lt;/div&gt;"));

        let html = render_markdown("Use `<!--` to open a comment.", "github-dark").unwrap();
        assert!(html.contains("<p>Use <code>&lt;!--</code> to open a comment.</p>"));
    }
}
