use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::BlogEntry;
use crate::text_utils::format_date_time;

#[derive(ramhorns::Content)]
pub(crate) struct ViewTag<'a> {
    pub(crate) tag: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewEntry<'a> {
    title: &'a str,
    dated: bool,
    date: String,
    tags: Vec<ViewTag<'a>>,
    categories: Vec<ViewTag<'a>>,
    content: &'a str,
    highlight_theme: &'a str,
}

pub(crate) fn view_tags(labels: &Option<Vec<String>>) -> Vec<ViewTag<'_>> {
    labels.iter()
        .flatten()
        .map(|t| ViewTag { tag: t.as_str() })
        .collect()
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer<'_>> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post view template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
        })
    }

    /// `content` is the entry body already rendered to HTML.
    pub fn render(&self, entry: &BlogEntry, content: &str, highlight_theme: &str) -> String {
        let date = entry.date.as_ref()
            .map(|dt| format_date_time(dt).0)
            .unwrap_or_default();

        self.template.render(&ViewEntry {
            title: entry.title.as_str(),
            dated: entry.date.is_some(),
            date,
            tags: view_tags(&entry.tags),
            categories: view_tags(&entry.categories),
            content,
            highlight_theme,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    use crate::content::Slug;
    use crate::view::DEFAULT_POST_TEMPLATE;

    use super::*;

    fn entry(dated: bool) -> BlogEntry {
        BlogEntry {
            file_path: PathBuf::from("hello.md"),
            slug: Slug("hello".to_string()),
            title: "<Hello>".to_string(),
            date: dated.then(|| NaiveDateTime::new(
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveTime::from_hms_opt(3, 4, 5).unwrap(),
            )),
            draft: false,
            tags: Some(vec!["<rust>".to_string(), "web".to_string()]),
            categories: None,
            body: String::new(),
        }
    }

    #[test]
    fn render_view() {
        let template_src = "TITLE=[{{title}}]\nDATE=[{{date}}]\nTAGS=[{{#tags}}({{tag}}){{/tags}}]\nCATS=[{{#categories}}({{tag}}){{/categories}}]\nTHEME=[{{highlight_theme}}]\nCONTENT=[{{{content}}}]";
        let post_renderer = PostRenderer::new(template_src).unwrap();
        let res = post_renderer.render(&entry(true), "<p>body</p>", "github-dark");
        assert_eq!(res, "TITLE=[&lt;Hello&gt;]\nDATE=[2024-01-02]\nTAGS=[(&lt;rust&gt;)(web)]\nCATS=[]\nTHEME=[github-dark]\nCONTENT=[<p>body</p>]");
    }

    #[test]
    fn render_undated_with_default_template() {
        let post_renderer = PostRenderer::new(DEFAULT_POST_TEMPLATE).unwrap();
        let res = post_renderer.render(&entry(false), "<p>body</p>", "github-dark");
        assert!(!res.contains("<time"));
        assert!(res.contains("<h1>&lt;Hello&gt;</h1>"));
        assert!(res.contains("/public/highlight/github-dark.css"));
        assert!(res.contains("<p>body</p>"));
    }
}
