use std::collections::HashMap;
use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::BlogEntry;
use crate::text_utils::format_date_time;
use crate::view::post_renderer::ViewTag;

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    post_list: Vec<PostItem<'a>>,
    tags: Vec<ViewTag<'a>>,
    post_count: usize,
}

#[derive(ramhorns::Content)]
struct PostItem<'a> {
    dated: bool,
    date: String,
    link: String,
    title: &'a str,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

/// Newest first, undated entries last.
pub fn sort_by_date_desc(entries: &mut [BlogEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Tags across all entries, most used first.
pub fn tags_by_frequency(entries: &[BlogEntry]) -> Vec<&str> {
    let mut tag_map: HashMap<&str, u32> = HashMap::new();
    for tag in entries.iter().flat_map(|e| e.tags.iter().flatten()) {
        *tag_map.entry(tag.as_str()).or_insert(0) += 1;
    }

    let mut tag_list: Vec<(&str, u32)> = tag_map.into_iter().collect();
    tag_list.sort_by(|(ka, va), (kb, vb)| vb.cmp(va).then(ka.cmp(kb)));
    tag_list.into_iter().map(|(k, _v)| k).collect()
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer<'_>> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e)));
            }
        };

        Ok(ListRenderer {
            template,
        })
    }

    /// Renders `entries` in the order given.
    pub fn render(&self, entries: &[BlogEntry]) -> String {
        let post_list = entries.iter()
            .map(|entry| PostItem {
                dated: entry.date.is_some(),
                date: entry.date.as_ref().map(|dt| format_date_time(dt).0).unwrap_or_default(),
                link: entry.link(),
                title: entry.title.as_str(),
            })
            .collect();

        let tags = tags_by_frequency(entries).into_iter()
            .map(|tag| ViewTag { tag })
            .collect();

        self.template.render(&ListPage {
            post_list,
            tags,
            post_count: entries.len(),
        })
    }
}
