use chrono::NaiveDateTime;
use thiserror::Error;

use crate::config::Config;
use crate::content::collection::{CollectionError, ContentStore};
use crate::content::{BlogEntry, Slug};
use crate::view::rss_renderer::RssChannel;

pub const FEED_TITLE: &str = "Andrew Monty";
pub const FEED_DESCRIPTION: &str = "Personal website for web designer/developer Andrew Monty.";
pub const FEED_PATH: &str = "/rss.xml";
pub const FEED_CONTENT_TYPE: &str = "application/xml";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("error reading the blog collection: {0}")]
    Collection(#[from] CollectionError),
    #[error("error writing the feed: {0}")]
    Xml(#[from] quick_xml::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub pub_date: Option<NaiveDateTime>,
}

/// `<site_url>/blog/<slug>/`
pub fn entry_link(site_url: &str, slug: &Slug) -> String {
    format!("{}/blog/{}/", site_url.trim_end_matches('/'), slug)
}

/// Drafts are dropped, everything else becomes an item, dated or not, in input order.
pub fn feed_items(entries: &[BlogEntry], site_url: &str) -> Vec<FeedItem> {
    entries.iter()
        .filter(|entry| entry.is_published())
        .map(|entry| FeedItem {
            title: entry.title.clone(),
            link: entry_link(site_url, &entry.slug),
            pub_date: entry.date,
        })
        .collect()
}

pub fn generate_feed(entries: &[BlogEntry], channel: &RssChannel) -> Result<Vec<u8>, FeedError> {
    let items = feed_items(entries, channel.ch_link);
    Ok(channel.render(&items)?)
}

/// Reads the published blog entries and serializes the site feed.
pub fn site_feed(config: &Config) -> Result<Vec<u8>, FeedError> {
    let store = ContentStore::blog(&config.paths.content_dir);
    let posts = store.get_collection(BlogEntry::is_published)?;

    let channel = RssChannel {
        ch_title: config.feed_title(),
        ch_link: &config.site.url,
        ch_desc: config.feed_description(),
    };
    generate_feed(&posts, &channel)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const SITE: &str = "https://andrewmonty.website";

    fn entry(title: &str, draft: bool, slug: &str) -> BlogEntry {
        BlogEntry {
            file_path: PathBuf::from(format!("{}.md", slug)),
            slug: Slug(slug.to_string()),
            title: title.to_string(),
            date: None,
            draft,
            tags: None,
            categories: None,
            body: String::new(),
        }
    }

    fn channel() -> RssChannel<'static> {
        RssChannel {
            ch_title: FEED_TITLE,
            ch_link: SITE,
            ch_desc: FEED_DESCRIPTION,
        }
    }

    #[test]
    fn test_drafts_are_excluded_in_order() {
        let entries = vec![
            entry("A", false, "a"),
            entry("B", true, "b"),
            entry("C", false, "c"),
        ];
        let items = feed_items(&entries, SITE);
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["A", "C"]);
        assert!(items.iter().all(|i| !i.link.contains("/blog/b/")));
    }

    #[test]
    fn test_item_count_matches_published() {
        let entries: Vec<_> = (0..10)
            .map(|i| entry(&format!("T{}", i), i % 3 == 0, &format!("s{}", i)))
            .collect();
        let published = entries.iter().filter(|e| !e.draft).count();
        assert_eq!(feed_items(&entries, SITE).len(), published);
    }

    #[test]
    fn test_entry_link() {
        let slug = Slug("hello-world".to_string());
        assert_eq!(entry_link(SITE, &slug), "https://andrewmonty.website/blog/hello-world/");
        assert_eq!(entry_link("https://andrewmonty.website/", &slug), "https://andrewmonty.website/blog/hello-world/");
    }

    #[test]
    fn test_generate_feed() {
        let entries = vec![
            entry("A", false, "a"),
            entry("B", true, "b"),
            entry("Hello", false, "hello-world"),
        ];
        let xml = String::from_utf8(generate_feed(&entries, &channel()).unwrap()).unwrap();

        assert!(xml.contains("<title>Andrew Monty</title>"));
        assert!(xml.contains("<description>Personal website for web designer/developer Andrew Monty.</description>"));
        assert!(xml.contains("<link>https://andrewmonty.website/blog/hello-world/</link>"));
        assert!(!xml.contains("/blog/b/"));
        assert_eq!(xml.matches("<item>").count(), 2);
        assert!(!xml.contains("<pubDate>"));
    }
}
