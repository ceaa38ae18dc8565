use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::feed::FeedItem;
use crate::text_utils::format_rfc822;

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
  <title>Andrew Monty</title>
  <description>Personal website for web designer/developer Andrew Monty.</description>
  <link>https://andrewmonty.website/</link>
  <item>
    <title>Hello world</title>
    <link>https://andrewmonty.website/blog/hello-world/</link>
    <guid isPermaLink="true">https://andrewmonty.website/blog/hello-world/</guid>
    <pubDate>Tue, 02 Jan 2024 00:00:00 GMT</pubDate>
  </item>
</channel>
</rss>
*/

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
}

impl RssChannel<'_> {
    pub fn render(&self, items: &[FeedItem]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        // <?xml version="1.0" encoding="UTF-8"?>
        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        // <rss version="2.0">
        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;

        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "description", self.ch_desc)?;
        push_text(&mut writer, "link", &channel_link(self.ch_link))?;

        for item in items {
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", &item.title)?;
            push_text(&mut writer, "link", &item.link)?;

            // <guid isPermaLink="true">https://andrewmonty.website/blog/hello-world/</guid>
            let mut guid_elem = BytesStart::new("guid");
            guid_elem.push_attribute(("isPermaLink", "true"));
            writer.write_event(Event::Start(guid_elem))?;
            writer.write_event(Event::Text(BytesText::new(&item.link)))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            // Undated entries carry no <pubDate>
            if let Some(ref pub_date) = item.pub_date {
                push_text(&mut writer, "pubDate", &format_rfc822(pub_date))?;
            }

            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn channel_link(site_url: &str) -> String {
    if site_url.ends_with('/') {
        site_url.to_string()
    } else {
        format!("{}/", site_url)
    }
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    use super::*;

    fn create_item(id: &str, dated: bool) -> FeedItem {
        let dt = NaiveDateTime::new(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveTime::from_hms_opt(5, 6, 7).unwrap(),
        );
        FeedItem {
            title: format!("title-of-post-{}", id),
            link: format!("https://andrewmonty.website/blog/post-{}/", id),
            pub_date: if dated { Some(dt) } else { None },
        }
    }

    #[test]
    fn render_xml() {
        let items = vec![create_item("1", true), create_item("2", false)];

        let rss = RssChannel {
            ch_title: "my feed",
            ch_link: "https://andrewmonty.website",
            ch_desc: "My blog feed",
        };
        let xml = rss.render(&items).unwrap();
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    #[test]
    fn render_escapes_text() {
        let items = vec![FeedItem {
            title: "Tips & <tricks>".to_string(),
            link: "https://andrewmonty.website/blog/tips/".to_string(),
            pub_date: None,
        }];
        let rss = RssChannel {
            ch_title: "A & B",
            ch_link: "https://andrewmonty.website/",
            ch_desc: "desc",
        };
        let xml = String::from_utf8(rss.render(&items).unwrap()).unwrap();
        assert!(xml.contains("<title>A &amp; B</title>"));
        assert!(xml.contains("<title>Tips &amp; &lt;tricks&gt;</title>"));
        assert!(xml.contains("<link>https://andrewmonty.website/</link>"));
    }

    #[test]
    fn render_empty_channel() {
        let rss = RssChannel {
            ch_title: "t",
            ch_link: "https://andrewmonty.website",
            ch_desc: "d",
        };
        let xml = String::from_utf8(rss.render(&[]).unwrap()).unwrap();
        assert!(xml.ends_with("<link>https://andrewmonty.website/</link></channel></rss>"));
        assert!(!xml.contains("<item>"));
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>my feed</title><description>My blog feed</description><link>https://andrewmonty.website/</link><item><title>title-of-post-1</title><link>https://andrewmonty.website/blog/post-1/</link><guid isPermaLink="true">https://andrewmonty.website/blog/post-1/</guid><pubDate>Tue, 02 Jan 2024 05:06:07 GMT</pubDate></item><item><title>title-of-post-2</title><link>https://andrewmonty.website/blog/post-2/</link><guid isPermaLink="true">https://andrewmonty.website/blog/post-2/</guid></item></channel></rss>"##;
}
