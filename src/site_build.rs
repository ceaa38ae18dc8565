use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spdlog::info;

use crate::config::Config;
use crate::content::BlogEntry;
use crate::feed::{feed_items, FEED_PATH};
use crate::hooks::run_css_hook;
use crate::pages::{blog_store, render_entry_page, render_index_page};
use crate::view::rss_renderer::RssChannel;

#[derive(Debug, PartialEq)]
pub struct BuildReport {
    pub pages: usize,
    pub feed_items: usize,
}

/// Renders the whole site into `paths.out_dir`. Every page is rendered before
/// anything is written, so an invalid entry leaves the output untouched.
pub fn build_site(config: &Config) -> Result<BuildReport> {
    let build = config.build_config();
    let out_dir = &config.paths.out_dir;

    let posts = blog_store(config)
        .get_collection(BlogEntry::is_published)
        .context("Error reading the blog collection")?;

    let channel = RssChannel {
        ch_title: config.feed_title(),
        ch_link: &build.site_url,
        ch_desc: config.feed_description(),
    };
    let items = feed_items(&posts, &build.site_url);
    let feed = channel.render(&items).context("Error writing the feed")?;

    let mut outputs: Vec<(PathBuf, Vec<u8>)> = vec![];
    outputs.push((out_dir.join(FEED_PATH.trim_start_matches('/')), feed));

    let index = render_index_page(config, &posts).context("Error rendering the blog index")?;
    outputs.push((out_dir.join("blog").join("index.html"), index.into_bytes()));

    for post in posts.iter() {
        let page = render_entry_page(config, post)
            .with_context(|| format!("Error rendering {}", post.file_path.display()))?;
        let page_path = out_dir.join("blog").join(&post.slug.0).join("index.html");
        outputs.push((page_path, page.into_bytes()));
    }

    if config.paths.public_dir.is_dir() {
        copy_dir(&config.paths.public_dir, &out_dir.join("public"))?;
    }

    for (path, content) in outputs.iter() {
        write_file(path, content)?;
    }

    run_css_hook(&build.css_plugin, out_dir)?;

    let report = BuildReport {
        pages: posts.len(),
        feed_items: items.len(),
    };
    info!("Built {} pages and a feed with {} items into {}", report.pages, report.feed_items, out_dir.display());

    Ok(report)
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Error creating directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Error writing {}", path.display()))
}

fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to).with_context(|| format!("Error creating directory {}", to.display()))?;

    for entry in fs::read_dir(from).with_context(|| format!("Error reading {}", from.display()))? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Error copying {}", entry.path().display()))?;
        }
    }

    Ok(())
}
