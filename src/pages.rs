use std::io;

use crate::config::Config;
use crate::content::collection::ContentStore;
use crate::content::BlogEntry;
use crate::post_render::render_markdown;
use crate::view::list_renderer::{sort_by_date_desc, ListRenderer};
use crate::view::post_renderer::PostRenderer;
use crate::view::{load_template, DEFAULT_LIST_TEMPLATE, DEFAULT_POST_TEMPLATE, LIST_TEMPLATE, POST_TEMPLATE};

pub fn blog_store(config: &Config) -> ContentStore {
    ContentStore::blog(&config.paths.content_dir)
}

pub fn render_entry_page(config: &Config, entry: &BlogEntry) -> io::Result<String> {
    let theme = config.build_config().highlight_theme;
    let content = render_markdown(&entry.body, &theme)?;

    let template_src = load_template(config.paths.template_dir.as_deref(), POST_TEMPLATE, DEFAULT_POST_TEMPLATE)?;
    let post_renderer = PostRenderer::new(&template_src)?;
    Ok(post_renderer.render(entry, &content, &theme))
}

/// `entries` must already exclude drafts.
pub fn render_index_page(config: &Config, entries: &[BlogEntry]) -> io::Result<String> {
    let mut entries = entries.to_vec();
    sort_by_date_desc(&mut entries);

    let template_src = load_template(config.paths.template_dir.as_deref(), LIST_TEMPLATE, DEFAULT_LIST_TEMPLATE)?;
    let list_renderer = ListRenderer::new(&template_src)?;
    Ok(list_renderer.render(&entries))
}
