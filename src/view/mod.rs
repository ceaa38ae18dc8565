use std::path::Path;
use std::{fs, io};

use spdlog::debug;

pub mod list_renderer;
pub mod post_renderer;
pub mod rss_renderer;

pub const POST_TEMPLATE: &str = "post.tpl";
pub const LIST_TEMPLATE: &str = "list.tpl";

pub const DEFAULT_POST_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{title}} | Andrew Monty</title>
<link rel="stylesheet" href="/public/styles.css">
<link rel="stylesheet" href="/public/highlight/{{highlight_theme}}.css">
<link rel="alternate" type="application/rss+xml" title="Andrew Monty" href="/rss.xml">
</head>
<body>
<article>
<h1>{{title}}</h1>
{{#dated}}<time datetime="{{date}}">{{date}}</time>{{/dated}}
<ul class="tags">{{#tags}}<li>{{tag}}</li>{{/tags}}</ul>
<ul class="categories">{{#categories}}<li>{{tag}}</li>{{/categories}}</ul>
{{{content}}}
</article>
<a href="/blog/">All posts</a>
</body>
</html>
"##;

pub const DEFAULT_LIST_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Blog | Andrew Monty</title>
<link rel="stylesheet" href="/public/styles.css">
<link rel="alternate" type="application/rss+xml" title="Andrew Monty" href="/rss.xml">
</head>
<body>
<h1>Blog</h1>
<ul class="tags">{{#tags}}<li>{{tag}}</li>{{/tags}}</ul>
<ul class="posts">
{{#post_list}}<li><a href="{{link}}">{{title}}</a>{{#dated}} <time datetime="{{date}}">{{date}}</time>{{/dated}}</li>
{{/post_list}}</ul>
</body>
</html>
"##;

/// Reads `<template_dir>/<file_name>` when it exists, otherwise falls back to
/// the built-in template.
pub fn load_template(template_dir: Option<&Path>, file_name: &str, default: &str) -> io::Result<String> {
    if let Some(dir) = template_dir {
        let full_path = dir.join(file_name);
        if full_path.is_file() {
            debug!("Using template {}", full_path.display());
            return fs::read_to_string(full_path);
        }
    }
    Ok(default.to_string())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_load_template() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(POST_TEMPLATE), "custom {{title}}").unwrap();

        let tpl = load_template(Some(tmp.path()), POST_TEMPLATE, DEFAULT_POST_TEMPLATE).unwrap();
        assert_eq!(tpl, "custom {{title}}");

        let tpl = load_template(Some(tmp.path()), LIST_TEMPLATE, DEFAULT_LIST_TEMPLATE).unwrap();
        assert_eq!(tpl, DEFAULT_LIST_TEMPLATE);

        let tpl = load_template(None, POST_TEMPLATE, DEFAULT_POST_TEMPLATE).unwrap();
        assert_eq!(tpl, DEFAULT_POST_TEMPLATE);
    }
}
