use std::path::{Component, Path};

use crate::content::Slug;

const INDEX_STEM: &str = "index";

/// Derives the slug of an entry from its location inside the collection
/// directory: `hello-world.md` and `hello-world/index.md` both give `hello-world`,
/// `2024/First Post.md` gives `2024/first-post`.
pub fn slug_from_path(collection_dir: &Path, file_path: &Path) -> Option<Slug> {
    let relative = file_path.strip_prefix(collection_dir).ok()?;
    let relative = relative.with_extension("");

    let mut segments = vec![];
    for component in relative.components() {
        match component {
            Component::Normal(name) => segments.push(name.to_str()?.to_string()),
            _ => return None,
        }
    }

    if segments.len() > 1 && segments.last().map(String::as_str) == Some(INDEX_STEM) {
        segments.pop();
    }

    let segments: Vec<String> = segments.iter()
        .map(|segment| slugify(segment))
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        return None;
    }

    Some(Slug(segments.join("/")))
}

/// Lowercases, drops anything that is not alphanumeric, `-`, `_` or a space,
/// then turns every space into `-`. Runs of spaces are not collapsed.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());

    for c in text.chars() {
        if c == ' ' {
            slug.push('-');
        } else if c.is_alphanumeric() || c == '-' || c == '_' {
            slug.extend(c.to_lowercase());
        }
    }

    slug
}
