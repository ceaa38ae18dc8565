use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

use spdlog::{debug, warn};
use thiserror::Error;

use crate::content::front_matter::{split_front_matter, FrontMatterError};
use crate::content::schema::{validate, ValidationError};
use crate::content::slug::slug_from_path;
use crate::content::{BlogEntry, RawEntry, Slug};

pub const BLOG_COLLECTION: &str = "blog";

const ENTRY_EXTENSIONS: [&str; 2] = ["md", "markdown"];

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", .path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
    #[error("{} does not match the `{collection}` schema: {source}", .path.display())]
    Validation {
        collection: String,
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
    #[error("could not derive a slug for {}", .path.display())]
    NoSlug { path: PathBuf },
    #[error("{} and {} share the slug `{slug}`", .first.display(), .second.display())]
    DuplicateSlug {
        slug: Slug,
        first: PathBuf,
        second: PathBuf,
    },
}

/// A named collection of authored entries living in `<content_dir>/<name>`.
pub struct ContentStore {
    collection: String,
    root_dir: PathBuf,
}

impl ContentStore {
    pub fn new(content_dir: &Path, collection: &str) -> Self {
        ContentStore {
            collection: collection.to_string(),
            root_dir: content_dir.join(collection),
        }
    }

    pub fn blog(content_dir: &Path) -> Self {
        Self::new(content_dir, BLOG_COLLECTION)
    }

    /// Entry files sorted by path. Names starting with `_` or `.` are skipped.
    pub fn entry_files(&self) -> Result<Vec<PathBuf>, CollectionError> {
        let mut files = vec![];
        if !self.root_dir.is_dir() {
            warn!("The collection `{}` does not exist or is empty: {}", self.collection, self.root_dir.display());
            return Ok(files);
        }

        Self::collect_files(&self.root_dir, &mut files)?;
        files.sort();
        Ok(files)
    }

    fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), CollectionError> {
        let io_err = |source: io::Error| CollectionError::Io { path: dir.to_path_buf(), source };

        for entry in fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if file_name.starts_with('_') || file_name.starts_with('.') {
                continue;
            }

            let file_type = entry.file_type().map_err(io_err)?;
            let path = entry.path();
            if file_type.is_dir() {
                Self::collect_files(&path, files)?;
            } else if file_type.is_file() && Self::is_entry_file(&path) {
                files.push(path);
            }
        }

        Ok(())
    }

    fn is_entry_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ENTRY_EXTENSIONS.contains(&ext))
    }

    pub fn read_entry(&self, file_path: &Path) -> Result<BlogEntry, CollectionError> {
        debug!("Reading entry {}", file_path.display());
        let raw_content = fs::read_to_string(file_path)
            .map_err(|source| CollectionError::Io { path: file_path.to_path_buf(), source })?;
        self.parse_entry(file_path, &raw_content)
    }

    pub fn parse_entry(&self, file_path: &Path, raw_content: &str) -> Result<BlogEntry, CollectionError> {
        let slug = slug_from_path(&self.root_dir, file_path)
            .ok_or_else(|| CollectionError::NoSlug { path: file_path.to_path_buf() })?;

        let (fields, body) = split_front_matter(raw_content)
            .map_err(|source| CollectionError::FrontMatter { path: file_path.to_path_buf(), source })?;

        let raw = RawEntry {
            file_path: file_path.to_path_buf(),
            slug,
            fields,
            body: body.to_string(),
        };

        validate(raw).map_err(|source| CollectionError::Validation {
            collection: self.collection.clone(),
            path: file_path.to_path_buf(),
            source,
        })
    }

    /// Reads and validates every entry, then keeps the ones accepted by `filter`.
    /// Any invalid entry fails the whole read.
    pub fn get_collection<F>(&self, filter: F) -> Result<Vec<BlogEntry>, CollectionError>
    where
        F: Fn(&BlogEntry) -> bool,
    {
        let mut entries = vec![];
        let mut slugs: HashMap<Slug, PathBuf> = HashMap::new();

        for file_path in self.entry_files()? {
            let entry = self.read_entry(&file_path)?;
            if let Some(first) = slugs.insert(entry.slug.clone(), entry.file_path.clone()) {
                return Err(CollectionError::DuplicateSlug {
                    slug: entry.slug,
                    first,
                    second: file_path,
                });
            }
            entries.push(entry);
        }

        Ok(entries.into_iter().filter(|entry| filter(entry)).collect())
    }

    pub fn get_entry(&self, slug: &str) -> Result<Option<BlogEntry>, CollectionError> {
        let entries = self.get_collection(|entry| entry.slug.0 == slug)?;
        Ok(entries.into_iter().next())
    }
}
