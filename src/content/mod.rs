use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

pub mod collection;
pub mod front_matter;
pub mod schema;
pub mod slug;

pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Slug(pub String);

impl Display for Slug {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content file as stored, before the schema is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub file_path: PathBuf,
    pub slug: Slug,
    pub fields: Fields,
    pub body: String,
}

/// A validated member of the `blog` collection.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogEntry {
    pub file_path: PathBuf,
    pub slug: Slug,
    pub title: String,
    pub date: Option<NaiveDateTime>,
    pub draft: bool,
    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub body: String,
}

impl BlogEntry {
    pub fn is_published(&self) -> bool {
        !self.draft
    }

    /// Site-relative URL path, always slash-terminated.
    pub fn link(&self) -> String {
        format!("/blog/{}/", self.slug)
    }
}

impl Display for BlogEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "slug={}, title={}, date={:?}, draft={}",
               self.slug,
               self.title,
               self.date,
               self.draft,
        )
    }
}
