use serde_json::Value;
use thiserror::Error;

use crate::content::slug::slugify;
use crate::content::{BlogEntry, Fields, RawEntry, Slug};
use crate::text_utils::parse_date_time;

pub const TITLE: &str = "title";
pub const DATE: &str = "date";
pub const DRAFT: &str = "draft";
pub const TAGS: &str = "tags";
pub const CATEGORIES: &str = "categories";
pub const SLUG: &str = "slug";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("missing required field `{field}`")]
    MissingField { field: String },
    #[error("field `{field}` must be {expected}, found {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("field `{field}` is not a valid date: {reason}")]
    InvalidDate { field: String, reason: String },
    #[error("field `{field}` is not a valid slug: `{value}`")]
    InvalidSlug { field: String, value: String },
}

impl ValidationError {
    /// Name of the offending field, with an index for list elements (`tags[1]`)
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingField { field } => field,
            ValidationError::WrongType { field, .. } => field,
            ValidationError::InvalidDate { field, .. } => field,
            ValidationError::InvalidSlug { field, .. } => field,
        }
    }
}

/// Applies the `blog` collection schema to a raw content record.
///
/// `title` is required, `draft` defaults to `false`, `date`, `tags` and
/// `categories` may be absent. Unknown fields are ignored. An explicit `slug`
/// string replaces the one derived from the file location. Each of its `/`
/// separated segments is slugified and none may come out empty.
pub fn validate(raw: RawEntry) -> Result<BlogEntry, ValidationError> {
    let RawEntry { file_path, slug, fields, body } = raw;

    let title = required_string(&fields, TITLE)?;
    let date = optional_date(&fields, DATE)?;
    let draft = bool_or(&fields, DRAFT, false)?;
    let tags = optional_string_list(&fields, TAGS)?;
    let categories = optional_string_list(&fields, CATEGORIES)?;
    let slug = match optional_string(&fields, SLUG)? {
        Some(custom) => custom_slug(SLUG, &custom)?,
        None => slug,
    };

    Ok(BlogEntry {
        file_path,
        slug,
        title,
        date,
        draft,
        tags,
        categories,
        body,
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}

fn wrong_type(field: &str, expected: &'static str, value: &Value) -> ValidationError {
    ValidationError::WrongType {
        field: field.to_string(),
        expected,
        found: kind_of(value),
    }
}

fn optional_string(fields: &Fields, field: &str) -> Result<Option<String>, ValidationError> {
    match fields.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(wrong_type(field, "a string", other)),
    }
}

fn required_string(fields: &Fields, field: &str) -> Result<String, ValidationError> {
    optional_string(fields, field)?
        .ok_or_else(|| ValidationError::MissingField { field: field.to_string() })
}

fn bool_or(fields: &Fields, field: &str, default: bool) -> Result<bool, ValidationError> {
    match fields.get(field) {
        None => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(wrong_type(field, "a boolean", other)),
    }
}

fn custom_slug(field: &str, value: &str) -> Result<Slug, ValidationError> {
    let segments: Vec<String> = value.split('/').map(slugify).collect();
    if segments.iter().any(String::is_empty) {
        return Err(ValidationError::InvalidSlug {
            field: field.to_string(),
            value: value.to_string(),
        });
    }

    Ok(Slug(segments.join("/")))
}

fn optional_date(fields: &Fields, field: &str) -> Result<Option<chrono::NaiveDateTime>, ValidationError> {
    let value = match fields.get(field) {
        None => return Ok(None),
        Some(Value::String(s)) => s,
        Some(other) => return Err(wrong_type(field, "a date", other)),
    };

    parse_date_time(value)
        .map(Some)
        .map_err(|reason| ValidationError::InvalidDate { field: field.to_string(), reason })
}

fn optional_string_list(fields: &Fields, field: &str) -> Result<Option<Vec<String>>, ValidationError> {
    let items = match fields.get(field) {
        None => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(other) => return Err(wrong_type(field, "a list of strings", other)),
    };

    items.iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(wrong_type(&format!("{}[{}]", field, idx), "a string", other)),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}
