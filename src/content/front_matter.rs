use std::fmt;
use std::fmt::{Display, Formatter};

use serde_json::{Number, Value};
use thiserror::Error;

use crate::content::Fields;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrontMatterFormat {
    /// `---` delimited
    Yaml,
    /// `+++` delimited
    Toml,
}

impl FrontMatterFormat {
    fn from_delimiter(line: &str) -> Option<Self> {
        match line.trim_end() {
            "---" => Some(FrontMatterFormat::Yaml),
            "+++" => Some(FrontMatterFormat::Toml),
            _ => None,
        }
    }

    pub fn delimiter(&self) -> &'static str {
        match self {
            FrontMatterFormat::Yaml => "---",
            FrontMatterFormat::Toml => "+++",
        }
    }
}

impl Display for FrontMatterFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FrontMatterFormat::Yaml => write!(f, "YAML"),
            FrontMatterFormat::Toml => write!(f, "TOML"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("{0} front matter is not closed with `{delimiter}`", delimiter = .0.delimiter())]
    Unterminated(FrontMatterFormat),
    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid TOML front matter: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("front matter must be a map of fields")]
    NotAMap,
}

/// Splits a content file into its front matter fields and the body after it.
/// A file without front matter yields no fields and the whole text as body.
pub fn split_front_matter(raw: &str) -> Result<(Fields, &str), FrontMatterError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = raw.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Ok((Fields::new(), raw));
    };
    let Some(format) = FrontMatterFormat::from_delimiter(first) else {
        return Ok((Fields::new(), raw));
    };

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if FrontMatterFormat::from_delimiter(line) == Some(format) {
            let fields = parse_block(format, &raw[start..offset])?;
            let body = &raw[offset + line.len()..];
            return Ok((fields, body));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated(format))
}

fn parse_block(format: FrontMatterFormat, block: &str) -> Result<Fields, FrontMatterError> {
    if block.trim().is_empty() {
        return Ok(Fields::new());
    }

    let value = match format {
        FrontMatterFormat::Yaml => serde_yaml::from_str::<Value>(block)?,
        FrontMatterFormat::Toml => {
            let table = toml::from_str::<toml::Table>(block)?;
            toml_to_json(toml::Value::Table(table))
        }
    };

    match value {
        Value::Object(fields) => Ok(fields),
        // A YAML block holding only comments
        Value::Null => Ok(Fields::new()),
        _ => Err(FrontMatterError::NotAMap),
    }
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table.into_iter().map(|(k, v)| (k, toml_to_json(v))).collect()
        ),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::test_data::{POST_HELLO_WORLD, POST_TOML};

    use super::*;

    #[test]
    fn test_yaml_front_matter() {
        let (fields, body) = split_front_matter(POST_HELLO_WORLD).unwrap();
        assert_eq!(fields.get("title"), Some(&json!("Hello world")));
        assert_eq!(fields.get("date"), Some(&json!("2024-01-02")));
        assert_eq!(fields.get("tags"), Some(&json!(["intro", "meta"])));
        assert!(body.starts_with("\nWelcome to the new site."));
    }

    #[test]
    fn test_toml_front_matter() {
        let (fields, body) = split_front_matter(POST_TOML).unwrap();
        assert_eq!(fields.get("title"), Some(&json!("Written in TOML")));
        assert_eq!(fields.get("date"), Some(&json!("2023-11-20T08:30:00")));
        assert_eq!(fields.get("draft"), Some(&json!(false)));
        assert_eq!(body, "Body text.\n");
    }

    #[test]
    fn test_no_front_matter() {
        let (fields, body) = split_front_matter("# Just markdown\n").unwrap();
        assert!(fields.is_empty());
        assert_eq!(body, "# Just markdown\n");

        let (fields, body) = split_front_matter("").unwrap();
        assert!(fields.is_empty());
        assert_eq!(body, "");
    }

    #[test]
    fn test_empty_yaml_block() {
        let (fields, body) = split_front_matter("---\n---\nbody").unwrap();
        assert!(fields.is_empty());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_crlf_and_bom() {
        let raw = "\u{feff}---\r\ntitle: Windows\r\n---\r\nbody\r\n";
        let (fields, body) = split_front_matter(raw).unwrap();
        assert_eq!(fields.get("title"), Some(&json!("Windows")));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_unterminated() {
        let err = split_front_matter("---\ntitle: Lost\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated(FrontMatterFormat::Yaml)));
        assert_eq!(err.to_string(), "YAML front matter is not closed with `---`");
    }

    #[test]
    fn test_not_a_map() {
        let err = split_front_matter("---\n- one\n- two\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMap));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = split_front_matter("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }
}
