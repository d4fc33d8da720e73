//! Placeholder grammar: `open` + one or more ASCII alphanumerics + `close`.
//!
//! Anything that does not match (unterminated tokens, empty names, names with
//! other characters) is ordinary text.

use std::borrow::Cow;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::BindError;

static MUSTACHE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([A-Za-z0-9]+)\}\}").unwrap());
static SQUARE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([A-Za-z0-9]+)\]\]").unwrap());
static DASH_CASE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-([a-z])").unwrap());

/// Delimiters around a placeholder name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSyntax")]
pub struct Syntax {
    open: Cow<'static, str>,
    close: Cow<'static, str>,
}

/// Unvalidated wire form; deserialization goes through [`Syntax::new`].
#[derive(Deserialize)]
struct RawSyntax {
    open: String,
    close: String,
}

impl TryFrom<RawSyntax> for Syntax {
    type Error = BindError;

    fn try_from(raw: RawSyntax) -> Result<Self, Self::Error> {
        Syntax::new(raw.open, raw.close)
    }
}

impl Syntax {
    /// `{{name}}`
    pub const MUSTACHE: Syntax = Syntax {
        open: Cow::Borrowed("{{"),
        close: Cow::Borrowed("}}"),
    };

    /// `[[name]]`
    pub const SQUARE: Syntax = Syntax {
        open: Cow::Borrowed("[["),
        close: Cow::Borrowed("]]"),
    };

    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self, BindError> {
        let syntax = Syntax {
            open: Cow::Owned(open.into()),
            close: Cow::Owned(close.into()),
        };
        if syntax.open.is_empty() || syntax.close.is_empty() {
            return Err(BindError::InvalidSyntax(
                "delimiters must not be empty".to_string(),
            ));
        }
        syntax.matcher()?;
        Ok(syntax)
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }

    /// The literal token for `name`, e.g. `{{name}}`.
    pub fn token(&self, name: &str) -> String {
        format!("{}{}{}", self.open, name, self.close)
    }

    pub fn matcher(&self) -> Result<Matcher, BindError> {
        let regex = if *self == Syntax::MUSTACHE {
            MUSTACHE_PATTERN.clone()
        } else if *self == Syntax::SQUARE {
            SQUARE_PATTERN.clone()
        } else {
            let pattern = format!(
                "{}([A-Za-z0-9]+){}",
                regex::escape(&self.open),
                regex::escape(&self.close)
            );
            Regex::new(&pattern).map_err(|e| BindError::InvalidSyntax(e.to_string()))?
        };
        Ok(Matcher { regex })
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Syntax::MUSTACHE
    }
}

/// One placeholder occurrence; offsets are byte offsets into the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub name: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Compiled form of a [`Syntax`].
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    pub fn first<'a>(&self, haystack: &'a str) -> Option<Placeholder<'a>> {
        let caps = self.regex.captures(haystack)?;
        let whole = caps.get(0)?;
        Some(Placeholder {
            name: caps.get(1)?.as_str(),
            start: whole.start(),
            end: whole.end(),
        })
    }

    /// Every non-overlapping placeholder name, in order, duplicates kept.
    pub fn names(&self, haystack: &str) -> Vec<String> {
        self.regex
            .captures_iter(haystack)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Substitutes every placeholder whose name is in `values`, in one pass
    /// over `template`. Unknown placeholders stay as written.
    pub fn render(&self, template: &str, values: &IndexMap<String, String>) -> String {
        self.regex
            .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

/// Converts dash-case to camelCase (`aria-label` -> `ariaLabel`).
pub fn dash_case_to_camel_case(input: &str) -> String {
    DASH_CASE_PATTERN
        .replace_all(input, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}
