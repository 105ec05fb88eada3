//! The request line wire format.
//!
//! A request line consists of a comma-joined list of categories, a `;`
//! separator, and a regex pattern anchored with `^`:
//!
//! ```text
//! 0,3;^k3x09ab12z
//! ```
//!
//! The consuming server splits on the first `;` and compiles everything
//! after it as a regex, so the `^` anchor is part of the wire form. This
//! type stores the pattern without the anchor and adds it when formatting.
//! Lines are newline-terminated in request files; the newline is written by
//! the file writer, not by [`fmt::Display`].

use std::fmt;
use std::str::FromStr;

use crate::category::{Category, CategoryError};

/// A single request: a category subset and a regex pattern.
///
/// Categories keep the order in which they were sampled; the format makes
/// no ordering guarantees and the server treats them as a set.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RequestLine {
    categories: Vec<Category>,
    pattern: String,
}

impl RequestLine {
    /// Creates a request line from a category subset and a pattern
    /// (without the `^` anchor).
    pub fn new(categories: Vec<Category>, pattern: impl Into<String>) -> Self {
        Self {
            categories,
            pattern: pattern.into(),
        }
    }

    /// The categories attached to this request, in sampling order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The pattern, without the `^` anchor.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Errors that can occur when parsing a request line from its wire form.
#[derive(Debug, thiserror::Error)]
pub enum RequestLineError {
    /// No `;` separator between the categories and the pattern.
    #[error("missing `;` separator between categories and pattern")]
    MissingSeparator,

    /// The pattern does not start with the `^` anchor.
    #[error("pattern must start with the `^` anchor")]
    MissingAnchor,

    /// One of the comma-separated labels is not a valid category.
    #[error(transparent)]
    Category(#[from] CategoryError),
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, category) in self.categories.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{category}")?;
        }
        write!(f, ";^{}", self.pattern)
    }
}

impl fmt::Debug for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestLine({:?})", self.to_string())
    }
}

impl FromStr for RequestLine {
    type Err = RequestLineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Tolerate the trailing newline of lines read verbatim from a file.
        let s = s.strip_suffix('\n').unwrap_or(s);

        let (categories, pattern) = s
            .split_once(';')
            .ok_or(RequestLineError::MissingSeparator)?;
        let pattern = pattern
            .strip_prefix('^')
            .ok_or(RequestLineError::MissingAnchor)?;

        // An empty category list is valid and formats as `;^<pattern>`.
        let categories = if categories.is_empty() {
            Vec::new()
        } else {
            categories
                .split(',')
                .map(str::parse)
                .collect::<Result<_, CategoryError>>()?
        };

        Ok(Self {
            categories,
            pattern: pattern.to_owned(),
        })
    }
}
