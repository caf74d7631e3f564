//! The post record.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single post. Posts carry no identity: two posts with the same author
/// and comment are indistinguishable, and duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Post {
    /// Who wrote the post.
    pub author: String,
    /// The post body.
    pub comment: String,
}

impl Post {
    /// Create a post without validating it.
    pub fn new(author: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            comment: comment.into(),
        }
    }

    /// Check that both fields carry non-blank text.
    pub fn validate(&self) -> Result<()> {
        if self.author.trim().is_empty() {
            return Err(Error::validation("author", "author must not be empty"));
        }
        if self.comment.trim().is_empty() {
            return Err(Error::validation("comment", "comment must not be empty"));
        }
        Ok(())
    }
}
