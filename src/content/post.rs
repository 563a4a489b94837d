//! Post model

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A blog post as seen by the indexer.
///
/// Only front-matter is kept; the body is rendered elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique key across all indexes
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: DateTime<Local>,

    pub author: Option<String>,

    pub editor: Option<String>,

    pub topic: Option<String>,

    /// Marketing funnel stage, 0 = not in funnel
    pub funnel: u32,

    /// Layout template to use
    pub layout: String,

    /// Source file path (relative)
    pub source: String,

    /// URL path
    pub path: String,

    /// Whether the post is published
    pub published: bool,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(slug: impl Into<String>, title: impl Into<String>, date: DateTime<Local>) -> Self {
        let slug = slug.into();
        Self {
            path: format!("/{}/", slug),
            slug,
            title: title.into(),
            date,
            author: None,
            editor: None,
            topic: None,
            funnel: 0,
            layout: "post".to_string(),
            source: String::new(),
            published: true,
            extra: HashMap::new(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = Some(editor.into());
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_funnel(mut self, funnel: u32) -> Self {
        self.funnel = funnel;
        self
    }

    /// Whether the post belongs to a funnel stage
    pub fn in_funnel(&self) -> bool {
        self.funnel > 0
    }
}
