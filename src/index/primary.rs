//! Primary lookup tables: by slug, author, editor, topic and funnel stage

use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::content::Post;

/// Grouping index: key -> posts in collection order
pub type PostGroups = IndexMap<String, Vec<Arc<Post>>>;

/// Lookup tables over the post collection
#[derive(Debug, Clone, Default)]
pub struct PrimaryIndexes {
    pub by_slug: IndexMap<String, Arc<Post>>,
    pub by_author: PostGroups,
    pub by_editor: PostGroups,
    pub by_topic: PostGroups,
    /// Only stages > 0
    pub by_funnel: BTreeMap<u32, Vec<Arc<Post>>>,
}

impl PrimaryIndexes {
    pub fn post(&self, slug: &str) -> Option<&Arc<Post>> {
        self.by_slug.get(slug)
    }

    pub fn funnel_stage(&self, stage: u32) -> &[Arc<Post>] {
        self.by_funnel.get(&stage).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.by_slug.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slug.is_empty()
    }
}

/// Build the primary indexes in one pass over `posts`
pub fn build_primary_indexes(posts: &[Arc<Post>]) -> PrimaryIndexes {
    let mut indexes = PrimaryIndexes::default();

    for post in posts {
        if let Some(previous) = indexes.by_slug.insert(post.slug.clone(), Arc::clone(post)) {
            tracing::warn!(
                "Duplicate slug {:?}: {} replaces {}",
                post.slug,
                post.source,
                previous.source
            );
        }

        push_group(&mut indexes.by_author, post.author.as_deref(), post);
        push_group(&mut indexes.by_editor, post.editor.as_deref(), post);
        push_group(&mut indexes.by_topic, post.topic.as_deref(), post);

        if post.in_funnel() {
            indexes
                .by_funnel
                .entry(post.funnel)
                .or_default()
                .push(Arc::clone(post));
        }
    }

    tracing::debug!(
        "Indexed {} posts: {} authors, {} editors, {} topics, {} funnel stages",
        indexes.by_slug.len(),
        indexes.by_author.len(),
        indexes.by_editor.len(),
        indexes.by_topic.len(),
        indexes.by_funnel.len()
    );

    indexes
}

fn push_group(groups: &mut PostGroups, key: Option<&str>, post: &Arc<Post>) {
    if let Some(key) = key {
        groups.entry(key.to_string()).or_default().push(Arc::clone(post));
    }
}
