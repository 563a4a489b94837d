//! Index module - lookup tables and recommendations over the post collection
//!
//! [`SiteIndex::build`] is the single entry point used by a site build: it
//! indexes the posts, then derives the recommendation lists from those
//! indexes. The result is never mutated afterwards and can be shared across
//! rendering threads.

mod categories;
mod primary;
mod recommend;

pub use categories::{category_pages, load_category_pages, CategoryGroup, CategoryItem, CategoryPage};
pub use primary::{build_primary_indexes, PostGroups, PrimaryIndexes};
pub use recommend::{
    build_recommendations, build_recommendations_with_rng, BuildSummary, PaddingPool,
    RecommendationIndexes, FOOTER_SIZE, FULL_SIZE, PADDING_FUNNEL_STAGE, SIDEBAR_SIZE,
};

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{RecommendationConfig, RelationConfig};
use crate::content::Post;

/// Everything rendering reads: primary indexes, recommendations and
/// category pages
#[derive(Debug, Clone, Default)]
pub struct SiteIndex {
    posts: Vec<Arc<Post>>,
    pub primary: PrimaryIndexes,
    pub recommendations: RecommendationIndexes,
    pub categories: Vec<CategoryPage>,
}

impl SiteIndex {
    /// Index `posts` (in collection order) and build their recommendations
    pub fn build(
        posts: Vec<Post>,
        relations: Option<&RelationConfig>,
        settings: &RecommendationConfig,
    ) -> Self {
        let posts: Vec<Arc<Post>> = posts.into_iter().map(Arc::new).collect();
        let primary = build_primary_indexes(&posts);
        let recommendations = build_recommendations(&posts, &primary, relations, settings);

        Self {
            posts,
            primary,
            recommendations,
            categories: Vec::new(),
        }
    }

    /// Attach category page descriptors
    pub fn with_categories(mut self, categories: Vec<CategoryPage>) -> Self {
        self.categories = categories;
        self
    }

    /// Posts in collection order
    pub fn posts(&self) -> &[Arc<Post>] {
        &self.posts
    }

    pub fn post(&self, slug: &str) -> Option<&Arc<Post>> {
        self.primary.post(slug)
    }

    pub fn by_author(&self, author: &str) -> &[Arc<Post>] {
        group(&self.primary.by_author, author)
    }

    pub fn by_editor(&self, editor: &str) -> &[Arc<Post>] {
        group(&self.primary.by_editor, editor)
    }

    pub fn by_topic(&self, topic: &str) -> &[Arc<Post>] {
        group(&self.primary.by_topic, topic)
    }

    pub fn by_funnel(&self, stage: u32) -> &[Arc<Post>] {
        self.primary.funnel_stage(stage)
    }

    pub fn related_sidebar(&self, slug: &str) -> &[Arc<Post>] {
        group(&self.recommendations.related_sidebar, slug)
    }

    pub fn related_full(&self, slug: &str) -> &[Arc<Post>] {
        group(&self.recommendations.related_full, slug)
    }

    pub fn related_footer(&self, slug: &str) -> &[Arc<Post>] {
        group(&self.recommendations.related_footer, slug)
    }

    pub fn popular_sidebar(&self, slug: &str) -> &[Arc<Post>] {
        group(&self.recommendations.popular_sidebar, slug)
    }

    pub fn shorten_name(&self, slug: &str) -> Option<&str> {
        self.recommendations
            .shorten_name
            .get(slug)
            .map(String::as_str)
    }

    pub fn summary(&self) -> &BuildSummary {
        &self.recommendations.summary
    }

    /// Serializable view for rendering consumers: full records under
    /// `posts`, slug lists everywhere else
    pub fn snapshot(&self) -> IndexSnapshot<'_> {
        IndexSnapshot {
            posts: self.posts.iter().map(|p| p.as_ref()).collect(),
            indexes: PrimarySnapshot {
                author: slug_lists(&self.primary.by_author),
                editor: slug_lists(&self.primary.by_editor),
                topic: slug_lists(&self.primary.by_topic),
                funnel: self
                    .primary
                    .by_funnel
                    .iter()
                    .map(|(stage, posts)| (*stage, slugs(posts)))
                    .collect(),
            },
            related_sidebar: slug_lists(&self.recommendations.related_sidebar),
            related_full: slug_lists(&self.recommendations.related_full),
            related_footer: slug_lists(&self.recommendations.related_footer),
            popular_sidebar: slug_lists(&self.recommendations.popular_sidebar),
            shorten_name: &self.recommendations.shorten_name,
            categories: &self.categories,
            summary: &self.recommendations.summary,
        }
    }
}

/// JSON shape written by the `build` command
#[derive(Debug, Serialize)]
pub struct IndexSnapshot<'a> {
    pub posts: Vec<&'a Post>,
    pub indexes: PrimarySnapshot<'a>,
    pub related_sidebar: IndexMap<&'a str, Vec<&'a str>>,
    pub related_full: IndexMap<&'a str, Vec<&'a str>>,
    pub related_footer: IndexMap<&'a str, Vec<&'a str>>,
    pub popular_sidebar: IndexMap<&'a str, Vec<&'a str>>,
    pub shorten_name: &'a IndexMap<String, String>,
    pub categories: &'a [CategoryPage],
    pub summary: &'a BuildSummary,
}

#[derive(Debug, Serialize)]
pub struct PrimarySnapshot<'a> {
    pub author: IndexMap<&'a str, Vec<&'a str>>,
    pub editor: IndexMap<&'a str, Vec<&'a str>>,
    pub topic: IndexMap<&'a str, Vec<&'a str>>,
    pub funnel: BTreeMap<u32, Vec<&'a str>>,
}

fn group<'a>(groups: &'a PostGroups, key: &str) -> &'a [Arc<Post>] {
    groups.get(key).map(Vec::as_slice).unwrap_or_default()
}

fn slugs(posts: &[Arc<Post>]) -> Vec<&str> {
    posts.iter().map(|p| p.slug.as_str()).collect()
}

fn slug_lists(groups: &PostGroups) -> IndexMap<&str, Vec<&str>> {
    groups
        .iter()
        .map(|(key, posts)| (key.as_str(), slugs(posts)))
        .collect()
}
