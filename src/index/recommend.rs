//! Related and popular article recommendations
//!
//! Related lists start from the explicit `related` table and are padded
//! with posts from a single funnel stage (the padding pool) when they fall
//! short of their target size. Each related variant owns its own list; all
//! of them are derived from the same resolved explicit base.
//!
//! Popular lists come from the explicit `popular` table. A post without an
//! entry reuses the list computed for the previous post.

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

use super::primary::{PostGroups, PrimaryIndexes};
use crate::config::{RecommendationConfig, RelationConfig};
use crate::content::Post;

/// Funnel stage holding broad, general-interest posts used as padding
pub const PADDING_FUNNEL_STAGE: u32 = 3;
/// Target size of the related-articles sidebar
pub const SIDEBAR_SIZE: usize = 2;
/// Target size of the full related-articles list
pub const FULL_SIZE: usize = 8;
/// Exact size of the related-articles footer
pub const FOOTER_SIZE: usize = 2;

/// Per-slug recommendation lists
#[derive(Debug, Clone, Default)]
pub struct RecommendationIndexes {
    pub related_sidebar: PostGroups,
    pub related_full: PostGroups,
    pub related_footer: PostGroups,
    pub popular_sidebar: PostGroups,
    /// Only slugs with an explicit short title
    pub shorten_name: IndexMap<String, String>,
    pub summary: BuildSummary,
}

/// Counters describing one recommendation build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub posts: usize,
    pub pool_size: usize,
    /// Related lists that received at least one padding post
    pub padded_lists: usize,
    /// Related lists still below their target after padding
    pub short_lists: usize,
    /// Explicit related/popular slugs that did not resolve to a post
    pub dropped_refs: usize,
    /// Posts whose popular list was carried over from the previous post
    pub carried_popular: usize,
}

/// Shuffled snapshot of the padding stage, shared by every post in a build
#[derive(Debug, Clone, Default)]
pub struct PaddingPool {
    posts: Vec<Arc<Post>>,
}

impl PaddingPool {
    /// Take a shuffled copy of `posts`, keeping the first post per slug
    pub fn shuffled<R: Rng + ?Sized>(posts: &[Arc<Post>], rng: &mut R) -> Self {
        let mut seen = HashSet::new();
        let mut posts: Vec<_> = posts
            .iter()
            .filter(|p| seen.insert(p.slug.as_str()))
            .cloned()
            .collect();
        posts.shuffle(rng);
        Self { posts }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Copy `base` and top it up to `target` entries with pool posts that
    /// are neither in it nor `owner` itself. Returns the list and how many
    /// posts were drawn.
    pub fn pad<R: Rng + ?Sized>(
        &self,
        owner: &str,
        base: &[Arc<Post>],
        target: usize,
        rng: &mut R,
    ) -> (Vec<Arc<Post>>, usize) {
        let mut list = base.to_vec();
        if list.len() >= target || self.posts.is_empty() {
            return (list, 0);
        }

        let mut present: HashSet<&str> = base.iter().map(|p| p.slug.as_str()).collect();
        present.insert(owner);
        let candidates: Vec<&Arc<Post>> = self
            .posts
            .iter()
            .filter(|p| !present.contains(p.slug.as_str()))
            .collect();

        let shortfall = target - list.len();
        let before = list.len();
        list.extend(
            candidates
                .choose_multiple(rng, shortfall)
                .map(|p| Arc::clone(*p)),
        );
        let drawn = list.len() - before;
        (list, drawn)
    }
}

/// Build recommendations, seeding the padding RNG from `settings.seed`
/// (or from entropy when no seed is configured).
///
/// `relations` of `None` behaves like a config with no entries at all.
pub fn build_recommendations(
    posts: &[Arc<Post>],
    primary: &PrimaryIndexes,
    relations: Option<&RelationConfig>,
    settings: &RecommendationConfig,
) -> RecommendationIndexes {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    build_recommendations_with_rng(posts, primary, relations, settings, &mut rng)
}

/// Build recommendations with a caller-supplied RNG
pub fn build_recommendations_with_rng<R: Rng + ?Sized>(
    posts: &[Arc<Post>],
    primary: &PrimaryIndexes,
    relations: Option<&RelationConfig>,
    settings: &RecommendationConfig,
    rng: &mut R,
) -> RecommendationIndexes {
    let empty = RelationConfig::default();
    let relations = relations.unwrap_or(&empty);

    let pool = PaddingPool::shuffled(primary.funnel_stage(PADDING_FUNNEL_STAGE), &mut *rng);
    if pool.is_empty() {
        tracing::debug!(
            "Funnel stage {} is empty, related lists will not be padded",
            PADDING_FUNNEL_STAGE
        );
    }

    let mut out = RecommendationIndexes::default();
    out.summary.pool_size = pool.len();

    let mut last_popular: Vec<Arc<Post>> = Vec::new();

    for post in posts {
        let slug = post.slug.as_str();
        out.summary.posts += 1;

        let explicit = relations.related_for(slug).unwrap_or_default();
        let (resolved, dropped) = resolve_slugs(primary, slug, explicit);
        out.summary.dropped_refs += dropped;
        let base = dedupe_by_slug(resolved);

        let mut related = |target: usize, summary: &mut BuildSummary| {
            let (list, drawn) = pool.pad(slug, &base, target, &mut *rng);
            if drawn > 0 {
                summary.padded_lists += 1;
            }
            if list.len() < target {
                summary.short_lists += 1;
            }
            list
        };

        let sidebar = related(settings.sidebar_size, &mut out.summary);
        let full = related(settings.full_size, &mut out.summary);
        let mut footer = related(FOOTER_SIZE, &mut out.summary);
        footer.truncate(FOOTER_SIZE);

        out.related_sidebar.insert(slug.to_string(), sidebar);
        out.related_full.insert(slug.to_string(), full);
        out.related_footer.insert(slug.to_string(), footer);

        let popular = match relations.popular_for(slug) {
            Some(explicit) => {
                let (resolved, dropped) = resolve_slugs(primary, slug, explicit);
                out.summary.dropped_refs += dropped;
                resolved
            }
            None => {
                if !last_popular.is_empty() {
                    tracing::debug!(
                        "No popular list for {:?}, carrying {} posts from the previous post",
                        slug,
                        last_popular.len()
                    );
                    out.summary.carried_popular += 1;
                }
                last_popular.clone()
            }
        };
        last_popular = popular.clone();
        out.popular_sidebar.insert(slug.to_string(), popular);

        if let Some(short) = relations.short_title_for(slug) {
            out.shorten_name.insert(slug.to_string(), short.to_string());
        }
    }

    out
}

/// Resolve slugs through the slug index, dropping the ones that do not exist
fn resolve_slugs(
    primary: &PrimaryIndexes,
    owner: &str,
    slugs: &[String],
) -> (Vec<Arc<Post>>, usize) {
    let mut dropped = 0;
    let resolved = slugs
        .iter()
        .filter_map(|s| match primary.post(s) {
            Some(post) => Some(Arc::clone(post)),
            None => {
                tracing::debug!("{:?} references unknown post {:?}", owner, s);
                dropped += 1;
                None
            }
        })
        .collect();
    (resolved, dropped)
}

fn dedupe_by_slug(posts: Vec<Arc<Post>>) -> Vec<Arc<Post>> {
    let mut seen = HashSet::new();
    posts
        .into_iter()
        .filter(|p| seen.insert(p.slug.clone()))
        .collect()
}
