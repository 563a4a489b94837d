//! Content loader - loads posts from the posts directory

use anyhow::Result;
use chrono::{DateTime, Local};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::frontmatter::parse_date_string;
use super::{FrontMatter, Post};
use crate::Site;

lazy_static! {
    /// Jekyll post file names: `YYYY-MM-DD-title.ext`
    static ref POST_FILENAME: Regex =
        Regex::new(r"^(\d{4}-\d{2}-\d{2})-(.+)$").expect("valid post filename regex");
}

/// Loads posts from the site's posts directory
pub struct ContentLoader<'a> {
    site: &'a Site,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Load all posts, oldest first (the order Jekyll hands them to generators)
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = &self.site.posts_dir;
        if !posts_dir.exists() {
            tracing::warn!("Posts directory {:?} does not exist", posts_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(posts_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_post_file(path) {
                match self.load_post(path) {
                    Ok(post) => {
                        if post.published || self.site.config.render_drafts {
                            posts.push(post);
                        } else {
                            tracing::debug!("Skipping unpublished post {:?}", path);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        posts.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.source.cmp(&b.source)));

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, _body) = FrontMatter::parse(&content)?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");
        let (file_date, file_slug) = split_post_filename(stem);

        let file_modified = fs::metadata(path)
            .ok()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Local>::from);

        let date = fm
            .parse_date()
            .or_else(|| file_date.and_then(parse_date_string))
            .or(file_modified)
            .unwrap_or_else(Local::now);

        let slug = match fm.slug.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => slug::slugify(file_slug),
        };

        let title = fm.title.clone().unwrap_or_else(|| file_slug.to_string());

        let source = path
            .strip_prefix(&self.site.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let mut post = Post::new(slug, title, date);
        post.path = self.generate_permalink(&post.date, &post.slug, fm.topic.as_deref());
        post.funnel = fm.funnel_stage();
        post.author = fm.author;
        post.editor = fm.editor;
        post.topic = fm.topic;
        post.layout = fm.layout.unwrap_or_else(|| "post".to_string());
        post.published = fm.published;
        post.source = source;
        post.extra = fm.extra;

        Ok(post)
    }

    /// Generate the URL path based on the permalink pattern
    fn generate_permalink(&self, date: &DateTime<Local>, slug: &str, topic: Option<&str>) -> String {
        let pattern = &self.site.config.permalink;

        let topic = topic.map(slug::slugify).unwrap_or_default();

        let result = pattern
            .replace(":year", &date.format("%Y").to_string())
            .replace(":month", &date.format("%m").to_string())
            .replace(":day", &date.format("%d").to_string())
            .replace(":slug", slug)
            .replace(":title", slug)
            .replace(":topic", &topic);

        format!("/{}", result.trim_start_matches('/'))
    }
}

/// Split `2023-04-11-containerd-in-docker` into its date and slug parts
fn split_post_filename(stem: &str) -> (Option<&str>, &str) {
    match POST_FILENAME.captures(stem) {
        Some(caps) => {
            let date = caps.get(1).map(|m| m.as_str());
            let rest = caps.get(2).map_or(stem, |m| m.as_str());
            (date, rest)
        }
        None => (None, stem),
    }
}

/// Check if a file is a post source file
fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e, "md" | "markdown" | "html"))
        .unwrap_or(false)
}
