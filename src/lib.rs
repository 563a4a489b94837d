//! postdex: post indexes and related-article recommendations for static blogs
//!
//! This crate loads a Jekyll-style post collection, builds lookup tables by
//! slug, author, editor, topic and funnel stage, and derives the related and
//! popular article lists that page templates render next to each post.

pub mod commands;
pub mod config;
pub mod content;
pub mod index;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::loader::ContentLoader;
use index::{load_category_pages, SiteIndex};

/// A site on disk
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Post sources
    pub posts_dir: PathBuf,
    /// Data files (relation tables, categories)
    pub data_dir: PathBuf,
    /// Layout templates
    pub layouts_dir: PathBuf,
}

impl Site {
    /// Open a site directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir.as_ref());
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a site handle from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let posts_dir = source_dir.join(&config.posts_dir);
        let data_dir = source_dir.join(&config.data_dir);
        let layouts_dir = source_dir.join(&config.layouts_dir);

        Self {
            config,
            base_dir,
            source_dir,
            public_dir,
            posts_dir,
            data_dir,
            layouts_dir,
        }
    }

    /// Default location of the JSON snapshot written by `build`
    pub fn index_path(&self) -> PathBuf {
        self.public_dir.join(&self.config.index_file)
    }

    /// Load posts and data files and build the site index.
    ///
    /// `seed` overrides the configured padding seed.
    pub fn build_index(&self, seed: Option<u64>) -> Result<SiteIndex> {
        let posts = ContentLoader::new(self).load_posts()?;
        let relations = config::RelationConfig::load(&self.data_dir, &self.config.data_files);

        let mut settings = self.config.recommendations.clone();
        if seed.is_some() {
            settings.seed = seed;
        }

        let categories = load_category_pages(
            &self.layouts_dir,
            &self.data_dir.join(&self.config.data_files.categories),
        );

        Ok(SiteIndex::build(posts, Some(&relations), &settings).with_categories(categories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_site_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.posts_dir, dir.path().join(".").join("_posts"));
        assert_eq!(site.index_path(), dir.path().join("_site").join("indexes.json"));
    }

    #[test]
    fn test_site_config_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "source_dir: blog\npublic_dir: out\nindex_file: data.json\n",
        )
        .unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.data_dir, dir.path().join("blog").join("_data"));
        assert_eq!(site.index_path(), dir.path().join("out").join("data.json"));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "recommendations: [1, 2").unwrap();
        assert!(Site::new(dir.path()).is_err());
    }

    #[test]
    fn test_build_index_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::create_dir_all(&site.data_dir).unwrap();

        let posts = [
            ("2023-01-01-docker-intro.md", "author: Adam\nfunnel: 3"),
            ("2023-02-01-podman.md", "author: Adam\ntopic: containers\nfunnel: 3"),
            ("2023-03-01-earthfile.md", "author: Corey\nfunnel: 1"),
            ("2023-04-01-bazel.md", "editor: Bala\nfunnel: 3"),
        ];
        for (name, fm) in posts {
            fs::write(site.posts_dir.join(name), format!("---\n{}\n---\nbody\n", fm)).unwrap();
        }
        fs::write(
            site.data_dir.join("related_articles.yml"),
            "earthfile:\n  - bazel\n  - retired-post\n",
        )
        .unwrap();
        fs::write(site.data_dir.join("popular_articles.yml"), "docker-intro: [bazel]\n").unwrap();
        fs::write(site.data_dir.join("short_titles.yml"), "earthfile: Earthfiles\n").unwrap();

        let index = site.build_index(Some(5)).unwrap();

        let slugs: Vec<_> = index.posts().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["docker-intro", "podman", "earthfile", "bazel"]);
        assert_eq!(index.by_author("Adam").len(), 2);
        assert_eq!(index.by_funnel(3).len(), 3);

        let related = index.related_sidebar("earthfile");
        assert_eq!(related.len(), 2);
        assert_eq!(related[0].slug, "bazel");
        assert_eq!(index.related_full("earthfile").len(), 3);

        assert_eq!(index.popular_sidebar("bazel")[0].slug, "bazel");
        assert_eq!(index.shorten_name("earthfile"), Some("Earthfiles"));
        assert_eq!(index.summary().dropped_refs, 1);
        assert!(index.categories.is_empty());
    }
}
