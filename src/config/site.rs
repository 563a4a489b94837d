//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::index::{FULL_SIZE, SIDEBAR_SIZE};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub url: String,

    // URL
    pub permalink: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub posts_dir: String,
    pub data_dir: String,
    pub layouts_dir: String,

    // Writing
    pub render_drafts: bool,

    // Data files (relative to data_dir)
    #[serde(default)]
    pub data_files: DataFilesConfig,

    // Recommendations
    #[serde(default)]
    pub recommendations: RecommendationConfig,

    /// Snapshot file written by `build` (relative to public_dir)
    pub index_file: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            url: "http://example.com".to_string(),

            permalink: "/:slug/".to_string(),

            source_dir: ".".to_string(),
            public_dir: "_site".to_string(),
            posts_dir: "_posts".to_string(),
            data_dir: "_data".to_string(),
            layouts_dir: "_layouts".to_string(),

            render_drafts: false,

            data_files: DataFilesConfig::default(),
            recommendations: RecommendationConfig::default(),

            index_file: "indexes.json".to_string(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Names of the relation data files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFilesConfig {
    pub related: String,
    pub popular: String,
    pub short_titles: String,
    pub categories: String,
}

impl Default for DataFilesConfig {
    fn default() -> Self {
        Self {
            related: "related_articles.yml".to_string(),
            popular: "popular_articles.yml".to_string(),
            short_titles: "short_titles.yml".to_string(),
            categories: "categories.yml".to_string(),
        }
    }
}

/// Related list sizing. The footer size and the padding stage are fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    pub sidebar_size: usize,
    pub full_size: usize,
    /// Fixed padding seed; a fresh one is drawn per build when unset
    pub seed: Option<u64>,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            sidebar_size: SIDEBAR_SIZE,
            full_size: FULL_SIZE,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.posts_dir, "_posts");
        assert_eq!(config.recommendations.sidebar_size, 2);
        assert_eq!(config.recommendations.full_size, 8);
        assert!(config.recommendations.seed.is_none());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Earthly Blog
permalink: /:year/:slug/
recommendations:
  seed: 42
  full_size: 6
data_files:
  related: related.yml
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Earthly Blog");
        assert_eq!(config.permalink, "/:year/:slug/");
        assert_eq!(config.recommendations.seed, Some(42));
        assert_eq!(config.recommendations.full_size, 6);
        assert_eq!(config.recommendations.sidebar_size, 2);
        assert_eq!(config.data_files.related, "related.yml");
        assert_eq!(config.data_files.popular, "popular_articles.yml");
    }

    #[test]
    fn test_unknown_keys_kept_in_extra() {
        let yaml = "title: Blog\nplugins:\n  - jekyll-feed\n";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.extra.contains_key("plugins"));
    }
}
