//! Explicit relation tables (related articles, popular articles, short titles)

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::data::load_data_or_default;
use super::site::DataFilesConfig;

/// Slug-keyed relation tables maintained by content authors.
///
/// Any of the three maps may be empty; a missing table behaves exactly
/// like one without entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationConfig {
    /// slug -> ordered related slugs
    pub related: IndexMap<String, Vec<String>>,
    /// slug -> ordered popular slugs
    pub popular: IndexMap<String, Vec<String>>,
    /// slug -> short display title
    pub short_titles: IndexMap<String, String>,
}

impl RelationConfig {
    /// Load the relation tables from the site's data directory
    pub fn load(data_dir: &Path, files: &DataFilesConfig) -> Self {
        let config = Self {
            related: load_data_or_default(&data_dir.join(&files.related)),
            popular: load_data_or_default(&data_dir.join(&files.popular)),
            short_titles: load_data_or_default(&data_dir.join(&files.short_titles)),
        };

        tracing::debug!(
            "Relation config: {} related, {} popular, {} short titles",
            config.related.len(),
            config.popular.len(),
            config.short_titles.len()
        );

        config
    }

    pub fn related_for(&self, slug: &str) -> Option<&[String]> {
        self.related.get(slug).map(Vec::as_slice)
    }

    pub fn popular_for(&self, slug: &str) -> Option<&[String]> {
        self.popular.get(slug).map(Vec::as_slice)
    }

    pub fn short_title_for(&self, slug: &str) -> Option<&str> {
        self.short_titles.get(slug).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_relations() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("related_articles.yml"),
            "docker-intro:\n  - containerd\n  - podman\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("short_titles.yml"),
            "docker-intro: Docker Intro\n",
        )
        .unwrap();

        let config = RelationConfig::load(dir.path(), &DataFilesConfig::default());
        assert_eq!(
            config.related_for("docker-intro").unwrap(),
            ["containerd", "podman"]
        );
        assert!(config.popular.is_empty());
        assert_eq!(config.short_title_for("docker-intro"), Some("Docker Intro"));
        assert_eq!(config.short_title_for("podman"), None);
    }

    #[test]
    fn test_missing_data_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = RelationConfig::load(&dir.path().join("_data"), &DataFilesConfig::default());
        assert!(config.related.is_empty());
        assert!(config.popular.is_empty());
        assert!(config.short_titles.is_empty());
    }

    #[test]
    fn test_deserialize_inline_tables() {
        let yaml = "related:\n  a: [b, c]\npopular: {}\n";
        let config: RelationConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.related_for("a").unwrap(), ["b", "c"]);
        assert!(config.short_titles.is_empty());
    }
}
