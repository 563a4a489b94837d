//! Category page descriptors from `_data/categories.yml`

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::load_data_or_default;

/// A group of categories as written in the data file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryGroup {
    pub name: Option<String>,
    pub items: Vec<CategoryItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryItem {
    pub slug: String,
    pub name: String,
    pub title: String,
}

/// A page to be rendered with the `category` layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPage {
    pub slug: String,
    pub name: String,
    pub title: String,
    /// Output directory relative to the public dir
    pub dir: String,
    pub permalink: String,
}

impl CategoryPage {
    fn from_item(item: &CategoryItem) -> Self {
        Self {
            slug: item.slug.clone(),
            name: item.name.clone(),
            title: item.title.clone(),
            dir: format!("categories/{}", item.slug),
            permalink: format!("/categories/{}/", item.slug),
        }
    }
}

/// One page per category item, in file order
pub fn category_pages(groups: &[CategoryGroup]) -> Vec<CategoryPage> {
    groups
        .iter()
        .flat_map(|g| g.items.iter())
        .filter(|item| {
            if item.slug.is_empty() {
                tracing::warn!("Skipping category {:?} without a slug", item.name);
                false
            } else {
                true
            }
        })
        .map(CategoryPage::from_item)
        .collect()
}

/// Load category pages for a site. Nothing is generated unless the site
/// has a `category` layout.
pub fn load_category_pages(layouts_dir: &Path, data_file: &Path) -> Vec<CategoryPage> {
    if !has_category_layout(layouts_dir) {
        tracing::debug!("No category layout in {:?}, skipping category pages", layouts_dir);
        return Vec::new();
    }

    let groups: Vec<CategoryGroup> = load_data_or_default(data_file);
    category_pages(&groups)
}

fn has_category_layout(layouts_dir: &Path) -> bool {
    ["category.html", "category.liquid"]
        .iter()
        .any(|name| layouts_dir.join(name).is_file())
}
