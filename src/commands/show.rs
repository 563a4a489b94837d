//! Show one post and its recommendations

use anyhow::{anyhow, Result};
use std::fmt::Write;
use std::sync::Arc;

use crate::content::Post;
use crate::index::SiteIndex;
use crate::Site;

pub fn run(site: &Site, slug: &str, seed: Option<u64>) -> Result<()> {
    let index = site.build_index(seed)?;
    print!("{}", render(&index, slug)?);
    Ok(())
}

pub fn render(index: &SiteIndex, slug: &str) -> Result<String> {
    let post = index
        .post(slug)
        .ok_or_else(|| anyhow!("No post with slug {:?}", slug))?;

    let mut out = String::new();
    writeln!(out, "{} [{}]", post.title, post.slug)?;
    writeln!(out, "  date:   {}", post.date.format("%Y-%m-%d"))?;
    writeln!(out, "  path:   {}", post.path)?;
    writeln!(out, "  author: {}", post.author.as_deref().unwrap_or("-"))?;
    writeln!(out, "  editor: {}", post.editor.as_deref().unwrap_or("-"))?;
    writeln!(out, "  topic:  {}", post.topic.as_deref().unwrap_or("-"))?;
    writeln!(out, "  funnel: {}", post.funnel)?;
    if let Some(short) = index.shorten_name(slug) {
        writeln!(out, "  short:  {}", short)?;
    }

    write_list(&mut out, "Related (sidebar)", index.related_sidebar(slug))?;
    write_list(&mut out, "Related (full)", index.related_full(slug))?;
    write_list(&mut out, "Related (footer)", index.related_footer(slug))?;
    write_list(&mut out, "Popular", index.popular_sidebar(slug))?;

    Ok(out)
}

fn write_list(out: &mut String, label: &str, posts: &[Arc<Post>]) -> Result<()> {
    writeln!(out, "{}:", label)?;
    if posts.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for post in posts {
        writeln!(out, "  {} [{}]", post.title, post.slug)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RecommendationConfig, RelationConfig};
    use crate::index::test_support::post;

    #[test]
    fn test_show_post() {
        let mut relations = RelationConfig::default();
        relations
            .related
            .insert("a".to_string(), vec!["b".to_string()]);
        relations
            .short_titles
            .insert("a".to_string(), "A!".to_string());
        let index = SiteIndex::build(
            vec![post("a").with_author("adam"), post("b")],
            Some(&relations),
            &RecommendationConfig::default(),
        );

        let text = render(&index, "a").unwrap();
        assert!(text.starts_with("a [a]\n"));
        assert!(text.contains("  author: adam\n"));
        assert!(text.contains("  editor: -\n"));
        assert!(text.contains("  short:  A!\n"));
        assert!(text.contains("Related (footer):\n  b [b]\n"));
        assert!(text.contains("Popular:\n  (none)\n"));
    }

    #[test]
    fn test_show_unknown_slug() {
        let index = SiteIndex::build(Vec::new(), None, &RecommendationConfig::default());
        assert!(render(&index, "ghost").is_err());
    }
}
