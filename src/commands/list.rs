//! List site content

use anyhow::Result;
use std::fmt::Write;
use std::sync::Arc;

use crate::content::Post;
use crate::index::{PostGroups, SiteIndex};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let index = site.build_index(None)?;
    print!("{}", render(&index, content_type)?);
    Ok(())
}

/// Render a listing of `content_type` as plain text
pub fn render(index: &SiteIndex, content_type: &str) -> Result<String> {
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            writeln!(out, "Posts ({}):", index.posts().len())?;
            for post in index.posts() {
                writeln!(
                    out,
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.slug
                )?;
            }
        }
        "author" | "authors" => write_groups(&mut out, "Authors", &index.primary.by_author)?,
        "editor" | "editors" => write_groups(&mut out, "Editors", &index.primary.by_editor)?,
        "topic" | "topics" => write_groups(&mut out, "Topics", &index.primary.by_topic)?,
        "funnel" | "funnels" => {
            writeln!(out, "Funnel stages ({}):", index.primary.by_funnel.len())?;
            for (stage, posts) in &index.primary.by_funnel {
                write_group(&mut out, &stage.to_string(), posts)?;
            }
        }
        "category" | "categories" => {
            writeln!(out, "Categories ({}):", index.categories.len())?;
            for page in &index.categories {
                writeln!(out, "  {} - {} [{}]", page.name, page.title, page.permalink)?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, author, editor, topic, funnel, category",
                content_type
            );
        }
    }

    Ok(out)
}

fn write_groups(out: &mut String, label: &str, groups: &PostGroups) -> Result<()> {
    writeln!(out, "{} ({}):", label, groups.len())?;
    for (key, posts) in groups {
        write_group(out, key, posts)?;
    }
    Ok(())
}

fn write_group(out: &mut String, key: &str, posts: &[Arc<Post>]) -> Result<()> {
    writeln!(out, "  {} ({})", key, posts.len())?;
    for post in posts {
        writeln!(out, "    {}", post.slug)?;
    }
    Ok(())
}
