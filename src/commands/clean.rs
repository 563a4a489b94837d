//! Remove the written index snapshot

use anyhow::Result;
use std::fs;

use crate::Site;

/// Delete the snapshot at the configured location
pub fn run(site: &Site) -> Result<()> {
    let path = site.index_path();
    if path.exists() {
        fs::remove_file(&path)?;
        tracing::info!("Deleted: {:?}", path);
    } else {
        tracing::debug!("Nothing to clean at {:?}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(&site.public_dir).unwrap();
        fs::write(site.index_path(), "{}").unwrap();

        run(&site).unwrap();
        assert!(!site.index_path().exists());
        // second run is a no-op
        run(&site).unwrap();
    }
}
