//! Per-domain archive of the matched product markup.
//!
//! Each run keeps the raw `grid-product` blocks next to the JSON store,
//! wrapped in a minimal document, so extraction stays inspectable and
//! re-parseable after the fact.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::scrape::productscraper::ScrapeError;

/// The archive file for `domain`, placed in the store's directory:
/// `web/all_products.json` gets `web/{domain}_products.html`.
pub fn archive_path(store: &Path, domain: &str) -> PathBuf {
    let dir = store.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("{domain}_products.html"))
}

/// Writes the matched blocks as one document, replacing any previous
/// archive for the domain.
pub fn write(path: &Path, blocks: &[&str]) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(b"<html><body>")?;
    for block in blocks {
        file.write_all(block.as_bytes())?;
    }
    file.write_all(b"</body></html>")?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::scrape::htmlutility;

    use super::*;

    #[test]
    fn archive_sits_next_to_the_store() {
        let path = archive_path(Path::new("web/all_products.json"), "example.com");
        assert_eq!(path, Path::new("web/example.com_products.html"));
    }

    #[test]
    fn blocks_are_wrapped_and_reparseable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("web/example.com_products.html");
        let blocks = [
            r#"<div class="grid-product">first</div>"#,
            r#"<div class="grid-product">second</div>"#,
        ];
        write(&path, &blocks).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<html><body>"));
        assert!(content.ends_with("</body></html>"));
        assert_eq!(htmlutility::class_blocks(&content, "div", "grid-product").len(), 2);
    }

    #[test]
    fn rerun_replaces_the_previous_archive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("archive.html");
        write(&path, &["<div>old</div>"]).unwrap();
        write(&path, &["<div>new</div>"]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("new"));
        assert!(!content.contains("old"));
    }
}
