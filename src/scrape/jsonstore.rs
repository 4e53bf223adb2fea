//! On-disk product store, one JSON object keyed by shop domain.
//!
//! Re-running the scraper replaces the entry for each domain it visited
//! and leaves every other domain untouched.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::scrape::productscraper::{Product, ScrapeError};

pub type ProductStore = BTreeMap<String, Vec<Product>>;

/// Loads the store, treating a missing or unreadable file as empty so a
/// first run or a corrupt store never blocks scraping.
pub fn load(path: &Path) -> ProductStore {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return ProductStore::new(),
    };
    match serde_json::from_reader(BufReader::new(file)) {
        Ok(store) => store,
        Err(err) => {
            log::warn!("ignoring corrupt store {}: {err}", path.display());
            ProductStore::new()
        }
    }
}

/// Replaces the products for `domain` and writes the store back.
pub fn update(path: &Path, domain: &str, products: Vec<Product>) -> Result<(), ScrapeError> {
    let mut store = load(path);
    store.insert(domain.to_string(), products);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &store)?;
    Ok(())
}
