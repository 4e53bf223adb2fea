use std::path::Path;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scrape::htmlarchive;
use crate::scrape::htmlutility;
use crate::scrape::jsonstore;

/// Browser identities rotated per request so a long catalogue walk does
/// not present one fingerprint the whole way through.
const USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:122.0) Gecko/20100101 Firefox/122.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Http(#[from] Box<ureq::Error>),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("not an absolute http(s) url: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    name: String,
    url: String,
    price: String,
}

impl Product {
    pub fn new(name: &str, url: &str, price: &str) -> Product {
        Product {
            name: name.to_string(),
            url: url.to_string(),
            price: price.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn price(&self) -> &str {
        &self.price
    }
}

/// The `scheme://host` prefix of an absolute url.
fn origin(url: &str) -> Result<&str, ScrapeError> {
    let scheme_end = url
        .find("://")
        .ok_or_else(|| ScrapeError::InvalidUrl(url.to_string()))?;
    if !matches!(&url[..scheme_end], "http" | "https") {
        return Err(ScrapeError::InvalidUrl(url.to_string()));
    }
    let rest = &url[scheme_end + 3..];
    if rest.is_empty() || rest.starts_with('/') {
        return Err(ScrapeError::InvalidUrl(url.to_string()));
    }
    match rest.find('/') {
        Some(at) => Ok(&url[..scheme_end + 3 + at]),
        None => Ok(url),
    }
}

/// Host of an absolute url with any leading `www.` stripped; used as the
/// store key so `www.example.com` and `example.com` merge.
pub fn domain_of(url: &str) -> Result<String, ScrapeError> {
    let origin = origin(url)?;
    let host = &origin[origin.find("://").unwrap_or(0) + 3..];
    let host = host.split(':').next().unwrap_or(host);
    Ok(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Resolves an href against the page url. Only the cases the catalogue
/// pages actually produce: absolute urls pass through, protocol-relative
/// ones inherit the page's scheme, root-relative ones join the origin.
pub fn join_url(base: &str, href: &str) -> Result<String, ScrapeError> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Ok(href.to_string());
    }
    let origin = origin(base)?;
    if let Some(rest) = href.strip_prefix("//") {
        let scheme = &origin[..origin.find("://").unwrap_or(0)];
        return Ok(format!("{scheme}://{rest}"));
    }
    if href.starts_with('/') {
        return Ok(format!("{origin}{href}"));
    }
    Ok(format!("{origin}/{href}"))
}

/// Pure extraction from a catalogue page, returning each product with the
/// markup block it came from. Containers without a link or a name are
/// skipped; a missing price becomes "N/A".
pub fn extract_entries<'a>(
    html: &'a str,
    base_url: &str,
) -> Result<Vec<(Product, &'a str)>, ScrapeError> {
    let mut entries = Vec::new();
    for block in htmlutility::class_blocks(html, "div", "grid-product") {
        let Some(link) = htmlutility::first_block_with_class(block, "grid-product__link") else {
            continue;
        };
        let Some(href) = htmlutility::attr_value(link, "href") else {
            continue;
        };
        let Some(title) = htmlutility::first_block_with_class(block, "grid-product__title--body")
        else {
            continue;
        };
        let name = htmlutility::inner_text(title);
        if name.is_empty() {
            continue;
        }
        let price = htmlutility::first_block_with_class(block, "grid-product__price")
            .map(htmlutility::inner_text)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| "N/A".to_string());
        entries.push((Product::new(&name, &join_url(base_url, href)?, &price), block));
    }
    Ok(entries)
}

/// The products alone, when the source blocks are not needed.
pub fn extract_products(html: &str, base_url: &str) -> Result<Vec<Product>, ScrapeError> {
    let entries = extract_entries(html, base_url)?;
    Ok(entries.into_iter().map(|(product, _)| product).collect())
}

/// Fetches catalogue pages and keeps the on-disk product store current.
pub struct ProductScraper {
    agent: ureq::Agent,
    delay: Duration,
    next_agent: usize,
}

impl ProductScraper {
    pub fn new(delay: Duration) -> ProductScraper {
        ProductScraper {
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(30))
                .build(),
            delay,
            next_agent: 0,
        }
    }

    fn user_agent(&mut self) -> &'static str {
        let agent = USER_AGENTS[self.next_agent % USER_AGENTS.len()];
        self.next_agent += 1;
        agent
    }

    fn fetch(&mut self, url: &str) -> Result<String, ScrapeError> {
        let user_agent = self.user_agent();
        log::debug!("fetching {url} as {user_agent}");
        let body = self
            .agent
            .get(url)
            .set("User-Agent", user_agent)
            .call()
            .map_err(Box::new)?
            .into_string()?;
        Ok(body)
    }

    /// Scrapes one catalogue page into a product list.
    pub fn scrape(&mut self, url: &str) -> Result<Vec<Product>, ScrapeError> {
        let html = self.fetch(url)?;
        extract_products(&html, url)
    }

    /// Scrapes every url, merging results into the store at `output` and
    /// archiving the matched markup next to it. A failing url is logged
    /// and skipped so one bad page does not lose the rest of the run.
    pub fn scrape_all(&mut self, urls: &[String], output: &Path) -> Result<(), ScrapeError> {
        for (index, url) in urls.iter().enumerate() {
            if index > 0 {
                thread::sleep(self.delay);
            }
            let domain = match domain_of(url) {
                Ok(domain) => domain,
                Err(err) => {
                    log::warn!("skipping {url}: {err}");
                    continue;
                }
            };
            let html = match self.fetch(url) {
                Ok(html) => html,
                Err(err) => {
                    log::warn!("skipping {url}: {err}");
                    continue;
                }
            };
            let entries = extract_entries(&html, url)?;
            log::info!("{domain}: {} products from {url}", entries.len());

            let blocks: Vec<&str> = entries.iter().map(|(_, block)| *block).collect();
            htmlarchive::write(&htmlarchive::archive_path(output, &domain), &blocks)?;

            let products = entries.into_iter().map(|(product, _)| product).collect();
            jsonstore::update(output, &domain, products)?;
        }
        Ok(())
    }
}
