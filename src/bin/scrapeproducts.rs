use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

use comphyd::configuration::Configuration;
use comphyd::scrape::productscraper::ProductScraper;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    log::set_max_level(log::LevelFilter::Info);

    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("scenarios.json"));
    let configuration = match Configuration::from_reader(&config_path) {
        Ok(configuration) => configuration,
        Err(err) => {
            log::info!(
                "no usable configuration at {} ({err}); using the built-in settings",
                config_path.display()
            );
            Configuration::builtin()
        }
    };

    let Some(settings) = configuration.scrape() else {
        log::warn!("configuration declares no scrape settings; nothing to do");
        return Ok(());
    };

    let mut scraper = ProductScraper::new(Duration::from_millis(settings.delay_ms()));
    scraper.scrape_all(settings.urls(), Path::new(settings.output()))?;
    Ok(())
}
