use tracing::{info, warn};

use crate::fetcher::client::Fetcher;

/// Scrapes the configured reference URLs one at a time and concatenates the
/// results, each followed by a newline. A failing source is logged and
/// skipped so one unreachable site degrades the aggregate instead of
/// aborting it.
pub async fn collect_reference_text(fetcher: &Fetcher, urls: &[String]) -> String {
    let mut combined = String::new();
    for url in urls {
        match fetcher.fetch(url).await {
            Ok(content) => {
                info!(url = %url, chars = content.chars().count(), "scraped source");
                combined.push_str(&content);
                combined.push('\n');
            }
            Err(err) => {
                warn!(url = %url, error = %err, "failed to scrape source, skipping");
            }
        }
    }
    combined
}
