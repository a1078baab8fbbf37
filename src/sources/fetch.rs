//! Dataset download with local file cache.
//!
//! Each source dataset is kept as a dated file next to the binary; a run
//! reuses the day's file when present and only downloads when it is missing.
//! The two delegation-style feeds are fetched concurrently; the core never
//! sees any of this, it receives fully materialized prefix lists.

use std::error::Error;
use std::path::Path;

/// IANA top-level IPv4 allocation registry.
pub const REGISTRY_URL: &str =
    "https://www.iana.org/assignments/ipv4-address-space/ipv4-address-space.csv";
/// APNIC delegation feed (all countries, filtered locally).
pub const DELEGATED_URL: &str = "https://ftp.apnic.net/stats/apnic/delegated-apnic-latest";
/// Supplementary flat national list.
pub const NATIONAL_LIST_URL: &str =
    "https://raw.githubusercontent.com/17mon/china_ip_list/master/china_ip_list.txt";

/// Raw dataset texts, ready for the parsers.
pub struct SourceTexts {
    pub registry: String,
    pub delegated: String,
    pub national: String,
}

/// Read a dataset from its cache file, or download and cache it.
async fn read_or_fetch(
    client: &reqwest::Client,
    url: &str,
    cache_file: &str,
) -> Result<String, Box<dyn Error>> {
    if Path::new(cache_file).exists() {
        log::info!("Using cached dataset file: {cache_file}");
        return Ok(std::fs::read_to_string(cache_file)
            .map_err(|e| format!("Error reading cache file {cache_file}: {e}"))?);
    }

    log::warn!("Cache file not found: {cache_file}, downloading {url}");
    let text = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("Error fetching {url}: {e}"))?
        .error_for_status()
        .map_err(|e| format!("Error fetching {url}: {e}"))?
        .text()
        .await
        .map_err(|e| format!("Error reading body of {url}: {e}"))?;

    std::fs::write(cache_file, &text)
        .map_err(|e| format!("Error writing cache file {cache_file}: {e}"))?;
    log::info!("Wrote dataset cache file: {cache_file}");
    Ok(text)
}

/// Fetch (or read from cache) all three source datasets.
///
/// The registry file keeps its canonical name; the two feeds get dated cache
/// names so a stale day's data is never silently reused.
pub async fn fetch_sources() -> Result<SourceTexts, Box<dyn Error>> {
    let now = chrono::Utc::now().with_timezone(&chrono_tz::Asia::Shanghai);
    let date = now.format("%Y-%m-%d");

    let client = reqwest::Client::new();
    let delegated_file = format!("delegated-apnic-{date}.txt");
    let national_file = format!("china_ip_list_{date}.txt");

    let registry = read_or_fetch(&client, REGISTRY_URL, "ipv4-address-space.csv");
    let delegated = read_or_fetch(&client, DELEGATED_URL, &delegated_file);
    let national = read_or_fetch(&client, NATIONAL_LIST_URL, &national_file);
    let (registry, delegated, national) = futures::try_join!(registry, delegated, national)?;

    Ok(SourceTexts {
        registry,
        delegated,
        national,
    })
}
