use anyhow::Context;
use indexmap::IndexMap;
use reqwest::Client;

use crate::config::AppConfig;

/// Fetches one month of raw price statistics from the source.
pub struct RawInfoRetriever {
    client: Client,
    source_url: String,
    cities: IndexMap<String, String>,
}

impl RawInfoRetriever {
    /// Source-side sub-region selector; "0" means the whole city.
    const REGION: &'static str = "0";

    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            source_url: config.source_url.clone(),
            cities: config.cities.clone(),
        }
    }

    /// POST the statistics form for one (city, year, month) and return the
    /// response body verbatim. No status check, no retry; repeated calls for
    /// the same month re-fetch.
    pub async fn retrieve(&self, city: &str, year: i32, month: u32) -> anyhow::Result<String> {
        let date = request_date(year, month);
        let region = self
            .cities
            .get(city)
            .with_context(|| format!("no region code configured for city: {city}"))?;

        let payload = [
            ("st[act]", "stat"),
            ("st[oblast]", region.as_str()),
            ("st[region]", Self::REGION),
            ("st[date1]", date.as_str()),
            ("st[date2]", date.as_str()),
        ];
        let response = self
            .client
            .post(&self.source_url)
            .form(&payload)
            .send()
            .await?;
        let body = response.text().await?;
        Ok(body)
    }
}

/// First-of-month date string the source expects in its form payload.
fn request_date(year: i32, month: u32) -> String {
    format!("{year}-{month:02}-01")
}
