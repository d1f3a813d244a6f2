use crate::core::moderation::{FlagNotifier, ModerationVerdict};
use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::Serialize;

/// Webhook client that reports flagged posts back to the discussion
/// platform. It deliberately exposes only the one call the core needs.
pub struct PlatformNotifier {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct FlagNotification<'a> {
    post_id: u64,
    #[serde(flatten)]
    verdict: &'a ModerationVerdict,
}

impl PlatformNotifier {
    pub fn new(base_url: String, api_key: &str, api_username: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Api-Key",
            HeaderValue::from_str(api_key).context("platform API key is not a valid header")?,
        );
        headers.insert(
            "Api-Username",
            HeaderValue::from_str(api_username)
                .context("platform API username is not a valid header")?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("failed to build platform HTTP client")?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl FlagNotifier for PlatformNotifier {
    async fn notify_flag(&self, post_id: u64, verdict: &ModerationVerdict) -> anyhow::Result<()> {
        let url = format!("{}/admin/ai_flags", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&FlagNotification { post_id, verdict })
            .send()
            .await
            .context("flag notification request failed")?;

        if !response.status().is_success() {
            bail!(
                "platform returned {} for flag notification on post {}",
                response.status(),
                post_id
            );
        }

        Ok(())
    }
}
