use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::core::botlists::{BotListClient, BotListError};

/// Minimal Top.gg API client. It deliberately exposes only the stats call
/// the core layer needs. Without a token the client stays disabled.
pub struct TopGgClient {
    client: Client,
    base_url: String,
    enabled: bool,
}

impl TopGgClient {
    pub fn new(token: Option<String>) -> Result<Self, BotListError> {
        let mut headers = HeaderMap::new();
        headers.insert("User-Agent", HeaderValue::from_static("ParrotBot/0.3"));

        let enabled = token.is_some();
        if let Some(token) = token {
            headers.insert(
                "Authorization",
                HeaderValue::from_str(&token).map_err(|e| BotListError::Api(e.to_string()))?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| BotListError::Api(e.to_string()))?;

        Ok(Self {
            client,
            base_url: "https://top.gg/api".to_string(),
            enabled,
        })
    }
}

#[async_trait]
impl BotListClient for TopGgClient {
    fn enabled(&self) -> bool {
        self.enabled
    }

    async fn post_server_count(
        &self,
        bot_id: u64,
        server_count: usize,
    ) -> Result<(), BotListError> {
        let url = format!("{}/bots/{}/stats", self.base_url, bot_id);
        let resp = self
            .client
            .post(&url)
            .json(&StatsPayload { server_count })
            .send()
            .await
            .map_err(|e| BotListError::Api(e.to_string()))?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            return Err(BotListError::Api(
                "Top.gg rejected the configured token".to_string(),
            ));
        }

        if !resp.status().is_success() {
            let status = resp.status();
            // The error body is free-form JSON; surface its message if any.
            let detail = resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or_default();
            let mut message = format!("Top.gg returned {} for stats post", status);
            if !detail.is_empty() {
                message.push_str(&format!(": {}", detail));
            }
            return Err(BotListError::Api(message));
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct StatsPayload {
    server_count: usize,
}
