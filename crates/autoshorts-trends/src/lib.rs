// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Trends topic source for the autoshorts pipeline.
//!
//! Implements [`TopicSource`] over the public daily-trends feed. The feed is
//! served with an anti-JSON-hijacking prefix that is stripped before parsing.

pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use autoshorts_config::model::TrendsConfig;
use autoshorts_core::error::AutoshortsError;
use autoshorts_core::traits::{StageAdapter, TopicSource};
use autoshorts_core::types::{Stage, TrendIdea};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::types::{DailyTrendsResponse, TrendingSearch};

/// Topic source backed by the Google Trends daily-trends feed.
#[derive(Debug, Clone)]
pub struct GoogleTrendsSource {
    client: reqwest::Client,
    base_url: String,
    hl: String,
    max_topics: usize,
}

impl GoogleTrendsSource {
    /// Creates a source from the `[trends]` config section.
    pub fn new(config: &TrendsConfig) -> Result<Self, AutoshortsError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| {
                AutoshortsError::Config(format!("invalid trends.user_agent header value: {e}"))
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AutoshortsError::Trends {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            hl: config.hl.clone(),
            max_topics: config.max_topics,
        })
    }
}

impl StageAdapter for GoogleTrendsSource {
    fn name(&self) -> &str {
        "google-trends"
    }

    fn stage(&self) -> Stage {
        Stage::Topic
    }
}

#[async_trait]
impl TopicSource for GoogleTrendsSource {
    async fn discover(&self, region: &str) -> Result<Vec<TrendIdea>, AutoshortsError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("geo", region), ("hl", self.hl.as_str())])
            .send()
            .await
            .map_err(|e| AutoshortsError::Trends {
                message: format!("Google Trends request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, region, "trends response received");
        if !status.is_success() {
            return Err(AutoshortsError::trends(format!(
                "Failed to fetch Google Trends (status: {}).",
                status.as_u16()
            )));
        }

        let body = response.text().await.map_err(|e| AutoshortsError::Trends {
            message: format!("failed to read Google Trends response: {e}"),
            source: Some(Box::new(e)),
        })?;

        let ideas = parse_daily_trends(&body, region, self.max_topics)?;
        debug!(count = ideas.len(), region, "trending topics parsed");
        Ok(ideas)
    }
}

/// Parses a raw daily-trends payload into at most `limit` candidates, in feed order.
pub fn parse_daily_trends(
    raw: &str,
    region: &str,
    limit: usize,
) -> Result<Vec<TrendIdea>, AutoshortsError> {
    let payload: DailyTrendsResponse =
        serde_json::from_str(strip_xssi_prefix(raw)).map_err(|e| AutoshortsError::Trends {
            message: "Unable to parse Google Trends response.".to_string(),
            source: Some(Box::new(e)),
        })?;

    let days = payload
        .default
        .map(|d| d.trending_searches_days)
        .unwrap_or_default();

    Ok(days
        .into_iter()
        .flat_map(|day| day.trending_searches)
        .filter_map(|search| to_trend_idea(search, region))
        .take(limit)
        .collect())
}

fn to_trend_idea(search: TrendingSearch, region: &str) -> Option<TrendIdea> {
    let keyword = search
        .title
        .and_then(|t| t.query)
        .filter(|q| !q.trim().is_empty())?;

    let related = search
        .related_queries
        .map(|queries| {
            queries
                .into_iter()
                .map(|q| q.query)
                .filter(|q| !q.is_empty())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|joined| !joined.is_empty());
    let description = related.or(search.description.filter(|d| !d.is_empty()));

    Some(TrendIdea {
        keyword,
        score: parse_traffic(search.formatted_traffic.as_deref()),
        description,
        region: Some(region.to_string()),
    })
}

/// Keeps the digits of a traffic estimate: `"200K+"` scores 200.
fn parse_traffic(formatted: Option<&str>) -> f64 {
    formatted
        .map(|t| t.chars().filter(char::is_ascii_digit).collect::<String>())
        .and_then(|digits| digits.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Removes the `)]}',` guard Google prepends to JSON responses.
fn strip_xssi_prefix(raw: &str) -> &str {
    raw.trim_start()
        .strip_prefix(")]}',")
        .map(str::trim_start)
        .unwrap_or(raw)
}
