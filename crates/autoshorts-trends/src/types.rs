// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Trends daily-trends feed types.
//!
//! Only the fields the topic source reads are modeled; everything else in
//! the feed is ignored.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct DailyTrendsResponse {
    #[serde(default)]
    pub default: Option<DailyTrends>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTrends {
    #[serde(default)]
    pub trending_searches_days: Vec<TrendingDay>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingDay {
    #[serde(default)]
    pub trending_searches: Vec<TrendingSearch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingSearch {
    #[serde(default)]
    pub title: Option<SearchTitle>,
    /// Traffic estimate such as `"200K+"`.
    #[serde(default)]
    pub formatted_traffic: Option<String>,
    #[serde(default)]
    pub related_queries: Option<Vec<RelatedQuery>>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchTitle {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RelatedQuery {
    #[serde(default)]
    pub query: String,
}
