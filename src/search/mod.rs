//! 网络搜索 - 调研阶段唯一的外部数据来源

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SearchConfig;

/// 一条搜索结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    /// 页面摘要片段
    #[serde(default)]
    pub content: String,
}

#[async_trait]
pub trait WebSearch: Send + Sync {
    /// 执行一次搜索，最多返回`max_results`条结果
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>>;
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'a str,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// Tavily搜索API客户端
pub struct TavilyClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TavilyClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("usecase-scout/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build search HTTP client")?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl WebSearch for TavilyClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        if self.api_key.is_empty() {
            bail!("Tavily API key is not configured (set TAVILY_API_KEY)");
        }

        tracing::debug!("🔍 Tavily搜索: {}", query);
        let resp = self
            .http
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&TavilyRequest {
                query,
                max_results,
                search_depth: "basic",
            })
            .send()
            .await
            .context("Tavily search request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Tavily search failed ({}): {}", status.as_u16(), body));
        }

        let data: TavilyResponse = resp
            .json()
            .await
            .context("Failed to parse Tavily search response")?;

        let mut hits = data.results;
        hits.truncate(max_results);
        Ok(hits)
    }
}
