//! GitHub代码仓库检索

use serde::Deserialize;

use crate::resources::{Resource, ResourceClient, ResourceError};

pub const SOURCE: &str = "GitHub";

#[derive(Deserialize)]
struct GitHubSearchResponse {
    items: Vec<GitHubRepo>,
}

#[derive(Deserialize)]
struct GitHubRepo {
    name: String,
    html_url: String,
    description: Option<String>,
    stargazers_count: u64,
    language: Option<String>,
}

impl ResourceClient {
    /// 搜索与`query`相关的AI/数据集仓库，按star降序
    ///
    /// # Errors
    ///
    /// HTTP请求失败或返回非成功状态码时返回[`ResourceError`]。
    pub async fn search_github(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Resource>, ResourceError> {
        let url = Self::endpoint(&self.config.github_base_url, "/search/repositories");
        let search_query = format!("{} AI dataset", query);
        let per_page = limit.clamp(1, 100).to_string();

        let mut request = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json")
            .query(&[
                ("q", search_query.as_str()),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", per_page.as_str()),
            ]);
        if let Some(token) = self.config.github_token.as_deref() {
            request = request.header("Authorization", format!("token {}", token));
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(ResourceError::from_response(resp).await);
        }

        let data: GitHubSearchResponse = resp.json().await?;
        Ok(data
            .items
            .into_iter()
            .take(limit)
            .map(|repo| Resource {
                stars: Some(repo.stargazers_count),
                language: Some(repo.language.unwrap_or_else(|| "Unknown".to_string())),
                ..Resource::new(repo.name, repo.html_url, SOURCE).with_description(
                    repo.description
                        .unwrap_or_else(|| "No description available".to_string()),
                )
            })
            .collect())
    }
}
