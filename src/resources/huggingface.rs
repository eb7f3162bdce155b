//! Hugging Face Hub数据集检索

use serde::Deserialize;

use crate::resources::{Resource, ResourceClient, ResourceError};
use crate::utils::text::truncate_with_ellipsis;

pub const SOURCE: &str = "HuggingFace";

const DESCRIPTION_LIMIT: usize = 200;

#[derive(Deserialize)]
struct HubDataset {
    id: String,
    description: Option<String>,
    downloads: Option<u64>,
    likes: Option<u64>,
}

impl ResourceClient {
    /// 在Hugging Face Hub上搜索数据集
    ///
    /// # Errors
    ///
    /// HTTP请求失败或返回非成功状态码时返回[`ResourceError`]。
    pub async fn search_huggingface(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Resource>, ResourceError> {
        let url = Self::endpoint(&self.config.huggingface_base_url, "/api/datasets");
        let limit_param = limit.to_string();
        let resp = self
            .http
            .get(&url)
            .query(&[("search", query), ("limit", limit_param.as_str())])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ResourceError::from_response(resp).await);
        }

        let datasets: Vec<HubDataset> = resp.json().await?;
        Ok(datasets
            .into_iter()
            .take(limit)
            .map(|dataset| {
                let description = dataset
                    .description
                    .map(|d| truncate_with_ellipsis(d.trim(), DESCRIPTION_LIMIT))
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| "No description available".to_string());
                Resource {
                    downloads: dataset.downloads,
                    likes: dataset.likes,
                    ..Resource::new(
                        dataset.id.clone(),
                        format!("https://huggingface.co/datasets/{}", dataset.id),
                        SOURCE,
                    )
                    .with_description(description)
                }
            })
            .collect())
    }
}
