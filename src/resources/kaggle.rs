//! Kaggle数据集检索
//!
//! 使用Kaggle公开API `GET /datasets/list?search=` 并以Basic Auth携带
//! `KAGGLE_USERNAME` / `KAGGLE_KEY`。凭据缺失时不发请求，返回标注为
//! `Kaggle (Fallback)`的占位结果，提示用户配置凭据。

use serde::Deserialize;

use crate::resources::{Resource, ResourceClient, ResourceError};

pub const SOURCE: &str = "Kaggle";
pub const FALLBACK_SOURCE: &str = "Kaggle (Fallback)";
pub const DATASET_INDEX_URL: &str = "https://www.kaggle.com/datasets";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct KaggleDataset {
    #[serde(rename = "ref")]
    reference: String,
    title: String,
    subtitle: Option<String>,
    download_count: Option<u64>,
}

impl ResourceClient {
    /// 在Kaggle上搜索数据集
    ///
    /// # Errors
    ///
    /// HTTP请求失败或返回非成功状态码时返回[`ResourceError`]。
    pub async fn search_kaggle(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Resource>, ResourceError> {
        let Some((username, key)) = self.config.kaggle_credentials() else {
            tracing::warn!("Kaggle凭据未配置，使用占位结果: {}", query);
            return Ok(kaggle_fallback(query, limit));
        };

        let url = Self::endpoint(&self.config.kaggle_base_url, "/datasets/list");
        let resp = self
            .http
            .get(&url)
            .basic_auth(username, Some(key))
            .query(&[("search", query)])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ResourceError::from_response(resp).await);
        }

        let datasets: Vec<KaggleDataset> = resp.json().await?;
        Ok(datasets
            .into_iter()
            .take(limit)
            .map(|dataset| {
                let description = dataset
                    .subtitle
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| format!("Dataset for {}", query));
                Resource {
                    downloads: dataset.download_count,
                    ..Resource::new(
                        dataset.title,
                        format!("{}/{}", DATASET_INDEX_URL, dataset.reference),
                        SOURCE,
                    )
                    .with_description(description)
                }
            })
            .collect())
    }
}

/// 凭据缺失时的占位结果
pub fn kaggle_fallback(query: &str, limit: usize) -> Vec<Resource> {
    [
        (
            "example1",
            "use real Kaggle API credentials for actual results",
        ),
        ("example2", "set KAGGLE_USERNAME and KAGGLE_KEY for real results"),
    ]
    .iter()
    .enumerate()
    .take(limit)
    .map(|(i, (slug, hint))| {
        Resource::new(
            format!("{} Dataset {}", query, i + 1),
            format!("{}/{}", DATASET_INDEX_URL, slug),
            FALLBACK_SOURCE,
        )
        .with_description(format!("Example dataset for {} - {}", query, hint))
    })
    .collect()
}

/// 某个主题没有命中任何数据集时使用的条目
pub fn no_dataset_found() -> Resource {
    Resource::new("No specific dataset found", DATASET_INDEX_URL, SOURCE)
        .with_description("Search for relevant datasets on Kaggle")
}
