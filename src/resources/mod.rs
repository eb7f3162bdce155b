//! 数据集与代码仓库检索
//!
//! 通过三个公开平台为AI用例寻找可用的实施资源：
//! - Kaggle（数据集，需要凭据，缺失时返回占位结果）
//! - Hugging Face Hub（数据集）
//! - GitHub（代码仓库，按star排序）

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::Duration;

use crate::config::ResourceConfig;

pub mod github;
pub mod huggingface;
pub mod kaggle;
pub mod topics;

mod error;

pub use error::ResourceError;
pub use topics::derive_topics;

/// 一条资源：数据集或代码仓库
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    /// 空字符串表示没有可用链接
    pub url: String,
    /// 来源平台，例如`Kaggle`、`HuggingFace`、`GitHub`
    pub source: String,
    pub description: Option<String>,
    pub downloads: Option<u64>,
    pub likes: Option<u64>,
    pub stars: Option<u64>,
    pub language: Option<String>,
}

impl Resource {
    pub fn new(title: impl Into<String>, url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source: source.into(),
            description: None,
            downloads: None,
            likes: None,
            stars: None,
            language: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// 同一主题（或同一平台）下的一组资源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSection {
    pub heading: String,
    pub resources: Vec<Resource>,
}

/// 资源阶段的完整产出，按查询顺序拼接，不去重
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCatalog {
    pub sections: Vec<ResourceSection>,
}

impl ResourceCatalog {
    pub fn push_section(&mut self, heading: impl Into<String>, resources: Vec<Resource>) {
        self.sections.push(ResourceSection {
            heading: heading.into(),
            resources,
        });
    }

    /// 按顺序遍历所有资源
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.sections.iter().flat_map(|section| section.resources.iter())
    }

    /// 渲染为markdown，作为后续阶段的输入以及资源报告的正文
    pub fn to_markdown(&self) -> String {
        let mut content = String::from("# AI Implementation Resources\n\n");

        if self.sections.is_empty() {
            content.push_str("No resources were found.\n");
            return content;
        }

        for section in &self.sections {
            let _ = write!(content, "## {}\n\n", section.heading);

            if section.resources.is_empty() {
                content.push_str("No specific resources found for this use case.\n\n");
                continue;
            }

            for resource in &section.resources {
                if resource.url.is_empty() {
                    let _ = writeln!(content, "- **{}** ({})", resource.title, resource.source);
                } else {
                    let _ = writeln!(
                        content,
                        "- **[{}]({})** ({})",
                        resource.title, resource.url, resource.source
                    );
                }
                if let Some(description) = &resource.description {
                    let _ = writeln!(content, "  - {}", description);
                }
                if let Some(downloads) = resource.downloads {
                    let _ = writeln!(content, "  - Downloads: {}", downloads);
                }
                if let Some(stars) = resource.stars {
                    let _ = writeln!(content, "  - Stars: {}", stars);
                }
                content.push('\n');
            }
        }

        content
    }
}

/// 资源平台HTTP客户端
pub struct ResourceClient {
    http: reqwest::Client,
    config: ResourceConfig,
}

impl ResourceClient {
    pub fn new(config: &ResourceConfig) -> Result<Self> {
        // GitHub API要求必须携带User-Agent
        let http = reqwest::Client::builder()
            .user_agent(concat!("usecase-scout/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build resource HTTP client")?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    fn endpoint(base_url: &str, path: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), path)
    }
}
