use anyhow::Result;

use crate::generator::context::GeneratorContext;
use crate::generator::memory::StageMemory;
use crate::generator::types::StageKind;
use crate::resources::{
    Resource, ResourceCatalog, ResourceError, derive_topics, github, huggingface, kaggle,
};

pub const HUGGINGFACE_SECTION: &str = "HuggingFace Datasets";
pub const GITHUB_SECTION: &str = "GitHub Repositories";

/// 资源检索员 - 从用例中提取主题，依次查询Kaggle、Hugging Face与GitHub
///
/// 不调用大模型。单个平台失败只记录警告并视为无结果，不影响其余平台。
#[derive(Default)]
pub struct ResourceScout;

impl ResourceScout {
    pub async fn execute(&self, context: &GeneratorContext) -> Result<ResourceCatalog> {
        let use_cases = context.get_stage_output(StageKind::UseCases).await?;
        let company = context.get_company().await?;

        let client = &context.resources;
        let limit = client.config().max_results_per_source;
        let topics = derive_topics(&use_cases, &company, client.config().max_topics);
        tracing::info!("📚 资源检索主题: {:?}", topics);

        let mut catalog = ResourceCatalog::default();

        for topic in &topics {
            let query = format!("{} {}", topic, company);
            let mut datasets =
                or_empty(kaggle::SOURCE, client.search_kaggle(&query, limit).await);
            if datasets.is_empty() {
                datasets.push(kaggle::no_dataset_found());
            }
            catalog.push_section(format!("Use Case: {}", topic), datasets);
        }

        let datasets = or_empty(
            huggingface::SOURCE,
            client.search_huggingface(&company, limit).await,
        );
        if !datasets.is_empty() {
            catalog.push_section(HUGGINGFACE_SECTION, datasets);
        }

        let repos = or_empty(github::SOURCE, client.search_github(&company, limit).await);
        if !repos.is_empty() {
            catalog.push_section(GITHUB_SECTION, repos);
        }

        let markdown = catalog.to_markdown();
        context
            .store_stage_output(StageKind::Resources, &markdown)
            .await?;

        tracing::info!(
            "✅ Sub-Agent [{}]执行完成，共 {} 条资源",
            StageKind::Resources,
            catalog.resources().count()
        );
        Ok(catalog)
    }
}

fn or_empty(source: &str, result: Result<Vec<Resource>, ResourceError>) -> Vec<Resource> {
    match result {
        Ok(resources) => resources,
        Err(e) => {
            tracing::warn!("⚠️ {} 检索失败，按无结果处理: {}", source, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ResourceConfig};
    use crate::generator::types::CompanyDescriptor;
    use crate::llm::LanguageModel;
    use crate::resources::ResourceClient;
    use crate::search::{SearchHit, WebSearch};
    use async_trait::async_trait;
    use httpmock::prelude::*;
    use std::sync::Arc;

    struct UnusedModel;

    #[async_trait]
    impl LanguageModel for UnusedModel {
        async fn complete(&self, _system: &str, _user: &str) -> anyhow::Result<String> {
            anyhow::bail!("the resource stage must not call the model")
        }
    }

    struct UnusedSearch;

    #[async_trait]
    impl WebSearch for UnusedSearch {
        async fn search(&self, _query: &str, _max: usize) -> anyhow::Result<Vec<SearchHit>> {
            anyhow::bail!("the resource stage must not search the web")
        }
    }

    async fn context_for(resource_config: ResourceConfig, use_cases: &str) -> GeneratorContext {
        let config = Config {
            resources: resource_config.clone(),
            ..Default::default()
        };
        let context = GeneratorContext::with_services(
            config,
            Arc::new(UnusedModel),
            Arc::new(UnusedSearch),
            Arc::new(ResourceClient::new(&resource_config).unwrap()),
        );
        context
            .store_company(&CompanyDescriptor::parse("Retail Banking").unwrap())
            .await
            .unwrap();
        context
            .store_stage_output(StageKind::UseCases, use_cases)
            .await
            .unwrap();
        context
    }

    #[tokio::test]
    async fn test_execute_collects_all_sources_in_order() {
        let server = MockServer::start_async().await;
        let kaggle_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/kaggle/datasets/list")
                    .query_param("search", "Fraud detection Retail Banking");
                then.status(200).json_body(serde_json::json!([
                    {"ref": "acme/fraud", "title": "Card Fraud", "subtitle": "Labelled transactions", "downloadCount": 10}
                ]));
            })
            .await;
        let empty_kaggle = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/kaggle/datasets/list")
                    .query_param("search", "Churn prediction Retail Banking");
                then.status(200).json_body(serde_json::json!([]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/datasets")
                    .query_param("search", "Retail Banking");
                then.status(200).json_body(serde_json::json!([
                    {"id": "org/bank-marketing", "description": "Bank marketing calls", "downloads": 55}
                ]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search/repositories");
                then.status(500).body("boom");
            })
            .await;

        let resource_config = ResourceConfig {
            kaggle_username: Some("alice".to_string()),
            kaggle_key: Some("secret".to_string()),
            kaggle_base_url: server.url("/kaggle"),
            huggingface_base_url: server.base_url(),
            github_base_url: server.base_url(),
            ..Default::default()
        };
        let context = context_for(
            resource_config,
            "1. Fraud detection: flag suspicious payments\n2. Churn prediction: keep customers",
        )
        .await;

        let catalog = ResourceScout.execute(&context).await.unwrap();

        kaggle_mock.assert_async().await;
        empty_kaggle.assert_async().await;
        let headings: Vec<_> = catalog.sections.iter().map(|s| s.heading.as_str()).collect();
        // GitHub失败时整个分区被省略
        assert_eq!(
            headings,
            vec![
                "Use Case: Fraud detection",
                "Use Case: Churn prediction",
                HUGGINGFACE_SECTION
            ]
        );
        assert_eq!(catalog.sections[0].resources[0].title, "Card Fraud");
        assert_eq!(
            catalog.sections[1].resources,
            vec![kaggle::no_dataset_found()]
        );

        let stored = context.get_stage_output(StageKind::Resources).await.unwrap();
        assert_eq!(stored, catalog.to_markdown());
    }

    #[tokio::test]
    async fn test_execute_without_kaggle_credentials_uses_fallback() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/datasets");
                then.status(200).json_body(serde_json::json!([]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search/repositories");
                then.status(200).json_body(serde_json::json!({
                    "items": [{
                        "name": "bank-ai",
                        "html_url": "https://github.com/acme/bank-ai",
                        "description": "Banking datasets",
                        "stargazers_count": 12,
                        "language": "Python"
                    }]
                }));
            })
            .await;

        let resource_config = ResourceConfig {
            kaggle_username: None,
            kaggle_key: None,
            huggingface_base_url: server.base_url(),
            github_base_url: server.base_url(),
            ..Default::default()
        };
        let context = context_for(resource_config, "").await;

        let catalog = ResourceScout.execute(&context).await.unwrap();

        assert_eq!(catalog.sections.len(), 2);
        assert_eq!(
            catalog.sections[0].heading,
            "Use Case: AI applications in Retail Banking"
        );
        assert!(
            catalog.sections[0]
                .resources
                .iter()
                .all(|r| r.source == kaggle::FALLBACK_SOURCE)
        );
        assert_eq!(catalog.sections[1].heading, GITHUB_SECTION);
        assert_eq!(catalog.sections[1].resources[0].stars, Some(12));
    }
}
