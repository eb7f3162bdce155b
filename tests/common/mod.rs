#![allow(dead_code)]

use anyhow::{Result, bail};
use async_trait::async_trait;
use httpmock::prelude::*;
use std::path::Path;
use std::sync::{Arc, Mutex};

use usecase_scout::config::{Config, ResourceConfig};
use usecase_scout::generator::context::GeneratorContext;
use usecase_scout::llm::LanguageModel;
use usecase_scout::resources::ResourceClient;
use usecase_scout::search::{SearchHit, WebSearch};

pub const RESEARCH_OUTPUT: &str = "RESEARCH-7f3a: Tesla builds electric vehicles and batteries.";
pub const USE_CASE_OUTPUT: &str = "1. Predictive Maintenance: anticipate drivetrain failures\n\
2. Battery Analytics: forecast cell degradation";
pub const PROPOSAL_OUTPUT: &str = "PROPOSAL-91bc: start with predictive maintenance.";

/// 按顺序返回预设回复，并记录每次收到的prompt
pub struct ScriptedModel {
    responses: Vec<String>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl ScriptedModel {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: responses.iter().map(|r| r.to_string()).collect(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn pipeline() -> Self {
        Self::new(&[RESEARCH_OUTPUT, USE_CASE_OUTPUT, PROPOSAL_OUTPUT])
    }

    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let mut prompts = self.prompts.lock().unwrap();
        let index = prompts.len();
        prompts.push((system_prompt.to_string(), user_prompt.to_string()));
        match self.responses.get(index) {
            Some(response) => Ok(response.clone()),
            None => bail!("unexpected model call #{}", index + 1),
        }
    }
}

/// 返回固定结果的搜索，或者总是失败
pub struct StaticSearch {
    hits: Vec<SearchHit>,
    fail: bool,
    queries: Mutex<Vec<String>>,
}

impl StaticSearch {
    pub fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            fail: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            hits: Vec::new(),
            fail: true,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebSearch for StaticSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            bail!("Tavily search failed (HTTP 401)");
        }
        Ok(self.hits.iter().take(max_results).cloned().collect())
    }
}

pub fn sample_hits() -> Vec<SearchHit> {
    vec![SearchHit {
        title: "Tesla, Inc. overview".to_string(),
        url: "https://example.com/tesla".to_string(),
        content: "Tesla designs and manufactures electric vehicles.".to_string(),
    }]
}

/// 在mock服务器上注册Hugging Face和GitHub的接口
pub async fn mock_resource_apis(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/datasets");
            then.status(200).json_body(serde_json::json!([
                {"id": "org/ev-telemetry", "description": "Vehicle telemetry", "downloads": 321, "likes": 4}
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search/repositories");
            then.status(200).json_body(serde_json::json!({
                "items": [{
                    "name": "ev-ml",
                    "html_url": "https://github.com/acme/ev-ml",
                    "description": "EV machine learning",
                    "stargazers_count": 99,
                    "language": "Python"
                }]
            }));
        })
        .await;
}

pub fn test_config(output_dir: &Path, resource_base: String) -> Config {
    Config {
        output_path: output_dir.to_path_buf(),
        resources: ResourceConfig {
            kaggle_username: None,
            kaggle_key: None,
            github_token: None,
            huggingface_base_url: resource_base.clone(),
            github_base_url: resource_base,
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn test_context(
    config: Config,
    model: Arc<ScriptedModel>,
    search: Arc<StaticSearch>,
) -> GeneratorContext {
    let resources = Arc::new(ResourceClient::new(&config.resources).unwrap());
    GeneratorContext::with_services(config, model, search, resources)
}
