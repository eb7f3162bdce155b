//! rig provider的统一封装，所有provider都走同一份LLMConfig

use anyhow::Result;
use rig::{agent::Agent, client::CompletionClient, completion::Prompt};

use crate::config::{LLMConfig, LLMProvider};

type GroqModel = rig::providers::groq::CompletionModel<reqwest::Client>;
type OpenAIModel = rig::providers::openai::CompletionModel;
type DeepSeekModel = rig::providers::deepseek::CompletionModel;
type OllamaModel = rig::providers::ollama::CompletionModel<reqwest::Client>;

#[derive(Clone)]
pub enum ProviderClient {
    Groq(rig::providers::groq::Client),
    OpenAI(rig::providers::openai::Client),
    DeepSeek(rig::providers::deepseek::Client),
    Ollama(rig::providers::ollama::Client),
}

impl ProviderClient {
    /// 按provider构造客户端，基地址统一取自`LLMConfig::base_url`
    pub fn new(config: &LLMConfig) -> Result<Self> {
        let base_url = config.base_url();
        let client = match config.provider {
            LLMProvider::Groq => ProviderClient::Groq(
                rig::providers::groq::Client::builder(&config.api_key)
                    .base_url(base_url)
                    .build(),
            ),
            LLMProvider::OpenAI => ProviderClient::OpenAI(
                rig::providers::openai::Client::builder(&config.api_key)
                    .base_url(base_url)
                    .build(),
            ),
            LLMProvider::DeepSeek => ProviderClient::DeepSeek(
                rig::providers::deepseek::Client::builder(&config.api_key)
                    .base_url(base_url)
                    .build(),
            ),
            LLMProvider::Ollama => ProviderClient::Ollama(
                rig::providers::ollama::Client::builder()
                    .base_url(base_url)
                    .build(),
            ),
        };
        tracing::debug!("LLM客户端已创建: {} @ {}", config.provider, base_url);
        Ok(client)
    }

    /// 为单个阶段创建Agent，system prompt作为preamble
    pub fn create_agent(&self, system_prompt: &str, config: &LLMConfig) -> ProviderAgent {
        let model = config.model.as_str();
        let max_tokens = u64::from(config.max_tokens);
        match self {
            ProviderClient::Groq(client) => ProviderAgent::Groq(
                client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(max_tokens)
                    .temperature(config.temperature)
                    .build(),
            ),
            // 走Chat Completions接口，兼容vLLM等自建服务
            ProviderClient::OpenAI(client) => ProviderAgent::OpenAI(
                client
                    .completion_model(model)
                    .completions_api()
                    .into_agent_builder()
                    .preamble(system_prompt)
                    .max_tokens(max_tokens)
                    .temperature(config.temperature)
                    .build(),
            ),
            ProviderClient::DeepSeek(client) => ProviderAgent::DeepSeek(
                client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(max_tokens)
                    .temperature(config.temperature)
                    .build(),
            ),
            ProviderClient::Ollama(client) => ProviderAgent::Ollama(
                client
                    .agent(model)
                    .preamble(system_prompt)
                    .max_tokens(max_tokens)
                    .temperature(config.temperature)
                    .build(),
            ),
        }
    }
}

pub enum ProviderAgent {
    Groq(Agent<GroqModel>),
    OpenAI(Agent<OpenAIModel>),
    DeepSeek(Agent<DeepSeekModel>),
    Ollama(Agent<OllamaModel>),
}

impl ProviderAgent {
    pub async fn prompt(&self, prompt: &str) -> Result<String> {
        let reply = match self {
            ProviderAgent::Groq(agent) => agent.prompt(prompt).await?,
            ProviderAgent::OpenAI(agent) => agent.prompt(prompt).await?,
            ProviderAgent::DeepSeek(agent) => agent.prompt(prompt).await?,
            ProviderAgent::Ollama(agent) => agent.prompt(prompt).await?,
        };
        Ok(reply)
    }
}
