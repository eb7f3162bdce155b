//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::Result;
use async_trait::async_trait;

use crate::config::LLMConfig;
use crate::llm::LanguageModel;

mod providers;

use providers::ProviderClient;

/// LLM客户端 - 基于rig的provider客户端，不做额外的重试
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: &LLMConfig) -> Result<Self> {
        let client = ProviderClient::new(config)?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        tracing::info!(
            "🔄 正在检查模型连接 [{} / {}]...",
            self.config.provider,
            self.config.model
        );
        match self
            .prompt("System: You are a helpful assistant.", "Hello")
            .await
        {
            Ok(_) => {
                tracing::info!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                tracing::error!("❌ 模型连接失败: {}", e);
                Err(e)
            }
        }
    }

    /// 单轮对话（不使用工具）
    pub async fn prompt(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let agent = self.client.create_agent(system_prompt, &self.config);
        agent.prompt(user_prompt).await
    }
}

#[async_trait]
impl LanguageModel for LLMClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        self.prompt(system_prompt, user_prompt).await
    }
}
