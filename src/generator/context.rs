use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::config::Config;
use crate::llm::{LLMClient, LanguageModel};
use crate::memory::Memory;
use crate::resources::ResourceClient;
use crate::search::{TavilyClient, WebSearch};

#[derive(Clone)]
pub struct GeneratorContext {
    /// 大模型，所有阶段共用
    pub model: Arc<dyn LanguageModel>,
    /// 调研阶段使用的网络搜索
    pub search: Arc<dyn WebSearch>,
    /// Kaggle / Hugging Face / GitHub检索
    pub resources: Arc<ResourceClient>,
    /// 配置
    pub config: Config,
    /// 本次运行的阶段产出
    pub memory: Arc<RwLock<Memory>>,
}

impl GeneratorContext {
    /// 按配置创建真实的外部服务客户端
    pub fn new(config: Config) -> Result<Self> {
        let model = Arc::new(LLMClient::new(&config.llm)?);
        let search = Arc::new(TavilyClient::new(&config.search)?);
        let resources = Arc::new(ResourceClient::new(&config.resources)?);

        Ok(Self::with_services(config, model, search, resources))
    }

    /// 使用给定的服务实例创建上下文
    pub fn with_services(
        config: Config,
        model: Arc<dyn LanguageModel>,
        search: Arc<dyn WebSearch>,
        resources: Arc<ResourceClient>,
    ) -> Self {
        Self {
            model,
            search,
            resources,
            config,
            memory: Arc::new(RwLock::new(Memory::new())),
        }
    }

    /// 共享客户端与配置，但使用全新的Memory，每次运行各自一份
    pub fn fork(&self) -> Self {
        Self {
            memory: Arc::new(RwLock::new(Memory::new())),
            ..self.clone()
        }
    }

    /// 存储数据到 Memory
    pub async fn store_to_memory<T>(&self, scope: &str, key: &str, data: T) -> Result<()>
    where
        T: Serialize + Send + Sync,
    {
        let mut memory = self.memory.write().await;
        memory.store(scope, key, data)
    }

    /// 从 Memory 获取数据
    pub async fn get_from_memory<T>(&self, scope: &str, key: &str) -> Option<T>
    where
        T: for<'a> Deserialize<'a> + Send + Sync,
    {
        let memory = self.memory.read().await;
        memory.get(scope, key)
    }

    /// 检查Memory中是否存在指定数据
    pub async fn has_memory_data(&self, scope: &str, key: &str) -> bool {
        let memory = self.memory.read().await;
        memory.has_data(scope, key)
    }

    /// 获取Memory使用统计
    pub async fn get_memory_stats(&self) -> HashMap<String, usize> {
        let memory = self.memory.read().await;
        memory.get_usage_stats()
    }
}
