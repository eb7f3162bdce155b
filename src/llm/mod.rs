//! 大模型访问层

use anyhow::Result;
use async_trait::async_trait;

pub mod client;

pub use client::LLMClient;

/// 单轮补全接口，流水线的每个阶段只通过它与大模型交互
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// 以`system_prompt`为前言发送`user_prompt`，返回模型的完整文本回复
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}
