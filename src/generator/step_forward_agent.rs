use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::fmt::Write as _;

use crate::generator::context::GeneratorContext;
use crate::generator::memory::{MemoryScope, ScopedKeys, StageMemory};
use crate::generator::types::StageKind;
use crate::utils::text::clip;

/// 数据源配置 - 基于Memory Key的直接数据访问机制
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataSource {
    /// 用户输入的公司或行业名称
    Company,
    /// 前序阶段的文本产出
    StageOutput(StageKind),
}

impl DataSource {
    pub const RESEARCH: DataSource = DataSource::StageOutput(StageKind::Research);
    pub const USE_CASES: DataSource = DataSource::StageOutput(StageKind::UseCases);
    pub const RESOURCES: DataSource = DataSource::StageOutput(StageKind::Resources);
}

/// Agent数据配置 - 声明所需的数据源
#[derive(Debug, Clone)]
pub struct AgentDataConfig {
    /// 必需的数据源 - 缺少时执行失败
    pub required_sources: Vec<DataSource>,
    /// 可选的数据源 - 缺少时不影响执行
    pub optional_sources: Vec<DataSource>,
}

/// Prompt模板配置
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// 系统提示词
    pub system_prompt: String,
    /// 开头的说明性指令
    pub opening_instruction: String,
    /// 结尾的强调性指令
    pub closing_instruction: String,
}

/// 标准的阶段Prompt构建器
pub struct GeneratorPromptBuilder {
    template: PromptTemplate,
    input_char_limit: Option<usize>,
}

impl GeneratorPromptBuilder {
    pub fn new(template: PromptTemplate, input_char_limit: Option<usize>) -> Self {
        Self {
            template,
            input_char_limit,
        }
    }

    /// 构建系统提示词和用户提示词，custom_content插入到调研材料的最前面
    pub async fn build_prompts(
        &self,
        context: &GeneratorContext,
        data_sources: &[DataSource],
        custom_content: Option<String>,
    ) -> Result<(String, String)> {
        let system_prompt = self.template.system_prompt.clone();
        let user_prompt = self
            .build_standard_user_prompt(context, data_sources, custom_content)
            .await?;
        Ok((system_prompt, user_prompt))
    }

    async fn build_standard_user_prompt(
        &self,
        context: &GeneratorContext,
        data_sources: &[DataSource],
        custom_content: Option<String>,
    ) -> Result<String> {
        let mut prompt = String::new();

        prompt.push_str(&self.template.opening_instruction);
        prompt.push_str("\n\n");

        if let Some(custom) = custom_content {
            prompt.push_str(&custom);
            prompt.push('\n');
        }

        for source in data_sources {
            match source {
                DataSource::Company => {
                    if let Ok(company) = context.get_company().await {
                        let _ = write!(prompt, "## Company or Industry\n{}\n\n", company);
                    }
                }
                DataSource::StageOutput(stage) => {
                    if let Ok(output) = context.get_stage_output(*stage).await {
                        let _ = write!(
                            prompt,
                            "## {}\n{}\n\n",
                            stage.label(),
                            clip(&output, self.input_char_limit)
                        );
                    }
                }
            }
        }

        prompt.push_str(&self.template.closing_instruction);
        Ok(prompt)
    }
}

/// 单次补全的阶段Agent，产出为纯文本
#[async_trait]
pub trait StepForwardAgent: Send + Sync {
    /// 阶段标识，同时决定产出在Memory中的键
    fn stage(&self) -> StageKind;

    /// 数据源配置
    fn data_config(&self) -> AgentDataConfig;

    /// Prompt模板配置
    fn prompt_template(&self) -> PromptTemplate;

    /// 可选的自定义prompt内容提供钩子，返回的内容放在调研材料的最前面
    async fn provide_custom_prompt_content(
        &self,
        _context: &GeneratorContext,
    ) -> Result<Option<String>> {
        Ok(None)
    }

    /// 默认实现的execute方法：校验数据源、构建prompt、调用模型并存储产出
    async fn execute(&self, context: &GeneratorContext) -> Result<String> {
        let stage = self.stage();
        let config = self.data_config();

        for source in &config.required_sources {
            let available = match source {
                DataSource::Company => {
                    context
                        .has_memory_data(MemoryScope::INPUT, ScopedKeys::COMPANY)
                        .await
                }
                DataSource::StageOutput(required) => {
                    context
                        .has_memory_data(MemoryScope::STAGE, required.key())
                        .await
                }
            };
            if !available {
                return Err(anyhow!("必需的数据源 {:?} 不可用 ({})", source, stage));
            }
        }

        let all_sources = [config.required_sources, config.optional_sources].concat();

        let mut template = self.prompt_template();
        let language_instruction = context.config.target_language.prompt_instruction();
        template.system_prompt = format!("{}\n\n{}", template.system_prompt, language_instruction);

        let custom_content = self
            .provide_custom_prompt_content(context)
            .await
            .with_context(|| format!("{} stage failed", stage))?;

        let prompt_builder = GeneratorPromptBuilder::new(template, context.config.input_char_limit);
        let (system_prompt, user_prompt) = prompt_builder
            .build_prompts(context, &all_sources, custom_content)
            .await?;

        tracing::debug!(
            "📝 [{}] prompt长度: system={} user={}",
            stage,
            system_prompt.chars().count(),
            user_prompt.chars().count()
        );

        let output = context
            .model
            .complete(&system_prompt, &user_prompt)
            .await
            .with_context(|| format!("{} stage failed", stage))?;

        context.store_stage_output(stage, &output).await?;

        tracing::info!("✅ Sub-Agent [{}]执行完成", stage);
        Ok(output)
    }
}
