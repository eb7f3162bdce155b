use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fmt::Write as _;

use crate::generator::context::GeneratorContext;
use crate::generator::memory::StageMemory;
use crate::generator::step_forward_agent::{
    AgentDataConfig, DataSource, PromptTemplate, StepForwardAgent,
};
use crate::generator::types::StageKind;
use crate::search::SearchHit;

/// 市场调研员 - 先做一次固定的网络搜索，再把搜索结果交给模型总结
#[derive(Default)]
pub struct ResearchAnalyst;

impl ResearchAnalyst {
    pub fn search_query(company: &str) -> String {
        format!("Research {} industry overview and key facts", company)
    }
}

/// 把搜索结果格式化为调研材料
pub fn format_search_hits(hits: &[SearchHit]) -> String {
    let mut content = String::from("## Web Search Results\n");
    if hits.is_empty() {
        content.push_str("No web search results were returned.\n");
        return content;
    }

    for (i, hit) in hits.iter().enumerate() {
        let _ = writeln!(content, "### {}. {}", i + 1, hit.title);
        let _ = writeln!(content, "Source: {}", hit.url);
        if !hit.content.trim().is_empty() {
            let _ = writeln!(content, "{}", hit.content.trim());
        }
        content.push('\n');
    }
    content
}

#[async_trait]
impl StepForwardAgent for ResearchAnalyst {
    fn stage(&self) -> StageKind {
        StageKind::Research
    }

    fn data_config(&self) -> AgentDataConfig {
        AgentDataConfig {
            required_sources: vec![DataSource::Company],
            optional_sources: vec![],
        }
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: r#"You are an expert market research analyst. Research the provided company/industry and identify:
1. Industry segment and characteristics
2. Company's key offerings and strategic focus areas
3. Major competitors and their AI initiatives
4. Current challenges and opportunities

Provide comprehensive, well-structured research with citations from reliable sources."#
                .to_string(),

            opening_instruction:
                "Research the company or industry below using the web search results provided."
                    .to_string(),

            closing_instruction: r#"
## Requirements
- Cite the sources above by URL where you rely on them
- Separate facts found in the sources from your own assessment
- Keep the findings structured with headings and bullet points"#
                .to_string(),
        }
    }

    async fn provide_custom_prompt_content(
        &self,
        context: &GeneratorContext,
    ) -> Result<Option<String>> {
        let company = context.get_company().await?;
        let query = Self::search_query(&company);

        tracing::info!("🔍 网络搜索: {}", query);
        let hits = context
            .search
            .search(&query, context.config.search.max_results)
            .await
            .context("Web search failed")?;
        tracing::debug!("搜索返回 {} 条结果", hits.len());

        Ok(Some(format_search_hits(&hits)))
    }
}
