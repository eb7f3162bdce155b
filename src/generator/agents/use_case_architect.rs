use crate::generator::step_forward_agent::{
    AgentDataConfig, DataSource, PromptTemplate, StepForwardAgent,
};
use crate::generator::types::StageKind;

/// AI方案架构师 - 基于调研结果提出2到3个AI用例
#[derive(Default)]
pub struct UseCaseArchitect;

impl StepForwardAgent for UseCaseArchitect {
    fn stage(&self) -> StageKind {
        StageKind::UseCases
    }

    fn data_config(&self) -> AgentDataConfig {
        AgentDataConfig {
            required_sources: vec![DataSource::RESEARCH],
            optional_sources: vec![],
        }
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: r#"You are an AI solutions architect. Analyze the research and identify relevant AI/ML use cases that address:
1. Operational efficiency improvements
2. Customer experience enhancements
3. Revenue growth opportunities
4. Competitive advantages through AI adoption

For each use case, provide:
- Clear title and description
- Business problem it solves
- Required AI technologies
- Expected impact and benefits
- Implementation complexity (Low/Medium/High)"#
                .to_string(),

            opening_instruction: "Based on the research findings below, suggest 2-3 AI use cases."
                .to_string(),

            closing_instruction:
                "Present each use case as a numbered item that starts with `Title: description`."
                    .to_string(),
        }
    }
}
