use crate::generator::step_forward_agent::{
    AgentDataConfig, DataSource, PromptTemplate, StepForwardAgent,
};
use crate::generator::types::StageKind;

/// 高级顾问 - 汇总前面三个阶段的产出，撰写商业提案
#[derive(Default)]
pub struct ProposalWriter;

impl StepForwardAgent for ProposalWriter {
    fn stage(&self) -> StageKind {
        StageKind::Proposal
    }

    fn data_config(&self) -> AgentDataConfig {
        AgentDataConfig {
            required_sources: vec![
                DataSource::RESEARCH,
                DataSource::USE_CASES,
                DataSource::RESOURCES,
            ],
            optional_sources: vec![DataSource::Company],
        }
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: r#"You are a senior consultant. Create a business proposal that includes:
1. Executive summary
2. Top recommended use cases with implementation priority
3. Expected business impact and ROI considerations
4. Technical requirements and resource recommendations
5. Implementation roadmap"#
                .to_string(),

            opening_instruction: "Create a business proposal from the material below.".to_string(),

            closing_instruction: r#"
## Requirements
- Reference the listed datasets and repositories in the technical requirements
- Order the use cases by implementation priority"#
                .to_string(),
        }
    }
}
