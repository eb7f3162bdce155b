use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

use crate::resources::ResourceCatalog;

/// 用户输入在进入流水线之前被拒绝的原因
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a company or industry name")]
    EmptyCompany,
}

/// 用户输入的公司或行业名称，已去除首尾空白且保证非空
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompanyDescriptor(String);

impl CompanyDescriptor {
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(InputError::EmptyCompany);
        }
        Ok(Self(name.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for CompanyDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 流水线的四个阶段，按执行顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Research,
    UseCases,
    Resources,
    Proposal,
}

impl StageKind {
    pub const ALL: [StageKind; 4] = [
        StageKind::Research,
        StageKind::UseCases,
        StageKind::Resources,
        StageKind::Proposal,
    ];

    /// 阶段产出在Memory中的键
    pub fn key(&self) -> &'static str {
        match self {
            StageKind::Research => "research",
            StageKind::UseCases => "use_cases",
            StageKind::Resources => "resources",
            StageKind::Proposal => "proposal",
        }
    }

    /// 展示给用户的章节标题
    pub fn label(&self) -> &'static str {
        match self {
            StageKind::Research => "Research Findings",
            StageKind::UseCases => "AI Use Cases",
            StageKind::Resources => "Resources",
            StageKind::Proposal => "Final Proposal",
        }
    }
}

impl Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageTiming {
    pub stage: StageKind,
    pub seconds: f64,
}

/// 一次运行的完整产出
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub company: String,
    pub research: String,
    pub use_cases: String,
    pub resources: ResourceCatalog,
    /// `resources`渲染后的markdown，也就是提案阶段看到的文本
    pub resources_markdown: String,
    pub proposal: String,
    pub timings: Vec<StageTiming>,
    pub generated_at: DateTime<Local>,
}

impl PipelineReport {
    /// 按阶段取出文本产出
    pub fn stage_output(&self, stage: StageKind) -> &str {
        match stage {
            StageKind::Research => &self.research,
            StageKind::UseCases => &self.use_cases,
            StageKind::Resources => &self.resources_markdown,
            StageKind::Proposal => &self.proposal,
        }
    }

    pub fn total_seconds(&self) -> f64 {
        self.timings.iter().map(|t| t.seconds).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_descriptor_trims_input() {
        let descriptor = CompanyDescriptor::parse("  Retail Banking \n").unwrap();
        assert_eq!(descriptor.name(), "Retail Banking");
        assert_eq!(descriptor.to_string(), "Retail Banking");
    }

    #[test]
    fn test_company_descriptor_rejects_blank_input() {
        assert_eq!(CompanyDescriptor::parse(""), Err(InputError::EmptyCompany));
        assert_eq!(
            CompanyDescriptor::parse(" \t\n "),
            Err(InputError::EmptyCompany)
        );
    }

    #[test]
    fn test_stage_kind_order_and_labels() {
        let keys: Vec<_> = StageKind::ALL.iter().map(|s| s.key()).collect();
        assert_eq!(keys, vec!["research", "use_cases", "resources", "proposal"]);
        assert_eq!(StageKind::UseCases.to_string(), "AI Use Cases");
        assert_eq!(
            serde_json::to_value(StageKind::UseCases).unwrap(),
            serde_json::json!("use_cases")
        );
    }
}
