//! 报告文件的文本内容

use std::fmt::Write as _;

use crate::generator::types::PipelineReport;

const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 流水线结构图（Mermaid）
pub const ARCHITECTURE_DIAGRAM: &str = r#"flowchart TD
    A[User Input: Company/Industry] --> B[Research Agent]

    subgraph MultiAgentSystem [Multi-Agent Architecture]
        B[Research Agent] --> C[Use Case Agent]
        C --> D[Resource Agent]
        D --> E[Proposal Agent]
    end

    B --> F[Web Search<br>Tavily API]
    D --> G[Dataset Platforms<br>Kaggle, HuggingFace, GitHub]

    E --> H[Final Report]
    E --> I[Use Cases with References]
    E --> J[Resource Assets]

    style MultiAgentSystem fill:#f9f9f9,stroke:#333,stroke-width:2px
"#;

/// 资源清单文档
pub fn render_resources_document(report: &PipelineReport) -> String {
    format!(
        "# AI Resources for {company}\n\n\
         *Generated on {generated_at}*\n\n\
         {resources}\n\
         ---\n\
         *This resource list was generated automatically using a multi-agent AI system.*\n",
        company = report.company,
        generated_at = report.generated_at.format(GENERATED_AT_FORMAT),
        resources = report.resources_markdown,
    )
}

/// 完整报告：四个阶段的产出加上各阶段耗时
pub fn render_full_report(report: &PipelineReport) -> String {
    let mut content = format!(
        "# AI Use Case Analysis for {company}\n\n\
         *Generated on {generated_at}*\n\n\
         ## Executive Summary\n\n\
         This report provides a comprehensive analysis of AI and Generative AI use cases for {company}, \
         including market research, potential applications, and implementation resources.\n\n\
         ## Market Research\n\n{research}\n\n\
         ## AI Use Cases\n\n{use_cases}\n\n\
         ## Resource Assets\n\n{resources}\n\n\
         ## Final Proposal\n\n{proposal}\n\n",
        company = report.company,
        generated_at = report.generated_at.format(GENERATED_AT_FORMAT),
        research = report.research,
        use_cases = report.use_cases,
        resources = report.resources_markdown,
        proposal = report.proposal,
    );

    if !report.timings.is_empty() {
        content.push_str("## Stage Timings\n\n| Stage | Seconds |\n|---|---|\n");
        for timing in &report.timings {
            let _ = writeln!(content, "| {} | {:.2} |", timing.stage, timing.seconds);
        }
        let _ = writeln!(content, "| Total | {:.2} |\n", report.total_seconds());
    }

    content.push_str("---\n*This report was generated automatically using a multi-agent AI system.*\n");
    content
}
