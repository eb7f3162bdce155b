use anyhow::Result;
use chrono::Local;
use std::time::Instant;

use crate::generator::agents::{ProposalWriter, ResearchAnalyst, ResourceScout, UseCaseArchitect};
use crate::generator::context::GeneratorContext;
use crate::generator::memory::StageMemory;
use crate::generator::step_forward_agent::StepForwardAgent;
use crate::generator::types::{CompanyDescriptor, PipelineReport, StageKind};
use crate::generator::workflow::TimingScope;

/// 四阶段流水线编排器，严格顺序执行
#[derive(Default)]
pub struct StageOrchestrator;

impl StageOrchestrator {
    pub async fn execute_pipeline(
        &self,
        context: &GeneratorContext,
        descriptor: &CompanyDescriptor,
    ) -> Result<PipelineReport> {
        tracing::info!(
            "🚀 开始为 [{}] 执行调研流程，输出语言: {}",
            descriptor,
            context.config.target_language.display_name()
        );
        let mut timing = TimingScope::new();

        context.store_company(descriptor).await?;

        let research = self
            .execute_agent(&ResearchAnalyst, context, &mut timing)
            .await?;
        let use_cases = self
            .execute_agent(&UseCaseArchitect, context, &mut timing)
            .await?;

        tracing::info!("🤖 执行 {} 阶段...", StageKind::Resources);
        let started = Instant::now();
        let resources = ResourceScout.execute(context).await?;
        timing.record(StageKind::Resources, started.elapsed());
        let resources_markdown = context.get_stage_output(StageKind::Resources).await?;

        let proposal = self
            .execute_agent(&ProposalWriter, context, &mut timing)
            .await?;

        tracing::info!("✓ 调研流程执行完毕\n{}", timing.generate_timing_report());
        tracing::debug!("Memory使用统计: {:?}", context.get_memory_stats().await);

        Ok(PipelineReport {
            company: descriptor.name().to_string(),
            research,
            use_cases,
            resources,
            resources_markdown,
            proposal,
            timings: timing.into_timings(),
            generated_at: Local::now(),
        })
    }

    /// 执行单个模型阶段并记录耗时
    async fn execute_agent<T>(
        &self,
        agent: &T,
        context: &GeneratorContext,
        timing: &mut TimingScope,
    ) -> Result<String>
    where
        T: StepForwardAgent,
    {
        let stage = agent.stage();
        tracing::info!("🤖 执行 {} 阶段...", stage);

        let started = Instant::now();
        let output = agent.execute(context).await?;
        timing.record(stage, started.elapsed());
        Ok(output)
    }
}
