use crate::config::Config;
use crate::generator::context::GeneratorContext;
use crate::generator::orchestrator::StageOrchestrator;
use crate::generator::outlet::{DiskOutlet, Outlet, SavedArtifacts};
use crate::generator::types::{CompanyDescriptor, PipelineReport, StageKind, StageTiming};

use anyhow::Result;
use serde::Serialize;
use std::time::{Duration, Instant};

/// 时间跟踪作用域，按阶段执行顺序记录耗时
pub struct TimingScope {
    start_time: Instant,
    phase_durations: Vec<(StageKind, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_durations: Vec::new(),
        }
    }

    /// 记录一个阶段的耗时
    pub fn record(&mut self, stage: StageKind, duration: Duration) {
        tracing::debug!("⏱️ {} 耗时 {:.3}秒", stage, duration.as_secs_f64());
        self.phase_durations.push((stage, duration));
    }

    /// 获取总执行时间
    pub fn get_total_duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 获取格式化的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.2}秒\n",
            self.get_total_duration().as_secs_f64()
        );

        if !self.phase_durations.is_empty() {
            report.push_str("各阶段执行时间:\n");
            for (stage, duration) in &self.phase_durations {
                report.push_str(&format!("- {}: {:.3}秒\n", stage, duration.as_secs_f64()));
            }
        }

        report
    }

    pub fn into_timings(self) -> Vec<StageTiming> {
        self.phase_durations
            .into_iter()
            .map(|(stage, duration)| StageTiming {
                stage,
                seconds: duration.as_secs_f64(),
            })
            .collect()
    }
}

/// 一次完整运行的结果：内存中的报告与写出的文件
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub report: PipelineReport,
    pub artifacts: SavedArtifacts,
}

/// 只执行四个阶段，不写文件
pub async fn run_pipeline(
    context: &GeneratorContext,
    descriptor: &CompanyDescriptor,
) -> Result<PipelineReport> {
    StageOrchestrator.execute_pipeline(context, descriptor).await
}

/// 校验输入、执行流水线并把报告写入输出目录
///
/// 输入为空时直接返回[`InputError`](crate::generator::types::InputError)，不会发起任何网络调用。
pub async fn execute(context: &GeneratorContext, company: &str) -> Result<RunOutcome> {
    let descriptor = CompanyDescriptor::parse(company)?;
    let report = run_pipeline(context, &descriptor).await?;

    let outlet = DiskOutlet::new(&context.config.output_path);
    let artifacts = outlet.save(&report).await?;

    Ok(RunOutcome { report, artifacts })
}

/// 启动一次完整运行（命令行入口）
pub async fn launch(config: &Config, company: &str) -> Result<RunOutcome> {
    // 先校验输入，再创建外部服务客户端
    CompanyDescriptor::parse(company)?;

    let context = GeneratorContext::new(config.clone())?;
    execute(&context, company).await
}
