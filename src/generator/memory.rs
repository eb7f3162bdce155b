use anyhow::{Result, anyhow};

use crate::generator::context::GeneratorContext;
use crate::generator::types::{CompanyDescriptor, StageKind};

pub struct MemoryScope;

impl MemoryScope {
    pub const INPUT: &'static str = "input";
    pub const STAGE: &'static str = "stage";
}

pub struct ScopedKeys;

impl ScopedKeys {
    pub const COMPANY: &'static str = "company";
}

/// 阶段之间通过Memory传递产出
#[allow(async_fn_in_trait)]
pub trait StageMemory {
    async fn store_company(&self, descriptor: &CompanyDescriptor) -> Result<()>;

    async fn get_company(&self) -> Result<String>;

    async fn store_stage_output(&self, stage: StageKind, output: &str) -> Result<()>;

    /// 前序阶段尚未产出时报错
    async fn get_stage_output(&self, stage: StageKind) -> Result<String>;
}

impl StageMemory for GeneratorContext {
    async fn store_company(&self, descriptor: &CompanyDescriptor) -> Result<()> {
        self.store_to_memory(MemoryScope::INPUT, ScopedKeys::COMPANY, descriptor.name())
            .await
    }

    async fn get_company(&self) -> Result<String> {
        self.get_from_memory(MemoryScope::INPUT, ScopedKeys::COMPANY)
            .await
            .ok_or_else(|| anyhow!("Company name has not been provided"))
    }

    async fn store_stage_output(&self, stage: StageKind, output: &str) -> Result<()> {
        self.store_to_memory(MemoryScope::STAGE, stage.key(), output)
            .await
    }

    async fn get_stage_output(&self, stage: StageKind) -> Result<String> {
        self.get_from_memory(MemoryScope::STAGE, stage.key())
            .await
            .ok_or_else(|| anyhow!("{} are not available yet", stage))
    }
}
