use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::generator::types::PipelineReport;
use crate::utils::text::slugify;

pub mod report;

pub use report::{ARCHITECTURE_DIAGRAM, render_full_report, render_resources_document};

const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// 同一秒内同名运行的最大序号
const MAX_NAME_ATTEMPTS: usize = 100;

/// 一次运行写出的文件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedArtifacts {
    pub resources: PathBuf,
    pub architecture: PathBuf,
    pub full_report: PathBuf,
}

impl SavedArtifacts {
    pub fn paths(&self) -> [&Path; 3] {
        [
            self.resources.as_path(),
            self.architecture.as_path(),
            self.full_report.as_path(),
        ]
    }
}

#[allow(async_fn_in_trait)]
pub trait Outlet {
    async fn save(&self, report: &PipelineReport) -> Result<SavedArtifacts>;
}

/// 写入输出目录的平铺文件，文件名带公司名和时间戳，已有文件不会被清理
pub struct DiskOutlet {
    output_dir: PathBuf,
}

impl DiskOutlet {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn artifacts_for(&self, slug: &str, stamp: &str) -> SavedArtifacts {
        let file_path = |kind: &str, extension: &str| {
            self.output_dir
                .join(format!("{}_{}_{}.{}", kind, slug, stamp, extension))
        };
        SavedArtifacts {
            resources: file_path("resources", "md"),
            architecture: file_path("architecture", "mmd"),
            full_report: file_path("full_report", "md"),
        }
    }

    /// 以create_new方式一次占用三个文件名，任一已存在则释放已占用的文件
    async fn claim(artifacts: &SavedArtifacts) -> std::io::Result<Vec<File>> {
        let mut files = Vec::with_capacity(3);
        for path in artifacts.paths() {
            match OpenOptions::new().write(true).create_new(true).open(path).await {
                Ok(file) => files.push(file),
                Err(e) => {
                    for claimed in &artifacts.paths()[..files.len()] {
                        let _ = tokio::fs::remove_file(claimed).await;
                    }
                    return Err(e);
                }
            }
        }
        Ok(files)
    }

    /// 同名文件已存在时在时间戳后追加`_N`，并发运行不会互相覆盖
    async fn reserve(&self, slug: &str, stamp: &str) -> Result<(SavedArtifacts, Vec<File>)> {
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let stamp = match attempt {
                0 => stamp.to_string(),
                n => format!("{}_{}", stamp, n),
            };
            let artifacts = self.artifacts_for(slug, &stamp);
            match Self::claim(&artifacts).await {
                Ok(files) => return Ok((artifacts, files)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!("输出文件名已被占用，尝试下一个序号: {}", stamp);
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Failed to create {}", artifacts.full_report.display())
                    });
                }
            }
        }
        bail!(
            "No free output file name for {}_{} in {}",
            slug,
            stamp,
            self.output_dir.display()
        )
    }

    async fn write(mut file: File, path: &Path, content: &str) -> Result<()> {
        file.write_all(content.as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        file.flush()
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("💾 已保存文档: {}", path.display());
        Ok(())
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, report: &PipelineReport) -> Result<SavedArtifacts> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to create output directory {}",
                    self.output_dir.display()
                )
            })?;

        let slug = slugify(&report.company);
        let stamp = report.generated_at.format(FILE_TIMESTAMP_FORMAT).to_string();
        let (artifacts, files) = self.reserve(&slug, &stamp).await?;

        let contents = [
            render_resources_document(report),
            ARCHITECTURE_DIAGRAM.to_string(),
            render_full_report(report),
        ];
        for ((file, path), content) in files.into_iter().zip(artifacts.paths()).zip(&contents) {
            Self::write(file, path, content).await?;
        }

        tracing::info!("💾 文档保存完成，输出目录: {}", self.output_dir.display());
        Ok(artifacts)
    }
}
