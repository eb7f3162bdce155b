use crate::config::{Config, LLMProvider};
use crate::i18n::TargetLanguage;
use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// usecase-scout - 由Rust与AI驱动的市场调研与AI用例生成引擎
#[derive(Parser, Debug)]
#[command(name = "usecase-scout")]
#[command(
    about = "Multi-agent market research engine: researches a company or industry, proposes AI use cases, gathers datasets and repositories, and drafts a business proposal."
)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 输出路径
    #[arg(short, long, global = true)]
    pub output_path: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// LLM Provider (groq, openai, deepseek, ollama)
    #[arg(long, global = true)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long, global = true)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long, global = true)]
    pub llm_api_key: Option<String>,

    /// 模型名称
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// 最大tokens数
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long, global = true)]
    pub temperature: Option<f64>,

    /// 目标语言 (en, zh, ja, de, fr, es)
    #[arg(long, global = true)]
    pub target_language: Option<String>,

    /// 阶段输入的最大字符数（默认不截断）
    #[arg(long, global = true)]
    pub input_char_limit: Option<usize>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// 对一个公司或行业执行完整流程，并把报告写入输出目录
    Run {
        /// 公司或行业名称，例如 "Tesla"、"Retail Banking"
        #[arg(long)]
        company: String,
    },
    /// 启动Web界面
    Serve {
        /// 监听地址，例如 127.0.0.1:8501
        #[arg(long)]
        bind: Option<String>,
    },
    /// 检查模型连接
    Check,
}

impl Args {
    /// 加载配置文件并用CLI参数覆盖，返回子命令与最终配置
    pub fn into_parts(self) -> Result<(Command, Config)> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            config.llm.provider = provider_str
                .parse::<LLMProvider>()
                .map_err(|e| anyhow!(e))?;
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = Some(llm_api_base_url);
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }

        if let Some(target_language_str) = self.target_language {
            config.target_language = target_language_str
                .parse::<TargetLanguage>()
                .map_err(|e| anyhow!(e))?;
        }
        if let Some(limit) = self.input_char_limit {
            config.input_char_limit = Some(limit);
        }
        if let Command::Serve {
            bind: Some(ref bind),
        } = self.command
        {
            config.server.bind_address = bind.clone();
        }

        config.verbose = config.verbose || self.verbose;

        Ok((self.command, config))
    }
}
