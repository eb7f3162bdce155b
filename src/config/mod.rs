use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::i18n::TargetLanguage;

/// 未显式指定时，在当前目录查找的配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "usecase-scout.toml";

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "groq")]
    #[default]
    Groq,
    /// OpenAI以及兼容Chat Completions协议的自建服务（vLLM等）
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "ollama")]
    Ollama,
}

impl LLMProvider {
    /// 未配置`api_base_url`时使用的官方地址
    pub fn default_base_url(&self) -> &'static str {
        match self {
            LLMProvider::Groq => "https://api.groq.com/openai/v1",
            LLMProvider::OpenAI => "https://api.openai.com/v1",
            LLMProvider::DeepSeek => "https://api.deepseek.com",
            LLMProvider::Ollama => "http://localhost:11434",
        }
    }
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::Groq => write!(f, "groq"),
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "groq" => Ok(LLMProvider::Groq),
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 报告输出目录
    pub output_path: PathBuf,

    /// 目标语言
    pub target_language: TargetLanguage,

    /// 阶段输入的最大字符数，超出部分截断并追加`...`；None表示不截断
    pub input_char_limit: Option<usize>,

    /// 是否启用详细日志
    pub verbose: bool,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 网络搜索配置
    pub search: SearchConfig,

    /// 数据集/代码仓库检索配置
    pub resources: ResourceConfig,

    /// Web界面配置
    pub server: ServerConfig,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址，None时使用provider的默认地址
    pub api_base_url: Option<String>,

    /// 模型名称
    pub model: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,
}

/// 网络搜索（Tavily）配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub api_key: String,

    pub api_base_url: String,

    /// 送入调研阶段的搜索结果条数
    pub max_results: usize,

    /// 超时时间（秒）
    pub timeout_seconds: u64,
}

/// 数据集/代码仓库检索配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ResourceConfig {
    pub kaggle_username: Option<String>,

    pub kaggle_key: Option<String>,

    /// 可选，未配置时以匿名身份访问GitHub（速率限制更严格）
    pub github_token: Option<String>,

    pub kaggle_base_url: String,

    pub huggingface_base_url: String,

    pub github_base_url: String,

    /// 每个数据源每次查询返回的条数
    pub max_results_per_source: usize,

    /// 从用例文本中提取的最大主题数
    pub max_topics: usize,

    /// 超时时间（秒）
    pub timeout_seconds: u64,
}

/// Web界面配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 加载配置：显式路径优先，其次是当前目录下的默认配置文件，都没有则使用默认值
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let default_path = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Self::from_file(&default_path)
        } else {
            Ok(Config::default())
        }
    }
}

impl LLMConfig {
    /// 实际请求的基地址：显式配置优先，否则跟随provider
    pub fn base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.provider.default_base_url())
    }
}

impl ResourceConfig {
    /// 返回Kaggle凭据，用户名和KEY都非空时才视为已配置
    pub fn kaggle_credentials(&self) -> Option<(&str, &str)> {
        match (self.kaggle_username.as_deref(), self.kaggle_key.as_deref()) {
            (Some(username), Some(key)) if !username.is_empty() && !key.is_empty() => {
                Some((username, key))
            }
            _ => None,
        }
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("outputs"),
            target_language: TargetLanguage::default(),
            input_char_limit: None,
            verbose: false,
            llm: LLMConfig::default(),
            search: SearchConfig::default(),
            resources: ResourceConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: env_non_empty("LLM_API_KEY")
                .or_else(|| env_non_empty("GROQ_API_KEY"))
                .unwrap_or_default(),
            api_base_url: None,
            model: String::from("llama-3.3-70b-versatile"),
            max_tokens: 2048,
            temperature: 0.1,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: env_non_empty("TAVILY_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.tavily.com"),
            max_results: 3,
            timeout_seconds: 30,
        }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            kaggle_username: env_non_empty("KAGGLE_USERNAME"),
            kaggle_key: env_non_empty("KAGGLE_KEY"),
            github_token: env_non_empty("GITHUB_TOKEN"),
            kaggle_base_url: String::from("https://www.kaggle.com/api/v1"),
            huggingface_base_url: String::from("https://huggingface.co"),
            github_base_url: String::from("https://api.github.com"),
            max_results_per_source: 2,
            max_topics: 2,
            timeout_seconds: 10,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: String::from("127.0.0.1:8501"),
        }
    }
}
