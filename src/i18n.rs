use serde::{Deserialize, Serialize};

/// 报告输出语言
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum TargetLanguage {
    #[serde(rename = "en")]
    #[default]
    English,
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "es")]
    Spanish,
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetLanguage::English => write!(f, "en"),
            TargetLanguage::Chinese => write!(f, "zh"),
            TargetLanguage::Japanese => write!(f, "ja"),
            TargetLanguage::German => write!(f, "de"),
            TargetLanguage::French => write!(f, "fr"),
            TargetLanguage::Spanish => write!(f, "es"),
        }
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(TargetLanguage::English),
            "zh" | "chinese" | "中文" => Ok(TargetLanguage::Chinese),
            "ja" | "japanese" | "日本語" => Ok(TargetLanguage::Japanese),
            "de" | "german" | "deutsch" => Ok(TargetLanguage::German),
            "fr" | "french" | "français" => Ok(TargetLanguage::French),
            "es" | "spanish" | "español" => Ok(TargetLanguage::Spanish),
            _ => Err(format!("Unknown target language: {}", s)),
        }
    }
}

impl TargetLanguage {
    /// 获取语言的描述性名称
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetLanguage::English => "English",
            TargetLanguage::Chinese => "中文",
            TargetLanguage::Japanese => "日本語",
            TargetLanguage::German => "Deutsch",
            TargetLanguage::French => "Français",
            TargetLanguage::Spanish => "Español",
        }
    }

    /// 追加到每个阶段系统提示词末尾的语言指令
    pub fn prompt_instruction(&self) -> &'static str {
        match self {
            TargetLanguage::English => "Write your entire response in English.",
            TargetLanguage::Chinese => "请使用中文撰写全部回答，表达准确、专业、易于理解。",
            TargetLanguage::Japanese => {
                "回答はすべて日本語で、正確かつ専門的で分かりやすく記述してください。"
            }
            TargetLanguage::German => {
                "Bitte verfassen Sie die gesamte Antwort auf Deutsch, präzise, professionell und leicht verständlich."
            }
            TargetLanguage::French => {
                "Veuillez rédiger l'intégralité de la réponse en français, de manière précise, professionnelle et facile à comprendre."
            }
            TargetLanguage::Spanish => {
                "Redacta toda la respuesta en español, de forma precisa, profesional y fácil de entender."
            }
        }
    }
}
