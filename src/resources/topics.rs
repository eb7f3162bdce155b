//! 从用例文本中朴素地提取检索主题

use regex::Regex;
use std::sync::LazyLock;

/// 每个主题保留的最大词数
const MAX_TOPIC_WORDS: usize = 6;

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*+•]|\d+[.)])\s*").expect("valid list marker regex"));

static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#+\s*").expect("valid heading regex"));

static GENERIC_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:ai\s+)?(?:use\s*case|title|solution|opportunity|idea)\s*#?\d*$")
        .expect("valid label regex")
});

/// 以列表标记开头或包含冒号的行开始一个新主题，其后的普通行并入当前主题；
/// 以冒号结尾的引导句被跳过。最多返回`max_topics`个，无法提取时退化为`AI applications in {company}`
pub fn derive_topics(use_cases: &str, company: &str, max_topics: usize) -> Vec<String> {
    let mut cases: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in use_cases.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_lead_in(line) {
            if !current.trim().is_empty() {
                cases.push(current.trim().to_string());
            }
            current.clear();
            continue;
        }
        if LIST_MARKER.is_match(line) || line.contains(':') {
            if !current.trim().is_empty() {
                cases.push(current.trim().to_string());
            }
            current = line.to_string();
        } else {
            current.push(' ');
            current.push_str(line);
        }
    }
    if !current.trim().is_empty() {
        cases.push(current.trim().to_string());
    }

    let topics: Vec<String> = cases
        .iter()
        .map(|case| clean_topic(case))
        .filter(|topic| !topic.is_empty())
        .take(max_topics)
        .collect();

    if topics.is_empty() {
        vec![format!("AI applications in {}", company)]
    } else {
        topics
    }
}

/// 形如"Here are two AI use cases for Tesla:"的普通引导句
fn is_lead_in(line: &str) -> bool {
    line.ends_with(':')
        && !LIST_MARKER.is_match(line)
        && !HEADING_MARKER.is_match(line)
        && !line.starts_with("**")
}

/// 去掉markdown标记，取冒号前的名称（通用标签时取冒号后），并截取前几个词
fn clean_topic(case: &str) -> String {
    let text = HEADING_MARKER.replace(case, "");
    let text = LIST_MARKER.replace(&text, "");
    let text = text.replace(['*', '_', '`'], "");

    let name = match text.split_once(':') {
        Some((label, rest)) if GENERIC_LABEL.is_match(label.trim()) && !rest.trim().is_empty() => {
            rest
        }
        Some((label, rest)) if label.trim().is_empty() => rest,
        Some((label, _)) => label,
        None => text.as_str(),
    };

    name.split_whitespace()
        .take(MAX_TOPIC_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_string()
}
