//! 文本处理辅助函数

/// 按字符数截断文本，发生截断时追加`...`；按字符而不是字节计数，保证不会切断多字节字符
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// 按可选上限截断，None表示原样返回
pub fn clip(text: &str, limit: Option<usize>) -> String {
    match limit {
        Some(max_chars) => truncate_with_ellipsis(text, max_chars),
        None => text.to_string(),
    }
}

/// 生成文件名片段：转小写，空白替换为`_`，去掉路径分隔符等不安全字符
pub fn slugify(name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    let slug = slug.trim_matches('.').to_string();

    if slug.is_empty() {
        "report".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("exact", 5), "exact");
    }

    #[test]
    fn test_truncate_long_text_appends_ellipsis() {
        assert_eq!(truncate_with_ellipsis("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_with_ellipsis("数据集分析", 2), "数据...");
    }

    #[test]
    fn test_clip_without_limit() {
        let text = "x".repeat(1000);
        assert_eq!(clip(&text, None), text);
        assert_eq!(clip(&text, Some(3)), "xxx...");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Retail Banking"), "retail_banking");
        assert_eq!(slugify("  Tesla  "), "tesla");
        assert_eq!(slugify("../etc/passwd"), "etcpasswd");
        assert_eq!(slugify("A&B Corp"), "ab_corp");
        assert_eq!(slugify("///"), "report");
    }
}
