//! 服务端渲染的HTML页面

use std::fmt::Write as _;
use std::path::Path;

use crate::generator::types::StageKind;
use crate::generator::workflow::RunOutcome;

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; max-width: 960px; margin: 0 auto; padding: 2rem; color: #222; }
.main-header { font-size: 2.4rem; color: #1f77b4; text-align: center; }
.sub-header { font-size: 1.5rem; color: #ff7f0e; margin-top: 1.5rem; }
form { text-align: center; margin: 2rem 0; }
input[type=text] { width: 60%; padding: 0.6rem; font-size: 1rem; }
button { background-color: #1f77b4; color: white; font-weight: bold; padding: 0.6rem 1.5rem; border: none; border-radius: 0.3rem; cursor: pointer; }
.result-box { background-color: #f0f2f6; padding: 1rem; border-radius: 0.5rem; margin-bottom: 1rem; }
.downloads a { margin-right: 1rem; }
.error { background-color: #fde2e2; color: #8a1f1f; padding: 1rem; border-radius: 0.5rem; }
"#;

/// 转义HTML特殊字符
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 下载链接，文件由`/outputs`路由提供
pub fn output_link(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| format!("/outputs/{}", name))
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n\
         <h1 class=\"main-header\">Market Research &amp; Use Case Generation Agent</h1>\n\
         {}\n</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

fn company_form(value: &str) -> String {
    format!(
        "<form method=\"post\" action=\"/generate\">\n\
         <label for=\"company\">Enter a company or industry:</label><br>\n\
         <input type=\"text\" id=\"company\" name=\"company\" value=\"{}\" \
         placeholder=\"e.g., Tesla, Healthcare, Retail Banking\" required>\n\
         <button type=\"submit\">Generate Use Cases</button>\n</form>",
        escape_html(value)
    )
}

/// 首页表单
pub fn index() -> String {
    let body = format!(
        "<p style=\"text-align:center\">Generates AI use cases for any company or industry. \
         A run takes one to two minutes.</p>\n{}",
        company_form("")
    );
    layout("AI Use Case Generator", &body)
}

/// 结果页：四个阶段的产出加下载链接
pub fn results(outcome: &RunOutcome) -> String {
    let report = &outcome.report;
    let mut body = String::new();

    let _ = write!(
        body,
        "<p style=\"text-align:center\">Analysis complete for <strong>{}</strong> in {:.1}s.</p>\n",
        escape_html(&report.company),
        report.total_seconds()
    );

    body.push_str("<div class=\"downloads\">\n");
    for (label, path) in [
        ("Download Resources", &outcome.artifacts.resources),
        ("Download Architecture Diagram", &outcome.artifacts.architecture),
        ("Download Full Report", &outcome.artifacts.full_report),
    ] {
        if let Some(href) = output_link(path) {
            let _ = writeln!(
                body,
                "<a href=\"{}\" download>{}</a>",
                escape_html(&href),
                label
            );
        }
    }
    body.push_str("</div>\n");

    for stage in StageKind::ALL {
        let _ = write!(
            body,
            "<h2 class=\"sub-header\">{}</h2>\n<div class=\"result-box\">\n{}\n</div>\n",
            stage.label(),
            markdown::to_html(report.stage_output(stage))
        );
    }

    body.push_str("<hr>\n");
    body.push_str(&company_form(&report.company));
    layout(&format!("AI Use Cases for {}", report.company), &body)
}

/// 错误页
pub fn error(message: &str, company: &str) -> String {
    let body = format!(
        "<div class=\"error\">An error occurred: {}</div>\n{}",
        escape_html(message),
        company_form(company)
    );
    layout("AI Use Case Generator", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_output_link_uses_file_name_only() {
        let path = PathBuf::from("outputs/nested/full_report_tesla_20240101_000000.md");
        assert_eq!(
            output_link(&path).as_deref(),
            Some("/outputs/full_report_tesla_20240101_000000.md")
        );
    }

    #[test]
    fn test_index_contains_form() {
        let page = index();
        assert!(page.contains("action=\"/generate\""));
        assert!(page.contains("name=\"company\""));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let page = error("<script>", "Acme <Corp>");
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("value=\"Acme &lt;Corp&gt;\""));
        assert!(!page.contains("<script>"));
    }
}
