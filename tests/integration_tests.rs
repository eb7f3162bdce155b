mod common;

use httpmock::prelude::*;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

use common::{
    PROPOSAL_OUTPUT, RESEARCH_OUTPUT, ScriptedModel, StaticSearch, USE_CASE_OUTPUT,
    mock_resource_apis, sample_hits, test_config, test_context,
};
use usecase_scout::generator::types::{CompanyDescriptor, InputError, StageKind};
use usecase_scout::generator::workflow::{execute, run_pipeline};
use usecase_scout::resources::kaggle;

#[tokio::test]
async fn test_each_stage_receives_previous_output() {
    let server = MockServer::start_async().await;
    mock_resource_apis(&server).await;
    let temp_dir = TempDir::new().unwrap();
    let model = Arc::new(ScriptedModel::pipeline());
    let search = Arc::new(StaticSearch::with_hits(sample_hits()));
    let context = test_context(
        test_config(temp_dir.path(), server.base_url()),
        model.clone(),
        search.clone(),
    );

    let descriptor = CompanyDescriptor::parse("Tesla").unwrap();
    let report = run_pipeline(&context, &descriptor).await.unwrap();

    assert_eq!(
        search.queries(),
        vec!["Research Tesla industry overview and key facts"]
    );

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 3);
    // 调研阶段：公司名与搜索结果
    assert!(prompts[0].1.contains("Tesla"));
    assert!(prompts[0].1.contains("https://example.com/tesla"));
    // 用例阶段收到调研阶段的原文
    assert!(prompts[1].1.contains(RESEARCH_OUTPUT));
    // 提案阶段收到资源阶段的原文，以及前两个阶段的原文
    assert!(prompts[2].1.contains(&report.resources_markdown));
    assert!(prompts[2].1.contains(RESEARCH_OUTPUT));
    assert!(prompts[2].1.contains(USE_CASE_OUTPUT));

    // 资源阶段的主题来自用例阶段的原文
    let headings: Vec<_> = report
        .resources
        .sections
        .iter()
        .map(|s| s.heading.as_str())
        .collect();
    assert_eq!(
        headings,
        vec![
            "Use Case: Predictive Maintenance",
            "Use Case: Battery Analytics",
            "HuggingFace Datasets",
            "GitHub Repositories",
        ]
    );
    assert!(
        report.resources.sections[0]
            .resources
            .iter()
            .all(|r| r.source == kaggle::FALLBACK_SOURCE)
    );

    assert_eq!(report.research, RESEARCH_OUTPUT);
    assert_eq!(report.use_cases, USE_CASE_OUTPUT);
    assert_eq!(report.proposal, PROPOSAL_OUTPUT);
    let stages: Vec<_> = report.timings.iter().map(|t| t.stage).collect();
    assert_eq!(stages, StageKind::ALL.to_vec());
}

#[tokio::test]
async fn test_every_system_prompt_carries_language_instruction() {
    let server = MockServer::start_async().await;
    mock_resource_apis(&server).await;
    let temp_dir = TempDir::new().unwrap();
    let mut config = test_config(temp_dir.path(), server.base_url());
    config.target_language = "zh".parse().unwrap();
    let model = Arc::new(ScriptedModel::pipeline());
    let context = test_context(
        config,
        model.clone(),
        Arc::new(StaticSearch::with_hits(vec![])),
    );

    run_pipeline(&context, &CompanyDescriptor::parse("Tesla").unwrap())
        .await
        .unwrap();

    for (system, _) in model.prompts() {
        assert!(system.ends_with("请使用中文撰写全部回答，表达准确、专业、易于理解。"));
    }
}

#[tokio::test]
async fn test_empty_company_makes_no_calls() {
    let temp_dir = TempDir::new().unwrap();
    let model = Arc::new(ScriptedModel::pipeline());
    let search = Arc::new(StaticSearch::with_hits(sample_hits()));
    let context = test_context(
        test_config(temp_dir.path(), "http://127.0.0.1:9".to_string()),
        model.clone(),
        search.clone(),
    );

    for blank in ["", "   ", "\n\t"] {
        let err = execute(&context, blank).await.unwrap_err();
        assert!(err.downcast_ref::<InputError>().is_some());
    }

    assert_eq!(model.call_count(), 0);
    assert!(search.queries().is_empty());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_search_failure_stops_the_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let model = Arc::new(ScriptedModel::pipeline());
    let context = test_context(
        test_config(temp_dir.path(), "http://127.0.0.1:9".to_string()),
        model.clone(),
        Arc::new(StaticSearch::failing()),
    );

    let err = execute(&context, "Tesla").await.unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("Research Findings stage failed"));
    assert!(message.contains("HTTP 401"));
    assert_eq!(model.call_count(), 0);
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_model_failure_names_the_stage() {
    let server = MockServer::start_async().await;
    mock_resource_apis(&server).await;
    let temp_dir = TempDir::new().unwrap();
    // 只预设两次回复，提案阶段的调用会失败
    let model = Arc::new(ScriptedModel::new(&[RESEARCH_OUTPUT, USE_CASE_OUTPUT]));
    let context = test_context(
        test_config(temp_dir.path(), server.base_url()),
        model.clone(),
        Arc::new(StaticSearch::with_hits(sample_hits())),
    );

    let err = execute(&context, "Tesla").await.unwrap_err();

    assert!(format!("{:#}", err).contains("Final Proposal stage failed"));
    assert_eq!(model.call_count(), 3);
}

#[tokio::test]
async fn test_resource_sources_failing_does_not_stop_the_run() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/datasets");
            then.status(502);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search/repositories");
            then.status(403).body("API rate limit exceeded");
        })
        .await;
    let temp_dir = TempDir::new().unwrap();
    let model = Arc::new(ScriptedModel::pipeline());
    let context = test_context(
        test_config(temp_dir.path(), server.base_url()),
        model.clone(),
        Arc::new(StaticSearch::with_hits(sample_hits())),
    );

    let outcome = execute(&context, "Tesla").await.unwrap();

    assert_eq!(outcome.report.resources.sections.len(), 2);
    assert_eq!(outcome.report.proposal, PROPOSAL_OUTPUT);
}

#[tokio::test]
async fn test_output_files_exist_and_are_not_empty() {
    let server = MockServer::start_async().await;
    mock_resource_apis(&server).await;
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("outputs");
    let context = test_context(
        test_config(&output_dir, server.base_url()),
        Arc::new(ScriptedModel::pipeline()),
        Arc::new(StaticSearch::with_hits(sample_hits())),
    );

    let outcome = execute(&context, "Retail Banking").await.unwrap();

    let names: Vec<String> = outcome
        .artifacts
        .paths()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert!(names[0].starts_with("resources_retail_banking_") && names[0].ends_with(".md"));
    assert!(names[1].starts_with("architecture_retail_banking_") && names[1].ends_with(".mmd"));
    assert!(names[2].starts_with("full_report_retail_banking_") && names[2].ends_with(".md"));

    for path in outcome.artifacts.paths() {
        assert!(path.exists(), "{} missing", path.display());
        assert!(fs::metadata(path).unwrap().len() > 0);
    }

    let full_report = fs::read_to_string(&outcome.artifacts.full_report).unwrap();
    assert!(full_report.contains(RESEARCH_OUTPUT));
    assert!(full_report.contains(PROPOSAL_OUTPUT));
    assert!(full_report.contains("ev-ml"));
}
