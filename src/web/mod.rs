//! Web界面：表单提交触发一次完整运行，结果渲染为HTML，生成的文件可直接下载
//!
//! 每个请求使用独立的Memory，请求之间只共享客户端与配置。

use anyhow::{Context, Result};
use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::generator::context::GeneratorContext;
use crate::generator::outlet::SavedArtifacts;
use crate::generator::types::{InputError, PipelineReport};
use crate::generator::workflow::{self, RunOutcome};

pub mod page;

pub struct AppState {
    context: GeneratorContext,
}

impl AppState {
    pub fn new(context: GeneratorContext) -> Self {
        Self { context }
    }
}

pub type SharedState = Arc<AppState>;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub company: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub report: PipelineReport,
    pub files: FileLinks,
}

/// 生成文件的下载地址
#[derive(Debug, Serialize)]
pub struct FileLinks {
    pub resources: Option<String>,
    pub architecture: Option<String>,
    pub full_report: Option<String>,
}

impl From<&SavedArtifacts> for FileLinks {
    fn from(artifacts: &SavedArtifacts) -> Self {
        Self {
            resources: page::output_link(&artifacts.resources),
            architecture: page::output_link(&artifacts.architecture),
            full_report: page::output_link(&artifacts.full_report),
        }
    }
}

/// Build an axum Router with the form, JSON API, file download and `/health` routes.
pub fn router(state: SharedState) -> Router {
    let output_dir = state.context.config.output_path.clone();
    Router::new()
        .route("/", get(index_handler))
        .route("/generate", post(generate_handler))
        .route("/api/generate", post(api_generate_handler))
        .route("/health", get(health_handler))
        .nest_service("/outputs", ServeDir::new(output_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index_handler() -> Html<String> {
    Html(page::index())
}

async fn generate_handler(
    State(state): State<SharedState>,
    Form(request): Form<GenerateRequest>,
) -> Response {
    match run(&state, &request.company).await {
        Ok(outcome) => Html(page::results(&outcome)).into_response(),
        Err(e) => {
            let status = status_for(&e);
            (
                status,
                Html(page::error(&format!("{:#}", e), request.company.trim())),
            )
                .into_response()
        }
    }
}

async fn api_generate_handler(
    State(state): State<SharedState>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    match run(&state, &request.company).await {
        Ok(outcome) => Json(GenerateResponse {
            files: FileLinks::from(&outcome.artifacts),
            report: outcome.report,
        })
        .into_response(),
        Err(e) => (
            status_for(&e),
            Json(serde_json::json!({ "error": format!("{:#}", e) })),
        )
            .into_response(),
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn run(state: &AppState, company: &str) -> Result<RunOutcome> {
    let context = state.context.fork();
    let result = workflow::execute(&context, company).await;
    if let Err(e) = &result {
        tracing::error!("❌ 运行失败 [{}]: {:#}", company.trim(), e);
    }
    result
}

/// 输入错误返回400，其余返回500
fn status_for(error: &anyhow::Error) -> StatusCode {
    if error.downcast_ref::<InputError>().is_some() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// 启动Web服务
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.server.bind_address.clone();
    let context = GeneratorContext::new(config)?;
    let app = router(Arc::new(AppState::new(context)));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("🌐 Web界面已启动: http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
