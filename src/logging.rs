use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 初始化日志，`RUST_LOG`优先；verbose时同时输出HTTP请求日志
pub fn init(verbose: bool) {
    let default_directives = if verbose {
        "usecase_scout=debug,tower_http=debug,info"
    } else {
        "usecase_scout=info,warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();

    if let Err(e) = result {
        eprintln!("⚠️ 日志初始化失败: {}", e);
    }
}
