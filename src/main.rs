use anyhow::Result;
use clap::Parser;

use usecase_scout::cli::{Args, Command};
use usecase_scout::llm::LLMClient;
use usecase_scout::{launch, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 中的密钥需要在读取配置之前载入环境变量
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let (command, config) = args.into_parts()?;
    logging::init(config.verbose);

    match command {
        Command::Run { company } => {
            let outcome = launch(&config, &company).await?;
            println!("✅ Analysis complete for {}", outcome.report.company);
            for path in outcome.artifacts.paths() {
                println!("💾 {}", path.display());
            }
        }
        Command::Serve { .. } => web::serve(config).await?,
        Command::Check => LLMClient::new(&config.llm)?.check_connection().await?,
    }

    Ok(())
}
