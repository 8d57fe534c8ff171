mod config;
mod prober;
mod report;
mod runner;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> anyhow::Result<()> {
    // Load config first to get log level
    let config = config::load().await?;
    let log_level = config.get_tracing_level()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()
                         .add_directive(format!("keepalive_probe={}", log_level.as_str().to_lowercase()).parse()?))
        .init();

    report::print_banner();

    let summary = runner::run(&config).await?;
    report::print_summary(&summary);

    if !summary.all_successful() {
        std::process::exit(1);
    }
    Ok(())
}
