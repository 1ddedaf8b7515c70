use order_server::{AppState, Config, Server, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 环境 (.env) 与配置
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // 2. 日志
    let level = if config.is_production() { "info" } else { "debug" };
    order_server::init_logger_with_file(level, config.is_production(), config.log_dir.as_deref())?;

    print_banner();
    tracing::info!("🦐 Krill Order Server starting...");

    // 3. 初始化状态 (存储、通道、外链)
    let state = AppState::initialize(config).await?;

    // 4. 启动调度循环
    let server = Server::new(state);

    let token = server.shutdown_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("🛑 Shutdown signal received");
            token.cancel();
        }
    });

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
