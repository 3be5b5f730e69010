mod common;
mod config;
mod error;
mod network;
mod sync;
mod ui;

use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use network::HttpChatApi;
use sync::LifecycleController;
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "rust_web_chat",
    version,
    about = "Group chat client with polling sync"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Base URL of the chat API (overrides the config file)
    #[arg(long, env = "CHAT_API_URL", value_name = "URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    // Khởi tạo Logger để debug
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config).with_api_url_override(cli.api_url);

    let api = Arc::new(HttpChatApi::new(&app_config.api_base_url)?);
    let controller = Arc::new(LifecycleController::new(api));
    let handle = controller.handle();

    // 1. Khởi chạy engine đồng bộ (chạy ngầm)
    let startup = Arc::clone(&controller);
    tokio::spawn(async move {
        if let Err(err) = startup.start().await {
            log::error!("Chat client failed to start: {err}");
        }
    });

    // 2. Khởi chạy UI (chạy trên main thread)
    let options = eframe::NativeOptions::default();
    let result = eframe::run_native(
        "Групповой чат",
        options,
        Box::new(move |cc| Ok(Box::new(ChatApp::new(cc, handle)))),
    );

    // 3. Cửa sổ đã đóng: huỷ mọi timer
    let cancelled = controller.stop();
    log::info!("Stopped {cancelled} background tasks");

    result?;
    Ok(())
}
