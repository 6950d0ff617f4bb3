use nanostyle::{FileSource, SessionStatus, StudioClient, StudioConfig, StudioSession};
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    nanostyle::logger::init_with_config(
        nanostyle::logger::LoggerConfig::development()
            .with_level(nanostyle::logger::LogLevel::Debug),
    )?;
    nanostyle::logger::log_startup_info("nanostyle", env!("CARGO_PKG_VERSION"));

    let mut args = env::args().skip(1);
    let image_path = match args.next() {
        Some(path) => path,
        None => {
            log::error!("❌ Usage: nanostyle <image-path> [prompt] [count]");
            return Err("missing image path".into());
        }
    };
    let prompt = args.next();
    let count: u32 = args.next().and_then(|raw| raw.parse().ok()).unwrap_or(1);

    if env::var("STUDIO_BASE_URL").is_err() {
        log::warn!("No STUDIO_BASE_URL set, using the local default");
    }

    let config = StudioConfig::from_env();
    nanostyle::logger::log_config_info(&config);

    log::info!("🔄 Creating studio client...");
    let client = match StudioClient::new(config) {
        Ok(client) => {
            log::info!("✅ Studio client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize studio client: {}", e);
            return Err(e.into());
        }
    };

    let mut session = StudioSession::new();
    if let Some(prompt) = prompt {
        session.set_prompt(&prompt);
    }
    log::info!("📝 Prompt: {}", session.prompt());

    // Pull the portrait in through the capture interface so the demo walks
    // the same acquire/capture/release path a camera-backed front-end would.
    log::info!("📷 Capturing portrait from {}", image_path);
    session.start_camera(Box::new(FileSource::new(&image_path))).await?;
    session.capture_photo().await?;

    log::info!("🎨 Requesting {} hairstyle variant(s)...", count);
    match session.submit(&client, count).await {
        Ok(produced) => {
            log::info!("✅ Generation complete, {} variant(s) received", produced);
        }
        Err(e) => {
            log::error!("❌ Generation failed: {}", e);
            if !session.gallery().is_empty() {
                log::warn!(
                    "⚠️  Keeping {} variant(s) received before the failure",
                    session.gallery().len()
                );
            }
        }
    }

    let stamp = chrono::Utc::now().timestamp();
    for (position, item) in session.gallery().ordered().iter().enumerate() {
        let filename = format!("hairstyle_{}_{}.png", position + 1, stamp);
        match fs::write(&filename, &item.image) {
            Ok(_) => log::info!("💾 Saved variant {} (index {}) to {}", position + 1, item.index, filename),
            Err(e) => log::error!("❌ Failed to save {}: {}", filename, e),
        }
    }

    if let SessionStatus::Failed(message) = session.status() {
        log::error!("🏁 Finished with error: {}", message);
    } else {
        log::info!("🎉 All done!");
    }

    Ok(())
}
