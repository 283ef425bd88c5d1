use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "voxplug", about = "Voice-command remote control for a smart plug")]
struct Cli {
    /// Path to the configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => voxplug_core::AppConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {:?}", path))?,
        None => voxplug_core::AppConfig::default(),
    };

    let env_filter = EnvFilter::try_new(&config.general.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("voxplug starting");

    // The engine must load its model before any audio flows
    let registry = voxplug_engine::EngineRegistry::new();
    let mut engine = registry
        .create(&config.engine.engine)
        .with_context(|| format!("unknown engine: {}", config.engine.engine))?;

    let mut engine_config = toml::Value::try_from(&config.engine.vosk)
        .context("failed to serialize engine config")?;
    if let Some(table) = engine_config.as_table_mut() {
        table.insert(
            "sample_rate".to_string(),
            toml::Value::Integer(i64::from(config.audio.sample_rate)),
        );
    }
    engine
        .initialize(engine_config)
        .with_context(|| format!("failed to initialize engine '{}'", config.engine.engine))?;

    let device_manager = voxplug_audio::DeviceManager::new();
    let input_device = device_manager
        .get_input_device(&config.audio.device_name)
        .with_context(|| {
            format!("failed to get input device: {}", config.audio.device_name)
        })?;

    let (chunk_tx, chunk_rx) = tokio::sync::mpsc::unbounded_channel();

    // Held for the lifetime of the loop; dropping it closes the stream
    let _capture = voxplug_audio::CaptureNode::new(
        &input_device,
        chunk_tx,
        config.audio.sample_rate,
        config.audio.channels,
        config.audio.block_size,
    )
    .context("failed to create capture node")?;

    let plug = voxplug_device::KasaPlug::new(config.plug.host.as_str(), config.plug.port);
    let controller =
        voxplug_device::PlugController::new(Box::new(plug), config.plug.name.as_str());

    let table = config.commands.table();

    tracing::info!(
        device = %config.plug.name,
        plug = %config.plug.host,
        "listening at {}Hz... say 'turn on the light' or 'turn off the light'",
        config.audio.sample_rate,
    );

    voxplug::run_pipeline(chunk_rx, engine, &table, &controller).await;

    tracing::info!("shutting down");
    Ok(())
}
