use tokio::sync::mpsc;
use voxplug_core::{match_command, AudioChunk, KeywordTable};
use voxplug_device::PlugController;
use voxplug_engine::SpeechEngine;

/// Drain the capture channel until it closes or an interrupt arrives.
///
/// Strictly sequential: one chunk is decoded at a time, and a matched
/// device command is awaited to completion before the next chunk is
/// touched. Device failures are logged from the returned outcome and never
/// stop the loop.
pub async fn run_pipeline(
    mut chunk_rx: mpsc::UnboundedReceiver<AudioChunk>,
    mut engine: Box<dyn SpeechEngine>,
    table: &KeywordTable,
    controller: &PlugController,
) {
    loop {
        tokio::select! {
            maybe_chunk = chunk_rx.recv() => {
                match maybe_chunk {
                    Some(chunk) => {
                        handle_chunk(&chunk, engine.as_mut(), table, controller).await;
                    }
                    None => {
                        tracing::debug!("capture channel closed, stopping");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupt received, stopping");
                break;
            }
        }
    }
}

async fn handle_chunk(
    chunk: &AudioChunk,
    engine: &mut dyn SpeechEngine,
    table: &KeywordTable,
    controller: &PlugController,
) {
    let result = match engine.accept(chunk) {
        Ok(Some(result)) => result,
        Ok(None) => return,
        Err(e) => {
            tracing::error!("engine error: {e}");
            return;
        }
    };

    if !result.is_final {
        return;
    }
    let text = result.text.trim();
    if text.is_empty() {
        return;
    }

    tracing::info!("recognized: {text}");

    match match_command(text, table) {
        Some(command) => match controller.dispatch(command).await {
            Ok(action) => {
                tracing::info!(device = %controller.device_name(), "{action}");
            }
            Err(e) => {
                tracing::error!(device = %controller.device_name(), "command failed: {e}");
            }
        },
        None => {
            tracing::info!("no known command in: {text}");
        }
    }
}
