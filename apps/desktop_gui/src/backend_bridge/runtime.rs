//! Backend worker: owns the tokio runtime, runs the startup fetches and serves
//! UI commands until the UI side hangs up.

use std::{sync::Arc, thread};

use client_core::{InitialBatch, MealDbClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::media::decode_thumbnail;

pub fn launch(
    settings: &Settings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    let api_base_url = settings.api_base_url.clone();
    let batch_size = settings.initial_batch_size;

    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = match MealDbClient::new(&api_base_url) {
                Ok(client) => Arc::new(client),
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {err}"),
                    )));
                    tracing::error!(error = %err, "failed to build recipe client");
                    return;
                }
            };

            let recipe_tx = ui_tx.clone();
            let batch = InitialBatch::spawn(Arc::clone(&client), batch_size, move |recipe| {
                if recipe_tx.try_send(UiEvent::RecipeFetched(recipe)).is_err() {
                    tracing::warn!("ui event queue unavailable; dropping fetched recipe");
                }
            });
            let _ = ui_tx.try_send(UiEvent::Info("Fetching recipes...".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::FetchThumbnail { recipe_id, url } => {
                        let client = Arc::clone(&client);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let event = match client.fetch_thumbnail(&url).await {
                                Ok(bytes) => match decode_thumbnail(&bytes) {
                                    Ok(image) => UiEvent::ThumbnailLoaded { recipe_id, image },
                                    Err(reason) => UiEvent::ThumbnailFailed { recipe_id, reason },
                                },
                                Err(err) => UiEvent::ThumbnailFailed {
                                    recipe_id,
                                    reason: format!("Failed to download thumbnail: {err}"),
                                },
                            };
                            if let UiEvent::ThumbnailFailed { recipe_id, reason } = &event {
                                tracing::warn!(%recipe_id, %reason, "thumbnail unavailable");
                            }
                            let _ = ui_tx.try_send(event);
                        });
                    }
                }
            }

            tracing::info!(
                in_flight = batch.in_flight(),
                "ui disconnected; stopping backend worker"
            );
            drop(batch);
        });
    })
}
