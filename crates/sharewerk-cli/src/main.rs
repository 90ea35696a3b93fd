// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sharewerk — command-line driver for the share receiver
//
// Entry point. Initialises logging and config, builds a receiver for this
// platform, and feeds it one OS share callback per invocation.

mod cli;
mod services;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;
use sharewerk_core::config::ReceiverConfig;
use sharewerk_core::error::Result;
use sharewerk_core::mime::mime_from_extension;
use sharewerk_core::types::{ContentHandle, ShareEvent, ShareIntent};
use sharewerk_receiver::forwarder::GET_INITIAL_SHARE;
use sharewerk_receiver::{ChannelSink, MethodResult, ShareReceiver};

use cli::{CliArgs, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "sharewerk failed");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &CliArgs) -> Result<ReceiverConfig> {
    let mut config = match &args.config {
        Some(path) => ReceiverConfig::load(path)?,
        None => ReceiverConfig::with_cache_dir(services::cache_dir::cache_dir()),
    };
    if let Some(dir) = &args.cache_dir {
        config.cache_dir = dir.clone();
    }
    config.validate()?;
    Ok(config)
}

async fn run(args: CliArgs) -> Result<()> {
    let config = load_config(&args)?;

    if let Command::ShowConfig { write } = &args.command {
        if let Some(path) = write {
            config.save(path)?;
            tracing::info!(path = %path.display(), "config written");
        }
        return print_json(&config);
    }

    let receiver = ShareReceiver::for_platform(config);
    let pushed = if args.attached {
        let (sink, rx) = ChannelSink::new();
        receiver.attach(Arc::new(sink));
        Some(rx)
    } else {
        None
    };

    let event = match args.command {
        Command::Text { text, subject } => {
            receiver.handle_intent(ShareIntent::send_text(text, subject)).await
        }
        Command::Send { handle, mime_type } => {
            let handle = ContentHandle::new(handle);
            let mime_type = mime_type.unwrap_or_else(|| guess_mime(&handle));
            receiver
                .handle_intent(ShareIntent::send_stream(mime_type, handle))
                .await
        }
        Command::SendMultiple { handles, mime_type } => {
            let handles = handles.into_iter().map(ContentHandle::new).collect();
            receiver
                .handle_intent(ShareIntent::send_multiple(mime_type, handles))
                .await
        }
        Command::Extension { items } => {
            let event = receiver.handle_extension_items(items).await;
            if event.is_some() {
                tracing::info!(url = %receiver.handoff().wake_url(), "open to wake the main app");
            }
            event
        }
        Command::OpenUrl { url } => receiver.handle_open_url(&url),
        Command::Initial => {
            return match receiver.handle_method_call(GET_INITIAL_SHARE) {
                MethodResult::Success(value) => print_json(&value),
                MethodResult::NotImplemented => {
                    tracing::warn!("getInitialShare not implemented");
                    Ok(())
                }
            };
        }
        Command::ShowConfig { .. } => return Ok(()),
    };

    match (event, pushed) {
        (Some(_), Some(mut rx)) => {
            receiver.detach();
            while let Ok(pushed) = rx.try_recv() {
                print_json(&pushed)?;
            }
        }
        (Some(event), None) => print_event(&event)?,
        (None, _) => tracing::info!("share ignored"),
    }
    Ok(())
}

/// Intent type a sending app would declare for this handle.
fn guess_mime(handle: &ContentHandle) -> String {
    handle
        .extension()
        .and_then(|ext| mime_from_extension(&ext))
        .unwrap_or("*/*")
        .to_owned()
}

fn print_event(event: &ShareEvent) -> Result<()> {
    tracing::debug!(kind = ?event.kind(), files = event.file_descriptors().len(), "share event");
    print_json(event)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
