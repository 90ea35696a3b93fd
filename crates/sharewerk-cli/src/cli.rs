// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sharewerk_core::types::{ContentHandle, ExtensionAttachment};

#[derive(Parser, Debug)]
#[command(name = "sharewerk", version, about = "Sharewerk - feed share events through the receiver pipeline")]
pub struct CliArgs {
    /// Cache directory for copied files and thumbnails
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// JSON config file (missing file means defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Simulate a live application channel instead of a cold start
    #[arg(long, global = true)]
    pub attached: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Share plain text (ACTION_SEND, text/plain)
    Text {
        text: String,
        #[arg(long)]
        subject: Option<String>,
    },
    /// Share one file or content handle (ACTION_SEND)
    Send {
        handle: String,
        /// Intent type; derived from the extension when omitted
        #[arg(long)]
        mime_type: Option<String>,
    },
    /// Share several files (ACTION_SEND_MULTIPLE)
    SendMultiple {
        #[arg(required = true)]
        handles: Vec<String>,
        #[arg(long, default_value = "*/*")]
        mime_type: String,
    },
    /// Run the share-extension side: normalize attachments and publish them
    /// to the handoff store
    Extension {
        /// Attachments as `text:<s>`, `url:<s>`, `image:<path>` or
        /// `movie:<path>`, in order
        #[arg(required = true, value_parser = parse_attachment)]
        items: Vec<ExtensionAttachment>,
    },
    /// Run the main-app URL callback: pick up a published share
    OpenUrl { url: String },
    /// Answer the application's `getInitialShare` call
    Initial,
    /// Print the effective configuration
    ShowConfig {
        /// Also write it to this path
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

fn parse_attachment(raw: &str) -> Result<ExtensionAttachment, String> {
    let (kind, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected <kind>:<value>, got `{raw}`"))?;
    match kind {
        "text" => Ok(ExtensionAttachment::Text(value.to_owned())),
        "url" => Ok(ExtensionAttachment::Url(value.to_owned())),
        "image" => Ok(ExtensionAttachment::Image(ContentHandle::new(value))),
        "movie" => Ok(ExtensionAttachment::Movie(ContentHandle::new(value))),
        other => Err(format!("unknown attachment kind `{other}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_kinds() {
        assert_eq!(
            parse_attachment("url:https://example.org/x?a=1").expect("url"),
            ExtensionAttachment::Url("https://example.org/x?a=1".into())
        );
        assert_eq!(
            parse_attachment("image:/tmp/a.png").expect("image"),
            ExtensionAttachment::Image(ContentHandle::new("/tmp/a.png"))
        );
        assert!(parse_attachment("audio:/tmp/a.mp3").is_err());
        assert!(parse_attachment("no-kind").is_err());
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from(["sharewerk", "send-multiple", "a.png", "b.png", "--attached"])
            .expect("parse");
        assert!(args.attached);
        match args.command {
            Command::SendMultiple { handles, mime_type } => {
                assert_eq!(handles, ["a.png", "b.png"]);
                assert_eq!(mime_type, "*/*");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
