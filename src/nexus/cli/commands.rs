//! # CLI Layer
//!
//! This module is **one possible UI client** for nexus. It plays the part of the
//! presentation layer: it forwards intents to [`NexusApi`] and renders its
//! projections. Each invocation is one short session over the persisted catalog,
//! so selection and filters last for a single command.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Uses `std::process::exit` (via `main.rs`)
//! - Installs the tracing subscriber
//! - Runs async code, on a current-thread tokio runtime for insight requests

use super::print::{print_comments, print_detail, print_items, print_messages};
use super::setup::{Cli, Commands};
use chrono::Utc;
use clap::Parser;
use directories::ProjectDirs;
use nexus::api::{self, CmdMessage, ConfigAction, NexusApi};
use nexus::config::NexusConfig;
use nexus::error::{NexusError, Result};
use nexus::insight::{self, gemini::GeminiFetcher};
use nexus::media::MediaDraft;
use nexus::model::ActiveView;
use nexus::store::fs::FileStore;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const HOME_ENV: &str = "NEXUS_HOME";

struct AppContext {
    api: NexusApi<FileStore>,
    data_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir)?;
    debug!(data_dir = %data_dir.display(), "resolved data directory");

    // Config does not need the catalog loaded
    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(&data_dir, key.clone(), value.clone());
    }

    let mut ctx = init_context(data_dir)?;

    match cli.command {
        Some(Commands::Login { name }) => handle_login(&mut ctx, name),
        Some(Commands::Logout) => handle_logout(&mut ctx),
        Some(Commands::Whoami) => handle_whoami(&ctx),
        Some(Commands::List { search, channel }) => handle_list(&mut ctx, search, channel),
        Some(Commands::View { id, no_insight }) => handle_view(&mut ctx, &id, no_insight),
        Some(Commands::Comment { id, text }) => handle_comment(&mut ctx, &id, text),
        Some(Commands::Upload {
            path,
            title,
            description,
            thumbnail,
        }) => handle_upload(&mut ctx, path, title, description, thumbnail),
        Some(Commands::Config { .. }) => Ok(()),
        None => handle_list(&mut ctx, None, false),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "nexus=debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "nexus", "nexus")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| NexusError::Config("Could not determine data directory".to_string()))
}

fn init_context(data_dir: PathBuf) -> Result<AppContext> {
    let store = FileStore::new(data_dir.clone());
    let api = NexusApi::initialize(store)?;
    Ok(AppContext { api, data_dir })
}

fn handle_login(ctx: &mut AppContext, name: Vec<String>) -> Result<()> {
    let result = ctx.api.login(&name.join(" "));
    print_messages(&result.messages);
    Ok(())
}

fn handle_logout(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.logout();
    print_messages(&result.messages);
    Ok(())
}

fn handle_whoami(ctx: &AppContext) -> Result<()> {
    match ctx.api.current_user() {
        Some(user) => println!("{} ({})", user.username, user.avatar),
        None => println!("Not signed in"),
    }
    Ok(())
}

fn handle_list(ctx: &mut AppContext, search: Option<String>, channel: bool) -> Result<()> {
    if channel {
        let result = ctx.api.open_channel();
        print_messages(&result.messages);
    }
    if let Some(query) = search {
        ctx.api.set_search_query(query);
    }

    let heading = match ctx.api.active_view() {
        ActiveView::Channel => "YOUR TRANSMISSIONS",
        ActiveView::Feed => "TRENDING ASSETS",
    };
    print_items(heading, &ctx.api.projected_items());
    Ok(())
}

fn handle_view(ctx: &mut AppContext, id: &str, no_insight: bool) -> Result<()> {
    let result = ctx.api.select_item(id);
    print_messages(&result.messages);
    if !result.applied {
        return Ok(());
    }

    if let Some(request) = result.insight_request.filter(|_| !no_insight) {
        let response = match insight_runner(&ctx.data_dir) {
            Ok((runtime, fetcher)) => runtime.block_on(insight::fetch(&fetcher, request)),
            Err(e) => {
                warn!(error = %e, "insight unavailable");
                insight::fallback(request)
            }
        };
        ctx.api.apply_insight(response);
    }

    if let Some(item) = ctx.api.selected_item() {
        print_detail(item, ctx.api.insight_state(), &ctx.api.related_items());
    }
    Ok(())
}

fn insight_runner(data_dir: &Path) -> Result<(Runtime, GeminiFetcher)> {
    let config = NexusConfig::load(data_dir)?;
    let fetcher =
        GeminiFetcher::from_config(&config).map_err(|e| NexusError::Api(e.to_string()))?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(NexusError::Io)?;
    Ok((runtime, fetcher))
}

fn handle_comment(ctx: &mut AppContext, id: &str, text: Vec<String>) -> Result<()> {
    // Commenting happens from the detail view, so the item is opened first
    let opened = ctx.api.select_item(id);
    if !opened.applied {
        print_messages(&opened.messages);
        return Ok(());
    }

    let text = text.join(" ");
    ctx.api.set_comment_draft(text.as_str());
    let result = ctx.api.post_comment(&text);
    print_messages(&result.messages);
    if let Some(item) = result.affected_items.first() {
        print_comments(item);
    }
    Ok(())
}

fn handle_upload(
    ctx: &mut AppContext,
    path: PathBuf,
    title: Option<String>,
    description: Option<String>,
    thumbnail: Option<String>,
) -> Result<()> {
    let Some(uploader) = ctx.api.current_user().cloned() else {
        print_messages(&[CmdMessage::warning("Sign in to upload")]);
        return Ok(());
    };

    ctx.api.open_upload_modal();
    let draft = match MediaDraft::from_path(&path, title, description) {
        Ok(draft) => draft.with_thumbnail(thumbnail),
        Err(e) => {
            ctx.api.close_upload_modal();
            return Err(e);
        }
    };
    let item = draft.into_item(&uploader, Utc::now());
    let id = item.id.clone();

    let result = ctx.api.upload(item);
    print_messages(&result.messages);
    if result.applied {
        println!("{}", id);
    }
    Ok(())
}

fn handle_config(
    data_dir: &Path,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = api::config(data_dir, action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            for key in nexus::config::CONFIG_KEYS {
                println!("{} = {}", key, config.get(key).unwrap_or_default());
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}
