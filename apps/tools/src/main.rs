use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{build_store, load_settings, ResolutionRepository, StoreBackend};
use shared::domain::{BoardStats, Category, Resolution, ResolutionDraft, ResolutionId};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tools", about = "Manage resolutions from the command line")]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    store_url: Option<String>,
    #[arg(long)]
    api_key: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Stats,
    Add {
        title: String,
        #[arg(long, default_value = "Health")]
        category: Category,
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
        progress: u8,
        #[arg(long)]
        why: String,
    },
    /// Changes only the given fields; everything else is kept.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        progress: Option<u8>,
        #[arg(long)]
        why: Option<String>,
    },
    Progress {
        id: String,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        value: u8,
    },
    Delete {
        id: String,
    },
}

fn merge_edit(
    existing: &Resolution,
    title: Option<String>,
    category: Option<Category>,
    progress: Option<u8>,
    why: Option<String>,
) -> ResolutionDraft {
    let mut draft = existing.draft();
    if let Some(title) = title {
        draft.title = title;
    }
    if let Some(category) = category {
        draft.category = category;
    }
    if let Some(progress) = progress {
        draft.progress = progress;
    }
    if let Some(why) = why {
        draft.why = why;
    }
    draft
}

fn print_resolution(resolution: &Resolution) {
    println!(
        "{}  [{:<6}] {:>3}%  {}  ({})",
        resolution.id,
        resolution.category.label(),
        resolution.progress,
        resolution.title,
        resolution.why
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref());
    if let Some(url) = cli.store_url {
        settings.store_url = url;
        settings.backend = StoreBackend::Remote;
    }
    if let Some(key) = cli.api_key {
        settings.api_key = Some(key);
    }
    if settings.backend == StoreBackend::Memory {
        tracing::warn!("memory backend selected; changes are discarded when this command exits");
    }

    let store = build_store(&settings).context("failed to configure collection store")?;
    let repository = ResolutionRepository::new(store);

    match cli.command {
        Command::List => {
            let resolutions = repository.list().await?;
            if resolutions.is_empty() {
                println!("No resolutions yet");
            }
            for resolution in &resolutions {
                print_resolution(resolution);
            }
        }
        Command::Stats => {
            let stats = BoardStats::from_resolutions(&repository.list().await?);
            println!("total={} avg_progress={}%", stats.total, stats.average_progress);
        }
        Command::Add {
            title,
            category,
            progress,
            why,
        } => {
            let draft = ResolutionDraft::new(title, category, progress, why);
            draft.validate()?;
            repository.create(&draft).await?;
            println!("created '{}'", draft.title);
        }
        Command::Edit {
            id,
            title,
            category,
            progress,
            why,
        } => {
            let id = ResolutionId::from(id);
            let existing = repository
                .list()
                .await?
                .into_iter()
                .find(|r| r.id == id)
                .ok_or_else(|| anyhow!("no resolution with id {id}"))?;
            let draft = merge_edit(&existing, title, category, progress, why);
            draft.validate()?;
            repository.update(&id, &draft).await?;
            println!("updated {id}");
        }
        Command::Progress { id, value } => {
            let id = ResolutionId::from(id);
            repository.patch_progress(&id, value).await?;
            println!("progress of {id} set to {value}%");
        }
        Command::Delete { id } => {
            let id = ResolutionId::from(id);
            repository.delete(&id).await?;
            println!("deleted {id}");
        }
    }

    Ok(())
}
