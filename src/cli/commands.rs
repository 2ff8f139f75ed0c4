use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::warn;

use super::logging::{LogTarget, init_logging};
use crate::config::{DEFAULT_EXPORT_DIR, ViewerConfig};
use crate::models::DateIndex;
use crate::prefs::Preferences;
use crate::render::build_blocks;
use crate::render::html::render_html;
use crate::render::text::render_text;
use crate::source::{DEFAULT_PAGE_SIZE, PageLoader, open_export};
use crate::tui::run_viewer;
use crate::utils::{format_path_with_tilde, strip_ansi_codes};
use crate::view::grouping::{AuthorIdentity, group_with};
use crate::view::search::SearchFilter;
use crate::view::{DateJumpResolver, PaginationIndex};

#[derive(Parser)]
#[command(name = "lastseen")]
#[command(version = "0.1.0")]
#[command(about = "Browse exported chat transcripts page by page", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Export directory (chunked or single-file layout)
    #[arg(long, global = true, env = "LASTSEEN_EXPORT_DIR", default_value = DEFAULT_EXPORT_DIR)]
    pub export_dir: PathBuf,

    /// Messages per page for single-file exports
    #[arg(long, global = true, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// What counts as the same author when grouping messages
    #[arg(long, global = true, value_enum, default_value_t = GroupBy::NameRole)]
    pub group_by: GroupBy,

    /// Do not pin the current day label above the message list
    #[arg(long, global = true)]
    pub no_sticky_header: bool,

    /// Append logs to this file while the viewer is open
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive viewer (default)
    View,
    /// Show statistics about the export
    Stats,
    /// Print one page of the transcript
    Page {
        /// Display page, 1 = newest
        #[arg(default_value_t = 1)]
        page: usize,

        /// Only show messages containing this text (case-insensitive)
        #[arg(short, long)]
        query: Option<String>,

        #[arg(short, long, value_enum, default_value_t = PageFormat::Text)]
        format: PageFormat,
    },
    /// Find the page holding the first message of a day
    Jump {
        /// Day in YYYY-MM-DD form
        date: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupBy {
    NameRole,
    Role,
}

impl From<GroupBy> for AuthorIdentity {
    fn from(value: GroupBy) -> Self {
        match value {
            GroupBy::NameRole => AuthorIdentity::NameAndRole,
            GroupBy::Role => AuthorIdentity::RoleOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageFormat {
    Text,
    Html,
}

impl GlobalArgs {
    pub fn to_config(&self) -> Result<ViewerConfig> {
        if self.page_size == 0 {
            bail!("--page-size must be at least 1");
        }
        Ok(ViewerConfig {
            page_size: self.page_size,
            grouping: self.group_by.into(),
            sticky_header: !self.no_sticky_header,
            ..ViewerConfig::with_export_dir(self.export_dir.clone())
        })
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.global.to_config()?;
    let interactive = matches!(cli.command, None | Some(Commands::View));

    let target = match &cli.global.log_file {
        Some(path) => LogTarget::File(path),
        None if interactive => LogTarget::Discard,
        None => LogTarget::Stderr,
    };
    init_logging(target)?;

    match &cli.command {
        None | Some(Commands::View) => run_viewer(config)?,
        Some(Commands::Stats) => show_stats(&config)?,
        Some(Commands::Page { page, query, format }) => {
            print_page(&config, *page, query.as_deref(), *format)?;
        }
        Some(Commands::Jump { date }) => show_jump(&config, date)?,
    }

    Ok(())
}

fn open_loader(config: &ViewerConfig) -> Result<PageLoader> {
    let source = open_export(&config.export_dir, config.page_size).with_context(|| {
        format!("Failed to open export: {}", format_path_with_tilde(&config.export_dir))
    })?;
    Ok(PageLoader::with_capacity(source, config.cache_pages))
}

fn show_stats(config: &ViewerConfig) -> Result<()> {
    let mut loader = open_loader(config)?;
    let meta = loader.meta().clone();

    let mut counted = 0;
    let mut unreadable = 0;
    let mut by_author: BTreeMap<(String, &'static str), usize> = BTreeMap::new();
    let mut first = None;
    let mut last = None;
    for index in 0..meta.total_pages {
        let page = match loader.load(index) {
            Ok(page) => page,
            Err(e) => {
                warn!(page = index, error = %e, "skipping unreadable page");
                unreadable += 1;
                continue;
            }
        };
        for message in &page.messages {
            counted += 1;
            *by_author
                .entry((message.author.name.clone(), message.author.role.as_str()))
                .or_default() += 1;
            first.get_or_insert(message.day());
            last = Some(message.day());
        }
    }
    let date_index = loader.load_date_index().ok();

    println!("Transcript Statistics");
    println!("=====================");
    println!("Total messages: {}", meta.total_messages.unwrap_or(counted));
    println!("Pages: {}", meta.total_pages);
    if unreadable > 0 {
        println!("  Unreadable pages: {}", unreadable);
    }
    let range = meta.date_range.as_ref();
    let from = range
        .and_then(|r| r.from)
        .or_else(|| date_index.as_ref().and_then(DateIndex::first_date))
        .or(first);
    let to = range
        .and_then(|r| r.to)
        .or_else(|| date_index.as_ref().and_then(DateIndex::last_date))
        .or(last);
    if let (Some(from), Some(to)) = (from, to) {
        println!("Date range: {} to {}", from, to);
    }
    if let Some(index) = &date_index {
        println!("Days with messages: {}", index.len());
    }

    let mut authors: Vec<_> = by_author.into_iter().collect();
    authors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    if !authors.is_empty() {
        println!();
        println!("Messages by author:");
        for ((name, role), count) in authors {
            println!("  {} ({}): {}", strip_ansi_codes(&name), role, count);
        }
    }

    println!();
    println!("Export directory: {}", format_path_with_tilde(&config.export_dir));

    Ok(())
}

fn print_page(
    config: &ViewerConfig,
    display_page: usize,
    query: Option<&str>,
    format: PageFormat,
) -> Result<()> {
    let mut loader = open_loader(config)?;
    let mut pagination = PaginationIndex::new(loader.meta().total_pages);
    let Some(index) = pagination.to_internal(display_page) else {
        bail!(
            "Page {} does not exist (this export has {} pages)",
            display_page,
            pagination.total_pages()
        );
    };
    pagination.set_current(index);

    let page = loader.load(index).with_context(|| format!("Failed to load page {}", display_page))?;
    let groups = group_with(&page.messages, config.grouping);
    let search = SearchFilter::new(query.unwrap_or_default());
    let matches = search.apply(&page.messages);
    let blocks = build_blocks(&page.messages, &groups, &matches, &config.export_dir);

    match format {
        PageFormat::Text => {
            println!("{}", pagination.label());
            if search.is_active() {
                let shown = matches.iter().filter(|m| m.visible).count();
                println!("{} of {} messages match \"{}\"", shown, page.len(), search.query());
            }
            println!();
            print!("{}", render_text(&blocks));
        }
        PageFormat::Html => {
            let title = format!(
                "{} · {}",
                format_path_with_tilde(&config.export_dir),
                pagination.label()
            );
            print!("{}", render_html(&title, &blocks, Preferences::load().theme));
        }
    }

    Ok(())
}

fn show_jump(config: &ViewerConfig, input: &str) -> Result<()> {
    let loader = open_loader(config)?;
    let pagination = PaginationIndex::new(loader.meta().total_pages);
    let index = loader.load_date_index().context("Date index unavailable")?;
    let resolver = DateJumpResolver::new(index);

    let location = resolver.resolve_str(input)?;
    if location.page >= pagination.total_pages() {
        bail!(
            "Date index points at page {} but the export has {} pages",
            location.page,
            pagination.total_pages()
        );
    }

    println!(
        "{}: page {} / {}, message {}",
        input.trim(),
        pagination.to_display(location.page),
        pagination.total_pages(),
        location.offset + 1
    );
    Ok(())
}
