use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::kv::FileKvStore;
use crate::io::opener::SystemOpener;
use crate::io::remote::fetch_remote_links;
use crate::model::Config;
use crate::model::link::{LinkDraft, MANUAL_DESCRIPTION, MANUAL_ICON};
use crate::ops::filter::{CategoryFilter, filter_links};
use crate::ops::outbound::{ConfirmOutcome, OutboundGate};
use crate::ops::store::LinkStore;
use crate::util::url_input::prepare_url;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, config: &Config, data_dir: &Path) -> CmdResult {
    let json = cli.json;
    match cli.command {
        None => Err("no command given (run without arguments for the dashboard)".into()),
        Some(cmd) => match cmd {
            Commands::List(args) => cmd_list(args, data_dir, json),
            Commands::Categories => cmd_categories(data_dir, json),
            Commands::Add(args) => cmd_add(args, data_dir, json),
            Commands::Delete(args) => cmd_delete(args, data_dir, json),
            Commands::Open(args) => cmd_open(args, config, data_dir, json),
            Commands::Sync => cmd_sync(config, data_dir, json),
        },
    }
}

fn open_store(data_dir: &Path) -> Result<LinkStore<FileKvStore>, Box<dyn std::error::Error>> {
    let kv = FileKvStore::open(data_dir)?;
    Ok(LinkStore::open(kv))
}

/// Ask a y/n question on stderr; anything but `y` declines
fn confirm(question: &str) -> Result<bool, std::io::Error> {
    eprint!("{question} [y/n] ");
    std::io::stderr().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, data_dir: &Path, json: bool) -> CmdResult {
    let store = open_store(data_dir)?;
    let filter = CategoryFilter::from_arg(args.category.as_deref());
    let links = filter_links(
        store.links(),
        &filter,
        args.search.as_deref().unwrap_or(""),
    );

    if json {
        let results: Vec<LinkJson> = links.iter().map(|l| link_to_json(&store, l)).collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if links.is_empty() {
        println!("未找到链接");
    } else {
        let id_w = links.iter().map(|l| l.id.len()).max().unwrap_or(0);
        for link in links {
            println!("{}", format_link_line(&store, link, id_w));
        }
    }
    Ok(())
}

fn cmd_categories(data_dir: &Path, json: bool) -> CmdResult {
    let store = open_store(data_dir)?;
    let categories = store.list_categories();

    if json {
        let results: Vec<CategoryJson> = categories
            .iter()
            .map(|c| category_to_json(c, store.links()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for category in categories {
            println!("{}", format_category_line(category, store.links()));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, data_dir: &Path, json: bool) -> CmdResult {
    let title = args.title.trim();
    if title.is_empty() {
        return Err("title must not be empty".into());
    }
    if args.url.trim().is_empty() {
        return Err("url must not be empty".into());
    }
    let url = prepare_url(&args.url, args.https);

    let mut store = open_store(data_dir)?;
    let draft = LinkDraft {
        title: title.to_string(),
        url,
        description: args
            .description
            .unwrap_or_else(|| MANUAL_DESCRIPTION.to_string()),
        category: args.category,
        icon: Some(args.icon.unwrap_or_else(|| MANUAL_ICON.to_string())),
    };
    let id = store.add_manual_link(draft).id.clone();

    if json {
        let link = store.find(&id).ok_or("link vanished after add")?;
        println!("{}", serde_json::to_string_pretty(&link_to_json(&store, link))?);
    } else {
        println!("{id}");
    }
    Ok(())
}

fn cmd_delete(args: DeleteArgs, data_dir: &Path, json: bool) -> CmdResult {
    let mut store = open_store(data_dir)?;
    let Some(link) = store.find(&args.id) else {
        return Err(format!("no link with id {}", args.id).into());
    };

    if !args.yes && !confirm(&format!("确定要移除此链接吗？ {} ({})", link.title, link.url))? {
        println!("cancelled");
        return Ok(());
    }

    let removed = store
        .delete_link(&args.id)
        .ok_or_else(|| format!("no link with id {}", args.id))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "removed": removed.id }))?);
    } else {
        println!("removed {} {}", removed.id, removed.title);
    }
    Ok(())
}

/// Run the outbound gate on the terminal: countdown, optional prompt, open
fn cmd_open(args: OpenArgs, config: &Config, data_dir: &Path, json: bool) -> CmdResult {
    let mut store = open_store(data_dir)?;
    let mut gate = OutboundGate::new();
    {
        let link = store
            .find(&args.id)
            .ok_or_else(|| format!("no link with id {}", args.id))?;
        gate.stage(link, Instant::now());
        eprintln!("即将离开 NebulaNav: {} {}", link.title, link.url);
    }

    while !gate.is_ready() {
        let remaining = gate.remaining().unwrap_or(0);
        eprint!("\r{remaining} ...");
        std::io::stderr().flush()?;
        thread::sleep(Duration::from_secs(1));
        gate.tick();
    }
    eprintln!("\r      ");

    let url = gate.target().map(|t| t.url.clone()).unwrap_or_default();
    if !args.yes && !confirm(&format!("继续访问 {url}?"))? {
        gate.cancel();
        println!("cancelled");
        return Ok(());
    }

    let opener = SystemOpener::new(config.ui.opener.clone());
    match gate.confirm(&mut store, &opener)? {
        ConfirmOutcome::Opened { link_id, visits } => {
            if json {
                let out = OpenJson {
                    id: &link_id,
                    url: &url,
                    visits,
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("opened {url}");
            }
            Ok(())
        }
        ConfirmOutcome::NotReady => Err("countdown did not finish".into()),
    }
}

fn cmd_sync(config: &Config, data_dir: &Path, json: bool) -> CmdResult {
    if !config.remote.enabled {
        return Err("remote import is disabled (remote.enabled = false)".into());
    }
    let drafts = fetch_remote_links(&config.remote)?;
    log::debug!("remote returned {} candidates", drafts.len());

    let kv = FileKvStore::open(data_dir)?;
    let (_store, report) = LinkStore::initialize(kv, || drafts);

    if json {
        println!("{}", serde_json::to_string_pretty(&merge_to_json(&report))?);
    } else {
        println!("{}", format_merge_report(&report));
    }
    Ok(())
}
