use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use crate::models::{Tag, TagDraft, TagPatch};
use crate::query::{QueryOptions, ThreadBatch, ThreadView, query};
use crate::registry::TagRegistry;
use crate::storage::FileStore;
use crate::utils::{format_thread_time, get_data_dir, sanitize_line};

#[derive(Parser)]
#[command(name = "fusion-inbox")]
#[command(version = "0.1.0")]
#[command(about = "Manage inbox tags and query conversation threads", long_about = None)]
pub struct Cli {
    /// Directory holding persisted tags (overrides FUSION_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage custom tags
    #[command(subcommand)]
    Tags(TagCommands),
    /// Filter and sort a JSON file of threads
    Query(QueryArgs),
}

#[derive(Subcommand)]
pub enum TagCommands {
    /// List all tags
    List,
    /// Create a tag
    Add(TagFields),
    /// Replace fields of an existing tag
    Update {
        id: String,
        #[command(flatten)]
        fields: TagUpdateFields,
    },
    /// Delete a tag by id
    Delete { id: String },
    /// Look up a tag by name (case-insensitive)
    Find { name: String },
}

#[derive(Args)]
pub struct TagFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub priority: Option<u8>,
    /// Matching rule such as contains:urgent (repeatable)
    #[arg(long = "rule")]
    pub rules: Vec<String>,
}

#[derive(Args)]
pub struct TagUpdateFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub priority: Option<u8>,
    /// Replaces all existing rules when given (repeatable)
    #[arg(long = "rule")]
    pub rules: Vec<String>,
}

#[derive(Args)]
pub struct QueryArgs {
    /// JSON file containing an array of threads
    pub file: PathBuf,
    /// Case-insensitive text to look for in subject, last message and participants
    #[arg(long, default_value = "")]
    pub search: String,
    /// all, unread, priority:<high|medium|low>, or a tag name
    #[arg(long, default_value = "all")]
    pub filter: String,
    /// timestamp, priority or unread
    #[arg(long, default_value = "timestamp")]
    pub sort: String,
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Tags(command)) => {
            let mut registry = open_registry(cli.data_dir.as_deref())?;
            run_tag_command(&mut registry, command)?;
        }
        Some(Commands::Query(args)) => {
            let registry = open_registry(cli.data_dir.as_deref())?;
            run_query(registry.list(), &args)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn open_registry(data_dir: Option<&Path>) -> Result<TagRegistry<FileStore>> {
    let dir = get_data_dir(data_dir)?;
    Ok(TagRegistry::initialize(FileStore::new(dir)))
}

fn run_tag_command(registry: &mut TagRegistry<FileStore>, command: TagCommands) -> Result<()> {
    match command {
        TagCommands::List => {
            if registry.is_empty() {
                println!("No tags defined");
            }
            for tag in registry.list() {
                println!("{}", format_tag(tag));
            }
        }
        TagCommands::Add(fields) => {
            let draft = TagDraft {
                name: fields.name,
                color: fields.color,
                priority: fields.priority,
                rules: fields.rules,
            };
            let tag = registry.create(draft)?;
            println!("Created tag {}", format_tag(tag));
        }
        TagCommands::Update { id, fields } => {
            let Some(existing) = registry.get(&id).cloned() else {
                bail!("No tag with id {}", id);
            };

            let patch = TagPatch {
                name: fields.name,
                color: fields.color,
                priority: fields.priority,
                rules: if fields.rules.is_empty() { None } else { Some(fields.rules) },
            };
            let tag = patch.apply_to(&existing)?;
            println!("Updated tag {}", format_tag(&tag));
            registry.update(&id, tag);
        }
        TagCommands::Delete { id } => {
            if registry.get(&id).is_some() {
                registry.delete(&id);
                println!("Deleted tag {}", id);
            } else {
                println!("No tag with id {}", id);
            }
        }
        TagCommands::Find { name } => match registry.find_by_name(&name) {
            Some(tag) => println!("{}", format_tag(tag)),
            None => println!("No tag named {}", name),
        },
    }

    Ok(())
}

fn run_query(tags: &[Tag], args: &QueryArgs) -> Result<()> {
    let input = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read thread file: {}", args.file.display()))?;

    let batch = ThreadBatch::from_json_str(&input);
    let options = QueryOptions::new(&args.search, &args.filter, &args.sort);
    let views = query(&batch, &options, tags);

    if args.json {
        let json = serde_json::to_string_pretty(&views).context("Failed to serialize threads")?;
        println!("{}", json);
        return Ok(());
    }

    if views.is_empty() {
        println!("No conversations found");
        return Ok(());
    }

    println!("{} of {} conversations", views.len(), batch.len());
    let now = Utc::now();
    for view in &views {
        println!("{}", format_view(view, &now));
    }

    Ok(())
}

fn format_tag(tag: &Tag) -> String {
    let rules = if tag.rules.is_empty() { "-".to_string() } else { tag.rules.join(", ") };
    sanitize_line(&format!(
        "{}  {}  {}  priority {}  rules: {}",
        tag.id, tag.name, tag.color, tag.priority, rules
    ))
}

fn format_view(view: &ThreadView<'_>, now: &chrono::DateTime<Utc>) -> String {
    let thread = view.thread;
    let mut line = format!(
        "{:>9}  [{}] {}",
        format_thread_time(thread.timestamp.as_ref(), now),
        thread.priority.as_str(),
        sanitize_line(&thread.subject)
    );

    if thread.has_unread() {
        line.push_str(&format!("  ({} unread)", thread.unread_count));
    }

    for badge in &view.badges.shown {
        line.push_str(&format!(
            "  #{} {}",
            sanitize_line(badge.name),
            sanitize_line(badge.color)
        ));
    }
    if let Some(label) = view.badges.overflow_label() {
        line.push_str(&format!("  {}", label));
    }

    line
}
