use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use listmerge_core::{AppConfig, ComparableField, ExitCode, Record, SearchCriteria};
use listmerge_dedup::{
    DedupError, DuplicateGroup, DuplicateService, SearchOutcome, compare_records,
};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "listmerge",
    about = "Find and merge duplicate contacts across mailing lists",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format (for scripts and the record store importer).
    /// Also enabled by setting LISTMERGE_JSON=1.
    #[arg(long, global = true)]
    json: bool,

    /// Config file to use instead of the standard path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find duplicate groups in a record export.
    Find {
        #[command(flatten)]
        search: SearchArgs,
    },

    /// Compare two records field by field.
    Compare {
        #[command(flatten)]
        search: SearchArgs,
        left: Uuid,
        right: Uuid,
    },

    /// Show what each group would look like after merging.
    Preview {
        #[command(flatten)]
        search: SearchArgs,
        #[command(flatten)]
        primary: PrimaryArgs,
    },

    /// Print merge plans (merged record to upsert, ids to retire).
    Merge {
        #[command(flatten)]
        search: SearchArgs,
        #[command(flatten)]
        primary: PrimaryArgs,
        #[arg(long)]
        confirm: bool,
    },

    /// Print deletion plans (ids to delete, primary kept).
    Delete {
        #[command(flatten)]
        search: SearchArgs,
        #[command(flatten)]
        primary: PrimaryArgs,
        #[arg(long)]
        confirm: bool,
    },

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// JSON array of records exported by the record store.
    #[arg(long)]
    records: PathBuf,

    /// Field to compare (repeatable). Replaces the configured field set.
    #[arg(long = "field", action = clap::ArgAction::Append)]
    fields: Vec<ComparableField>,

    /// Similarity cutoff, 0-100.
    #[arg(long)]
    threshold: Option<u8>,

    /// Require normalized equality instead of similarity scoring.
    #[arg(long)]
    exact: bool,

    #[arg(long)]
    case_sensitive: bool,

    /// Keep whitespace when comparing.
    #[arg(long)]
    keep_spaces: bool,

    /// Compare records from different lists.
    #[arg(long)]
    cross_list: bool,

    #[arg(long)]
    max_group_size: Option<usize>,
}

#[derive(Args)]
struct PrimaryArgs {
    /// Record to keep as primary in whichever group contains it (repeatable).
    #[arg(long = "primary", action = clap::ArgAction::Append)]
    primaries: Vec<Uuid>,
}

// ─── Config Actions ──────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective config.
    List,
    /// Write the default config to the config path.
    Init {
        #[arg(long)]
        force: bool,
    },
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();
    init_logging();

    // ── Env var overrides ──────────────────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)?;
    let json_output =
        cli.json || config.output.json || std::env::var("LISTMERGE_JSON").as_deref() == Ok("1");
    let out = Output {
        json: json_output,
        pretty: config.output.pretty,
        start,
    };
    tracing::debug!(path = %config_path.display(), "config loaded");

    let service = DuplicateService::new();

    match cli.command {
        Commands::Find { search } => {
            let records = load_records(&search.records)?;
            let criteria = search.criteria(&config.search);
            let outcome = run_search(&service, &records, &criteria);

            if out.json {
                out.ok(&outcome)?;
            } else {
                print_groups(&outcome);
            }
        }

        Commands::Compare { search, left, right } => {
            let records = load_records(&search.records)?;
            let criteria = search.criteria(&config.search);
            exit_on_dedup_error(DuplicateService::validate_criteria(&criteria));

            let (Some(a), Some(b)) = (find_record(&records, left), find_record(&records, right))
            else {
                eprintln!("Record not found: both {left} and {right} must be in the export");
                std::process::exit(ExitCode::NotFound as i32);
            };
            let comparison = compare_records(a, b, &criteria);

            if out.json {
                out.ok(&comparison)?;
            } else {
                println!("{}  vs  {}", a.display_name(), b.display_name());
                for verdict in &comparison.verdicts {
                    let score = verdict
                        .score
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    let mark = if verdict.matched { "match" } else { "" };
                    println!("  {:<10} {score:>4}  {mark}", verdict.field.as_str());
                }
                println!(
                    "candidate: {}  score: {:.1}",
                    comparison.is_candidate, comparison.aggregate_score
                );
            }
        }

        Commands::Preview { search, primary } => {
            let records = load_records(&search.records)?;
            let criteria = search.criteria(&config.search);
            let mut outcome = run_search(&service, &records, &criteria);
            apply_primaries(&service, &mut outcome.groups, &primary.primaries);

            let mut previews = Vec::with_capacity(outcome.groups.len());
            for group in &outcome.groups {
                previews.push(exit_on_dedup_error(service.preview_merge(group)));
            }

            if out.json {
                out.ok(&previews)?;
            } else if previews.is_empty() {
                println!("No duplicate groups found.");
            } else {
                for preview in &previews {
                    let filled: Vec<String> = preview
                        .filled_fields
                        .iter()
                        .map(|f| format!("{}<-{}", f.field, short_id(&f.source)))
                        .collect();
                    println!(
                        "{}  {:<30}  merges {}  filled [{}]",
                        short_id(&preview.primary_id),
                        preview.record.display_name(),
                        preview.merged_from.len(),
                        filled.join(", ")
                    );
                }
            }
        }

        Commands::Merge {
            search,
            primary,
            confirm,
        } => {
            require_confirm(confirm, "merge");
            let records = load_records(&search.records)?;
            let criteria = search.criteria(&config.search);
            let mut outcome = run_search(&service, &records, &criteria);
            apply_primaries(&service, &mut outcome.groups, &primary.primaries);
            let plans = exit_on_dedup_error(service.confirm_merge(&outcome.groups));

            if out.json {
                out.ok(&plans)?;
            } else {
                for plan in &plans {
                    println!(
                        "upsert {}  retire {}",
                        plan.merged.record.id,
                        join_ids(&plan.retire)
                    );
                }
            }
        }

        Commands::Delete {
            search,
            primary,
            confirm,
        } => {
            require_confirm(confirm, "delete");
            let records = load_records(&search.records)?;
            let criteria = search.criteria(&config.search);
            let mut outcome = run_search(&service, &records, &criteria);
            apply_primaries(&service, &mut outcome.groups, &primary.primaries);
            let plans = exit_on_dedup_error(service.delete_duplicates(&outcome.groups));

            if out.json {
                out.ok(&plans)?;
            } else {
                for plan in &plans {
                    println!("keep {}  delete {}", plan.keep, join_ids(&plan.delete));
                }
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::List => {
                if out.json {
                    out.ok(&config)?;
                } else {
                    println!("# {}", config_path.display());
                    print!("{}", toml::to_string_pretty(&config)?);
                }
            }
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    eprintln!(
                        "Config already exists at {}. Add --force to overwrite.",
                        config_path.display()
                    );
                    std::process::exit(ExitCode::Conflict as i32);
                }
                AppConfig::default().save_to(&config_path)?;
                if out.json {
                    out.ok(&serde_json::json!({ "path": config_path }))?;
                } else {
                    println!("Wrote {}", config_path.display());
                }
            }
        },
    }

    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

impl SearchArgs {
    /// Configured defaults with command-line overrides applied.
    fn criteria(&self, defaults: &SearchCriteria) -> SearchCriteria {
        let mut criteria = defaults.clone();
        if !self.fields.is_empty() {
            criteria.fields = self.fields.iter().copied().collect();
        }
        if let Some(threshold) = self.threshold {
            criteria.threshold = threshold;
        }
        if let Some(max) = self.max_group_size {
            criteria.max_group_size = max;
        }
        criteria.exact_match |= self.exact;
        criteria.case_sensitive |= self.case_sensitive;
        if self.keep_spaces {
            criteria.ignore_spaces = false;
        }
        criteria.cross_list_search |= self.cross_list;
        criteria
    }
}

struct Output {
    json: bool,
    pretty: bool,
    start: Instant,
}

impl Output {
    fn ok<T: serde::Serialize>(&self, data: &T) -> Result<()> {
        let envelope = serde_json::json!({
            "status": "ok",
            "data": data,
            "meta": { "duration_ms": self.start.elapsed().as_millis() }
        });
        if self.pretty {
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        } else {
            println!("{}", serde_json::to_string(&envelope)?);
        }
        Ok(())
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("LISTMERGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_records(path: &Path) -> Result<Vec<Record>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading records from {}", path.display()))?;
    let records: Vec<Record> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing records in {}", path.display()))?;
    tracing::info!(count = records.len(), path = %path.display(), "records loaded");
    Ok(records)
}

fn run_search<'a>(
    service: &DuplicateService,
    records: &'a [Record],
    criteria: &SearchCriteria,
) -> SearchOutcome<'a> {
    exit_on_dedup_error(service.find_duplicates(records, criteria))
}

fn apply_primaries(
    service: &DuplicateService,
    groups: &mut [DuplicateGroup<'_>],
    primaries: &[Uuid],
) {
    for id in primaries {
        let Some(group) = groups.iter_mut().find(|g| g.contains(*id)) else {
            eprintln!("Record {id} is not in any duplicate group");
            std::process::exit(ExitCode::Conflict as i32);
        };
        exit_on_dedup_error(service.set_primary(group, *id));
    }
}

fn find_record(records: &[Record], id: Uuid) -> Option<&Record> {
    records.iter().find(|r| r.id == id)
}

fn require_confirm(confirm: bool, action: &str) {
    if !confirm {
        eprintln!("Add --confirm to {action} without prompt.");
        std::process::exit(ExitCode::ConfirmRequired as i32);
    }
}

/// Unwraps an engine result, exiting with the matching exit code on error.
fn exit_on_dedup_error<T>(result: std::result::Result<T, DedupError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            eprintln!("{err}");
            let code = match err {
                DedupError::Configuration(_) => ExitCode::InvalidArgs,
                DedupError::Precondition(_) => ExitCode::Conflict,
            };
            std::process::exit(code as i32);
        }
    }
}

fn print_groups(outcome: &SearchOutcome<'_>) {
    if outcome.groups.is_empty() {
        println!("No duplicate groups found.");
    }
    for group in &outcome.groups {
        let fields: Vec<&str> = group.match_fields().iter().map(|f| f.as_str()).collect();
        println!(
            "group {}  score {:>5.1}  fields [{}]",
            short_id(&group.id()),
            group.match_score(),
            fields.join(", ")
        );
        for record in group.records() {
            let marker = if Some(record.id) == group.primary_record_id() {
                "*"
            } else {
                " "
            };
            println!(
                "  {marker} {}  {:<30}  {:<30}  {}",
                short_id(&record.id),
                record.display_name(),
                record.address,
                record.zip_code
            );
        }
    }
    if !outcome.complete {
        println!("(search cancelled before completion)");
    }
}

fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn join_ids(ids: &[Uuid]) -> String {
    ids.iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
