use anyhow::{Context as AnyhowContext, Result};
use blogmeta_document::MetaValue;
use blogmeta_normalizer::{NormalizerConfig, SortMode, TagEdit};
use clap::{Args, Parser, Subcommand, ValueEnum};
use command::args::{self as arg, ArgumentError};
use command::{CommandOutcome, CommandRequest, CommandResponse};
use console::Term;
use dialoguer::Confirm;
use std::env;
use std::io;
use std::path::{Path, PathBuf};

mod command;
mod report;

const DEFAULT_ROOT: &str = "blog";
const DEFAULT_CONFIG_FILE: &str = "blogmeta.toml";

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "blogmeta")]
#[command(about = "Front matter maintenance for Markdown blogs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Content root (env: BLOGMETA_ROOT, default: blog)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Config file, TOML or JSON (env: BLOGMETA_CONFIG, default: ./blogmeta.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print a JSON response on stdout instead of the human report
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Tag frequencies, case variants and likely duplicates
    List(ListArgs),

    /// Files that define a key
    #[command(name = "find-present")]
    FindPresent(KeyArgs),

    /// Files that lack a key
    #[command(name = "find-missing")]
    FindMissing(KeyArgs),

    /// Add a key where it is missing
    #[command(name = "add-key")]
    AddKey(AddKeyArgs),

    /// Remove a key everywhere
    #[command(name = "remove-key")]
    RemoveKey(KeyArgs),

    /// Rename a tag (case-insensitive match)
    Rename(RenameArgs),

    /// Delete a tag (case-insensitive match)
    Delete(DeleteArgs),

    /// Rewrite front matter in canonical key order
    Reorder,

    /// Fold alternate key spellings into one target key
    #[command(name = "cleanup-variants")]
    CleanupVariants(CleanupArgs),

    /// Report keys differing only by case and conceptual duplicates
    #[command(name = "check-duplicates")]
    CheckDuplicates,

    /// Report missing mandatory keys
    #[command(name = "check-mandatory")]
    CheckMandatory,

    /// Report SEO and content quality issues
    #[command(name = "check-seo")]
    CheckSeo,

    /// Every key in use, with file counts
    #[command(name = "list-keys")]
    ListKeys,

    /// Every value of a key, with occurrence counts
    #[command(name = "list-values")]
    ListValues(KeyArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Sort order of the frequency table
    #[arg(long, value_enum, default_value_t = SortArg::Count)]
    sort: SortArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Count,
    Name,
}

impl From<SortArg> for SortMode {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Count => SortMode::Count,
            SortArg::Name => SortMode::Name,
        }
    }
}

#[derive(Args)]
struct KeyArgs {
    /// Front matter key
    key: String,
}

#[derive(Args)]
struct AddKeyArgs {
    /// KEY or KEY,DEFAULT (true/false become booleans, [a, b] becomes a list)
    entry: String,

    /// Add an empty value without asking
    #[arg(long, short)]
    yes: bool,
}

#[derive(Args)]
struct RenameArgs {
    /// OLD,NEW
    pair: String,
}

#[derive(Args)]
struct DeleteArgs {
    /// Tag to delete
    tag: String,
}

#[derive(Args)]
struct CleanupArgs {
    /// Key that should remain
    target: String,

    /// Comma-separated variant spellings to fold into the target
    variants: String,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // keep stdout clean for JSON parsing
    if cli.json {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let request = match build_request(&cli.command) {
        Ok(request) => request,
        Err(err) => return fail(cli.json, err.into()),
    };

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return fail(cli.json, err),
    };

    let root = resolve_root(cli.root);
    let outcome = match command::execute(&request, &root, &config) {
        Ok(outcome) => outcome,
        Err(err) => return fail(cli.json, err),
    };

    emit(cli.json, &request, &outcome)
}

fn emit(json: bool, request: &CommandRequest, outcome: &CommandOutcome) -> Result<()> {
    if json {
        let response = CommandResponse::from_outcome(request.name(), outcome);
        return print_stdout(&serde_json::to_string_pretty(&response)?);
    }

    let text = report::render_outcome(outcome);
    if text.is_empty() {
        return Ok(());
    }
    print_stdout(&text)
}

/// Print the error envelope in JSON mode, then exit non-zero
fn fail(json: bool, err: anyhow::Error) -> Result<()> {
    if json {
        let message = format!("{err:#}");
        print_stdout(&serde_json::to_string_pretty(&CommandResponse::error(&message))?)?;
    }
    Err(err)
}

fn resolve_root(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| env::var_os("BLOGMETA_ROOT").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT))
}

fn load_config(flag: Option<&Path>) -> Result<NormalizerConfig> {
    let explicit = flag
        .map(Path::to_path_buf)
        .or_else(|| env::var_os("BLOGMETA_CONFIG").map(PathBuf::from));

    let path = match explicit {
        Some(path) => path,
        None => {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !local.is_file() {
                log::debug!("No {DEFAULT_CONFIG_FILE} found, using built-in defaults");
                return Ok(NormalizerConfig::default());
            }
            local
        }
    };

    NormalizerConfig::load(&path)
        .with_context(|| format!("Failed to load config {}", path.display()))
}

/// Validate arguments into a request; never touches the content tree
fn build_request(command: &Commands) -> Result<CommandRequest, ArgumentError> {
    let request = match command {
        Commands::List(args) => CommandRequest::ListTags {
            sort: args.sort.into(),
        },
        Commands::FindPresent(args) => CommandRequest::FindPresent {
            key: arg::required(&args.key, "key")?,
        },
        Commands::FindMissing(args) => CommandRequest::FindMissing {
            key: arg::required(&args.key, "key")?,
        },
        Commands::AddKey(args) => {
            let (key, value) = arg::parse_key_default(&args.entry)?;
            let value = match value {
                Some(value) => value,
                None => {
                    confirm_empty_value(&key, args.yes)?;
                    MetaValue::Text(String::new())
                }
            };
            CommandRequest::AddKey { key, value }
        }
        Commands::RemoveKey(args) => CommandRequest::RemoveKey {
            key: arg::required(&args.key, "key")?,
        },
        Commands::Rename(args) => CommandRequest::EditTags(arg::parse_rename(&args.pair)?),
        Commands::Delete(args) => CommandRequest::EditTags(TagEdit::Delete {
            tag: arg::required(&args.tag, "tag")?,
        }),
        Commands::Reorder => CommandRequest::Reorder,
        Commands::CleanupVariants(args) => {
            let target = arg::required(&args.target, "target key")?;
            let variants = arg::parse_variants(&args.variants, &target);
            CommandRequest::CleanupVariants { target, variants }
        }
        Commands::CheckDuplicates => CommandRequest::CheckDuplicates,
        Commands::CheckMandatory => CommandRequest::CheckMandatory,
        Commands::CheckSeo => CommandRequest::CheckSeo,
        Commands::ListKeys => CommandRequest::ListKeys,
        Commands::ListValues(args) => CommandRequest::ListValues {
            key: arg::required(&args.key, "key")?,
        },
    };
    Ok(request)
}

fn confirm_empty_value(key: &str, assume_yes: bool) -> Result<(), ArgumentError> {
    if assume_yes {
        return Ok(());
    }

    let term = Term::stderr();
    if !term.is_term() {
        return Err(ArgumentError::ConfirmationRequired(key.to_string()));
    }

    let accepted = Confirm::new()
        .with_prompt(format!("Add '{key}' with an empty value?"))
        .default(false)
        .interact_on(&term)
        .unwrap_or(false);
    if accepted {
        Ok(())
    } else {
        Err(ArgumentError::Declined(key.to_string()))
    }
}
