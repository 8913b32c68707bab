use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use passledger_core::{SearchField, VERSION};

/// PassLedger - a local, encrypted password vault
#[derive(Parser)]
#[command(name = "passledger")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the vault file
    #[arg(short = 'f', long, global = true, env = "PASSLEDGER_PATH")]
    pub vault: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// PBKDF2 iteration count stored in the new vault
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub iterations: Option<u32>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Entry title
    #[arg(long)]
    pub title: Option<String>,

    /// Username or login
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password (prefer --generate or the prompt; arguments end up in shell history)
    #[arg(long, conflicts_with = "generate")]
    pub password: Option<String>,

    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Group to file the entry under (created if missing)
    #[arg(short, long)]
    pub group: Option<String>,

    /// Generate a random password
    #[arg(long)]
    pub generate: bool,

    /// Length of the generated password
    #[arg(long, default_value_t = crate::generator::DEFAULT_LENGTH, requires = "generate")]
    pub length: usize,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Entry ID
    #[arg(value_name = "ID")]
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub username: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    #[arg(long, conflicts_with = "clear_url")]
    pub url: Option<String>,

    #[arg(long, conflicts_with = "clear_notes")]
    pub notes: Option<String>,

    /// Move the entry to this group (created if missing)
    #[arg(short, long, conflicts_with = "no_group")]
    pub group: Option<String>,

    /// Remove the URL
    #[arg(long)]
    pub clear_url: bool,

    /// Remove the notes
    #[arg(long)]
    pub clear_notes: bool,

    /// Remove the entry from its group
    #[arg(long)]
    pub no_group: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Only entries in this group ("All" means every entry)
    #[arg(short, long)]
    pub group: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Show passwords instead of masking them
    #[arg(long)]
    pub reveal: bool,
}

/// Arguments for the `search` command
#[derive(Args)]
pub struct SearchArgs {
    /// Case-insensitive substring to look for
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Field to search (repeatable; defaults to the config's search fields)
    #[arg(long = "field", value_name = "FIELD", value_parser = parse_search_field)]
    pub fields: Vec<SearchField>,

    /// Only entries in this group
    #[arg(short, long)]
    pub group: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Show passwords instead of masking them
    #[arg(long)]
    pub reveal: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Entry ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Show the password
    #[arg(long)]
    pub reveal: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Copy the password to the clipboard and clear it after a delay
    #[arg(short, long)]
    pub copy: bool,
}

/// Arguments for the `rm` command
#[derive(Args)]
pub struct RemoveArgs {
    /// Entry ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `generate` command
#[derive(Args)]
pub struct GenerateArgs {
    /// Password length
    #[arg(short, long, default_value_t = crate::generator::DEFAULT_LENGTH)]
    pub length: usize,

    #[arg(long)]
    pub no_lowercase: bool,

    #[arg(long)]
    pub no_uppercase: bool,

    #[arg(long)]
    pub no_digits: bool,

    #[arg(long)]
    pub no_special: bool,

    /// Include the space character
    #[arg(long)]
    pub space: bool,

    /// Include brackets: []{}()<>
    #[arg(long)]
    pub brackets: bool,
}

/// File format for `export` and `import`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExchangeFormat {
    /// `Title,Username,Password,URL,Notes,Group` with a header row
    Csv,
    /// The JSON array written by `passledger export --format json`
    Json,
}

impl ExchangeFormat {
    /// Explicit choice, else `.json` files are JSON and everything else CSV.
    pub fn resolve(explicit: Option<Self>, path: Option<&std::path::Path>) -> Self {
        explicit.unwrap_or_else(|| {
            let is_json = path
                .and_then(|p| p.extension())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_json {
                Self::Json
            } else {
                Self::Csv
            }
        })
    }
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Write to this file (mode 0600) instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format (default: from the file extension, else csv)
    #[arg(long, value_enum)]
    pub format: Option<ExchangeFormat>,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// CSV or JSON file to import
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Input format (default: from the file extension, else csv)
    #[arg(long, value_enum)]
    pub format: Option<ExchangeFormat>,
}

/// Arguments for the `backup` command
#[derive(Args)]
pub struct BackupArgs {
    /// Destination path
    #[arg(value_name = "DEST")]
    pub destination: PathBuf,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum GroupCommands {
    /// List groups
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a group
    Add {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Rename a group; its entries follow
    Rename {
        #[arg(value_name = "OLD")]
        old: String,
        #[arg(value_name = "NEW")]
        new: String,
    },

    /// Delete a group and every entry in it
    Rm {
        #[arg(value_name = "NAME")]
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new encrypted vault
    Init(InitArgs),

    /// Add a credential
    Add(AddArgs),

    /// Edit a credential
    Edit(EditArgs),

    /// List credentials
    List(ListArgs),

    /// Search credentials
    Search(SearchArgs),

    /// Show a credential by ID
    Show(ShowArgs),

    /// Delete a credential
    Rm(RemoveArgs),

    /// Manage groups
    #[command(subcommand)]
    Group(GroupCommands),

    /// Generate a random password
    Generate(GenerateArgs),

    /// Export decrypted credentials as CSV or JSON
    Export(ExportArgs),

    /// Import credentials from CSV or JSON
    Import(ImportArgs),

    /// Check vault integrity
    Check,

    /// Backup the vault
    Backup(BackupArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

fn parse_search_field(value: &str) -> Result<SearchField, String> {
    value.parse::<SearchField>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_fields_parse() {
        let cli = Cli::try_parse_from([
            "passledger",
            "search",
            "bank",
            "--field",
            "notes",
            "--field",
            "Group",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Search(args)) => {
                assert_eq!(args.fields, vec![SearchField::Notes, SearchField::Group]);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_unknown_search_field_rejected() {
        assert!(Cli::try_parse_from(["passledger", "search", "x", "--field", "password"]).is_err());
    }

    #[test]
    fn test_exchange_format_resolution() {
        use std::path::Path;

        assert_eq!(ExchangeFormat::resolve(None, None), ExchangeFormat::Csv);
        assert_eq!(
            ExchangeFormat::resolve(None, Some(Path::new("dump.JSON"))),
            ExchangeFormat::Json
        );
        assert_eq!(
            ExchangeFormat::resolve(None, Some(Path::new("dump.csv"))),
            ExchangeFormat::Csv
        );
        assert_eq!(
            ExchangeFormat::resolve(Some(ExchangeFormat::Csv), Some(Path::new("dump.json"))),
            ExchangeFormat::Csv
        );
    }

    #[test]
    fn test_edit_conflicting_flags() {
        assert!(Cli::try_parse_from(["passledger", "edit", "1", "--url", "a", "--clear-url"]).is_err());
        assert!(Cli::try_parse_from(["passledger", "edit", "1", "-g", "a", "--no-group"]).is_err());
    }

    #[test]
    fn test_init_rejects_zero_iterations() {
        assert!(Cli::try_parse_from(["passledger", "init", "--iterations", "0"]).is_err());
    }
}
