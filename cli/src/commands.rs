pub mod convert;
pub mod fields;
pub mod list;
pub mod watch;

use std::path::{Path, PathBuf};
use std::time::Duration;

use assetr_common::config::{Config, DEFAULT_POLL_INTERVAL};
use assetr_core::adapters::json_file::JsonInventoryFile;
use assetr_core::discovery::DiscoveryService;
use assetr_core::vendors::MacOuiRepo;
use assetr_core::working_set::WorkingSet;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "assetr")]
#[command(about = "Review discovered devices and promote them to managed assets.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less terminal output (-q, -qq)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Fill missing manufacturers from the MAC vendor prefix
    #[arg(long, global = true)]
    pub vendors: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List discovered devices
    #[command(alias = "d")]
    Devices(ListArgs),
    /// List managed assets
    #[command(alias = "a")]
    Assets(ListArgs),
    /// Show the searchable fields, or complete a partial query
    #[command(alias = "f")]
    Fields {
        #[arg(value_enum, default_value_t = EntityArg::Devices)]
        entity: EntityArg,
        /// Partial query to complete, e.g. "web conf"
        partial: Option<String>,
    },
    /// Convert discovered devices into assets
    #[command(alias = "c")]
    Convert(ConvertArgs),
    /// Follow an active scan until it finishes
    #[command(alias = "w")]
    Watch {
        /// JSON file holding the scanner's current status
        status_file: PathBuf,
        /// Poll interval in milliseconds
        #[arg(long, value_name = "MS")]
        interval: Option<u64>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityArg {
    Devices,
    Assets,
}

#[derive(Args)]
pub struct ListArgs {
    /// Inventory document (JSON)
    pub file: PathBuf,
    /// Search text or a field query such as `confidence>70`
    #[arg(default_value = "")]
    pub query: String,
    /// Field key to sort by
    #[arg(short, long)]
    pub sort: Option<String>,
    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
    /// Print the matches as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Inventory document (JSON)
    pub file: PathBuf,
    /// Device ids to convert
    #[arg(required_unless_present_any = ["all", "matching"])]
    pub ids: Vec<String>,
    /// Convert every discovered device that is still new
    #[arg(long, conflicts_with_all = ["ids", "matching"])]
    pub all: bool,
    /// Convert every new device matching this query
    #[arg(long, value_name = "QUERY", conflicts_with = "ids")]
    pub matching: Option<String>,
    /// Asset name (single device only)
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Label attached to every converted asset; repeatable
    #[arg(short, long = "label")]
    pub labels: Vec<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    /// Do not mark the new assets as managed
    #[arg(long)]
    pub unmanaged: bool,
    /// Write the updated inventory here instead of back to FILE
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Convert without writing anything
    #[arg(long, conflicts_with = "output")]
    pub dry_run: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        let poll_interval = match &self.command {
            Commands::Watch {
                interval: Some(ms), ..
            } => Duration::from_millis(*ms),
            _ => DEFAULT_POLL_INTERVAL,
        };
        let (mark_managed, default_labels) = match &self.command {
            Commands::Convert(args) => (!args.unmanaged, args.labels.clone()),
            _ => (true, Vec::new()),
        };

        Config {
            poll_interval,
            quiet: self.quiet,
            vendor_lookup: self.vendors,
            mark_managed,
            default_labels,
        }
    }
}

/// Loads the inventory document at `path` through the discovery service.
pub async fn load_working_set(path: &Path, cfg: &Config) -> anyhow::Result<WorkingSet> {
    let file = JsonInventoryFile::new(path);
    let mut service = DiscoveryService::new(Box::new(file.clone()), Box::new(file));
    if cfg.vendor_lookup {
        service = service.with_vendor_repo(Box::new(MacOuiRepo));
    }
    service.load().await
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommandLine {
        CommandLine::try_parse_from(args).unwrap()
    }

    #[test]
    fn convert_flags_fill_the_config() {
        let cfg = parse(&[
            "assetr", "convert", "inv.json", "--all", "-l", "lab", "--label", "rack-4", "--unmanaged",
        ])
        .config();
        assert_eq!(cfg.default_labels, vec!["lab".to_string(), "rack-4".to_string()]);
        assert!(!cfg.mark_managed);
        assert_eq!(cfg.poll_interval, DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn other_commands_keep_defaults() {
        let cfg = parse(&["assetr", "-qq", "watch", "status.json", "--interval", "250"]).config();
        assert!(cfg.default_labels.is_empty());
        assert!(cfg.mark_managed);
        assert_eq!(cfg.quiet, 2);
        assert_eq!(cfg.poll_interval, Duration::from_millis(250));
    }
}
