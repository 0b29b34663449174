mod commands;
mod terminal;

use commands::{CommandLine, Commands, EntityArg, convert, fields, list, watch};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose)?;

    let cfg = commands.config();

    match commands.command {
        Commands::Devices(args) => {
            print::header("discovered devices", cfg.quiet);
            list::devices(args, &cfg).await
        }
        Commands::Assets(args) => {
            print::header("managed assets", cfg.quiet);
            list::assets(args, &cfg).await
        }
        Commands::Fields { entity, partial } => {
            match entity {
                EntityArg::Devices => print::header("device fields", cfg.quiet),
                EntityArg::Assets => print::header("asset fields", cfg.quiet),
            }
            fields::fields(entity, partial.as_deref(), &cfg);
            Ok(())
        }
        Commands::Convert(args) => {
            print::header("converting devices", cfg.quiet);
            convert::convert(args, &cfg).await
        }
        Commands::Watch { status_file, .. } => {
            print::header("watching scan", cfg.quiet);
            watch::watch(status_file, &cfg).await
        }
    }
}
