use crate::demo::{run_demo, run_fleet_utilization, DemoArgs, UtilizationArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fleet_ops::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Fleet Utilization Service",
    about = "Score fleet utilization from the command line or serve it over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a tenant's fleet from CSV exports
    Fleet {
        #[command(subcommand)]
        command: FleetCommand,
    },
    /// Score a synthetic fleet for stakeholder demos
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum FleetCommand {
    /// Print the fleet utilization breakdown for one company
    Utilization(UtilizationArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Trucks export used to seed the fleet store
    #[arg(long)]
    pub(crate) trucks_csv: Option<PathBuf>,
    /// Loads export used to seed the fleet store
    #[arg(long)]
    pub(crate) loads_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Fleet {
            command: FleetCommand::Utilization(args),
        } => run_fleet_utilization(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["fleet-ops-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn utilization_arguments_parse() {
        let cli = Cli::try_parse_from([
            "fleet-ops-api",
            "fleet",
            "utilization",
            "--trucks",
            "trucks.csv",
            "--loads",
            "loads.csv",
            "--company",
            "acme",
            "--range",
            "90d",
            "--as-of",
            "2025-03-31",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Fleet {
                command: FleetCommand::Utilization(args),
            }) => {
                assert_eq!(args.company, "acme");
                assert_eq!(args.range.as_deref(), Some("90d"));
                assert!(args.as_of.is_some());
                assert!(args.json);
            }
            other => panic!("expected fleet utilization, got {other:?}"),
        }
    }

    #[test]
    fn custom_ranges_need_both_ends() {
        let result = Cli::try_parse_from([
            "fleet-ops-api",
            "fleet",
            "utilization",
            "--trucks",
            "trucks.csv",
            "--loads",
            "loads.csv",
            "--company",
            "acme",
            "--from",
            "2025-01-01",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_as_of_is_rejected_by_the_parser() {
        let result = Cli::try_parse_from(["fleet-ops-api", "demo", "--as-of", "yesterday"]);
        assert!(result.is_err());
    }
}
