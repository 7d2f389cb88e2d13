use crate::commands::{run_check, run_lookup, run_profile, CheckArgs, LookupArgs, ProfileCommand};
use crate::server;
use clap::{Args, Parser, Subcommand};
use pawcheck::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "pawcheck",
    about = "Screen dog food ingredient labels against your dog's allergens",
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
    /// Screen an ingredient list without a barcode lookup
    Check(CheckArgs),
    /// Look a product up by barcode and screen it against the stored profile
    Lookup(LookupArgs),
    /// Inspect or edit the stored allergen profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Check(args) => run_check(args),
        Command::Lookup(args) => run_lookup(args).await,
        Command::Profile { command } => run_profile(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["pawcheck"]).expect("parses");
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["pawcheck", "serve", "--port", "8080"]).expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => assert_eq!(args.port, Some(8080)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn check_collects_repeated_allergens() {
        let cli = Cli::try_parse_from([
            "pawcheck",
            "check",
            "--ingredients",
            "Chicken, Rice",
            "--allergen",
            "chicken",
            "--allergen",
            "pea protein",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Check(args)) => {
                assert_eq!(args.ingredients, "Chicken, Rice");
                assert_eq!(args.allergens, vec!["chicken", "pea protein"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn profile_subcommands_parse() {
        let cli = Cli::try_parse_from(["pawcheck", "profile", "rename", "Biscuit"]).expect("parses");
        match cli.command {
            Some(Command::Profile {
                command: ProfileCommand::Rename { name },
            }) => assert_eq!(name, "Biscuit"),
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["pawcheck", "lookup", "0-12345-67890-5", "--json"])
            .expect("parses");
        match cli.command {
            Some(Command::Lookup(args)) => {
                assert_eq!(args.barcode, "0-12345-67890-5");
                assert!(args.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
