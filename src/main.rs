use clap::{Args, Parser, Subcommand};

use nvb::architecture::{
    EnvFlags, StaticFlags, architecture_name, is_new_architecture_enabled, log_architecture_info,
};
use nvb::command::all_command_specs;
use nvb::config::Config;
use nvb::error::BridgeResult;

#[derive(Debug, Parser)]
#[command(name = "nvb", about = "Nutrient view bridge diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify the host runtime architecture.
    Architecture(FlagArgs),
    /// List the view command catalogue.
    Commands,
}

#[derive(Debug, Args, Default)]
struct FlagArgs {
    #[arg(long)]
    fabric: bool,
    #[arg(long)]
    turbo_modules: bool,
    #[arg(long)]
    bridgeless: bool,
}

impl FlagArgs {
    /// Command-line switches, then config overrides, then the environment.
    fn resolve(&self, config: &Config) -> StaticFlags {
        let overrides = config.architecture.to_flags();
        StaticFlags {
            fabric: self.fabric.then_some(true).or(overrides.fabric),
            turbo_modules: self.turbo_modules.then_some(true).or(overrides.turbo_modules),
            bridgeless: self.bridgeless.then_some(true).or(overrides.bridgeless),
        }
        .or_else(&EnvFlags)
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> BridgeResult<()> {
    let config = Config::load()?;
    nvb::logging::init(&config.logging);

    match cli.command {
        Command::Architecture(args) => {
            let flags = args.resolve(&config);
            log_architecture_info(&flags);
            println!("{}", architecture_name(&flags));
            println!("new architecture: {}", is_new_architecture_enabled(&flags));
        }
        Command::Commands => {
            for spec in all_command_specs() {
                let args: Vec<String> = spec
                    .args
                    .iter()
                    .map(|arg| {
                        let marker = if arg.required { "" } else { "?" };
                        format!("{}{marker}: {}", arg.name, arg.kind.as_str())
                    })
                    .collect();
                println!(
                    "{:<36} {:<16} ({}) {}",
                    spec.name(),
                    spec.delivery().as_str(),
                    args.join(", "),
                    spec.title
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use nvb::architecture::{RuntimeFlags, StaticFlags};
    use nvb::config::Config;

    use super::{Cli, Command, FlagArgs};

    #[test]
    fn parses_architecture_switches() {
        let cli = Cli::parse_from(["nvb", "architecture", "--fabric", "--bridgeless"]);
        let Command::Architecture(args) = cli.command else {
            panic!("expected architecture subcommand");
        };
        assert!(args.fabric && args.bridgeless && !args.turbo_modules);
    }

    #[test]
    fn switches_win_over_config_overrides() {
        let mut config = Config::default();
        config.architecture.fabric = Some(false);
        config.architecture.turbo_modules = Some(false);
        config.architecture.bridgeless = Some(false);
        let args = FlagArgs {
            fabric: true,
            ..Default::default()
        };

        let flags = args.resolve(&config);
        assert_eq!(flags, StaticFlags::new(true, false, false));
        assert_eq!(flags.turbo_modules(), Some(false));
    }

    #[test]
    fn commands_subcommand_parses() {
        let cli = Cli::parse_from(["nvb", "commands"]);
        assert!(matches!(cli.command, Command::Commands));
    }
}
