use clap::Parser;
use squadforge::cli::{check, output, select, Cli, Commands};
use tracing::error;

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Select(args) => select::load_config(&args).and_then(|config| {
            config.init_logging();
            select::execute(&args, &config)
        }),
        Commands::CheckConfig(arg) => check::execute_config(&arg.config),
    };

    if let Err(e) = result {
        error!(error = %e, "command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
