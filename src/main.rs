use clap::Parser;
use version_report::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    version_report::init_logging(cli.verbose);
    if let Err(e) = version_report::run(cli).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
