use clap::Parser;
use consumer::cmd;
use consumer::config::{Effective, ServeArgs};

#[derive(Parser)]
#[command(name = "consumer", about = "Consumer service: relays requests to the producer and watches its health")]
struct Cli {
    #[command(flatten)]
    args: ServeArgs,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let eff = match Effective::new(&cli.args) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cmd::serve::run(&eff).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
