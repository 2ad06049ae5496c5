use batch_fetch::utils::{logger, validation::Validate};
use batch_fetch::{CliArgs, FetchDispatcher, ProxyFetcher};
use clap::Parser;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);
    tracing::info!("Starting batch-fetch");

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(e);
    }

    let fetcher = match ProxyFetcher::new(&config) {
        Ok(fetcher) => fetcher,
        Err(e) => exit_with(e),
    };

    let dispatcher = FetchDispatcher::new(fetcher, &config);
    let batch = dispatcher.run(|report| println!("{}", report)).await;

    println!("{}", batch.elapsed_line());
}

fn exit_with(e: batch_fetch::FetchError) -> ! {
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}
