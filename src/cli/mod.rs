use clap::Parser;

/// mrss takes no options; subscriptions live in `mrss/urls` under the platform config directory.
#[derive(Parser, Debug)]
#[command(name = "mrss", version)]
#[command(about = "A minimal full-screen RSS/Atom reader", long_about = None)]
pub struct Cli {}
