use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "solvault-wallet")]
#[command(version)]
#[command(about = "A TUI for creating and viewing Solana wallets backed by the solvault key service")]
pub struct Args {
    /// Tick rate in ticks per second
    #[arg(short, long, default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate in frames per second
    #[arg(short, long, default_value_t = 60.0)]
    pub frame_rate: f64,

    /// Network to query balances on (mainnet, devnet)
    /// Defaults to devnet.
    #[arg(short, long)]
    pub network: Option<String>,

    /// Backend API base URL (overrides SOLVAULT_WALLET_API)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Data directory path
    #[arg(long)]
    pub data_dir: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
