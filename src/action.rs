use serde::{Deserialize, Serialize};
use strum::Display;

use crate::domain::session::{Network, WalletRecord, WalletSession};

/// Actions that can be triggered by user input or internal events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Tick,
    Resize(u16, u16),
    Suspend,
    Quit,
    Error(String),
    Help,

    // Entry screen
    CreateSession,
    RecoverSession,

    // Details screen
    AddWallet,
    DeleteWallet,
    SelectWallet(usize),
    SwitchNetwork(Network),
    CopyPhrase,
    OpenFaucet,
    RefreshBalance,

    // Completions posted by spawned backend calls
    SessionCreated(Result<WalletSession, String>),
    WalletAdded(Result<WalletRecord, String>),
    BalanceFetched { token: u64, result: Result<f64, String> },
}
