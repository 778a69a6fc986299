//! Wallet session model: the recovery phrase, the derived key pairs, and the
//! selection state the details screen operates on.
//!
//! Key generation itself happens in the backend key service; this module only
//! holds what the service returns.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Coin type sent to the key service (SLIP-44 Solana).
pub const SOL_COIN_TYPE: u32 = 501;

/// Mask character used when secrets are hidden.
const MASK_CHAR: char = '\u{2022}';

/// Target blockchain environment. Serialized lowercase as the `stage` field
/// of balance requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Devnet,
}

impl Network {
    pub fn from_name(name: &str) -> Self {
        match name {
            "mainnet" => Network::Mainnet,
            _ => Network::Devnet,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Network::Mainnet => Network::Devnet,
            Network::Devnet => Network::Mainnet,
        }
    }
}

/// A public/private key pair for one account, as returned by the key service.
/// Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRecord {
    pub public: String,
    pub private: String,
}

/// The full user session: recovery phrase plus the ordered key pairs derived
/// from it. This is the value persisted under the `"Info"` store entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    pub phrase: String,
    pub key: Vec<WalletRecord>,
}

impl WalletSession {
    pub fn new(phrase: String, first: WalletRecord) -> Self {
        Self {
            phrase,
            key: vec![first],
        }
    }
}

/// Session plus the selection and network flags the details screen needs.
///
/// Invariant: `selected` always references an existing record whenever
/// `key` is non-empty.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: WalletSession,
    selected: usize,
    network: Network,
}

impl SessionState {
    pub fn new(session: WalletSession) -> Self {
        Self {
            session,
            selected: 0,
            network: Network::default(),
        }
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn phrase(&self) -> &str {
        &self.session.phrase
    }

    pub fn records(&self) -> &[WalletRecord] {
        &self.session.key
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&WalletRecord> {
        self.session.key.get(self.selected)
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Append a freshly created record and move selection to it.
    /// Returns the new selected index.
    pub fn push_record(&mut self, record: WalletRecord) -> usize {
        self.session.key.push(record);
        self.selected = self.session.key.len() - 1;
        self.selected
    }

    /// Select a record by index. Out-of-range indices are ignored.
    /// Returns true when the selection changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.session.key.len() && index != self.selected {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// Switch network. Returns true when it changed.
    pub fn set_network(&mut self, network: Network) -> bool {
        if network != self.network {
            self.network = network;
            true
        } else {
            false
        }
    }
}

/// Render a secret as a mask of the same length.
pub fn mask(secret: &str) -> String {
    secret.chars().map(|_| MASK_CHAR).collect()
}

/// Single in-flight balance slot for the details screen.
///
/// Each issued request gets a monotonically increasing token; a completion
/// only applies while its token is still the latest one issued. A superseded
/// completion (success or failure) is discarded, so rapid selection or
/// network changes cannot let an older response overwrite a newer one.
#[derive(Debug, Default)]
pub struct BalanceSlot {
    seq: u64,
    in_flight: Option<u64>,
    amount: Option<f64>,
}

impl BalanceSlot {
    /// Issue a new request token. Any previously issued token is superseded.
    pub fn begin(&mut self) -> u64 {
        self.seq += 1;
        self.in_flight = Some(self.seq);
        self.seq
    }

    pub fn loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn amount(&self) -> Option<f64> {
        self.amount
    }

    /// Apply a successful fetch. Returns false for a superseded token.
    pub fn complete(&mut self, token: u64, amount: f64) -> bool {
        if self.in_flight == Some(token) {
            self.amount = Some(amount);
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Apply a failed fetch: clears the loading flag but keeps the previous
    /// amount (stale-on-error). Returns false for a superseded token.
    pub fn fail(&mut self, token: u64) -> bool {
        if self.in_flight == Some(token) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Forget everything, e.g. when the session is deleted.
    pub fn reset(&mut self) {
        self.in_flight = None;
        self.amount = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: u32) -> WalletRecord {
        WalletRecord {
            public: format!("A{}", n),
            private: format!("B{}", n),
        }
    }

    #[test]
    fn push_record_appends_and_selects_last() {
        let mut state = SessionState::new(WalletSession::new("phrase".into(), record(1)));
        assert_eq!(state.selected_index(), 0);

        let selected = state.push_record(record(2));

        assert_eq!(selected, 1);
        assert_eq!(state.records().len(), 2);
        assert_eq!(state.selected_index(), 1);
        assert_eq!(state.selected_record().unwrap().public, "A2");
        assert_eq!(state.records()[0].private, "B1");
    }

    #[test]
    fn select_rejects_out_of_range() {
        let mut state = SessionState::new(WalletSession::new("phrase".into(), record(1)));
        assert!(!state.select(3));
        assert_eq!(state.selected_index(), 0);
        assert!(state.selected_record().is_some());
    }

    #[test]
    fn select_reports_changes_only() {
        let mut state = SessionState::new(WalletSession::new("phrase".into(), record(1)));
        state.push_record(record(2));
        assert!(state.select(0));
        assert!(!state.select(0));
    }

    #[test]
    fn network_defaults_to_devnet_and_toggles() {
        let mut state = SessionState::new(WalletSession::default());
        assert_eq!(state.network(), Network::Devnet);
        assert!(state.set_network(Network::Mainnet));
        assert!(!state.set_network(Network::Mainnet));
        assert_eq!(Network::Mainnet.toggled(), Network::Devnet);
    }

    #[test]
    fn network_stage_name_is_lowercase() {
        assert_eq!(Network::Mainnet.to_string(), "mainnet");
        assert_eq!(Network::Devnet.to_string(), "devnet");
        assert_eq!(serde_json::to_string(&Network::Devnet).unwrap(), "\"devnet\"");
    }

    #[test]
    fn mask_matches_secret_length() {
        assert_eq!(mask("B1").chars().count(), 2);
        assert_eq!(mask(""), "");
        let long = "x".repeat(88);
        assert_eq!(mask(&long).chars().count(), 88);
        assert!(mask("secret").chars().all(|c| c == '\u{2022}'));
    }

    #[test]
    fn session_wire_shape() {
        let session = WalletSession::new("word1 word2".into(), record(1));
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "phrase": "word1 word2",
                "key": [{"public": "A1", "private": "B1"}],
            })
        );
    }

    #[test]
    fn balance_completion_applies_for_latest_token() {
        let mut slot = BalanceSlot::default();
        let token = slot.begin();
        assert!(slot.loading());
        assert!(slot.complete(token, 5.0));
        assert!(!slot.loading());
        assert_eq!(slot.amount(), Some(5.0));
    }

    #[test]
    fn superseded_response_is_discarded() {
        let mut slot = BalanceSlot::default();
        let first = slot.begin();
        let second = slot.begin();

        // The older response arrives last but must not win.
        assert!(slot.complete(second, 7.0));
        assert!(!slot.complete(first, 1.0));
        assert_eq!(slot.amount(), Some(7.0));
    }

    #[test]
    fn failure_keeps_previous_amount() {
        let mut slot = BalanceSlot::default();
        let token = slot.begin();
        assert!(slot.complete(token, 5.0));

        let token = slot.begin();
        assert!(slot.fail(token));
        assert!(!slot.loading());
        assert_eq!(slot.amount(), Some(5.0));
    }

    #[test]
    fn stale_failure_does_not_clear_loading() {
        let mut slot = BalanceSlot::default();
        let first = slot.begin();
        let _second = slot.begin();
        assert!(!slot.fail(first));
        assert!(slot.loading());
    }
}
