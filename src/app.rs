use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::{
    action::Action,
    cli::Args,
    components::{
        main_menu::MainMenuComponent, wallet_details::WalletDetailsComponent, Component,
    },
    config::{Config, FAUCET_URL},
    domain::session::{BalanceSlot, SessionState, WalletSession, SOL_COIN_TYPE},
    infra::{api::ApiClient, store::Store},
    tui::{self, Event, Tui},
};

/// Which screen is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Main,
    Wallet,
}

pub struct App {
    pub should_quit: bool,
    pub should_suspend: bool,
    pub config: Config,
    pub page: Page,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
    pub tui: Tui,
    pub store: Store,
    pub api: ApiClient,
    /// The one session object for this UI run. None until created/recovered.
    pub session: Option<SessionState>,
    pub balance: BalanceSlot,
    /// Guards the single in-flight create-new request.
    pub requesting_key: bool,
    pub main_menu: MainMenuComponent,
    pub wallet_details: WalletDetailsComponent,
    pub status_message: String,
}

impl App {
    pub fn new(args: &Args) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let config = Config::new(args.network.as_deref(), args.api_url.as_deref());
        let store = Store::new()?;
        let api = ApiClient::new(&config.api.base_url)?;
        let main_menu = MainMenuComponent::new(action_tx.clone());
        let wallet_details = WalletDetailsComponent::new(action_tx.clone());

        let tui = Tui::new()?
            .tick_rate(args.tick_rate)
            .frame_rate(args.frame_rate);

        Ok(Self {
            should_quit: false,
            should_suspend: false,
            config,
            page: Page::Main,
            action_tx,
            action_rx,
            tui,
            store,
            api,
            session: None,
            balance: BalanceSlot::default(),
            requesting_key: false,
            main_menu,
            wallet_details,
            status_message: "Ready".to_string(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        loop {
            // Handle events
            if let Some(event) = self.tui.next().await {
                self.handle_event(event)?;
            }

            // Handle actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.handle_action(action)?;
            }

            if self.should_suspend {
                self.tui.suspend()?;
                self.should_suspend = false;
                self.tui.resume()?;
            }

            if self.should_quit {
                break;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Tick => {
                self.action_tx.send(Action::Tick)?;
            }
            Event::Render => {
                self.draw_ui()?;
            }
            Event::Key(key_event) => {
                self.handle_key_event(key_event)?;
            }
            Event::Resize(w, h) => {
                self.action_tx.send(Action::Resize(w, h))?;
            }
            Event::Init => {
                info!("Application initialized");
            }
            Event::Error => {
                self.action_tx
                    .send(Action::Error("terminal event error".to_string()))?;
            }
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.action_tx.send(Action::Quit)?;
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => {
                self.action_tx.send(Action::Quit)?;
            }
            KeyCode::Char('z') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.action_tx.send(Action::Suspend)?;
            }
            KeyCode::Char('?') if key.modifiers.is_empty() => {
                self.action_tx.send(Action::Help)?;
            }
            _ => match self.page {
                Page::Main => {
                    self.main_menu.handle_key_event(key)?;
                }
                Page::Wallet => {
                    self.wallet_details.handle_key_event(key)?;
                }
            },
        }
        Ok(())
    }

    fn handle_action(&mut self, action: Action) -> Result<()> {
        debug!("Handling action: {:?}", action);
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Suspend => {
                self.should_suspend = true;
            }
            Action::Error(msg) => {
                self.status_message = format!("Error: {}", msg);
            }
            Action::Help => {
                self.status_message = match self.page {
                    Page::Main => "Enter selects, q quits".to_string(),
                    Page::Wallet => {
                        "a add, d delete, e network, s secrets, c copy, f faucet, r refresh"
                            .to_string()
                    }
                };
            }
            Action::CreateSession => {
                self.spawn_create_session();
            }
            Action::SessionCreated(result) => {
                self.requesting_key = false;
                self.main_menu.busy = false;
                match result {
                    Ok(session) => {
                        self.open_session(session, true);
                        self.status_message = "New wallet created!".to_string();
                    }
                    Err(e) => {
                        warn!("Wallet creation failed: {}", e);
                        self.main_menu.error_message = Some(e);
                        self.status_message = "Something went wrong".to_string();
                    }
                }
            }
            Action::RecoverSession => match self.store.load_session() {
                Ok(Some(session)) => {
                    self.open_session(session, false);
                    self.status_message = "Wallet recovered".to_string();
                }
                Ok(None) => {
                    self.main_menu.error_message =
                        Some("No saved wallet on this device".to_string());
                    self.status_message = "Nothing to recover".to_string();
                }
                Err(e) => {
                    warn!("Failed to load saved session: {}", e);
                    self.main_menu.error_message = Some(e.to_string());
                    self.status_message = "Recovery failed".to_string();
                }
            },
            Action::AddWallet => {
                self.spawn_add_wallet();
            }
            Action::WalletAdded(result) => {
                self.requesting_key = false;
                match result {
                    Ok(record) => {
                        if let Some(ref mut state) = self.session {
                            state.push_record(record);
                            self.persist_session();
                            self.sync_details();
                            self.status_message = "New wallet added!".to_string();
                            // Selection moved to the new record
                            self.refresh_balance();
                        }
                    }
                    Err(e) => {
                        warn!("Add wallet failed: {}", e);
                        self.status_message = "Something went wrong".to_string();
                    }
                }
            }
            Action::DeleteWallet => {
                if let Err(e) = self.store.clear_session() {
                    warn!("Failed to clear saved session: {}", e);
                }
                self.session = None;
                self.balance.reset();
                self.wallet_details.reset();
                self.main_menu.reset();
                self.page = Page::Main;
                self.status_message = "Wallet deleted!".to_string();
            }
            Action::SelectWallet(index) => {
                if let Some(ref mut state) = self.session {
                    if state.select(index) {
                        self.sync_details();
                        self.refresh_balance();
                    }
                }
            }
            Action::SwitchNetwork(network) => {
                if let Some(ref mut state) = self.session {
                    if state.set_network(network) {
                        self.sync_details();
                        self.status_message = format!("Switched to {}", network);
                        self.refresh_balance();
                    }
                }
            }
            Action::CopyPhrase => {
                if let Some(ref state) = self.session {
                    self.status_message = match tui::copy_to_clipboard(state.phrase()) {
                        Ok(()) => "Phrase copied to clipboard!".to_string(),
                        Err(_) => "Failed to copy text.".to_string(),
                    };
                }
            }
            Action::OpenFaucet => {
                self.status_message = match open::that(FAUCET_URL) {
                    Ok(()) => format!("Opened {}", FAUCET_URL),
                    Err(_) => "Failed to open faucet".to_string(),
                };
            }
            Action::RefreshBalance => {
                self.refresh_balance();
            }
            Action::BalanceFetched { token, result } => match result {
                Ok(amount) => {
                    if self.balance.complete(token, amount) {
                        self.sync_balance();
                    }
                }
                Err(e) => {
                    if self.balance.fail(token) {
                        debug!("Balance fetch failed: {}", e);
                        self.sync_balance();
                        self.status_message = "Unable to load balance".to_string();
                    }
                }
            },
            _ => {}
        }
        Ok(())
    }

    /// Bring a session on screen: set initial network, persist when freshly
    /// created, and kick off the first balance fetch.
    fn open_session(&mut self, session: WalletSession, persist: bool) {
        let mut state = SessionState::new(session);
        state.set_network(self.config.network);
        self.session = Some(state);
        self.balance.reset();
        if persist {
            self.persist_session();
        }
        self.page = Page::Wallet;
        self.sync_details();
        self.refresh_balance();
    }

    fn spawn_create_session(&mut self) {
        if self.requesting_key {
            return;
        }
        self.requesting_key = true;
        self.main_menu.busy = true;
        self.status_message = "Creating wallet...".to_string();

        let api = self.api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = match api.create_new(SOL_COIN_TYPE).await {
                Ok(response) => match response.phrase {
                    Some(phrase) => Ok(WalletSession::new(phrase, response.key)),
                    None => Err("key service did not return a recovery phrase".to_string()),
                },
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(Action::SessionCreated(result));
        });
    }

    fn spawn_add_wallet(&mut self) {
        if self.session.is_none() || self.requesting_key {
            return;
        }
        self.requesting_key = true;
        self.status_message = "Adding wallet...".to_string();

        let api = self.api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = api
                .create_new(SOL_COIN_TYPE)
                .await
                .map(|response| response.key)
                .map_err(|e| e.to_string());
            let _ = tx.send(Action::WalletAdded(result));
        });
    }

    /// Request the balance of the selected wallet on the current network.
    /// Issues a fresh token so a superseded response cannot be applied.
    fn refresh_balance(&mut self) {
        let request = match self.session.as_ref() {
            Some(state) => state
                .selected_record()
                .map(|record| (state.network(), record.public.clone())),
            None => return,
        };
        let Some((network, address)) = request else {
            // Empty session: nothing to fetch, nothing to show
            self.sync_balance();
            return;
        };

        let token = self.balance.begin();
        let api = self.api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = api
                .fetch_balance(network, &address)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(Action::BalanceFetched { token, result });
        });
        self.sync_balance();
    }

    fn persist_session(&mut self) {
        if let Some(ref state) = self.session {
            if let Err(e) = self.store.save_session(state.session()) {
                warn!("Failed to save session: {}", e);
                self.status_message = "Failed to save wallet".to_string();
            }
        }
    }

    fn sync_details(&mut self) {
        if let Some(ref state) = self.session {
            self.wallet_details.set_session(
                state.phrase().to_string(),
                state.records().to_vec(),
                state.selected_index(),
            );
            self.wallet_details.set_network(state.network());
        }
        self.sync_balance();
    }

    fn sync_balance(&mut self) {
        self.wallet_details
            .set_balance(self.balance.amount(), self.balance.loading());
    }

    fn draw_ui(&mut self) -> Result<()> {
        // Collect all data needed for drawing before borrowing terminal
        let page = self.page;
        let network = self
            .session
            .as_ref()
            .map(|s| s.network())
            .unwrap_or(self.config.network);
        let status_message = self.status_message.clone();
        let menu_selected = self.main_menu.selected;
        let menu_busy = self.main_menu.busy;
        let menu_error = self.main_menu.error_message.clone();
        let phrase = self.wallet_details.phrase.clone();
        let records = self.wallet_details.records.clone();
        let selected_index = self.wallet_details.selected_index;
        let show_secrets = self.wallet_details.show_secrets;
        let balance = self.wallet_details.balance;
        let loading = self.wallet_details.loading;

        self.tui.draw(|f| {
            let chunks = Layout::vertical([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Status
            ])
            .split(f.area());

            let title = Paragraph::new(vec![Line::from(vec![
                Span::styled(
                    "SolVault Wallet",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(format!("[{}]", network), Style::default().fg(Color::Yellow)),
            ])])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            f.render_widget(title, chunks[0]);

            match page {
                Page::Main => {
                    MainMenuComponent::draw_static(
                        f,
                        chunks[1],
                        menu_selected,
                        menu_busy,
                        menu_error.as_deref(),
                    );
                }
                Page::Wallet => {
                    WalletDetailsComponent::draw_static(
                        f,
                        chunks[1],
                        &phrase,
                        &records,
                        selected_index,
                        show_secrets,
                        network,
                        balance,
                        loading,
                    );
                }
            }

            let status = Paragraph::new(vec![Line::from(vec![
                Span::styled("Status: ", Style::default().fg(Color::DarkGray)),
                Span::styled(&status_message, Style::default().fg(Color::Green)),
                Span::raw("  |  "),
                Span::styled("[q]Quit [?]Help", Style::default().fg(Color::DarkGray)),
            ])])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            f.render_widget(status, chunks[2]);
        })?;
        Ok(())
    }
}
