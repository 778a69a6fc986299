//! Wallet details screen: recovery phrase, wallet list, network and balance
//! for the selected wallet, and the key-pair panels with secret masking.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    action::Action,
    config::FAUCET_URL,
    domain::session::{mask, Network, WalletRecord},
    tui::Frame,
};

use super::Component;

pub struct WalletDetailsComponent {
    action_tx: UnboundedSender<Action>,
    pub phrase: String,
    pub records: Vec<WalletRecord>,
    pub selected_index: usize,
    /// Whether the mnemonic and private key render as plain text.
    pub show_secrets: bool,
    pub network: Network,
    pub balance: Option<f64>,
    pub loading: bool,
}

impl WalletDetailsComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            phrase: String::new(),
            records: Vec::new(),
            selected_index: 0,
            show_secrets: false,
            network: Network::default(),
            balance: None,
            loading: false,
        }
    }

    /// Mirror the session into the component for drawing.
    pub fn set_session(&mut self, phrase: String, records: Vec<WalletRecord>, selected: usize) {
        self.phrase = phrase;
        self.records = records;
        self.selected_index = selected;
    }

    pub fn set_network(&mut self, network: Network) {
        self.network = network;
    }

    pub fn set_balance(&mut self, balance: Option<f64>, loading: bool) {
        self.balance = balance;
        self.loading = loading;
    }

    /// Ephemeral state is dropped when the screen is left.
    pub fn reset(&mut self) {
        self.set_session(String::new(), Vec::new(), 0);
        self.show_secrets = false;
        self.balance = None;
        self.loading = false;
    }

    fn next(&self) -> Option<usize> {
        if self.records.is_empty() {
            return None;
        }
        let i = if self.selected_index >= self.records.len() - 1 {
            0
        } else {
            self.selected_index + 1
        };
        Some(i)
    }

    fn previous(&self) -> Option<usize> {
        if self.records.is_empty() {
            return None;
        }
        let i = if self.selected_index == 0 {
            self.records.len() - 1
        } else {
            self.selected_index - 1
        };
        Some(i)
    }

    /// Static draw method for use in the main app draw loop.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_static(
        f: &mut Frame,
        area: Rect,
        phrase: &str,
        records: &[WalletRecord],
        selected_index: usize,
        show_secrets: bool,
        network: Network,
        balance: Option<f64>,
        loading: bool,
    ) {
        let chunks = Layout::vertical([
            Constraint::Length(4), // Recovery phrase
            Constraint::Min(0),    // Wallet list + details
            Constraint::Length(3), // Help
        ])
        .split(area);

        Self::draw_phrase(f, chunks[0], phrase, show_secrets);

        let main = Layout::horizontal([Constraint::Length(24), Constraint::Min(0)]).split(chunks[1]);
        Self::draw_wallet_list(f, main[0], records, selected_index);
        Self::draw_selected_wallet(
            f,
            main[1],
            records.get(selected_index),
            show_secrets,
            network,
            balance,
            loading,
        );

        let help_text = Line::from(Span::styled(
            "↑/↓: Wallet | a: Add | d: Delete | e: Network | s: Show/Hide | c: Copy phrase | f: Faucet | r: Refresh",
            Style::default().fg(Color::DarkGray),
        ));
        let help_widget = Paragraph::new(help_text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(help_widget, chunks[2]);
    }

    fn draw_phrase(f: &mut Frame, area: Rect, phrase: &str, show_secrets: bool) {
        let rendered = if show_secrets {
            phrase.to_string()
        } else {
            mask(phrase)
        };
        let phrase_widget = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Mnemonic: ", Style::default().fg(Color::DarkGray)),
                Span::styled(rendered, Style::default().fg(Color::Yellow)),
            ]),
            Line::from(Span::styled(
                if show_secrets {
                    "[s] Hide secrets"
                } else {
                    "[s] Show secrets"
                },
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(
            Block::default()
                .title("Recovery Phrase")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(phrase_widget, area);
    }

    fn draw_wallet_list(f: &mut Frame, area: Rect, records: &[WalletRecord], selected_index: usize) {
        let items: Vec<ListItem> = records
            .iter()
            .enumerate()
            .map(|(i, _)| {
                let style = if i == selected_index {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(Span::styled(format!("Wallet {}", i + 1), style)))
            })
            .collect();

        let mut list_state = ListState::default();
        if !records.is_empty() {
            list_state.select(Some(selected_index));
        }

        let list = List::new(items)
            .block(
                Block::default()
                    .title("Wallets")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_selected_wallet(
        f: &mut Frame,
        area: Rect,
        record: Option<&WalletRecord>,
        show_secrets: bool,
        network: Network,
        balance: Option<f64>,
        loading: bool,
    ) {
        let details = if let Some(record) = record {
            let balance_str = if loading {
                "loading...".to_string()
            } else {
                match balance {
                    Some(amount) => format!("{} SOL", amount),
                    None => "- SOL".to_string(),
                }
            };
            let balance_style = if loading {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            };

            let private_rendered = if show_secrets {
                record.private.clone()
            } else {
                mask(&record.private)
            };

            let mut lines = vec![
                Line::from(vec![
                    Span::styled("Network: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(network.to_string(), Style::default().fg(Color::Yellow)),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Balance: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(balance_str, balance_style),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    "Public Key:",
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(Span::styled(
                    record.public.clone(),
                    Style::default().fg(Color::Cyan),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Private Key:",
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(Span::styled(
                    private_rendered,
                    Style::default().fg(Color::Magenta),
                )),
            ];

            if network == Network::Devnet {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("Receive: [f] opens {}", FAUCET_URL),
                    Style::default().fg(Color::DarkGray),
                )));
            }

            lines
        } else {
            vec![
                Line::from(Span::styled(
                    "No wallets in this session",
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press 'a' to add a wallet.",
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        };

        let details_widget = Paragraph::new(details).block(
            Block::default()
                .title("Wallet Details")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(details_widget, area);
    }
}

impl Component for WalletDetailsComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(i) = self.next() {
                    self.action_tx.send(Action::SelectWallet(i))?;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(i) = self.previous() {
                    self.action_tx.send(Action::SelectWallet(i))?;
                }
            }
            KeyCode::Char('a') => {
                self.action_tx.send(Action::AddWallet)?;
            }
            KeyCode::Char('d') => {
                self.action_tx.send(Action::DeleteWallet)?;
            }
            KeyCode::Char('e') => {
                self.action_tx
                    .send(Action::SwitchNetwork(self.network.toggled()))?;
            }
            KeyCode::Char('s') => {
                self.show_secrets = !self.show_secrets;
            }
            KeyCode::Char('c') => {
                self.action_tx.send(Action::CopyPhrase)?;
            }
            KeyCode::Char('f') => {
                self.action_tx.send(Action::OpenFaucet)?;
            }
            KeyCode::Char('r') => {
                self.action_tx.send(Action::RefreshBalance)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        Self::draw_static(
            f,
            area,
            &self.phrase,
            &self.records,
            self.selected_index,
            self.show_secrets,
            self.network,
            self.balance,
            self.loading,
        );
    }
}
