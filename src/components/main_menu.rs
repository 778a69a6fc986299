//! Entry screen: create a new wallet session or recover the saved one.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{action::Action, tui::Frame};

use super::Component;

/// Menu item selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Create,
    Recovery,
}

impl MenuItem {
    fn next(self) -> Self {
        match self {
            MenuItem::Create => MenuItem::Recovery,
            MenuItem::Recovery => MenuItem::Create,
        }
    }

    fn prev(self) -> Self {
        self.next()
    }
}

pub struct MainMenuComponent {
    action_tx: UnboundedSender<Action>,
    pub selected: MenuItem,
    /// True while a create request is in flight.
    pub busy: bool,
    pub error_message: Option<String>,
}

impl MainMenuComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            selected: MenuItem::Create,
            busy: false,
            error_message: None,
        }
    }

    pub fn reset(&mut self) {
        self.selected = MenuItem::Create;
        self.busy = false;
        self.error_message = None;
    }

    fn submit(&mut self) -> Result<()> {
        if self.busy {
            return Ok(());
        }
        self.error_message = None;
        match self.selected {
            MenuItem::Create => self.action_tx.send(Action::CreateSession)?,
            MenuItem::Recovery => self.action_tx.send(Action::RecoverSession)?,
        }
        Ok(())
    }

    /// Static draw method for use in the main app draw loop.
    pub fn draw_static(
        f: &mut Frame,
        area: Rect,
        selected: MenuItem,
        busy: bool,
        error_message: Option<&str>,
    ) {
        f.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" SolVault Wallet ");

        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Menu
            Constraint::Length(3), // Status/error
            Constraint::Length(2), // Help
        ])
        .split(inner);

        let title = Paragraph::new("Create a Solana wallet")
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(title, chunks[0]);

        Self::draw_menu(f, chunks[1], selected);

        if busy {
            let pending = Paragraph::new("Requesting a new wallet from the key service...")
                .style(Style::default().fg(Color::Yellow))
                .alignment(ratatui::layout::Alignment::Center);
            f.render_widget(pending, chunks[2]);
        } else if let Some(err) = error_message {
            let error_para = Paragraph::new(err)
                .style(Style::default().fg(Color::Red))
                .alignment(ratatui::layout::Alignment::Center);
            f.render_widget(error_para, chunks[2]);
        }

        let help = Paragraph::new("↑/↓: Navigate  Enter: Select  q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(help, chunks[3]);
    }

    fn draw_menu(f: &mut Frame, area: Rect, selected: MenuItem) {
        let items = [
            (
                MenuItem::Create,
                "Create",
                "Request a fresh wallet from the key service",
            ),
            (
                MenuItem::Recovery,
                "Recovery",
                "Open the wallet saved on this device",
            ),
        ];

        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

        for (i, (item, label, desc)) in items.iter().enumerate() {
            let is_selected = *item == selected;
            let style = if is_selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let prefix = if is_selected { "▶ " } else { "  " };
            let text = vec![
                Line::from(Span::styled(format!("{}{}", prefix, label), style)),
                Line::from(Span::styled(
                    format!("    {}", desc),
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            f.render_widget(Paragraph::new(text), chunks[i + 1]);
        }
    }
}

impl Component for MainMenuComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.prev();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = self.selected.next();
            }
            KeyCode::Char('c') => {
                self.selected = MenuItem::Create;
                self.submit()?;
            }
            KeyCode::Char('r') => {
                self.selected = MenuItem::Recovery;
                self.submit()?;
            }
            KeyCode::Enter => {
                self.submit()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        Self::draw_static(
            f,
            area,
            self.selected,
            self.busy,
            self.error_message.as_deref(),
        );
    }
}
