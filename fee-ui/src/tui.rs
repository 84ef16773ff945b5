//! Full-screen terminal front end.
//!
//! Tab moves between the two fields, typing edits the price, Left/Right
//! cycle the vehicle type, Esc or Ctrl-C quits. Console logging is muted
//! while the alternate screen is up.

use std::{io, time::Duration};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use fee_core::VehicleType;
use futures::FutureExt;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
};
use tracing::debug;

use crate::{
    components::FeeForm,
    controller::{FeeFormController, FormEvent},
    logging,
    view::{FeePanel, Field, FormView},
};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const HINT: &str = "Tab: next field   ←/→: vehicle type   Esc: quit";

#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    Edit(FormEvent),
    Focus(Field),
    Quit,
    Ignore,
}

/// Decides what a key press does given the focused field and current form.
pub fn key_action(
    key: KeyEvent,
    focus: Field,
    form: &FeeForm,
) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }
    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            KeyAction::Focus(focus.next())
        }
        code => match focus {
            Field::BasePrice => edit_price(code, form.base_price_text()),
            Field::VehicleType => cycle_vehicle_type(code, form.vehicle_type()),
        },
    }
}

fn edit_price(
    code: KeyCode,
    text: &str,
) -> KeyAction {
    let mut text = text.to_string();
    match code {
        KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '.' | ',' | '$') => text.push(c),
        KeyCode::Backspace => {
            if text.pop().is_none() {
                return KeyAction::Ignore;
            }
        }
        KeyCode::Delete if !text.is_empty() => text.clear(),
        _ => return KeyAction::Ignore,
    }
    KeyAction::Edit(FormEvent::BasePriceInput(text))
}

/// Placeholder first, then each vehicle type, wrapping at both ends.
fn cycle_vehicle_type(
    code: KeyCode,
    current: Option<VehicleType>,
) -> KeyAction {
    let choices: Vec<Option<VehicleType>> = std::iter::once(None)
        .chain(VehicleType::ALL.into_iter().map(Some))
        .collect();
    let len = choices.len();
    let pos = choices.iter().position(|c| *c == current).unwrap_or(0);

    let next = match code {
        KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => (pos + 1) % len,
        KeyCode::Left => (pos + len - 1) % len,
        KeyCode::Backspace | KeyCode::Delete => 0,
        _ => return KeyAction::Ignore,
    };
    match choices.get(next) {
        Some(choice) if next != pos => KeyAction::Edit(FormEvent::VehicleType(*choice)),
        _ => KeyAction::Ignore,
    }
}

/// Raw mode and the alternate screen for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        logging::set_console_enabled(false)?;
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = logging::set_console_enabled(true);
    }
}

fn draw(
    frame: &mut Frame,
    view: &FormView,
    focus: Field,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    frame.render_widget(FeePanel::new(view).focus(Some(focus)), chunks[0]);
    frame.render_widget(
        Paragraph::new(HINT).style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
}

/// Runs the interactive form until the user quits.
pub async fn run(controller: &mut FeeFormController) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let mut focus = Field::BasePrice;
    let result = loop {
        let view = controller.view();
        if let Err(e) = terminal.draw(|f| draw(f, &view, focus)) {
            break Err(e.into());
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                match key_action(key, focus, controller.form()) {
                    KeyAction::Edit(event) => controller.handle(event),
                    KeyAction::Focus(field) => focus = field,
                    KeyAction::Quit => break Ok(()),
                    KeyAction::Ignore => {}
                }
            }
        }

        while let Some(Some(status)) = controller.next_completion().now_or_never() {
            debug!(?status, "fee response handled");
        }
    };

    terminal.show_cursor()?;
    result
}
