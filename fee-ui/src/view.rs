//! What the fee form shows, and how it is drawn in a terminal.
//!
//! [`render`] reduces a [`FeeForm`] to a [`FormView`]. [`FeePanel`] draws a
//! view with ratatui, into a live frame or into an off-screen buffer via
//! [`render_lines`].

use fee_core::VehicleType;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::{
    components::{FeeForm, FormPhase},
    utils::format_currency,
};

pub const BASE_PRICE_ID: &str = "basePrice";
pub const VEHICLE_TYPE_ID: &str = "vehicleType";

const PLACEHOLDER_LABEL: &str = "Select a vehicle type";
const LOADING_TEXT: &str = "Calculating fees…";
const TOTAL_LABEL: &str = "Total cost";

/// Width used when the panel is printed as plain lines.
pub const TEXT_WIDTH: u16 = 72;

const FIELD_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;
const ERROR_HEIGHT: u16 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputView {
    pub id: &'static str,
    pub label: &'static str,
    /// The text as typed, not the parsed amount.
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionView {
    /// Empty for the placeholder.
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectView {
    pub id: &'static str,
    pub label: &'static str,
    /// Placeholder first, then one option per vehicle type.
    pub options: Vec<OptionView>,
}

impl SelectView {
    pub fn selected(&self) -> Option<&OptionView> {
        self.options.iter().find(|o| o.selected)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeLine {
    pub label: &'static str,
    pub amount: String,
}

/// The results panel. `fees` and `total` are only filled while it is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsView {
    pub hidden: bool,
    pub fees: Vec<FeeLine>,
    pub total: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormView {
    pub base_price: InputView,
    pub vehicle_type: SelectView,
    pub phase: FormPhase,
    pub results: ResultsView,
    pub error: Option<String>,
}

impl FormView {
    pub fn is_loading(&self) -> bool {
        self.phase == FormPhase::Loading
    }
}

pub fn render(form: &FeeForm) -> FormView {
    let selected = form.vehicle_type();
    let placeholder = OptionView {
        value: "",
        label: PLACEHOLDER_LABEL,
        selected: selected.is_none(),
    };
    let options = std::iter::once(placeholder)
        .chain(VehicleType::ALL.into_iter().map(|vehicle_type| OptionView {
            value: vehicle_type.as_str(),
            label: vehicle_type.as_str(),
            selected: selected == Some(vehicle_type),
        }))
        .collect();

    let results = match form.result().filter(|_| form.results_visible()) {
        Some(result) => ResultsView {
            hidden: false,
            fees: result
                .fees
                .items()
                .into_iter()
                .map(|(label, amount)| FeeLine {
                    label,
                    amount: format_currency(amount),
                })
                .collect(),
            total: Some(format_currency(result.total_cost)),
        },
        None => ResultsView {
            hidden: true,
            fees: Vec::new(),
            total: None,
        },
    };

    FormView {
        base_price: InputView {
            id: BASE_PRICE_ID,
            label: "Base price ($)",
            value: form.base_price_text().to_string(),
        },
        vehicle_type: SelectView {
            id: VEHICLE_TYPE_ID,
            label: "Vehicle type",
            options,
        },
        phase: form.phase(),
        results,
        error: form.error_message().map(str::to_string),
    }
}

/// The two editable fields, in tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    BasePrice,
    VehicleType,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Self::BasePrice => Self::VehicleType,
            Self::VehicleType => Self::BasePrice,
        }
    }
}

/// Draws a [`FormView`] top to bottom: price, vehicle type, status line,
/// error banner, fee breakdown.
#[derive(Clone, Copy, Debug)]
pub struct FeePanel<'a> {
    view: &'a FormView,
    focus: Option<Field>,
}

impl<'a> FeePanel<'a> {
    pub fn new(view: &'a FormView) -> Self {
        Self { view, focus: None }
    }

    /// Highlights the border of `field`.
    pub fn focus(
        mut self,
        field: Option<Field>,
    ) -> Self {
        self.focus = field;
        self
    }

    /// Rows needed to draw the panel without clipping at [`TEXT_WIDTH`].
    pub fn height(&self) -> u16 {
        let mut height = FIELD_HEIGHT * 2 + STATUS_HEIGHT;
        if self.view.error.is_some() {
            height += ERROR_HEIGHT;
        }
        if !self.view.results.hidden {
            height += self.results_height();
        }
        height
    }

    fn results_height(&self) -> u16 {
        // Rows for each fee and the total, plus the two borders.
        let rows = self.view.results.fees.len() + usize::from(self.view.results.total.is_some());
        u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2)
    }

    fn field_block(
        &self,
        title: &'static str,
        field: Field,
    ) -> Block<'static> {
        let border = if self.focus == Some(field) {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title)
    }

    fn base_price(&self) -> Paragraph<'static> {
        let input = &self.view.base_price;
        let line = if input.value.is_empty() {
            Line::from(Span::styled(
                "enter an amount",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(input.value.clone())
        };
        Paragraph::new(line).block(self.field_block(input.label, Field::BasePrice))
    }

    fn vehicle_type(&self) -> Paragraph<'static> {
        let select = &self.view.vehicle_type;
        let dim = Style::default().fg(Color::DarkGray);
        let current = match select.selected() {
            Some(option) if !option.value.is_empty() => Span::raw(option.label),
            _ => Span::styled(PLACEHOLDER_LABEL, dim),
        };
        Paragraph::new(Line::from(vec![current, Span::styled(" ▾", dim)]))
            .block(self.field_block(select.label, Field::VehicleType))
    }

    fn status(&self) -> Paragraph<'static> {
        if self.view.is_loading() {
            Paragraph::new(Span::styled(
                LOADING_TEXT,
                Style::default().add_modifier(Modifier::ITALIC),
            ))
        } else {
            Paragraph::new("")
        }
    }

    fn error(message: &str) -> Paragraph<'static> {
        let red = Style::default().fg(Color::Red);
        Paragraph::new(message.to_string())
            .style(red)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(red)
                    .title("Error"),
            )
    }

    fn results(&self) -> Paragraph<'static> {
        let results = &self.view.results;
        let mut lines: Vec<Line> = results
            .fees
            .iter()
            .map(|fee| Line::from(format!("{:<20}{:>16}", fee.label, fee.amount)))
            .collect();
        if let Some(total) = &results.total {
            lines.push(Line::from(Span::styled(
                format!("{TOTAL_LABEL:<20}{total:>16}"),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Fees"))
    }
}

impl Widget for FeePanel<'_> {
    fn render(
        self,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let mut constraints = vec![
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ];
        if self.view.error.is_some() {
            constraints.push(Constraint::Length(ERROR_HEIGHT));
        }
        if !self.view.results.hidden {
            constraints.push(Constraint::Length(self.results_height()));
        }
        constraints.push(Constraint::Min(0));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);
        let mut slots = chunks.iter().copied();

        if let Some(slot) = slots.next() {
            self.base_price().render(slot, buf);
        }
        if let Some(slot) = slots.next() {
            self.vehicle_type().render(slot, buf);
        }
        if let Some(slot) = slots.next() {
            self.status().render(slot, buf);
        }
        if let Some(message) = &self.view.error {
            if let Some(slot) = slots.next() {
                Self::error(message).render(slot, buf);
            }
        }
        if !self.view.results.hidden {
            if let Some(slot) = slots.next() {
                self.results().render(slot, buf);
            }
        }
    }
}

/// Draws `view` into an off-screen buffer and returns its rows with
/// trailing blanks trimmed.
pub fn render_lines(
    view: &FormView,
    width: u16,
) -> Vec<String> {
    let panel = FeePanel::new(view);
    let area = Rect::new(0, 0, width, panel.height());
    let mut buf = Buffer::empty(area);
    panel.render(area, &mut buf);

    buf.content()
        .chunks(usize::from(width.max(1)))
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect()
}

/// The panel as printable text, one trailing newline included.
pub fn render_text(form: &FeeForm) -> String {
    let mut text = render_lines(&render(form), TEXT_WIDTH).join("\n");
    text.push('\n');
    text
}
