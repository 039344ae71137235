//! Transaction filter dialog
//!
//! Every keystroke updates the filter and schedules a debounced reload, so
//! the list follows the form while the user types. Category and wallet are
//! typed by name; a field that does not parse is shown in red and left out
//! of the query.

use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{Category, TransactionFilter, TransactionKind, Wallet};
use crate::services::{category, wallet};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// Fields of the filter form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Search,
    Wallet,
    Kind,
    Category,
    From,
    To,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        Self::Search,
        Self::Wallet,
        Self::Kind,
        Self::Category,
        Self::From,
        Self::To,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Wallet => "Wallet",
            Self::Kind => "Type",
            Self::Category => "Category",
            Self::From => "From",
            Self::To => "To",
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            Self::Search => "description or category",
            Self::Wallet => "all wallets",
            Self::Kind => "expense / income",
            Self::Category => "all categories",
            Self::From | Self::To => "YYYY-MM-DD",
        }
    }
}

/// State of the filter form
#[derive(Debug, Clone)]
pub struct FilterForm {
    inputs: Vec<TextInput>,
    focus: usize,
}

impl Default for FilterForm {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterForm {
    pub fn new() -> Self {
        let inputs = FilterField::ALL
            .iter()
            .map(|f| TextInput::new().label(f.label()).placeholder(f.placeholder()))
            .collect();
        Self { inputs, focus: 0 }
    }

    pub fn focused_field(&self) -> FilterField {
        FilterField::ALL[self.focus]
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % FilterField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + FilterField::ALL.len() - 1) % FilterField::ALL.len();
    }

    pub fn input_mut(&mut self) -> &mut TextInput {
        &mut self.inputs[self.focus]
    }

    pub fn value(&self, field: FilterField) -> &str {
        let index = FilterField::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or_default();
        self.inputs[index].value().trim()
    }

    pub fn set_value(&mut self, field: FilterField, value: &str) {
        if let Some(index) = FilterField::ALL.iter().position(|f| *f == field) {
            let input = &mut self.inputs[index];
            input.clear();
            value.chars().for_each(|c| input.insert(c));
        }
    }

    pub fn clear(&mut self) {
        self.inputs.iter_mut().for_each(TextInput::clear);
    }

    /// Build the query and list the fields that could not be used
    pub fn to_filter(
        &self,
        categories: &[Category],
        wallets: &[Wallet],
    ) -> (TransactionFilter, Vec<FilterField>) {
        let mut filter = TransactionFilter::default();
        let mut invalid = Vec::new();

        let search = self.value(FilterField::Search);
        if !search.is_empty() {
            filter.q = Some(search.to_string());
        }

        let name = self.value(FilterField::Wallet);
        if !name.is_empty() {
            match wallet::find_in(wallets, name) {
                Some(w) => filter.wallet = Some(w.id),
                None => invalid.push(FilterField::Wallet),
            }
        }

        let kind = self.value(FilterField::Kind);
        if !kind.is_empty() {
            match kind.parse::<TransactionKind>() {
                Ok(k) => filter.kind = Some(k),
                Err(_) => invalid.push(FilterField::Kind),
            }
        }

        let name = self.value(FilterField::Category);
        if !name.is_empty() {
            match category::find_in(categories, name) {
                Some(c) => filter.category = Some(c.id),
                None => invalid.push(FilterField::Category),
            }
        }

        for (field, slot) in [
            (FilterField::From, &mut filter.date_from),
            (FilterField::To, &mut filter.date_to),
        ] {
            let value = self.value(field);
            if value.is_empty() {
                continue;
            }
            match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                Ok(date) => *slot = Some(date),
                Err(_) => invalid.push(field),
            }
        }

        (filter, invalid)
    }

    /// One-line description of the active filters
    pub fn summary(&self) -> String {
        let parts: Vec<String> = FilterField::ALL
            .iter()
            .filter(|f| !self.value(**f).is_empty())
            .map(|f| format!("{}={}", f.label().to_lowercase(), self.value(*f)))
            .collect();
        if parts.is_empty() {
            "no filter".to_string()
        } else {
            parts.join("  ")
        }
    }
}

/// Render the filter dialog
pub fn render(frame: &mut Frame, form: &FilterForm, invalid: &[FilterField]) {
    let area = centered_rect_fixed(56, 12, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Filter transactions ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    for (i, field) in FilterField::ALL.iter().enumerate() {
        let row = Rect::new(inner.x + 1, inner.y + i as u16, inner.width.saturating_sub(2), 1);
        let mut input = form.inputs[i].clone().focused(i == form.focus);
        if invalid.contains(field) {
            input.label = format!("{} (?)", input.label);
        }
        frame.render_widget(&input, row);
        if invalid.contains(field) {
            frame
                .buffer_mut()
                .set_style(Rect::new(row.x, row.y, 1, 1), Style::default().fg(Color::Red));
        }
    }

    let hints = Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" next  "),
        Span::styled("Ctrl-u", Style::default().fg(Color::Yellow)),
        Span::raw(" clear all  "),
        Span::styled("Enter/Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" close"),
    ]);
    let hint_row = Rect::new(inner.x + 1, inner.y + inner.height.saturating_sub(1), inner.width, 1);
    frame.render_widget(Paragraph::new(hints), hint_row);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryType, WalletId};

    #[test]
    fn test_to_filter_resolves_names() {
        let categories = vec![Category {
            id: CategoryId::new(5),
            name: "Loyer".into(),
            category_type: CategoryType::Expense,
            icon: String::new(),
            color: String::new(),
        }];
        let wallets = vec![Wallet {
            id: WalletId::new(2),
            name: "Epargne".into(),
            color: String::new(),
            is_default: false,
            created_at: None,
        }];

        let mut form = FilterForm::new();
        form.set_value(FilterField::Search, " loyer ");
        form.set_value(FilterField::Wallet, "epargne");
        form.set_value(FilterField::Kind, "expense");
        form.set_value(FilterField::Category, "Voyage");
        form.set_value(FilterField::From, "2025-03-01");
        form.set_value(FilterField::To, "31/03/2025");

        let (filter, invalid) = form.to_filter(&categories, &wallets);

        assert_eq!(filter.q.as_deref(), Some("loyer"));
        assert_eq!(filter.wallet, Some(WalletId::new(2)));
        assert_eq!(filter.kind, Some(TransactionKind::Expense));
        assert_eq!(filter.category, None);
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(filter.date_to, None);
        assert_eq!(invalid, vec![FilterField::Category, FilterField::To]);
    }

    #[test]
    fn test_focus_cycles() {
        let mut form = FilterForm::new();
        form.prev_field();
        assert_eq!(form.focused_field(), FilterField::To);
        form.next_field();
        assert_eq!(form.focused_field(), FilterField::Search);
        assert_eq!(form.summary(), "no filter");
    }
}
