//! TUI Views module
//!
//! The dashboard, transactions and budgets views, the header tabs and the
//! status bar.

pub mod budget;
pub mod dashboard;
pub mod status_bar;
pub mod transactions;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::models::StatusLevel;

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::AppLayout;
use super::widgets::NotificationWidget;

/// Color for a budget status level
pub fn status_color(level: StatusLevel) -> Color {
    match level {
        StatusLevel::Ok => Color::Green,
        StatusLevel::Warning => Color::Yellow,
        StatusLevel::Danger => Color::Red,
    }
}

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header);

    match app.active_view {
        ActiveView::Dashboard => dashboard::render(frame, app, layout.main),
        ActiveView::Transactions => transactions::render(frame, app, layout.main),
        ActiveView::Budgets => budget::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    match app.active_dialog {
        ActiveDialog::None => {}
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::Filter => {
            dialogs::filter::render(frame, &app.filter_form, &app.invalid_filter_fields)
        }
        ActiveDialog::ConfirmDelete(id) => {
            let transaction = app.transactions().iter().find(|t| t.id == id);
            let prompt = dialogs::confirm::delete_prompt(transaction, app.currency());
            dialogs::confirm::render(frame, &prompt);
        }
    }

    if let Some(notification) = app.notifications.current() {
        let area = frame.area();
        let width = (notification.message.chars().count() as u16 + 6).min(area.width);
        let toast = Rect::new(
            area.x + area.width.saturating_sub(width + 1),
            area.y + 1,
            width,
            area.height.saturating_sub(1).min(3),
        );
        frame.render_widget(NotificationWidget::new(notification), toast);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = ActiveView::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!("{} {}", i + 1, view.title())))
        .collect();
    let selected = ActiveView::ALL
        .iter()
        .position(|v| *v == app.active_view)
        .unwrap_or_default();

    let greeting = app
        .data
        .as_ref()
        .map(|d| format!(" Nexora · {} ", d.user_name()))
        .unwrap_or_else(|| " Nexora ".to_string());

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(Span::styled(
                    greeting,
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}
