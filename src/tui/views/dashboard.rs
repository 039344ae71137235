//! Dashboard view
//!
//! Monthly figure cards, the spending-by-category chart and the top
//! categories next to budget alerts.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::display::budget::gauge;
use crate::models::{Money, StatusLevel};
use crate::reports::chart::shares;
use crate::tui::app::App;
use crate::tui::layout::DashboardLayout;

use super::status_color;

/// Render the dashboard
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(data) = app.data.as_ref() else {
        let text = if app.loading { "Loading..." } else { "No data" };
        frame.render_widget(
            Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL))
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    };

    let layout = DashboardLayout::new(area);
    let currency = app.currency();
    let insights = data.insights(Local::now().date_naive());

    let trend = match insights.month_over_month {
        Some(delta) if delta > 0.0 => Color::Red,
        Some(delta) if delta < 0.0 => Color::Green,
        _ => Color::White,
    };
    let cards = [
        ("Balance", insights.balance.format_with_currency(currency), money_color(insights.balance)),
        ("Income", insights.income.format_with_currency(currency), Color::Green),
        ("Expenses", insights.expenses.format_with_currency(currency), Color::Red),
        (
            "Per day / vs last month",
            format!(
                "{}  {}%",
                insights.avg_daily_expense.format_with_currency(currency),
                insights.delta_pct_label()
            ),
            trend,
        ),
    ];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(layout.cards);
    for ((title, value, color), column) in cards.into_iter().zip(columns.iter()) {
        let card = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
        ])
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(card, *column);
    }

    render_chart(frame, app, layout.chart);
    render_side(frame, app, &insights.top_categories, layout.side);
}

fn money_color(amount: Money) -> Color {
    if amount.is_negative() {
        Color::Red
    } else {
        Color::Green
    }
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Spending by category ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let slices = app.data.as_ref().map(|d| d.chart()).unwrap_or_default();
    if slices.is_empty() {
        frame.render_widget(
            Paragraph::new("No spending for the current filter")
                .block(block)
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let bars: Vec<Bar> = slices
        .iter()
        .zip(shares(&slices))
        .map(|(slice, share)| {
            let (r, g, b) = slice.rgb();
            Bar::default()
                .value(slice.value.cents().unsigned_abs())
                .text_value(format!("{:.0}%", share))
                .label(Line::from(slice.label.clone()))
                .style(Style::default().fg(Color::Rgb(r, g, b)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(9)
        .bar_gap(2)
        .value_style(Style::default().fg(Color::Black).add_modifier(Modifier::BOLD))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn render_side(
    frame: &mut Frame,
    app: &App,
    top: &[crate::reports::CategorySpending],
    area: Rect,
) {
    let currency = app.currency();
    let mut lines = vec![Line::from(Span::styled(
        "Top categories",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))];
    if top.is_empty() {
        lines.push(Line::from(Span::styled(
            "  nothing spent this month",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (rank, category) in top.iter().enumerate() {
        lines.push(Line::from(format!(
            "  {}. {:<16} {}",
            rank + 1,
            category.label,
            category.total.format_with_currency(currency)
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Budgets {}", app.query.month),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )));
    let alerts: Vec<_> = app
        .data
        .iter()
        .flat_map(|d| d.budget_status.iter())
        .filter(|s| s.status != StatusLevel::Ok)
        .collect();
    if alerts.is_empty() {
        lines.push(Line::from(Span::styled(
            "  all budgets on track",
            Style::default().fg(Color::Green),
        )));
    }
    for status in alerts {
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<14} ", status.category_name)),
            Span::styled(gauge(status), Style::default().fg(status_color(status.status))),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}
