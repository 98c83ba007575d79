use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use chrono::Datelike;

use crate::actions::MAN_YEN;
use crate::models::{format_yen, MonthEntry, Yen};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{compact_yen, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Payments + balance
            Constraint::Length(6), // Category shares
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    let ordered = date_ordered(&app.view.rows, &app.view.running_balance);
    render_payment_bars(f, charts[0], &ordered);
    render_balance_line(f, charts[1], app, &ordered);

    render_category_shares(f, chunks[2], app);
}

/// Rows with their running balance, in date order (same-day rows keep sheet order).
fn date_ordered<'a>(
    rows: &'a [MonthEntry],
    balances: &[Option<Yen>],
) -> Vec<(&'a MonthEntry, Option<Yen>)> {
    let mut ordered: Vec<(&MonthEntry, Option<Yen>)> = rows
        .iter()
        .zip(balances.iter().copied())
        .collect();
    ordered.sort_by_key(|(entry, _)| entry.date);
    ordered
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    let view = &app.view;
    let remaining = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_yen(view.remaining),
            theme::remaining_style(view.remaining),
        )),
        Line::from(Span::styled(
            format!("of {} this month", format_yen(view.goal)),
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(panel("Remaining"));
    f.render_widget(remaining, cards[0]);

    let pending = app.goal_input * MAN_YEN;
    let marker = if pending == view.goal { "" } else { "  (Enter to apply)" };
    let goal = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("◀ ", theme::dim_style()),
            Span::styled(
                format!("{} man-yen", app.goal_input),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ▶", theme::dim_style()),
        ]),
        Line::from(Span::styled(
            format!("{}{marker}", format_yen(pending)),
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(panel("Goal"));
    f.render_widget(goal, cards[1]);

    let spent = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_yen(view.total_spent()),
            theme::expense_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} payments", view.rows.len()),
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(panel("Spent"));
    f.render_widget(spent, cards[2]);
}

fn render_empty(f: &mut Frame, area: Rect, title: &str) {
    let msg = Paragraph::new(Line::from(Span::styled(
        "No payments this month. Add one with :pay",
        theme::dim_style(),
    )))
    .centered()
    .block(panel(title));
    f.render_widget(msg, area);
}

fn render_payment_bars(f: &mut Frame, area: Rect, ordered: &[(&MonthEntry, Option<Yen>)]) {
    let paid: Vec<&MonthEntry> = ordered
        .iter()
        .map(|(entry, _)| *entry)
        .filter(|entry| entry.amount.is_some())
        .collect();
    if paid.is_empty() {
        render_empty(f, area, "Payments");
        return;
    }

    const BAR_WIDTH: u16 = 5;
    let fits = (area.width.saturating_sub(2) / (BAR_WIDTH + 1)).max(1) as usize;
    let bars: Vec<Bar> = paid
        .iter()
        .skip(paid.len().saturating_sub(fits))
        .map(|entry| {
            let color = theme::category_color(entry.category);
            Bar::default()
                .value(entry.spent().max(0) as u64)
                .text_value(compact_yen(entry.spent()))
                .label(Line::from(format!("{}/{}", entry.date.month(), entry.date.day())))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme::HEADER_BG).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(panel("Payments"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(1)
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_balance_line(
    f: &mut Frame,
    area: Rect,
    app: &App,
    ordered: &[(&MonthEntry, Option<Yen>)],
) {
    let goal = app.view.goal;
    let mut points: Vec<(f64, f64)> = vec![(1.0, goal as f64)];
    points.extend(
        ordered
            .iter()
            .filter_map(|(entry, balance)| balance.map(|b| (f64::from(entry.date.day()), b as f64))),
    );
    if points.len() == 1 {
        render_empty(f, area, "Running Balance");
        return;
    }

    let last_day = f64::from(days_in_month(app.today));
    let low = points.iter().map(|(_, y)| *y).fold(0.0_f64, f64::min);
    let high = (goal as f64).max(low + 1.0);

    let datasets = vec![Dataset::default()
        .name("balance")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::YELLOW))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(panel("Running Balance"))
        .x_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([1.0, last_day])
                .labels(vec![
                    Span::raw("1"),
                    Span::raw(format!("{}", (last_day as u32).div_ceil(2))),
                    Span::raw(format!("{}", last_day as u32)),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([low, high])
                .labels(vec![
                    Span::raw(compact_yen(low as Yen)),
                    Span::raw(compact_yen(((low + high) / 2.0) as Yen)),
                    Span::raw(compact_yen(high as Yen)),
                ]),
        );

    f.render_widget(chart, area);
}

fn days_in_month(date: chrono::NaiveDate) -> u32 {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    chrono::NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

fn render_category_shares(f: &mut Frame, area: Rect, app: &App) {
    let total = app.view.total_spent();
    if app.view.by_category.is_empty() || total <= 0 {
        render_empty(f, area, "By Category");
        return;
    }

    let lines: Vec<Line> = app
        .view
        .by_category
        .iter()
        .map(|(category, spent)| {
            let ratio = *spent as f64 / total as f64;
            let color = theme::category_color(*category);
            let name = truncate(category.as_str(), 6);
            Line::from(vec![
                Span::styled(format!(" {name:<6} "), theme::normal_style()),
                Span::styled(progress_bar(ratio, 24), Style::default().fg(color)),
                Span::styled(
                    format!(" {:>3.0}%", ratio * 100.0),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", format_yen(*spent)), theme::dim_style()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(panel("By Category")), area);
}
