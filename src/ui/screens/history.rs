use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ledger::format_date;
use crate::models::format_yen;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let view = &app.view;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(
                " History {} ({}) ",
                app.today.format("%Y-%m"),
                view.rows.len()
            ),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if view.rows.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No payments this month", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press 3 for the entry form or use :pay <category> <payee> <amount>",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Category", "Payee", "Amount", "Balance"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = view
        .rows
        .iter()
        .zip(&view.running_balance)
        .enumerate()
        .skip(app.history_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, (entry, balance))| {
            let style = if i == app.history_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            // A row whose amount cell is not a number still shows, without figures
            let amount = entry.amount.map_or_else(|| "-".to_string(), format_yen);
            let balance_cell = match balance {
                Some(b) => Cell::from(Span::styled(format_yen(*b), theme::remaining_style(*b))),
                None => Cell::from(Span::styled("-", theme::dim_style())),
            };

            Row::new(vec![
                Cell::from(format_date(entry.date)),
                Cell::from(Span::styled(
                    entry.category.as_str(),
                    Style::default().fg(theme::category_color(entry.category)),
                )),
                Cell::from(truncate(&entry.payee, 24)),
                Cell::from(Span::styled(amount, theme::expense_style())),
                balance_cell,
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(16),
        Constraint::Length(10),
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
