use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::actions::{AMOUNT_MAX, AMOUNT_MIN};
use crate::models::{format_yen, Category};
use crate::ui::app::{App, EditTarget, EntryField, InputMode};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(4)])
        .split(area);

    let lines: Vec<Line> = app
        .entry_fields()
        .into_iter()
        .flat_map(|field| [field_line(app, field), Line::from("")])
        .collect();

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" New Payment ({}) ", app.today.format("%Y-%m-%d")),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(form, chunks[0]);

    let preview = Paragraph::new(vec![Line::from(vec![
        Span::styled(" Will record: ", theme::dim_style()),
        Span::styled(
            format!("[{}] ", app.form.category.as_str()),
            Style::default().fg(theme::category_color(app.form.category)),
        ),
        Span::styled(
            if app.form.payee().is_empty() {
                "(no payee)".to_string()
            } else {
                app.form.payee()
            },
            theme::normal_style(),
        ),
        Span::styled(format!("  {}", format_yen(app.form.amount)), theme::expense_style()),
    ])])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY)),
    );
    f.render_widget(preview, chunks[1]);
}

fn field_line(app: &App, field: EntryField) -> Line<'static> {
    let focused = app.entry_field == field;
    let label_style = if focused {
        theme::selected_style()
    } else {
        theme::title_style()
    };
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(format!(" {:<11}", field.label()), label_style),
        Span::raw("  "),
    ];

    match field {
        EntryField::Category => {
            spans.extend(choices(
                Category::all().iter().map(|c| c.as_str()),
                Category::all().iter().position(|c| *c == app.form.category),
                focused,
            ));
        }
        EntryField::Payee => {
            spans.extend(choices(
                app.form.category.payees().iter().map(|p| p.label()),
                Some(app.form.payee_index),
                focused,
            ));
        }
        EntryField::FreeText => {
            let editing = app.input_mode == InputMode::Editing
                && app.edit_target == Some(EditTarget::FreeText);
            let text = if editing {
                app.edit_buffer.clone()
            } else {
                app.form.free_text.clone()
            };
            if text.is_empty() && !editing {
                spans.push(Span::styled("(Enter to type)", theme::dim_style()));
            } else {
                spans.push(Span::styled(text, theme::normal_style()));
            }
        }
        EntryField::Amount => {
            spans.push(Span::styled(
                format_yen(app.form.amount),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(
                    "   ({}-{}, h/l ±100, H/L ±1,000)",
                    AMOUNT_MIN,
                    format_yen(AMOUNT_MAX)
                ),
                theme::dim_style(),
            ));
        }
        EntryField::Submit => {
            let style = if focused {
                Style::default()
                    .fg(theme::HEADER_BG)
                    .bg(theme::GREEN)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::GREEN)
            };
            spans.push(Span::styled(" Record payment ", style));
        }
    }
    Line::from(spans)
}

/// A row of options with the current one highlighted.
fn choices<'a>(
    labels: impl Iterator<Item = &'a str>,
    current: Option<usize>,
    focused: bool,
) -> Vec<Span<'static>> {
    labels
        .enumerate()
        .flat_map(|(i, label)| {
            let style = if Some(i) == current {
                if focused {
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)
                }
            } else {
                theme::dim_style()
            };
            [Span::styled(format!(" {label} "), style), Span::raw(" ")]
        })
        .collect()
}
