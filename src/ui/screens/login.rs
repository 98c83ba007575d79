use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::mask;

/// The only thing drawn while the session is locked.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let width = 48.min(area.width.saturating_sub(2));
    let height = 9.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let popup = Rect::new(x, y, width, height);

    let masked = mask(&app.passphrase_input);
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Enter the passphrase",
            Style::default().fg(theme::TEXT),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(theme::ACCENT)),
            Span::styled(masked.clone(), theme::normal_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            app.status_message.as_str(),
            Style::default().fg(theme::RED),
        )),
        Line::from(Span::styled("Enter unlock | Esc quit", theme::dim_style())),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(Span::styled(
            " Kakeibo ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(Paragraph::new(text).centered().block(block), popup);

    // Cursor sits after the masked input on the centered line
    let line_width = 2 + masked.chars().count() as u16;
    let inner_width = width.saturating_sub(2);
    let cursor_x = popup.x + 1 + inner_width.saturating_sub(line_width) / 2 + line_width;
    f.set_cursor_position((cursor_x.min(popup.x + width.saturating_sub(2)), popup.y + 4));
}
