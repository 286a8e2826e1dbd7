//! Input form rendering: account selector, flag toggles, numeric fields.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use churn_core::domain::prediction::AccountType;
use churn_core::form::NumericField;

use crate::app::{App, Focus};
use crate::ui::theme::Theme;

pub fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // account selector
            Constraint::Length(3), // toggles
            Constraint::Min(0),    // numeric fields
        ])
        .split(area);

    render_account_row(f, chunks[0], app);
    render_toggle_row(f, chunks[1], app);
    render_numeric_fields(f, chunks[2], app);
}

fn render_account_row(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Account;
    let border = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let mut spans = vec![Span::raw(" ")];
    for (i, account) in AccountType::ALL.iter().enumerate() {
        let selected = app.form.account_type == Some(*account);
        let marker = if selected { "(*)" } else { "( )" };
        let style = if selected { Theme::text() } else { Theme::muted() };
        spans.push(Span::styled(
            format!("{marker} {}", account.label()),
            style,
        ));
        if i + 1 < AccountType::ALL.len() {
            spans.push(Span::raw("   "));
        }
    }

    let block = Block::default()
        .title(Span::styled(" Account Type ", Theme::title()))
        .borders(Borders::ALL)
        .border_style(border);

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_toggle_row(f: &mut Frame, area: Rect, app: &App) {
    let constraints: Vec<Constraint> = app
        .form
        .toggles
        .iter()
        .map(|_| Constraint::Ratio(1, app.form.toggles.len() as u32))
        .collect();

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, toggle) in app.form.toggles.iter().enumerate() {
        let focused = app.focus == Focus::Toggle(i);
        let border = if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };
        let marker = if toggle.on { "[x]" } else { "[ ]" };

        let block = Block::default().borders(Borders::ALL).border_style(border);
        let content = Paragraph::new(Line::from(vec![
            Span::styled(format!(" {marker} "), Theme::text()),
            Span::styled(toggle.label, Theme::muted()),
        ]))
        .block(block);

        f.render_widget(content, cells[i]);
    }
}

fn render_numeric_fields(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mid = (app.form.numbers.len() + 1) / 2;

    render_field_column(f, columns[0], &app.form.numbers[..mid], 0, app);
    render_field_column(f, columns[1], &app.form.numbers[mid..], mid, app);
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[NumericField],
    offset: usize,
    app: &App,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let focused = app.focus == Focus::Number(offset + i);

        // Out-of-range wins over focus: an invalid field stays red while
        // it still has the caret.
        let border = if field.out_of_range() {
            Theme::border_invalid()
        } else if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let title_style = if focused { Theme::title() } else { Theme::muted() };
        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border);

        let value = if field.value.is_empty() {
            Span::styled(field.hint, Theme::muted())
        } else {
            Span::styled(field.value.as_str(), Theme::text())
        };

        let cursor = if focused {
            Span::styled("_", Theme::border_focused())
        } else {
            Span::raw("")
        };

        let content =
            Paragraph::new(Line::from(vec![Span::raw(" "), value, cursor])).block(block);
        f.render_widget(content, chunks[i]);
    }
}
