//! View composition: header, form, results, overlays.

pub mod form;
pub mod results;
pub mod theme;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::ui::theme::Theme;

pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(f, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    form::render_form(f, body[0], app);
    results::render_results(f, body[1], app.result.as_ref());

    render_footer(f, chunks[2], app);
    render_notifications(f, area, app);

    if app.loading() {
        render_loading_overlay(f, area);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" Churn Prediction", Theme::title()),
        Span::styled(" │ Customer Retention Insights", Theme::muted()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let submit = if app.form.is_complete() {
        Span::styled("Submit", Theme::key_hint())
    } else {
        // Disabled until every required field is filled in.
        Span::styled("Submit (fill all fields)", Theme::disabled())
    };

    let content = Line::from(vec![
        Span::styled("[Tab] ", Theme::key_hint()),
        Span::styled("Next ", Theme::muted()),
        Span::styled("[Space] ", Theme::key_hint()),
        Span::styled("Toggle ", Theme::muted()),
        Span::styled("[Enter] ", Theme::key_hint()),
        submit,
        Span::styled(" [Esc] ", Theme::key_hint()),
        Span::styled("Dismiss ", Theme::muted()),
        Span::styled("[Ctrl+Q] ", Theme::key_hint()),
        Span::styled("Quit", Theme::muted()),
    ]);

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}

fn render_notifications(f: &mut Frame, area: Rect, app: &App) {
    let width = 44.min(area.width.saturating_sub(2));
    if width == 0 {
        return;
    }

    for (i, notification) in app.notifications.iter().enumerate() {
        let y = 1 + (i as u16) * 3;
        if y + 3 > area.height {
            break;
        }
        let rect = Rect {
            x: area.right().saturating_sub(width + 1),
            y,
            width,
            height: 3,
        };

        f.render_widget(Clear, rect);
        let content = Paragraph::new(Line::from(Span::styled(
            notification.message.as_str(),
            Theme::text(),
        )))
        .block(
            Block::default()
                .title(Span::styled(" ! ", Theme::danger()))
                .borders(Borders::ALL)
                .border_style(Theme::border_invalid()),
        );
        f.render_widget(content, rect);
    }
}

fn render_loading_overlay(f: &mut Frame, area: Rect) {
    let rect = centered_rect(40, 20, area);
    f.render_widget(Clear, rect);

    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("Scoring customer...", Theme::title())),
        Line::from(Span::styled(
            "Contacting prediction service",
            Theme::muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );

    f.render_widget(content, rect);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
