//! Results panel: risk headline, probability meter, recommendations.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use churn_core::domain::assessment::Assessment;

use crate::ui::theme::Theme;

pub fn render_results(f: &mut Frame, area: Rect, result: Option<&Assessment>) {
    match result {
        Some(assessment) => render_assessment(f, area, assessment),
        None => render_placeholder(f, area),
    }
}

fn render_placeholder(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No prediction yet", Theme::muted())),
        Line::from(""),
        Line::from(Span::styled(
            "Fill in the customer profile and submit",
            Theme::muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(Span::styled(" Prediction ", Theme::title()))
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    f.render_widget(content, area);
}

fn render_assessment(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let block = Block::default()
        .title(Span::styled(" Prediction ", Theme::title()))
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // headline + description
            Constraint::Length(3), // probability meter
            Constraint::Length(1), // received at
            Constraint::Min(0),    // recommendations
        ])
        .margin(1)
        .split(inner);

    let risk_style = Theme::risk(assessment.risk);

    let headline = Paragraph::new(vec![
        Line::from(Span::styled(
            assessment.risk.headline(),
            risk_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            assessment.risk.description(),
            Theme::muted(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(headline, chunks[0]);

    let meter = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" {} ", assessment.risk.meter_label()),
                    Theme::muted(),
                ))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .gauge_style(risk_style)
        .ratio(assessment.meter_ratio())
        .label(assessment.percent_text());
    f.render_widget(meter, chunks[1]);

    let stamp = Paragraph::new(Line::from(Span::styled(
        format!("scored at {}", assessment.received_at.format("%H:%M:%S UTC")),
        Theme::muted(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(stamp, chunks[2]);

    let mut lines = vec![Line::from(Span::styled(
        "Recommendations",
        Theme::title(),
    ))];
    for action in assessment.risk.recommendations() {
        lines.push(Line::from(vec![
            Span::styled("  - ", Theme::muted()),
            Span::styled(*action, Theme::text()),
        ]));
    }
    f.render_widget(Paragraph::new(lines), chunks[3]);
}
