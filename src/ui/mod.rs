// UI module for rendering the TUI.
// Header, comment list, status bar, and overlays.

pub mod list;
pub mod modal;

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::state::{CoordinatorPhase, FetchState};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(1),    // Comments
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let state = app.feed().state();
    let selections = app.feed().selections();

    draw_header(frame, app, &state, selections.chosen_count(), chunks[0]);
    list::render_comments(frame, chunks[1], &state, &selections, &mut app.list_state);
    draw_status_bar(frame, app, chunks[2]);

    // Overlays are rendered last, on top of everything
    if let Some(chooser) = &app.chooser {
        modal::draw_image_modal(frame, chooser);
    }
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the title, endpoint, and fetch progress.
fn draw_header(frame: &mut Frame, app: &App, state: &FetchState, chosen: usize, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    let mut spans = vec![
        Span::styled(
            " lpl ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.endpoint(), Style::default().fg(Color::DarkGray)),
    ];

    // A list shown while the fetch is still in flight came from the cache.
    if state.is_success() && app.feed().phase() == CoordinatorPhase::InFlight {
        spans.push(Span::styled(
            "  ⟳ cached, refreshing",
            Style::default().fg(Color::Yellow),
        ));
    }
    if chosen > 0 {
        spans.push(Span::styled(
            format!("  🖼 {}", chosen),
            Style::default().fg(Color::Cyan),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(header, area);
}

/// Draw key hints and the latest notice.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints = if app.chooser.is_some() {
        vec![
            Span::raw(" ↵ "),
            Span::styled("Choose", Style::default().fg(Color::DarkGray)),
            Span::raw("  Esc "),
            Span::styled("Cancel", Style::default().fg(Color::DarkGray)),
        ]
    } else {
        vec![
            Span::raw(" ↑↓ "),
            Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵ "),
            Span::styled("Avatar", Style::default().fg(Color::DarkGray)),
            Span::raw("  r "),
            Span::styled("Reload", Style::default().fg(Color::DarkGray)),
            Span::raw("  ? "),
            Span::styled("Help", Style::default().fg(Color::DarkGray)),
            Span::raw("  q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ]
    };

    if let Some(notice) = &app.notice {
        hints.push(Span::styled(
            format!("  {}", notice),
            Style::default().fg(Color::Yellow),
        ));
    }

    let status = Paragraph::new(Line::from(hints));
    frame.render_widget(status, area);
}

/// Draw the keyboard help popup.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 50.min(area.width);
    let popup_height = 14.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key_style = Style::default().fg(Color::Cyan);
    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ↑/↓ or j/k    ", key_style),
            Span::raw("Move between comments"),
        ]),
        Line::from(vec![
            Span::styled("  Home/End g/G  ", key_style),
            Span::raw("Jump to first/last comment"),
        ]),
        Line::from(vec![
            Span::styled("  Enter/Space   ", key_style),
            Span::raw("Choose avatar image"),
        ]),
        Line::from(vec![
            Span::styled("  r             ", key_style),
            Span::raw("Reload comments"),
        ]),
        Line::from(vec![
            Span::styled("  ?             ", key_style),
            Span::raw("Show/hide this help"),
        ]),
        Line::from(vec![
            Span::styled("  q/Esc         ", key_style),
            Span::raw("Quit"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}
