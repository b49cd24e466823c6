// Modal UI components.
// The image prompt shown when a comment's avatar is activated.

use ratatui::{prelude::*, widgets::*};

use crate::state::ImageChooser;

/// Draw the image prompt on top of the current view.
pub fn draw_image_modal(frame: &mut Frame, chooser: &ImageChooser) {
    let area = frame.area();

    // Create centered modal
    let modal_width = 64.min(area.width);
    let modal_height = 8.min(area.height);
    let modal_x = (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = (area.height.saturating_sub(modal_height)) / 2;

    let modal_area = Rect::new(modal_x, modal_y, modal_width, modal_height);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Min(1),    // Hint
            Constraint::Length(2), // Instructions
        ])
        .split(modal_area);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Avatar for {} ", chooser.label));

    let input_line = Line::from(vec![
        Span::styled("Image: ", Style::default().fg(Color::DarkGray)),
        Span::raw(chooser.input.as_str()),
        Span::styled("█", Style::default().fg(Color::Yellow)),
    ]);

    let input_widget = Paragraph::new(input_line).block(input_block);
    frame.render_widget(input_widget, chunks[0]);

    let hint = Paragraph::new("Path to an image file, or a URI (file://, https://, content://)")
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    frame.render_widget(hint, chunks[1]);

    // Instructions
    let instructions = Line::from(vec![
        Span::styled(" Enter", Style::default().fg(Color::Yellow)),
        Span::styled(" = Choose  ", Style::default().fg(Color::DarkGray)),
        Span::styled("^U", Style::default().fg(Color::Yellow)),
        Span::styled(" = Clear  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" = Cancel ", Style::default().fg(Color::DarkGray)),
    ]);

    let instructions_widget = Paragraph::new(instructions).alignment(Alignment::Center);
    frame.render_widget(instructions_widget, chunks[2]);
}
