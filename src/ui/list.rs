// Comment list rendering.
// One widget per fetch state: spinner, comment rows, or error text.

use ratatui::{prelude::*, widgets::*};

use crate::api::{Comment, ImageRef};
use crate::state::{FetchState, ImageSelection};

/// Placeholder shown in the avatar slot when no image was chosen.
pub const AVATAR_PLACEHOLDER: &str = "[ 👤 ]";

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, centered_line(area));
}

/// Render an error message.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let text = Paragraph::new(format!("❌ {}", error))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });
    frame.render_widget(text, centered_line(area));
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, centered_line(area));
}

/// Vertically centered strip of `area`, a few lines tall.
fn centered_line(area: Rect) -> Rect {
    let height = area.height.min(3);
    Rect {
        x: area.x,
        y: area.y + (area.height - height) / 2,
        width: area.width,
        height,
    }
}

/// Label for the avatar slot.
pub fn avatar_label(image: Option<&ImageRef>) -> String {
    match image {
        Some(image) => format!("[🖼 {}]", image.display_name()),
        None => AVATAR_PLACEHOLDER.to_string(),
    }
}

/// Build the list row for one comment.
fn comment_item(comment: &Comment, image: Option<&ImageRef>) -> ListItem<'static> {
    let avatar_style = if image.is_some() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut header = vec![
        Span::styled(avatar_label(image), avatar_style),
        Span::raw(" "),
    ];
    if let Some(name) = &comment.name {
        header.push(Span::styled(
            name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(email) = &comment.email {
        header.push(Span::raw("  "));
        header.push(Span::styled(
            email.clone(),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let id = comment
        .id
        .map_or_else(|| "#?".to_string(), |id| format!("#{}", id));

    let mut lines = vec![
        Line::from(header),
        Line::from(Span::styled(
            format!("    {}", id),
            Style::default().fg(Color::Blue),
        )),
    ];
    if let Some(body) = &comment.body {
        lines.extend(body.lines().map(|line| Line::from(format!("    {}", line))));
    }
    lines.push(Line::from(""));

    ListItem::new(lines)
}

/// Render the comment screen for the current fetch state.
pub fn render_comments(
    frame: &mut Frame,
    area: Rect,
    state: &FetchState,
    selections: &ImageSelection,
    list_state: &mut ListState,
) {
    match state {
        FetchState::Loading => render_loading(frame, area, "Loading comments"),
        FetchState::Error(e) => render_error(frame, area, e),
        FetchState::Success(comments) if comments.is_empty() => {
            render_empty(frame, area, "No comments on this post")
        }
        FetchState::Success(comments) => {
            let items: Vec<ListItem> = comments
                .iter()
                .map(|comment| {
                    let image = comment.id.and_then(|id| selections.get(id));
                    comment_item(comment, image)
                })
                .collect();

            let title = format!(" Comments ({}) ", comments.len());
            let list_widget = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(title))
                .highlight_style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");

            frame.render_stateful_widget(list_widget, area, list_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render(state: &FetchState, selections: &ImageSelection) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut list_state = ListState::default();
        terminal
            .draw(|frame| {
                render_comments(frame, frame.area(), state, selections, &mut list_state)
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn two_comments() -> FetchState {
        FetchState::Success(vec![
            Comment::new(1, 1, "John Doe", "john@example.com", "Test comment 1"),
            Comment::new(1, 2, "Jane Smith", "jane@example.com", "Test comment 2"),
        ])
    }

    #[test]
    fn test_loading_renders_spinner_text() {
        let text = render(&FetchState::Loading, &ImageSelection::new());
        assert!(text.contains("Loading comments..."));
    }

    #[test]
    fn test_error_renders_message() {
        let state = FetchState::Error("Network error".to_string());
        let text = render(&state, &ImageSelection::new());
        assert!(text.contains("Network error"));
        assert!(!text.contains("Comments ("));
    }

    #[test]
    fn test_success_renders_rows() {
        let text = render(&two_comments(), &ImageSelection::new());
        assert!(text.contains("Comments (2)"));
        assert!(text.contains("John Doe"));
        assert!(text.contains("jane@example.com"));
        assert!(text.contains("#2"));
        assert!(text.contains("Test comment 2"));
    }

    #[test]
    fn test_empty_success_renders_empty_state() {
        let text = render(&FetchState::Success(Vec::new()), &ImageSelection::new());
        assert!(text.contains("No comments on this post"));
    }

    #[test]
    fn test_avatar_uses_selected_image() {
        let mut selections = ImageSelection::new();
        selections.insert(2, Some(ImageRef::new("/pics/jane.png")));

        let text = render(&two_comments(), &selections);
        assert!(text.contains("jane.png"));
        assert!(!text.contains("john.png"));
    }

    #[test]
    fn test_avatar_label() {
        assert_eq!(avatar_label(None), AVATAR_PLACEHOLDER);
        assert_eq!(
            avatar_label(Some(&ImageRef::new("file:///a/b/cat.png"))),
            "[🖼 cat.png]"
        );
    }
}
