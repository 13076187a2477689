use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::AppLayout;
use super::theme::{Palette, Theme};
use super::timestamps::format_message_time;
use crate::models::{Message, Role};
use crate::utils::sanitize_for_display;

const DEPARTMENTS: &[&str] =
    &["Mathematics", "Computer Science", "Chemistry", "Physics", "Psychology"];
const EXAMPLE_PROMPTS: &[&str] =
    &["Best calculus professors", "Chemistry teachers with good ratings", "Computer science courses"];
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Everything the renderer needs for one frame
pub struct RenderState<'a> {
    pub messages: &'a [Message],
    pub input: &'a str,
    pub theme: Theme,
    pub sending: bool,
    /// Lines scrolled up from the bottom of the transcript
    pub scroll: u16,
    pub spinner_frame: usize,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());
    let palette = state.theme.palette();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        frame.area(),
    );

    if layout.sidebar_area.width > 0 {
        render_sidebar(frame, layout.sidebar_area, &palette);
    }
    if state.messages.is_empty() {
        render_welcome(frame, layout.messages_area, &palette);
    } else {
        render_messages(frame, layout.messages_area, state, &palette);
    }
    render_input(frame, layout.input_area, state, &palette);
    render_status_bar(frame, layout.status_area, state, &palette);
}

fn render_sidebar(frame: &mut Frame, area: Rect, palette: &Palette) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Prof", Style::default().fg(palette.text).add_modifier(Modifier::BOLD)),
            Span::styled("Finder", Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];
    for dept in DEPARTMENTS {
        lines.push(Line::styled(format!(" {}", dept), Style::default().fg(palette.muted)));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled(" Ctrl+L  Clear chat", Style::default().fg(palette.error)));
    lines.push(Line::styled(" Ctrl+T  Toggle theme", Style::default().fg(palette.muted)));

    let paragraph = Paragraph::new(lines).style(Style::default().bg(palette.surface)).block(
        Block::default().borders(Borders::RIGHT).border_style(Style::default().fg(palette.border)),
    );
    frame.render_widget(paragraph, area);
}

fn render_welcome(frame: &mut Frame, area: Rect, palette: &Palette) {
    let mut lines = vec![
        Line::from(""),
        Line::styled(
            "Welcome to ProfFinder!",
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(
            "Ask me about professors, courses, or anything related to academics.",
            Style::default().fg(palette.muted),
        ),
        Line::from(""),
        Line::styled("Try asking:", Style::default().fg(palette.muted)),
    ];
    for prompt in EXAMPLE_PROMPTS {
        lines.push(Line::styled(format!("\"{}\"", prompt), Style::default().fg(palette.muted)));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Style of the bubble text for a role
fn role_style(role: Role, palette: &Palette) -> Style {
    match role {
        Role::User => Style::default().fg(palette.on_accent).bg(palette.accent),
        Role::Error => Style::default().fg(palette.error),
        Role::Header => Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        Role::Match | Role::Result => Style::default().fg(palette.text).bg(palette.surface),
        Role::Bot => Style::default().fg(palette.text),
    }
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Error => "Error",
        Role::Header | Role::Match | Role::Result => "Results",
        Role::Bot => "ProfFinder",
    }
}

/// Break a logical line into rows of at most `width` terminal cells
fn wrap_line(text: &str, width: usize) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_width = 0;
    let mut buf = [0u8; 4];
    for c in text.chars() {
        // Wide glyphs (emoji, CJK) take two cells
        let cells = Span::raw(&*c.encode_utf8(&mut buf)).width();
        if row_width + cells > width && !row.is_empty() {
            rows.push(std::mem::take(&mut row));
            row_width = 0;
        }
        row.push(c);
        row_width += cells;
    }
    rows.push(row);
    rows
}

/// Transcript rows, already wrapped to `width`
pub(crate) fn transcript_lines<'a>(
    messages: &'a [Message],
    width: usize,
    spinner_frame: usize,
    palette: &Palette,
) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    let mut previous_role = None;

    for message in messages {
        // Match lists continue their header without a new label
        let continues_list =
            message.role == Role::Match && matches!(previous_role, Some(Role::Header | Role::Match));
        if !continues_list {
            if previous_role.is_some() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(vec![
                Span::styled(
                    role_label(message.role),
                    role_style(message.role, palette).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" · {}", format_message_time(&message.created_at)),
                    Style::default().fg(palette.muted),
                ),
            ]));
        }
        previous_role = Some(message.role);

        if message.pending {
            let spinner = SPINNER[spinner_frame % SPINNER.len()];
            lines.push(Line::styled(
                format!("{} Searching...", spinner),
                Style::default().fg(palette.accent),
            ));
            continue;
        }

        let style = role_style(message.role, palette);
        let prefix = if message.role == Role::Match { "• " } else { "" };
        let text = sanitize_for_display(&message.text);
        for (idx, logical) in text.lines().enumerate() {
            let logical = if idx == 0 { format!("{}{}", prefix, logical) } else { logical.to_string() };
            for row in wrap_line(&logical, width) {
                lines.push(Line::styled(row, style));
            }
        }
    }

    lines
}

fn render_messages(frame: &mut Frame, area: Rect, state: &RenderState, palette: &Palette) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let visible = area.height as usize;
    let lines = transcript_lines(state.messages, inner_width, state.spinner_frame, palette);

    // Pin to the bottom, offset by how far the user scrolled up
    let max_offset = lines.len().saturating_sub(visible);
    let offset = max_offset.saturating_sub(state.scroll as usize);
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::LEFT | Borders::RIGHT).border_style(
            Style::default().fg(palette.background),
        ))
        .scroll((offset, 0));
    frame.render_widget(paragraph, area);
}

fn render_input(frame: &mut Frame, area: Rect, state: &RenderState, palette: &Palette) {
    let (title, border) = if state.sending {
        (" Searching... ", palette.muted)
    } else {
        (" Ask about professors... ", palette.accent)
    };

    let content = if state.sending {
        Line::styled(state.input.to_string(), Style::default().fg(palette.muted))
    } else {
        Line::from(vec![
            Span::styled(state.input.to_string(), Style::default().fg(palette.text)),
            Span::styled("▏", Style::default().fg(palette.accent)),
        ])
    };

    // Keep the tail of long input visible
    let inner_width = area.width.saturating_sub(2);
    let input_len = u16::try_from(state.input.chars().count()).unwrap_or(u16::MAX);
    let horizontal = input_len.saturating_add(1).saturating_sub(inner_width);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(palette.surface))
        .scroll((0, horizontal))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title),
        );
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState, palette: &Palette) {
    let (status_text, style) = if let Some(status) = state.status_message {
        let color = match status.message_type {
            MessageType::Success => palette.accent,
            MessageType::Error => palette.error,
        };
        (format!(" {} ", status.text), Style::default().fg(color).bg(palette.surface))
    } else {
        let mut parts = vec![format!("{} messages", state.messages.len())];
        if state.sending {
            parts.push("waiting for answer".to_string());
        } else {
            parts.push("Enter: send".to_string());
        }
        if state.scroll > 0 {
            parts.push(format!("scrolled {}", state.scroll));
        }
        parts.push("↑↓: scroll".to_string());
        parts.push("Ctrl+Y: copy answer".to_string());
        parts.push(format!("Ctrl+T: {} theme", state.theme.toggle().label()));
        parts.push("Ctrl+C: quit".to_string());

        (format!(" {} ", parts.join(" | ")), Style::default().fg(palette.text).bg(palette.surface))
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
