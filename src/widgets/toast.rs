//! Toast stack widget.
//!
//! Draws the toast nodes attached to a [`Host`] as bordered cards anchored to
//! the host's position. Does not shift other UI elements: cards are drawn over
//! whatever is already in the buffer.

use crate::host::{
    Host, CLOSE_CLASS, DESCRIPTION_CLASS, EXIT_CLASS, ICON_CLASS, PROGRESS_CLASS, TITLE_CLASS,
};
use crate::node::Element;
use crate::toast::{Position, ToastType};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

const CARD_WIDTH: u16 = 40;

/// Glyph drawn when the toast has no icon of its own
pub fn type_glyph(kind: ToastType) -> &'static str {
    match kind {
        ToastType::Success => "\u{2714}", // ✔
        ToastType::Info => "\u{2139}",    // ℹ
        ToastType::Warning => "\u{26A0}", // ⚠
        ToastType::Error => "\u{2718}",   // ✘
    }
}

/// Colours used to draw toast cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub success: Color,
    pub info: Color,
    pub warning: Color,
    pub error: Color,
    pub text: Color,
    pub text_muted: Color,
    pub background: Color,
}

const PALETTE: Palette = Palette {
    success: Color::Green,
    info: Color::Cyan,
    warning: Color::Yellow,
    error: Color::Red,
    text: Color::White,
    text_muted: Color::DarkGray,
    background: Color::Reset,
};

/// Get the card palette
pub fn palette() -> Palette {
    PALETTE
}

/// Border colour for a toast type
pub fn type_color(kind: ToastType) -> Color {
    let p = palette();
    match kind {
        ToastType::Success => p.success,
        ToastType::Info => p.info,
        ToastType::Warning => p.warning,
        ToastType::Error => p.error,
    }
}

/// What a card shows, read back from a toast node
#[derive(Debug, Clone, PartialEq, Eq)]
struct Card {
    kind: ToastType,
    icon: Option<String>,
    title: String,
    description: Option<String>,
    closable: bool,
    progress: bool,
    exiting: bool,
}

impl Card {
    fn from_element(node: &Element) -> Self {
        let kind = node
            .classes
            .iter()
            .filter_map(|c| c.strip_prefix("toastr-"))
            .find_map(|c| c.parse::<ToastType>().ok())
            .unwrap_or_default();
        Self {
            kind,
            icon: node.find_descendant_by_class(ICON_CLASS).map(Element::text_content),
            title: node
                .find_descendant_by_class(TITLE_CLASS)
                .map(Element::text_content)
                .unwrap_or_default(),
            description: node.find_descendant_by_class(DESCRIPTION_CLASS).map(Element::text_content),
            closable: node.find_descendant_by_class(CLOSE_CLASS).is_some(),
            progress: node.find_descendant_by_class(PROGRESS_CLASS).is_some(),
            exiting: node.has_class(EXIT_CLASS),
        }
    }

    fn height(&self) -> u16 {
        if self.description.is_some() {
            4
        } else {
            3
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        // Clear the background
        Widget::render(Clear, area, buf);

        let p = palette();
        let mut border_style = Style::default().fg(type_color(self.kind));
        let mut text_style = Style::default().fg(p.text);
        if self.exiting {
            border_style = border_style.add_modifier(Modifier::DIM);
            text_style = text_style.add_modifier(Modifier::DIM);
        }

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(p.background));
        if self.closable {
            block = block.title(Line::from(" \u{00D7} ").alignment(Alignment::Right));
        }
        if self.progress {
            let rule = "\u{2501}".repeat(area.width.saturating_sub(2) as usize / 2);
            block = block.title_bottom(Line::from(rule).alignment(Alignment::Left));
        }

        let icon = self.icon.as_deref().unwrap_or(type_glyph(self.kind));
        let mut lines = vec![Line::styled(
            format!(" {} {}", icon, self.title),
            text_style.add_modifier(Modifier::BOLD),
        )];
        if let Some(description) = &self.description {
            lines.push(Line::styled(
                format!(" {}", description),
                text_style.fg(p.text_muted),
            ));
        }

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// Widget rendering every toast attached to a host
pub struct HostWidget<'a> {
    host: &'a Host,
}

impl<'a> HostWidget<'a> {
    pub fn new(host: &'a Host) -> Self {
        Self { host }
    }

    fn card_x(position: Position, area: Rect, width: u16) -> u16 {
        match position {
            Position::TopLeft | Position::BottomLeft => area.x + 1.min(area.width - width),
            Position::TopCenter | Position::BottomCenter => area.x + (area.width - width) / 2,
            Position::TopRight | Position::BottomRight => {
                area.x + area.width.saturating_sub(width + 1)
            }
        }
    }
}

impl<'a> Widget for HostWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }
        let position = self.host.position().unwrap_or_default();
        let width = CARD_WIDTH.min(area.width.saturating_sub(2)).max(4);
        let x = Self::card_x(position, area, width);

        let cards: Vec<Card> = self.host.toast_nodes().map(Card::from_element).collect();
        let bottom = area.y + area.height;

        if position.is_top() {
            // Oldest at the top edge, newer ones below
            let mut y = area.y;
            for card in &cards {
                let height = card.height();
                if y + height > bottom {
                    break;
                }
                card.render(Rect::new(x, y, width, height), buf);
                y += height;
            }
        } else {
            // Newest against the bottom edge, older ones above
            let mut y = bottom;
            for card in cards.iter().rev() {
                let height = card.height();
                if y < area.y + height {
                    break;
                }
                y -= height;
                card.render(Rect::new(x, y, width, height), buf);
            }
        }
    }
}

/// Render `host` into a blank `width` x `height` buffer and return its rows
pub fn render_to_lines(host: &Host, width: u16, height: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    HostWidget::new(host).render(area, &mut buf);

    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}
