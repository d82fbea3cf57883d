use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::drill::Drill;
use crate::session::TypingSession;
use crate::timer::GateMode;
use crate::util::{Palette, Rgb};

const HORIZONTAL_MARGIN: u16 = 5;

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Style one word letter by letter.
///
/// Rules, in order of precedence for each index:
/// animated override, settled success (before the caret and not pending),
/// pending confirmation (still base), error at the caret, base otherwise.
/// Pure function of its inputs; rendering twice yields identical spans.
pub fn word_spans(
    word: &str,
    session: &TypingSession,
    animated: Option<(usize, Rgb)>,
    palette: &Palette,
) -> Vec<Span<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);

    word.chars()
        .enumerate()
        .map(|(idx, letter)| {
            let rgb = match animated {
                Some((anim_idx, anim_color)) if anim_idx == idx => anim_color,
                _ if idx < session.caret && !session.pending.contains(&idx) => palette.success,
                _ if session.pending.contains(&idx) => palette.base,
                _ if idx == session.caret && session.wrong => palette.error,
                _ => palette.base,
            };
            Span::styled(letter.to_string(), bold.fg(color(rgb)))
        })
        .collect()
}

/// Full-frame widget for a drill in progress (or its completion screen).
pub struct DrillScreen<'a> {
    pub drill: &'a Drill,
    pub toggle_key: char,
    pub palette: Palette,
}

impl DrillScreen<'_> {
    fn status_line(&self) -> Line<'static> {
        let gate = &self.drill.gate;
        let (text, fg) = match gate.mode() {
            GateMode::Typing => (
                format!("{} - press '{}' to rest", gate.mode(), self.toggle_key),
                color(self.palette.success),
            ),
            GateMode::Recharging if gate.is_forced() => (
                format!("{} - wait for the timer to refill", gate.mode()),
                color(self.palette.error),
            ),
            GateMode::Recharging => (
                format!("{} - press '{}' to type", gate.mode(), self.toggle_key),
                Color::Yellow,
            ),
            GateMode::Idle => (
                format!("{} - press '{}' to type", gate.mode(), self.toggle_key),
                Color::DarkGray,
            ),
        };
        Line::from(Span::styled(
            text,
            Style::default().fg(fg).add_modifier(Modifier::ITALIC),
        ))
    }
}

impl Widget for DrillScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let drill = self.drill;

        if drill.has_finished() {
            let done = Paragraph::new(Span::styled(
                "Congratulations! You have typed every sentence.",
                Style::default()
                    .fg(color(self.palette.success))
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            done.render(area, buf);
            return;
        }

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let word_lines =
            ((drill.current_word().width() as f64 / max_chars_per_line as f64).ceil()).max(1.0)
                as u16;

        // gauge + blank + word + blank + status
        let body_height = word_lines + 4;
        let top_pad = area.height.saturating_sub(body_height) / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(top_pad),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(word_lines),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let gauge = Gauge::default()
            .ratio(crate::util::clamp01(drill.gate.fraction()))
            .label(format!("{:.1}", drill.gate.stamina()))
            .gauge_style(Style::default().fg(match drill.gate.mode() {
                GateMode::Typing => color(self.palette.success),
                GateMode::Recharging => Color::Yellow,
                GateMode::Idle => Color::DarkGray,
            }));
        gauge.render(chunks[1], buf);

        let animated = drill.animator.override_color(&self.palette);
        let spans = word_spans(drill.current_word(), &drill.session, animated, &self.palette);
        let word = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        word.render(chunks[3], buf);

        let status = Paragraph::new(self.status_line()).alignment(Alignment::Center);
        status.render(chunks[5], buf);
    }
}
