use keysmash::{
    config::DURATION_CHOICES,
    language::WordSource,
    session::{Phase, Session},
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
/// Committed words kept on screen behind the cursor.
const VISIBLE_HISTORY: usize = 40;
/// Upcoming words shown after the current one.
const VISIBLE_LOOKAHEAD: usize = 79;

/// How a single letter of the current word is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Correct,
    Incorrect,
    Pending,
}

/// Pair each position of the current word with what to draw there: the typed
/// letter when there is one, otherwise the expected letter still to type.
fn letter_marks(target: &str, typed: &str) -> Vec<(char, Mark)> {
    let mut expected = target.chars();
    let mut marks: Vec<(char, Mark)> = typed
        .chars()
        .map(|c| match expected.next() {
            Some(e) if e == c => (c, Mark::Correct),
            _ => (c, Mark::Incorrect),
        })
        .collect();
    marks.extend(expected.map(|c| (c, Mark::Pending)));
    marks
}

struct Styles {
    bold: Style,
    correct: Style,
    incorrect: Style,
    missed: Style,
    pending: Style,
    caret: Style,
    italic: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let pending = Style::default().patch(bold).add_modifier(Modifier::DIM);
        Self {
            bold,
            correct: Style::default().patch(bold).fg(Color::Green),
            incorrect: Style::default().patch(bold).fg(Color::Red),
            missed: Style::default()
                .patch(bold)
                .fg(Color::Red)
                .add_modifier(Modifier::CROSSED_OUT),
            pending,
            caret: Style::default().patch(pending).add_modifier(Modifier::UNDERLINED),
            italic: Style::default().add_modifier(Modifier::ITALIC),
        }
    }
}

fn word_spans<W: WordSource>(session: &Session<W>, styles: &Styles) -> Vec<Span<'static>> {
    let target = session.target_words();
    let index = session.word_index();
    let mut spans = Vec::new();

    let first_visible = index.saturating_sub(VISIBLE_HISTORY);
    for (expected, typed) in target[first_visible..index]
        .iter()
        .zip(&session.committed_words()[first_visible..])
    {
        let style = if typed == expected {
            styles.correct
        } else {
            styles.missed
        };
        spans.push(Span::styled(expected.clone(), style));
        spans.push(Span::raw(" "));
    }

    let typed = session.current_buffer();
    let caret_at = typed.chars().count();
    let marks = letter_marks(session.current_target().unwrap_or_default(), typed);
    for (pos, (c, mark)) in marks.into_iter().enumerate() {
        let style = match mark {
            Mark::Correct => styles.correct,
            Mark::Incorrect => styles.incorrect,
            Mark::Pending if pos == caret_at && !session.has_finished() => styles.caret,
            Mark::Pending => styles.pending,
        };
        spans.push(Span::styled(c.to_string(), style));
    }

    let upcoming_end = (index + 1 + VISIBLE_LOOKAHEAD).min(target.len());
    for word in target.iter().take(upcoming_end).skip(index + 1) {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(word.clone(), styles.pending));
    }

    spans
}

fn duration_spans(current: u32, styles: &Styles) -> Vec<Span<'static>> {
    let mut spans: Vec<Span> = DURATION_CHOICES
        .iter()
        .flat_map(|&secs| {
            let style = if secs == current {
                styles.bold.add_modifier(Modifier::REVERSED)
            } else {
                styles.pending
            };
            [Span::styled(format!(" {secs}s "), style), Span::raw(" ")]
        })
        .collect();
    if !DURATION_CHOICES.contains(&current) {
        spans.push(Span::styled(
            format!(" {current}s "),
            styles.bold.add_modifier(Modifier::REVERSED),
        ));
    }
    spans
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let styles = Styles::default();

        let spans = word_spans(session, &styles);
        let words_width: usize = spans.iter().map(|s| s.content.width()).sum();
        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let words_lines = (words_width as f64 / max_chars_per_line as f64).ceil() as u16 + 1;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // durations
                Constraint::Length(1), // padding
                Constraint::Length(1), // time left / results
                Constraint::Length(1), // padding
                Constraint::Max(words_lines),
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Line::from(duration_spans(session.duration_secs(), &styles)))
            .alignment(Alignment::Right)
            .render(chunks[0], buf);

        let status = match session.phase() {
            Phase::Finished => {
                let metrics = session.metrics();
                Line::from(vec![
                    Span::styled(format!("{} wpm", metrics.wpm), styles.bold),
                    Span::raw("   "),
                    Span::styled(format!("{}% acc", metrics.accuracy), styles.bold),
                    Span::raw("   "),
                    Span::styled(format!("{} correct", metrics.correct), styles.correct),
                    Span::raw("   "),
                    Span::styled(format!("{} incorrect", metrics.incorrect), styles.incorrect),
                ])
            }
            Phase::Running => Line::from(Span::styled(
                format!("{}s", session.time_left()),
                styles.bold,
            )),
            Phase::Idle => Line::from(vec![
                Span::styled(format!("{}s", session.time_left()), styles.bold),
                Span::raw("   "),
                Span::styled("type to start", styles.italic),
            ]),
        };
        Paragraph::new(status)
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        Paragraph::new(Line::from(spans))
            .alignment(if words_lines <= 2 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true })
            .render(chunks[4], buf);

        Paragraph::new(Span::styled(
            "(tab) duration / (enter) restart / (esc)ape",
            styles.italic,
        ))
        .render(chunks[6], buf);
    }
}
