use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Direction, EndReason, GameStatus, Position, WorldState};
use crate::metrics::GameMetrics;

/// Mode flags shown alongside the board
#[derive(Debug, Clone, Copy, Default)]
pub struct HudFlags {
    pub paused: bool,
    pub autopilot: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &WorldState,
        metrics: &GameMetrics,
        flags: HudFlags,
    ) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics, flags), chunks[0]);

        match state.status() {
            GameStatus::Running => {
                frame.render_widget(self.render_grid(state, flags), chunks[1]);
            }
            GameStatus::GameOver { score, reason } => {
                frame.render_widget(self.render_game_over(score, reason, metrics), chunks[1]);
            }
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// Title card shown before the first game starts
    pub fn render_splash(&self, frame: &mut Frame) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Snake: in Space",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("π ", Style::default().fg(Color::Yellow)),
                Span::raw("food    "),
                Span::styled("* ", Style::default().fg(Color::Red)),
                Span::raw("meteor    "),
                Span::styled("@ ", Style::default().fg(Color::Blue)),
                Span::raw("portal"),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to start",
                Style::default().fg(Color::Gray),
            )),
        ];

        let widget = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White)),
        );
        frame.render_widget(widget, frame.area());
    }

    fn cell(&self, state: &WorldState, pos: Position, head: Position) -> Span<'static> {
        if state.grid().is_border(pos) {
            return Span::styled("X ", Style::default().fg(Color::White));
        }
        if pos == head {
            return Span::styled(
                format!("{} ", head_glyph(state.direction())),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        }
        if state.snake().contains(pos) {
            return Span::styled("o ", Style::default().fg(Color::Green));
        }
        if state.food() == Some(pos) {
            return Span::styled(
                "π ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }
        if state.meteors().contains(&pos) {
            return Span::styled("* ", Style::default().fg(Color::Red));
        }
        if state.portals().is_some_and(|ends| ends.contains(&pos)) {
            return Span::styled(
                "@ ",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            );
        }
        Span::styled("  ", Style::default())
    }

    fn render_grid(&self, state: &WorldState, flags: HudFlags) -> Paragraph<'static> {
        let head = state.snake().head();
        let lines: Vec<Line> = (0..state.grid().height() as i32)
            .map(|row| {
                let spans: Vec<Span> = (0..state.grid().width() as i32)
                    .map(|col| self.cell(state, Position::new(row, col), head))
                    .collect();
                Line::from(spans)
            })
            .collect();

        let title = if flags.paused {
            " Snake: in Space (paused) "
        } else {
            " Snake: in Space "
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        state: &WorldState,
        metrics: &GameMetrics,
        flags: HudFlags,
    ) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(
                state.score().to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", state.tick_interval().as_millis()), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ];
        if flags.autopilot {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "AUTOPILOT",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        score: u32,
        reason: EndReason,
        metrics: &GameMetrics,
    ) -> Paragraph<'static> {
        let headline = match reason {
            EndReason::BoardFull => "YOU FILLED SPACE!",
            _ => "GAME OVER",
        };
        let cause = match reason {
            EndReason::Wall => "You hit the wall",
            EndReason::SelfCollision => "You bit yourself",
            EndReason::Meteor => "You hit a meteor",
            EndReason::BoardFull => "No room left for food",
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                headline,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(cause, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.best_score.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let key = Style::default().fg(Color::Cyan);
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", key),
            Span::raw(" or "),
            Span::styled("WASD", key),
            Span::raw(" to move | "),
            Span::styled("P", key),
            Span::raw(" pause | "),
            Span::styled("T", key),
            Span::raw(" autopilot | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn head_glyph(direction: Direction) -> char {
    match direction {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}
