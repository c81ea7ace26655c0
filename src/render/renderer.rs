use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::game::GameState;
use crate::metrics::GameMetrics;

use super::glyphs::{Glyph, GlyphSet};

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;
const POPUP_WIDTH: u16 = 34;
const POPUP_HEIGHT: u16 = 11;
const RETRY_WIDTH: u16 = 11;
const RETRY_HEIGHT: u16 = 3;

/// How board cells map onto terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMode {
    /// One board cell = its glyph, two columns wide
    Glyph,
    /// Two board rows per terminal row, drawn with upper-half blocks
    HalfBlock,
}

impl CellMode {
    /// Inner size of the board in terminal cells
    fn board_size(self, state: &GameState) -> (u16, u16) {
        let cols = to_u16(state.board_width);
        let rows = to_u16(state.board_height.saturating_sub(state.header_rows));
        match self {
            CellMode::Glyph => (cols.saturating_mul(2), rows),
            CellMode::HalfBlock => (cols, rows.div_ceil(2)),
        }
    }

    /// Terminal size needed to draw header, bordered board and footer
    pub fn required_size(self, state: &GameState) -> (u16, u16) {
        let (width, height) = self.board_size(state);
        (
            width.saturating_add(2),
            height.saturating_add(2 + HEADER_HEIGHT + FOOTER_HEIGHT),
        )
    }

    /// The richest mode that fits in `area`
    pub fn fitting(area: Rect, state: &GameState) -> Option<CellMode> {
        [CellMode::Glyph, CellMode::HalfBlock].into_iter().find(|mode| {
            let (width, height) = mode.required_size(state);
            area.width >= width && area.height >= height
        })
    }
}

pub struct Renderer {
    glyphs: GlyphSet,
}

impl Renderer {
    pub fn new(glyphs: GlyphSet) -> Self {
        Self { glyphs }
    }

    /// Draw one frame.
    ///
    /// Returns the screen area of the Retry button when one was drawn.
    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        show_retry: bool,
    ) -> Option<Rect> {
        let area = frame.area();
        let Some(mode) = CellMode::fitting(area, state) else {
            let notice = self.render_too_small(state);
            frame.render_widget(notice, area);
            return None;
        };

        let (board_width, board_height) = mode.board_size(state);
        let (total_width, total_height) = mode.required_size(state);
        let outer = centered(area, total_width, total_height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(board_height + 2),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(outer);

        self.render_header(frame, chunks[0], state, metrics);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake ");
        let board_area = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);
        frame.render_widget(
            BoardWidget {
                state,
                glyphs: &self.glyphs,
                mode,
            },
            Rect {
                width: board_width.min(board_area.width),
                height: board_height.min(board_area.height),
                ..board_area
            },
        );

        frame.render_widget(self.render_controls(), chunks[2]);

        if state.is_alive {
            None
        } else {
            self.render_game_over(frame, chunks[1], state, metrics, show_retry)
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &GameState, metrics: &GameMetrics) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(inner);

        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let score = Paragraph::new(Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(state.score.to_string(), value),
        ]))
        .alignment(Alignment::Left);
        let time = Paragraph::new(Line::from(Span::styled(
            metrics.format_time(),
            Style::default().fg(Color::Gray),
        )))
        .alignment(Alignment::Center);
        let level = Paragraph::new(Line::from(vec![
            Span::styled("Level: ", label),
            Span::styled(state.level.to_string(), value),
            Span::raw(" "),
        ]))
        .alignment(Alignment::Right);

        frame.render_widget(score, columns[0]);
        frame.render_widget(time, columns[1]);
        frame.render_widget(level, columns[2]);
    }

    fn render_game_over(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &GameState,
        metrics: &GameMetrics,
        show_retry: bool,
    ) -> Option<Rect> {
        let popup = centered(area, POPUP_WIDTH, POPUP_HEIGHT);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        let inner = block.inner(popup);

        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Game Over!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", label),
                Span::styled(state.score.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Level Reached: ", label),
                Span::styled(state.level.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Best: ", Style::default().fg(Color::Gray)),
                Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::Gray)),
            ]),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(block),
            popup,
        );

        if !show_retry || inner.height < 6 + RETRY_HEIGHT {
            return None;
        }

        let button = Rect {
            x: inner.x + inner.width.saturating_sub(RETRY_WIDTH) / 2,
            y: inner.y + 6,
            width: RETRY_WIDTH.min(inner.width),
            height: RETRY_HEIGHT,
        };
        let retry = Paragraph::new(Line::from(Span::styled(
            "Retry",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Black).bg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
        frame.render_widget(retry, button);

        Some(button)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" retry | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_too_small(&self, state: &GameState) -> Paragraph<'_> {
        let (width, height) = CellMode::HalfBlock.required_size(state);
        let text = vec![
            Line::from(Span::styled(
                "Terminal too small",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("need at least {width}x{height}")),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
    }
}

/// What sits on a board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Occupant {
    Apple,
    Body,
    Head,
}

/// The playable area, one glyph per occupied cell
struct BoardWidget<'a> {
    state: &'a GameState,
    glyphs: &'a GlyphSet,
    mode: CellMode,
}

impl BoardWidget<'_> {
    /// Occupant of every playable cell, row-major; later draws win
    fn occupancy(&self) -> Vec<Option<Occupant>> {
        let cols = self.state.board_width;
        let rows = self.state.board_height.saturating_sub(self.state.header_rows);
        let mut cells = vec![None; cols * rows];

        let mut put = |col: i32, row: i32, occupant: Occupant| {
            let row = row - self.state.header_rows as i32;
            if col >= 0 && row >= 0 && (col as usize) < cols && (row as usize) < rows {
                cells[row as usize * cols + col as usize] = Some(occupant);
            }
        };

        put(self.state.apple.col, self.state.apple.row, Occupant::Apple);
        for segment in self.state.snake.body_segments() {
            put(segment.col, segment.row, Occupant::Body);
        }
        let head = self.state.snake.head();
        put(head.col, head.row, Occupant::Head);

        cells
    }

    fn glyph(&self, occupant: Occupant) -> Glyph {
        match occupant {
            Occupant::Apple => self.glyphs.apple,
            Occupant::Body => self.glyphs.body,
            Occupant::Head => self.glyphs.head,
        }
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = self.state.board_width;
        let rows = self.state.board_height.saturating_sub(self.state.header_rows);
        let cells = self.occupancy();
        let empty = Style::default().fg(Color::DarkGray);

        match self.mode {
            CellMode::Glyph => {
                for row in 0..rows {
                    for col in 0..cols {
                        let x = area.x.saturating_add(to_u16(col * 2));
                        let y = area.y.saturating_add(to_u16(row));
                        if let Some(cell) = buf.cell_mut((x, y)) {
                            match cells[row * cols + col] {
                                Some(occupant) => {
                                    let glyph = self.glyph(occupant);
                                    cell.set_char(glyph.symbol)
                                        .set_style(Style::default().fg(glyph.color));
                                }
                                None => {
                                    cell.set_char('·').set_style(empty);
                                }
                            }
                        }
                    }
                }
            }
            CellMode::HalfBlock => {
                for pair in 0..rows.div_ceil(2) {
                    for col in 0..cols {
                        let top = cells[pair * 2 * cols + col];
                        let bottom = if pair * 2 + 1 < rows {
                            cells[(pair * 2 + 1) * cols + col]
                        } else {
                            None
                        };

                        let x = area.x.saturating_add(to_u16(col));
                        let y = area.y.saturating_add(to_u16(pair));
                        let Some(cell) = buf.cell_mut((x, y)) else {
                            continue;
                        };

                        let color = |half: Option<Occupant>| {
                            half.map_or(Color::Reset, |occupant| self.glyph(occupant).color)
                        };

                        match (top, bottom) {
                            (None, None) => {
                                cell.set_char(' ').set_style(Style::default());
                            }
                            // The head keeps its own symbol so it never reads as body
                            (Some(Occupant::Head), other) | (other, Some(Occupant::Head)) => {
                                let head = self.glyphs.head;
                                cell.set_char(head.symbol).set_style(
                                    Style::default()
                                        .fg(head.color)
                                        .bg(color(other))
                                        .add_modifier(Modifier::BOLD),
                                );
                            }
                            (top, bottom) => {
                                cell.set_char('▀')
                                    .set_style(Style::default().fg(color(top)).bg(color(bottom)));
                            }
                        }
                    }
                }
            }
        }
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
