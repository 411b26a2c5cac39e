use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Apple, GameConfig, Position, Snake};
use crate::metrics::GameMetrics;

/// What occupies a single grid cell on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Head,
    Body,
    Apple,
}

impl Cell {
    fn span(self) -> Span<'static> {
        match self {
            Cell::Head => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::Body => Span::styled("■ ", Style::default().fg(Color::Green)),
            Cell::Apple => Span::styled(
                "● ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Cell::Empty => Span::styled("· ", Style::default().fg(Color::DarkGray)),
        }
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        config: &GameConfig,
        snake: &Snake,
        apple: &Apple,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snake, metrics), chunks[0]);
        frame.render_widget(self.render_grid(config, snake, apple), chunks[1]);
        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, config: &GameConfig, snake: &Snake, apple: &Apple) -> Paragraph<'static> {
        let lines: Vec<Line> = cell_grid(config, snake, apple)
            .into_iter()
            .map(|row| Line::from(row.into_iter().map(Cell::span).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Rgb(93, 216, 228)))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snake: &Snake, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = Line::from(vec![
            Span::styled("Length: ", label),
            Span::styled(
                snake.len().to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_length.to_string(), value),
            Span::raw("    "),
            Span::styled("Apples: ", label),
            Span::styled(metrics.apples_eaten.to_string(), value),
            Span::raw("    "),
            Span::styled("Resets: ", label),
            Span::styled(metrics.resets.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay the snake and apple out as rows of cells.
///
/// The apple is painted first so the head wins if they ever share a cell.
pub fn cell_grid(config: &GameConfig, snake: &Snake, apple: &Apple) -> Vec<Vec<Cell>> {
    let mut grid =
        vec![vec![Cell::Empty; config.grid_width() as usize]; config.grid_height() as usize];

    paint(&mut grid, config, &[apple.position], Cell::Apple);
    paint(&mut grid, config, snake.body_segments(), Cell::Body);
    paint(&mut grid, config, &[snake.head()], Cell::Head);

    grid
}

fn paint(grid: &mut [Vec<Cell>], config: &GameConfig, positions: &[Position], cell: Cell) {
    for position in positions {
        let (col, row) = position.cell(config);
        if let Some(slot) = grid
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
        {
            *slot = cell;
        }
    }
}
