use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::board::{Board, Tile};
use crate::game::GameState;
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        frame.render_widget(self.render_grid(state), game_area);

        // The final board stays visible around the banner
        if state.is_game_over() {
            let banner_area = centered(game_area, 36, 7);
            frame.render_widget(Clear, banner_area);
            frame.render_widget(self.render_game_over(state), banner_area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'static> {
        let board = Board::from_state(state);

        let lines: Vec<Line> = board
            .rows()
            .map(|row| Line::from(row.iter().map(|tile| tile_span(*tile)).collect::<Vec<_>>()))
            .collect();

        let (title, border_color) = if state.is_game_over() {
            (" Snake (game over) ", Color::Red)
        } else if state.is_paused() {
            (" Snake (paused) ", Color::Yellow)
        } else {
            (" Snake ", Color::White)
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.snake.len().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ];

        if metrics.games_played > 0 {
            spans.push(Span::raw("    "));
            spans.push(Span::styled("Games: ", Style::default().fg(Color::Yellow)));
            spans.push(Span::styled(
                metrics.games_played.to_string(),
                Style::default().fg(Color::White),
            ));
        }

        if let Some(last) = metrics.last_score {
            spans.push(Span::raw("    "));
            spans.push(Span::styled("Last: ", Style::default().fg(Color::Yellow)));
            spans.push(Span::styled(last.to_string(), Style::default().fg(Color::White)));
        }

        if state.is_paused() {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'static> {
        let key = |label: &'static str, color: Color| {
            Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD))
        };

        let text = vec![
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "Score: {}    Length: {}",
                state.score,
                state.snake.len()
            )),
            Line::from(""),
            Line::from(vec![
                key("R", Color::Green),
                Span::raw(" new game    "),
                key("Q", Color::Red),
                Span::raw(" quit"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Yellow)),
            Span::raw(" to pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to reset | "),
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

/// A `width` x `height` rect centred in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn tile_span(tile: Tile) -> Span<'static> {
    match tile {
        Tile::Head => Span::styled(
            "■ ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Tile::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
        Tile::Food => Span::styled(
            "O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Tile::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, GameEngine, GameStatus, Position, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(state: &GameState) -> String {
        draw_with(state, &GameMetrics::new())
    }

    fn draw_with(state: &GameState, metrics: &GameMetrics) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, state, metrics))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_running_frame_shows_grid_and_score() {
        let engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = engine.initial_state();
        state.score = 7;

        let screen = draw(&state);

        assert!(screen.contains("Score: 7"));
        assert!(screen.contains(" Snake "));
        assert!(screen.contains("■"));
        assert!(screen.contains("O"));
        assert!(!screen.contains("PAUSED"));
        assert!(!screen.contains("GAME OVER"));
    }

    #[test]
    fn test_paused_frame_is_marked() {
        let engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = engine.initial_state();
        state.status = GameStatus::Paused;

        let screen = draw(&state);

        assert!(screen.contains("PAUSED"));
        assert!(screen.contains("(paused)"));
    }

    #[test]
    fn test_game_over_frame_keeps_final_board() {
        // Head in the top-left corner, well clear of the centred banner
        let snake = Snake::from_body(
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)],
            Direction::Left,
        );
        let mut state = GameState::new(snake, Position::new(9, 0), 10);
        state.score = 3;
        state.status = GameStatus::GameOver;

        let screen = draw(&state);

        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Score: 3"));
        assert!(screen.contains("(game over)"));
        assert!(screen.contains("■"));
        assert!(screen.contains("□"));
    }

    #[test]
    fn test_header_shows_session_counters() {
        let engine = GameEngine::with_seed(GameConfig::small(), 1);
        let state = engine.initial_state();

        let fresh = draw(&state);
        assert!(!fresh.contains("Games:"));
        assert!(!fresh.contains("Last:"));

        let mut metrics = GameMetrics::new();
        metrics.on_game_over(4);
        metrics.on_game_start();

        let screen = draw_with(&state, &metrics);
        assert!(screen.contains("Games: 1"));
        assert!(screen.contains("Last: 4"));
    }

    #[test]
    fn test_centered_rect_is_clipped() {
        let area = Rect::new(2, 3, 20, 5);
        assert_eq!(centered(area, 10, 3), Rect::new(7, 4, 10, 3));
        assert_eq!(centered(area, 40, 9), area);
    }
}
