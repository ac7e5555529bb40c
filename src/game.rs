use std::collections::HashSet;

use crate::clock::Clock;
use crate::config::GameConfig;
use crate::food::Food;
use crate::grid::Grid;
use crate::input::{process_events, Control, EventSource, InputEvent};
use crate::render::{Drawable, Renderer};
use crate::snake::{MoveOutcome, Snake};
use crate::Position;

use anyhow::Result;
use log::{debug, info, trace, warn};
use rand::{rngs::StdRng, SeedableRng};

pub struct SnakeGame {
    grid: Grid,
    snake: Snake,
    food: Food,
    clock: Clock,
    rng: StdRng,
    ticks: u64,
}

impl SnakeGame {
    pub fn new(grid: Grid, config: &GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let snake = Snake::new(grid);
        let food = Food::spawn(&grid, &occupied(&snake), &mut rng);

        SnakeGame {
            grid,
            snake,
            food,
            clock: Clock::new(config.ticks_per_second),
            rng,
            ticks: 0,
        }
    }

    #[cfg(test)]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub fn food(&self) -> &Food {
        &self.food
    }

    #[cfg(test)]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs until the player quits. The caller restores the terminal.
    pub fn run<T: Renderer + EventSource>(&mut self, term: &mut T) -> Result<()> {
        info!(
            "starting on a {}x{} board at {:?} per tick",
            self.grid.width(), self.grid.height(), self.clock.interval()
        );

        self.draw_board(term)?;

        loop {
            let elapsed = self.clock.tick();
            trace!("tick {} after {:?}", self.ticks, elapsed);

            let events = term.poll_events()?;
            if self.step(events, term)? == Control::Quit {
                info!("quit after {} ticks, length {}", self.ticks, self.snake.target_length());
                return Ok(());
            }
        }
    }

    /// One tick after pacing: input, movement, eating, drawing.
    pub fn step<R: Renderer>(&mut self, events: Vec<InputEvent>, renderer: &mut R) -> Result<Control> {
        if process_events(events, &mut self.snake) == Control::Quit {
            return Ok(Control::Quit);
        }

        self.snake.apply_pending_heading();

        if let MoveOutcome::SelfCollision { vacated } = self.snake.advance(&mut self.rng) {
            debug!("self collision at length {}, resetting", vacated.len());
            for pos in vacated {
                renderer.clear(self.grid.to_rect(pos))?;
            }
        }

        if self.snake.head() == self.food.position() {
            self.eat();
        }

        self.snake.draw(&self.grid, renderer)?;
        self.food.draw(&self.grid, renderer)?;
        renderer.present()?;

        self.ticks += 1;
        Ok(Control::Continue)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn eat(&mut self) {
        self.snake.grow();

        match self.food.relocate(&self.grid, &occupied(&self.snake), &mut self.rng) {
            Some(pos) => debug!(
                "ate food, length now {}, next food at {:?}",
                self.snake.target_length(), pos
            ),
            None => warn!("no free cell left for food"),
        }
    }

    fn draw_board<R: Renderer>(&self, renderer: &mut R) -> Result<()> {
        for cell in self.grid.cells() {
            renderer.clear(self.grid.to_rect(cell))?;
        }

        self.snake.draw(&self.grid, renderer)?;
        self.food.draw(&self.grid, renderer)?;
        renderer.present()
    }

    #[cfg(test)]
    fn with_parts(grid: Grid, snake: Snake, food: Food, seed: u64) -> Self {
        SnakeGame {
            grid,
            snake,
            food,
            clock: Clock::new(1000),
            rng: StdRng::seed_from_u64(seed),
            ticks: 0,
        }
    }
}

fn occupied(snake: &Snake) -> HashSet<Position> {
    snake.segments().iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Rect;
    use crate::input::testing::ScriptedInput;
    use crate::render::testing::{Op, RecordingRenderer};
    use crate::render::{FOOD_COLOR, SNAKE_COLOR};
    use crate::snake::Heading;

    use crossterm::style::Color;

    /// Both halves of a terminal, for driving `run`.
    #[derive(Default)]
    struct FakeTerm {
        input: ScriptedInput,
        output: RecordingRenderer,
    }

    impl Renderer for FakeTerm {
        fn fill(&mut self, rect: Rect, color: Color, border: Option<Color>) -> Result<()> {
            self.output.fill(rect, color, border)
        }

        fn clear(&mut self, rect: Rect) -> Result<()> {
            self.output.clear(rect)
        }

        fn present(&mut self) -> Result<()> {
            self.output.present()
        }
    }

    impl EventSource for FakeTerm {
        fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
            self.input.poll_events()
        }
    }

    fn seeded(seed: u64) -> GameConfig {
        GameConfig { seed: Some(seed), ..GameConfig::default() }
    }

    #[test]
    fn food_never_starts_on_the_snake() {
        for seed in 0..50 {
            let game = SnakeGame::new(Grid::new(32, 24), &seeded(seed));
            assert!(!game.snake().segments().contains(&game.food().position()));
        }
    }

    #[test]
    fn eating_grows_and_moves_food() {
        let grid = Grid::new(32, 24);
        let snake = Snake::from_segments(grid, &[(4, 5)], Heading::Right);
        let mut game = SnakeGame::with_parts(grid, snake, Food::at((5, 5)), 3);
        let mut renderer = RecordingRenderer::default();

        game.step(vec![], &mut renderer).unwrap();

        assert_eq!(game.snake().head(), (5, 5));
        assert_eq!(game.snake().target_length(), 2);
        assert_eq!(game.snake().segments().len(), 1);
        assert_ne!(game.food().position(), (5, 5));
        assert!(!game.snake().segments().contains(&game.food().position()));

        game.step(vec![], &mut renderer).unwrap();
        assert_eq!(game.snake().segments(), &vec![(6, 5), (5, 5)]);
    }

    #[test]
    fn three_quiet_ticks_move_three_cells() {
        let grid = Grid::new(32, 24);
        let mut game = SnakeGame::with_parts(grid, Snake::new(grid), Food::at((0, 0)), 1);
        let mut renderer = RecordingRenderer::default();

        for _ in 0..3 {
            assert_eq!(game.step(vec![], &mut renderer).unwrap(), Control::Continue);
        }

        assert_eq!(game.snake().segments(), &vec![(19, 12)]);
        assert_eq!(game.ticks(), 3);
    }

    #[test]
    fn turning_applies_on_the_same_tick() {
        let grid = Grid::new(32, 24);
        let mut game = SnakeGame::with_parts(grid, Snake::new(grid), Food::at((0, 0)), 1);
        let mut renderer = RecordingRenderer::default();

        game.step(vec![InputEvent::Turn(Heading::Up)], &mut renderer).unwrap();

        assert_eq!(game.snake().head(), (16, 11));
        assert_eq!(game.snake().heading(), Heading::Up);
    }

    #[test]
    fn step_draws_erase_then_snake_then_food() {
        let grid = Grid::new(32, 24);
        let mut game = SnakeGame::with_parts(grid, Snake::new(grid), Food::at((0, 0)), 1);
        let mut renderer = RecordingRenderer::default();

        game.step(vec![], &mut renderer).unwrap();

        assert_eq!(
            renderer.ops,
            vec![
                Op::Clear(grid.to_rect((16, 12))),
                Op::Fill(grid.to_rect((17, 12)), SNAKE_COLOR),
                Op::Fill(grid.to_rect((0, 0)), FOOD_COLOR),
                Op::Present,
            ]
        );
    }

    #[test]
    fn collision_erases_the_old_body_and_keeps_going() {
        let grid = Grid::new(32, 24);
        let body = [(10, 10), (9, 10), (9, 11), (10, 11), (11, 11)];
        let snake = Snake::from_segments(grid, &body, Heading::Down);
        let mut game = SnakeGame::with_parts(grid, snake, Food::at((0, 0)), 1);
        let mut renderer = RecordingRenderer::default();

        let control = game.step(vec![], &mut renderer).unwrap();

        assert_eq!(control, Control::Continue);
        assert_eq!(game.snake().segments(), &vec![grid.center()]);
        assert_eq!(game.snake().target_length(), 1);

        let cleared: Vec<_> = renderer.ops.iter().take(body.len()).cloned().collect();
        let expected: Vec<_> = body.iter().map(|pos| Op::Clear(grid.to_rect(*pos))).collect();
        assert_eq!(cleared, expected);
    }

    #[test]
    fn quit_draws_nothing() {
        let grid = Grid::new(32, 24);
        let mut game = SnakeGame::with_parts(grid, Snake::new(grid), Food::at((0, 0)), 1);
        let mut renderer = RecordingRenderer::default();

        let control = game.step(vec![InputEvent::Quit], &mut renderer).unwrap();

        assert_eq!(control, Control::Quit);
        assert!(renderer.ops.is_empty());
        assert_eq!(game.snake().head(), (16, 12));
    }

    #[test]
    fn run_returns_on_quit() {
        let grid = Grid::new(8, 6);
        let config = GameConfig { ticks_per_second: 120, ..seeded(9) };
        let mut game = SnakeGame::new(grid, &config);
        let mut term = FakeTerm {
            input: ScriptedInput::new(vec![
                vec![],
                vec![InputEvent::Turn(Heading::Down)],
                vec![InputEvent::Quit],
            ]),
            ..FakeTerm::default()
        };

        game.run(&mut term).unwrap();

        assert_eq!(game.ticks(), 2);
        let presents = term.output.ops.iter().filter(|op| **op == Op::Present).count();
        // Initial board plus one frame per completed tick
        assert_eq!(presents, 3);
        assert_eq!(term.output.ops.last(), Some(&Op::Present));
    }
}
