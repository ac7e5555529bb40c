mod clock;
mod config;
mod food;
mod game;
mod grid;
mod input;
mod render;
mod snake;
mod term;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::{Config, WriteLogger};

use config::{Args, GameConfig};
use grid::Grid;
use term::TermManager;

pub type TermInt = u16;
pub type Position = (i32, i32);

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        WriteLogger::init(args.log_level, Config::default(), file)
            .context("installing logger")?;
    }

    let config = GameConfig::from(&args);
    let mut term = TermManager::new()?;
    info!("terminal is {:?}", term.get_terminal_size());

    let grid = Grid::new(config.width, config.height);
    let grid = grid.with_origin(term.playfield_origin(&grid)?);
    let mut game = game::SnakeGame::new(grid, &config);

    term::in_session(&mut term, |term| {
        term.draw_borders(&grid)?;
        game.run(term)
    })
}
