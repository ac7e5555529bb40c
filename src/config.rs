use std::path::PathBuf;

use clap::Parser;
use simplelog::LevelFilter;

pub const DEFAULT_GRID_WIDTH: u16 = 32;
pub const DEFAULT_GRID_HEIGHT: u16 = 24;
pub const DEFAULT_TICKS_PER_SECOND: u32 = 10;

/// Snake on a wrap-around board. Arrow keys or WASD to steer, q, Esc or
/// CTRL+C to quit.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of columns on the board.
    #[arg(
        long,
        value_name = "COLUMNS",
        default_value_t = DEFAULT_GRID_WIDTH,
        value_parser = clap::value_parser!(u16).range(3..=500)
    )]
    pub width: u16,
    /// Number of rows on the board.
    #[arg(
        long,
        value_name = "ROWS",
        default_value_t = DEFAULT_GRID_HEIGHT,
        value_parser = clap::value_parser!(u16).range(3..=500)
    )]
    pub height: u16,
    /// Snake moves per second.
    #[arg(
        long,
        value_name = "TICKS",
        default_value_t = DEFAULT_TICKS_PER_SECOND,
        value_parser = clap::value_parser!(u32).range(1..=120)
    )]
    pub tps: u32,
    /// Seed for food placement and reset headings.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write logs to this file. Nothing is logged otherwise.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
    /// Log verbosity when --log-file is given.
    #[arg(long, value_name = "LEVEL", default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub ticks_per_second: u32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: DEFAULT_GRID_WIDTH as i32,
            height: DEFAULT_GRID_HEIGHT as i32,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            seed: None,
        }
    }
}

impl From<&Args> for GameConfig {
    fn from(args: &Args) -> Self {
        GameConfig {
            width: args.width as i32,
            height: args.height as i32,
            ticks_per_second: args.tps,
            seed: args.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_board() {
        let args = Args::try_parse_from(["wrapsnake"]).unwrap();

        assert_eq!(GameConfig::from(&args), GameConfig::default());
        assert_eq!(args.log_file, None);
        assert_eq!(args.log_level, LevelFilter::Info);
    }

    #[test]
    fn parses_every_option() {
        let args = Args::try_parse_from([
            "wrapsnake", "--width", "20", "--height", "10", "--tps", "15", "--seed", "42",
            "--log-file", "snake.log", "--log-level", "debug",
        ])
        .unwrap();

        let config = GameConfig::from(&args);
        assert_eq!(config.width, 20);
        assert_eq!(config.height, 10);
        assert_eq!(config.ticks_per_second, 15);
        assert_eq!(config.seed, Some(42));
        assert_eq!(args.log_file, Some(PathBuf::from("snake.log")));
        assert_eq!(args.log_level, LevelFilter::Debug);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Args::try_parse_from(["wrapsnake", "--tps", "0"]).is_err());
        assert!(Args::try_parse_from(["wrapsnake", "--width", "1"]).is_err());
    }

    #[test]
    fn rejects_boards_too_narrow_to_turn_on() {
        assert!(Args::try_parse_from(["wrapsnake", "--width", "2"]).is_err());
        assert!(Args::try_parse_from(["wrapsnake", "--height", "2"]).is_err());

        let args = Args::try_parse_from(["wrapsnake", "--width", "3", "--height", "3"]).unwrap();
        assert_eq!(GameConfig::from(&args).width, 3);
    }
}
