use clap::{Args, Parser, Subcommand};

use crate::grid::Position;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub mode: Mode,

    /// 1 (slowest) to 100 (fastest)
    #[arg(long, global = true, default_value_t = 50)]
    pub speed: u8,

    #[arg(long, global = true, default_value_t = false)]
    pub no_visualization: bool,

    /// Seed for random walls or values
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Mode {
    /// Animate a grid search
    Path(PathArgs),
    /// Animate a sort
    Sort(SortArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// bfs, dfs, dijkstra, astar or all
    #[arg(long, default_value = "bfs")]
    pub algorithm: String,

    #[arg(long, default_value_t = 40)]
    pub width: usize,

    #[arg(long, default_value_t = 30)]
    pub height: usize,

    #[arg(long, default_value_t = 200)]
    pub num_walls: usize,

    #[arg(long, default_value_t = 1)]
    pub start_x: usize,

    #[arg(long, default_value_t = 1)]
    pub start_y: usize,

    #[arg(long, default_value_t = 38)]
    pub end_x: usize,

    #[arg(long, default_value_t = 28)]
    pub end_y: usize,
}

impl PathArgs {
    pub fn start(&self) -> Position {
        Position::new(self.start_x, self.start_y)
    }

    pub fn end(&self) -> Position {
        Position::new(self.end_x, self.end_y)
    }
}

#[derive(Args, Debug, Clone)]
pub struct SortArgs {
    /// bubble, insertion, selection, merge, quick or all
    #[arg(long, default_value = "bubble")]
    pub algorithm: String,

    /// Number of random values when --values is not given
    #[arg(long, default_value_t = 30)]
    pub size: usize,

    /// Explicit comma-separated input, e.g. --values 5,3,1,4,2
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub values: Vec<f64>,
}
