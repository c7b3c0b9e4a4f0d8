//! pacgrid: watch an agent collect every target on a grid map.
//!
//! ```text
//! pacgrid [MAP] [--strategy dfs|bfs|astar] [--headless] [--step]
//! ```
//!
//! Without a map file the bundled sample maze is used.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use pacgrid_core::Grid;
use pacgrid_crossterm::{RenderConfig, TermRenderer};
use pacgrid_paths::{Backtrack, OnUnreachable, RunConfig, RunReport, Searcher, Strategy};

const SAMPLE_MAP: &str = include_str!("maps/classic.txt");

#[derive(Parser)]
#[command(
    name = "pacgrid",
    version,
    about = "Collect every target on a grid map with DFS, BFS or A*"
)]
struct Cli {
    /// Map file: rows of 0 (path), 1 (wall), 2 (start), 3 (target).
    map: Option<PathBuf>,

    /// Search strategy: dfs, bfs or astar.
    #[arg(short, long, default_value_t = Strategy::Bfs)]
    strategy: Strategy,

    /// Run every strategy headless on the map and compare.
    #[arg(long, conflicts_with = "strategy")]
    compare: bool,

    /// Clear visited marks when depth-first search backtracks.
    #[arg(long)]
    clear_marks: bool,

    /// Skip unreachable targets instead of stopping the run.
    #[arg(long)]
    skip_unreachable: bool,

    /// Do not draw; print only the report.
    #[arg(long)]
    headless: bool,

    /// Milliseconds between frames.
    #[arg(short, long, default_value_t = 100)]
    delay_ms: u64,

    /// Advance one frame per key press (q fast-forwards).
    #[arg(long)]
    step: bool,

    /// Hide visited marks while drawing.
    #[arg(long)]
    no_overlay: bool,

    /// Draw without colours.
    #[arg(long)]
    no_color: bool,

    /// Print the report as JSON.
    #[cfg(feature = "json")]
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        let backtrack = if self.clear_marks {
            Backtrack::ClearMarks
        } else {
            Backtrack::KeepMarks
        };
        let on_unreachable = if self.skip_unreachable {
            OnUnreachable::Skip
        } else {
            OnUnreachable::Abort
        };
        RunConfig::new(self.strategy)
            .with_backtrack(backtrack)
            .with_on_unreachable(on_unreachable)
    }

    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            delay: Duration::from_millis(self.delay_ms),
            step_on_key: self.step,
            show_overlay: !self.no_overlay,
            color: !self.no_color,
        }
    }

    fn load_grid(&self) -> Result<Grid, Box<dyn std::error::Error>> {
        let text = match &self.map {
            Some(path) => {
                log::info!("loading map {}", path.display());
                fs::read_to_string(path)?
            }
            None => SAMPLE_MAP.to_string(),
        };
        Ok(Grid::parse(&text)?)
    }
}

#[cfg_attr(not(feature = "json"), allow(unused_variables))]
fn print_report(cli: &Cli, report: &RunReport) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "json")]
    if cli.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "{}: {} after {} steps, {} moves",
        report.strategy,
        if report.done { "all targets collected" } else { "targets left" },
        report.steps,
        report.moves()
    );
    for (i, leg) in report.collected.iter().enumerate() {
        println!("  {:>2}. {} in {} moves", i + 1, leg.target, leg.steps);
    }
    for p in &report.skipped {
        println!("  skipped {p}");
    }
    Ok(())
}

fn compare(cli: &Cli, grid: &Grid) -> Result<(), Box<dyn std::error::Error>> {
    let mut searcher = Searcher::for_grid(grid);
    println!("{:<6} {:>6} {:>6}", "", "steps", "moves");
    for strategy in Strategy::ALL {
        let mut g = grid.clone();
        let config = cli.run_config().with_strategy(strategy);
        match searcher.run(&mut g, &config, &mut ()) {
            Ok(r) => println!("{:<6} {:>6} {:>6}", strategy, r.steps, r.moves()),
            Err(e) => println!("{strategy:<6} {e}"),
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    // Drawing owns the terminal, so keep log output to warnings unless asked.
    let default_filter = if cli.headless || cli.compare { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut grid = cli.load_grid()?;
    if cli.compare {
        return compare(&cli, &grid);
    }

    let config = cli.run_config();
    let mut searcher = Searcher::for_grid(&grid);
    let result = if cli.headless {
        searcher.run(&mut grid, &config, &mut ())
    } else {
        let mut renderer = TermRenderer::stdout(cli.render_config());
        renderer.start()?;
        let result = searcher.run(&mut grid, &config, &mut renderer);
        renderer.finish()?;
        result
    };

    let report = result?;
    print_report(&cli, &report)?;
    println!("{grid}");
    Ok(())
}
