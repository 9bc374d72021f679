use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use algo_stepper::config::{Config, Mode, PathArgs, SortArgs};
use algo_stepper::{
    compare_pathfinding, compare_sorting, run_pathfinding, run_sorting, CancelToken, Grid, Result,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = Config::parse();

    // Ctrl+C stops the active run at its next step boundary.
    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = match &config.mode {
        Mode::Path(args) => run_path(&config, args, &cancel, &mut rng).await,
        Mode::Sort(args) => run_sort(&config, args, &cancel, &mut rng).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_path(config: &Config, args: &PathArgs, cancel: &CancelToken, rng: &mut StdRng) -> Result<()> {
    let (start, end) = (args.start(), args.end());
    let mut grid = Grid::new(args.width, args.height);
    grid.scatter_walls(args.num_walls, &[start, end], rng);

    println!("Grid size: {}x{}", grid.width(), grid.height());
    println!("Walls: {}", grid.wall_count());
    println!("Algorithm: {}", args.algorithm);
    let optimal = grid.shortest_hops(start, end);

    if args.algorithm == "all" {
        let reports = compare_pathfinding(&grid, start, end)?;
        println!("\n=== ALGORITHM COMPARISON ===");
        println!("{:<10} {:>10} {:>8} {:>8}", "Algorithm", "Outcome", "Visited", "Path");
        for report in &reports {
            println!(
                "{:<10} {:>10} {:>8} {:>8}",
                report.algorithm,
                report.outcome.to_string(),
                report.visited,
                report.path_length
            );
        }
        print_optimal(optimal);
        return Ok(());
    }

    let visualize = !config.no_visualization;
    let speed = if visualize { config.speed } else { 100 };
    let mut step = 0;
    let report = run_pathfinding(
        &args.algorithm,
        &grid,
        start,
        end,
        speed,
        |snapshot| {
            step += 1;
            if visualize {
                clear_screen();
                println!("=== PATHFINDING ===");
                println!("Algorithm: {} | Step: {}", args.algorithm, step);
                print!("{}", snapshot.render(start, end));
            }
        },
        cancel,
    )
    .await?;

    println!("\n=== FINAL RESULTS ===");
    print!("{}", report);
    print_optimal(optimal);
    Ok(())
}

async fn run_sort(config: &Config, args: &SortArgs, cancel: &CancelToken, rng: &mut StdRng) -> Result<()> {
    let values: Vec<f64> = if args.values.is_empty() {
        (0..args.size).map(|_| rng.gen_range(1.0..100.0)).collect()
    } else {
        args.values.clone()
    };

    println!("Values: {}", values.len());
    println!("Algorithm: {}", args.algorithm);

    if args.algorithm == "all" {
        println!("\n=== ALGORITHM COMPARISON ===");
        println!("{:<10} {:>12} {:>8}", "Algorithm", "Comparisons", "Swaps");
        for report in compare_sorting(&values) {
            println!(
                "{:<10} {:>12} {:>8}",
                report.algorithm, report.stats.comparisons, report.stats.swaps
            );
        }
        return Ok(());
    }

    let visualize = !config.no_visualization;
    let speed = if visualize { config.speed } else { 100 };
    let report = run_sorting(
        &args.algorithm,
        &values,
        speed,
        |snapshot, stats| {
            if visualize {
                clear_screen();
                println!("=== SORTING ===");
                println!("Algorithm: {} | {}", args.algorithm, stats);
                print!("{}", render_bars(snapshot));
            }
        },
        cancel,
    )
    .await?;

    println!("\n=== FINAL RESULTS ===");
    print!("{}", report);
    if values.len() <= 40 {
        println!("Result: {:?}", report.values);
    }
    Ok(())
}

fn print_optimal(optimal: Option<usize>) {
    match optimal {
        Some(hops) => println!("Optimal path length: {}", hops),
        None => println!("No path exists between start and end"),
    }
}

/// One horizontal bar per value, scaled to the largest magnitude.
fn render_bars(values: &[f64]) -> String {
    const WIDTH: f64 = 60.0;
    let max = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    values
        .iter()
        .map(|v| {
            let len = if max > 0.0 { (v.abs() / max * WIDTH).round() as usize } else { 0 };
            format!("{:>8.2} {}\n", v, "#".repeat(len))
        })
        .collect()
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}
