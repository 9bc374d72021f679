//! Run entry points: validate the configuration, build the step sequence and
//! play it through a [`Scheduler`].

use tracing::{debug, info};

use crate::algorithms::{PathAlgorithm, Search, SortAlgorithm, Sorter};
use crate::error::Result;
use crate::grid::{Grid, Position};
use crate::scheduler::{CancelToken, Scheduler, Speed};
use crate::statistics::{RunStats, SearchOutcome, SearchReport, SortOutcome, SortReport};

/// Animates a pathfinding run over a copy of `grid`.
///
/// `on_snapshot` receives the working grid after every expansion and every
/// traced path cell. Configuration errors (unknown algorithm, bad speed,
/// unusable endpoints) are returned before anything is emitted.
pub async fn run_pathfinding<F>(
    algorithm: &str,
    grid: &Grid,
    start: Position,
    end: Position,
    speed: u8,
    on_snapshot: F,
    cancel: &CancelToken,
) -> Result<SearchReport>
where
    F: FnMut(&Grid),
{
    let algorithm: PathAlgorithm = algorithm.parse()?;
    let speed = Speed::new(speed)?;
    let mut search = Search::new(algorithm, grid, start, end, cancel.clone())?;
    debug!(%algorithm, ?start, ?end, speed = speed.get(), "pathfinding run started");

    let scheduler = Scheduler::new(speed, cancel.clone());
    let snapshots = scheduler.play(&mut search, on_snapshot).await;
    Ok(search_report(search, snapshots))
}

/// Animates a sorting run over a copy of `values`.
///
/// `on_snapshot` receives the sequence and counters after every write.
pub async fn run_sorting<T, F>(
    algorithm: &str,
    values: &[T],
    speed: u8,
    mut on_snapshot: F,
    cancel: &CancelToken,
) -> Result<SortReport<T>>
where
    T: PartialOrd + Clone + 'static,
    F: FnMut(&[T], &RunStats),
{
    let algorithm: SortAlgorithm = algorithm.parse()?;
    let speed = Speed::new(speed)?;
    let mut sorter = Sorter::new(algorithm, values, cancel.clone());
    debug!(%algorithm, len = values.len(), speed = speed.get(), "sorting run started");

    let scheduler = Scheduler::new(speed, cancel.clone());
    let snapshots = scheduler
        .play(&mut sorter, |step| on_snapshot(&step.values, &step.stats))
        .await;
    Ok(sort_report(sorter, snapshots))
}

/// Runs every pathfinding algorithm on the same grid without pacing.
pub fn compare_pathfinding(grid: &Grid, start: Position, end: Position) -> Result<Vec<SearchReport>> {
    PathAlgorithm::ALL
        .into_iter()
        .map(|algorithm| {
            let mut search = Search::new(algorithm, grid, start, end, CancelToken::new())?;
            let snapshots = search.by_ref().count();
            let report = search_report(search, snapshots);
            info!(%algorithm, visited = report.visited, path = report.path_length, "compared");
            Ok(report)
        })
        .collect()
}

/// Runs every sorting algorithm on the same input without pacing.
pub fn compare_sorting<T>(values: &[T]) -> Vec<SortReport<T>>
where
    T: PartialOrd + Clone + 'static,
{
    SortAlgorithm::ALL
        .into_iter()
        .map(|algorithm| {
            let mut sorter = Sorter::new(algorithm, values, CancelToken::new());
            let snapshots = sorter.by_ref().count();
            let report = sort_report(sorter, snapshots);
            info!(
                %algorithm,
                comparisons = report.stats.comparisons,
                swaps = report.stats.swaps,
                "compared"
            );
            report
        })
        .collect()
}

fn search_report(search: Search, snapshots: usize) -> SearchReport {
    // Still running means the scheduler stopped pulling on cancellation.
    let outcome = search.outcome().unwrap_or(SearchOutcome::Cancelled);
    let algorithm = search.algorithm().id();
    SearchReport::new(algorithm, outcome, search.into_grid(), snapshots)
}

fn sort_report<T>(sorter: Sorter<T>, snapshots: usize) -> SortReport<T>
where
    T: PartialOrd + Clone + 'static,
{
    SortReport {
        algorithm: sorter.algorithm().id(),
        outcome: sorter.outcome().unwrap_or(SortOutcome::Cancelled),
        stats: sorter.stats(),
        snapshots,
        values: sorter.into_values(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VisualizerError;

    #[tokio::test(start_paused = true)]
    async fn unknown_algorithm_emits_nothing() {
        let grid = Grid::new(3, 3);
        let mut seen = 0;
        let result = run_pathfinding(
            "teleport",
            &grid,
            Position::new(0, 0),
            Position::new(2, 2),
            50,
            |_| seen += 1,
            &CancelToken::new(),
        )
        .await;

        assert!(matches!(result, Err(VisualizerError::UnknownAlgorithm { .. })));
        assert_eq!(seen, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn speed_zero_is_rejected() {
        let result = run_sorting("bubble", &[2, 1], 0, |_, _| {}, &CancelToken::new()).await;
        assert!(matches!(result, Err(VisualizerError::InvalidSpeed(0))));
    }

    #[tokio::test(start_paused = true)]
    async fn sorting_run_reports_every_step() {
        let mut frames = Vec::new();
        let report = run_sorting(
            "quick",
            &[5, 3, 1, 4, 2],
            100,
            |values, stats| frames.push((values.to_vec(), stats.swaps)),
            &CancelToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(report.outcome, SortOutcome::Sorted);
        assert_eq!(report.values, vec![1, 2, 3, 4, 5]);
        assert_eq!(report.snapshots, 5);
        assert_eq!(frames.len(), 5);
        assert_eq!(frames.last().map(|f| f.1), Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn observer_can_cancel_a_search() {
        let grid = Grid::new(8, 8);
        let cancel = CancelToken::new();
        let stopper = cancel.clone();
        let mut seen = 0;
        let report = run_pathfinding(
            "dijkstra",
            &grid,
            Position::new(0, 0),
            Position::new(7, 7),
            100,
            |_| {
                seen += 1;
                if seen == 3 {
                    stopper.cancel();
                }
            },
            &cancel,
        )
        .await
        .unwrap();

        assert_eq!(report.outcome, SearchOutcome::Cancelled);
        assert_eq!(report.snapshots, 3);
        assert_eq!(report.path_length, 0);
    }

    #[test]
    fn comparison_covers_every_algorithm() {
        let grid = Grid::new(5, 5);
        let reports = compare_pathfinding(&grid, Position::new(0, 0), Position::new(4, 4)).unwrap();
        let ids: Vec<_> = reports.iter().map(|r| r.algorithm).collect();
        assert_eq!(ids, vec!["bfs", "dfs", "dijkstra", "astar"]);
        assert!(reports.iter().all(|r| r.outcome == SearchOutcome::Found));

        let sorts = compare_sorting(&[3, 1, 2]);
        assert_eq!(sorts.len(), 5);
        assert!(sorts.iter().all(|r| r.values == vec![1, 2, 3]));
    }
}
