//! Sequential batch runs for `wikigame batch`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::core::types::{GameRequest, GameResult};
use crate::game::GameEngine;
use crate::io::batch_file::{ReportFormat, read_batch_file, write_report};
use crate::io::fetcher::PageFetcher;

/// Run every request in order on one engine, one run at a time.
///
/// A failing run yields its own terminal result and never stops the batch.
/// `on_result` is called after each run with the record index.
pub fn run_batch<F: PageFetcher, O: FnMut(usize, &GameResult)>(
    engine: &mut GameEngine<F>,
    requests: &[GameRequest],
    mut on_result: O,
) -> Vec<GameResult> {
    let total = requests.len();
    requests
        .iter()
        .enumerate()
        .map(|(index, request)| {
            info!(record = index + 1, total, start = %request.start_title, "running record");
            let result = engine.run_game(request);
            on_result(index, &result);
            result
        })
        .collect()
}

/// Read `input`, run the batch, and write the report to `output`.
#[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn run_batch_file<F: PageFetcher, O: FnMut(usize, &GameResult)>(
    engine: &mut GameEngine<F>,
    input: &Path,
    output: &Path,
    format: ReportFormat,
    on_result: O,
) -> Result<Vec<GameResult>> {
    let defaults = engine.default_request();
    let requests = read_batch_file(input, &defaults).context("load batch input")?;
    info!(records = requests.len(), "batch loaded");
    let results = run_batch(engine, &requests, on_result);
    write_report(output, &results, format).context("write batch report")?;
    Ok(results)
}
