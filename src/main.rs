//! Scale Voyage headless demo
//!
//! Solves the ordering puzzle through the public API, then walks the journey
//! end to end at the fixed simulation timestep, printing a render-frame
//! summary at each stage. Rendering proper is an external collaborator; this
//! binary only exercises the core.

use scale_voyage::consts::SIM_DT;
use scale_voyage::sim::{OrderingPuzzle, PuzzlePhase};
use scale_voyage::{Journey, StageCatalog};

fn main() {
    env_logger::init();

    let catalog = StageCatalog::builtin();
    if let Err(err) = catalog.validate() {
        log::error!("stage catalog rejected: {err}");
        std::process::exit(1);
    }

    // Seed from wall clock; any seed deals a fair permutation
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut puzzle = OrderingPuzzle::new(&catalog, seed);
    log::info!(
        "puzzle dealt (seed {seed}): {:?}",
        puzzle
            .unplaced()
            .iter()
            .map(|i| i.id)
            .collect::<Vec<_>>()
    );

    // Place every tile in ascending-magnitude order, the way a player would
    let mut answer: Vec<_> = puzzle.unplaced().to_vec();
    answer.sort_by(|a, b| a.magnitude.total_cmp(&b.magnitude));
    for item in &answer {
        puzzle.select(item.id);
    }
    match puzzle.validate() {
        PuzzlePhase::Success => log::info!("puzzle solved, starting journey"),
        phase => {
            log::error!("expected Success, puzzle reported {phase:?}");
            std::process::exit(1);
        }
    }

    let mut journey = Journey::new(catalog);
    journey.set_viewport(1920.0, 1080.0);
    journey.start();

    loop {
        // Two simulated seconds per stage lets the smoothing mostly settle
        for _ in 0..240 {
            journey.tick(SIM_DT);
        }

        let frame = journey.frame();
        let stage = journey.active_stage().map(|s| s.label).unwrap_or("?");
        println!("=== {stage} ===");
        match serde_json::to_string_pretty(&frame) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("frame serialization failed: {err}"),
        }

        let at_end = journey.stage_index() == Some(journey.catalog().len() - 1);
        if at_end {
            break;
        }
        journey.advance();
    }
}
