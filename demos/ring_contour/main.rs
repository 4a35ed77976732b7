use std::error::Error;

use goldswarm::core::CtrlCAbortSignal;
use goldswarm::experiments::{contour_run, report, run_experiment_with_abort, TopologyKind};
use goldswarm::plot::{plot_contour, DEFAULT_LIMITS};
use goldswarm::test_functions::GoldsteinPrice;

fn main() -> Result<(), Box<dyn Error>> {
    // Unbounded local-best swarm, so some particles may leave the plotted square
    let record = run_experiment_with_abort(
        &contour_run(TopologyKind::RING, false),
        &GoldsteinPrice,
        CtrlCAbortSignal::new(),
    )?;
    report(&record);
    plot_contour(
        &record,
        &GoldsteinPrice,
        DEFAULT_LIMITS,
        "target/plots/ring_contour.html",
    )?;
    Ok(())
}
