use std::error::Error;

use goldswarm::core::CtrlCAbortSignal;
use goldswarm::experiments::{contour_run, report, run_experiment_with_abort, TopologyKind};
use goldswarm::plot::{plot_contour, DEFAULT_LIMITS};
use goldswarm::test_functions::GoldsteinPrice;

fn main() -> Result<(), Box<dyn Error>> {
    let record = run_experiment_with_abort(
        &contour_run(TopologyKind::Global, true),
        &GoldsteinPrice,
        CtrlCAbortSignal::new(),
    )?;
    report(&record);
    plot_contour(
        &record,
        &GoldsteinPrice,
        DEFAULT_LIMITS,
        "target/plots/gbest_contour.html",
    )?;

    // Export the history to a Python .pkl file to visualize via matplotlib
    record.history.to_pickle("target/plots/gbest_contour.pkl")?;
    Ok(())
}
