use std::error::Error;

use goldswarm::experiments::{bounds_comparison, report, run_all, TopologyKind};
use goldswarm::plot::plot_cost_history;
use goldswarm::test_functions::GoldsteinPrice;

fn main() -> Result<(), Box<dyn Error>> {
    // The same global-best swarm, once free and once confined to (-2, 2) x (-2, 2)
    let records = run_all(&bounds_comparison(TopologyKind::Global), &GoldsteinPrice)?;
    for record in &records {
        report(record);
    }
    plot_cost_history(
        &records,
        "GlobalBestPSO",
        "",
        "target/plots/gbest_bounds.html",
    )?;
    Ok(())
}
