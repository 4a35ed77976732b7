use std::error::Error;

use goldswarm::experiments::{bounds_comparison, report, run_all, TopologyKind};
use goldswarm::plot::plot_cost_history;
use goldswarm::test_functions::GoldsteinPrice;

fn main() -> Result<(), Box<dyn Error>> {
    // Von Neumann neighbourhoods (p = 2, r = 1) with and without bounds
    let records = run_all(
        &bounds_comparison(TopologyKind::VON_NEUMANN),
        &GoldsteinPrice,
    )?;
    for record in &records {
        report(record);
    }
    plot_cost_history(
        &records,
        "VonNeumann",
        "",
        "target/plots/von_neumann_bounds.html",
    )?;
    Ok(())
}
