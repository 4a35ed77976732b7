use std::error::Error;

use goldswarm::experiments::{report, run_all, topology_comparison};
use goldswarm::plot::plot_cost_history;
use goldswarm::test_functions::GoldsteinPrice;

fn main() -> Result<(), Box<dyn Error>> {
    let records = run_all(&topology_comparison(), &GoldsteinPrice)?;
    for record in &records {
        report(record);
    }
    plot_cost_history(
        &records,
        "Topologies",
        "",
        "target/plots/topology_comparison.html",
    )?;
    Ok(())
}
