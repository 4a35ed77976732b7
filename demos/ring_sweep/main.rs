use std::error::Error;

use goldswarm::experiments::{hyperparameter_sweep, report, run_all, Hyperparameter};
use goldswarm::plot::plot_cost_history;
use goldswarm::test_functions::GoldsteinPrice;

fn main() -> Result<(), Box<dyn Error>> {
    for hyperparameter in [Hyperparameter::C1, Hyperparameter::C2, Hyperparameter::Omega] {
        let name = hyperparameter.name();
        println!("Sweeping {name}");
        let records = run_all(&hyperparameter_sweep(hyperparameter), &GoldsteinPrice)?;
        for record in &records {
            report(record);
        }
        plot_cost_history(
            &records,
            &format!("LocalBestPSO ({name})"),
            name,
            format!("target/plots/ring_sweep_{name}.html"),
        )?;
    }
    Ok(())
}
