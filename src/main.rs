use anyhow::Result;
use bhmie::{output, settings, solver};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = settings::load_config()?;
    println!("{}", settings);

    let request = settings.request()?;
    let result = solver::solve(&request)?;
    result.print();

    output::writeup(&result, &settings.directory)?;
    println!("Results written to {:?}", settings.directory);

    Ok(())
}
