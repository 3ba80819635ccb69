use std::path::PathBuf;

use clap::Parser;
use nozzle_core::NozzleParams;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compare rocket nozzle contours and plot the isentropic flow they induce."
)]
struct Cli {
    /// JSON file overriding the reference nozzle parameters.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Log the summary without opening the chart window.
    #[arg(long)]
    no_window: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let params = match &cli.params {
        Some(path) => NozzleParams::load(path)?,
        None => NozzleParams::default(),
    };

    let analysis = nozzle_core::compute(&params)?;

    for profile in analysis.profiles.iter() {
        let exit = profile.radius.last().copied().unwrap_or(f64::NAN);
        info!(profile = %profile.label, exit_radius_mm = exit, "contour");
    }
    for (label, value) in nozzle_render::ui::summary_rows(&params, &analysis) {
        info!("{label}: {value}");
    }

    if cli.no_window {
        return Ok(());
    }
    nozzle_render::run(params, analysis)?;
    Ok(())
}
