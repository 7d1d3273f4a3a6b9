use std::path::Path;

use anyhow::Context;
use clap::Parser;
use takeoffkit::{
    canvas_options, format_summary, init_logging, Cli, Config, OffscreenSurface, Session,
    TakeoffCanvas, TakeoffSummary,
};

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => match Config::default_path() {
            Ok(path) => Config::load_or_default(&path)
                .with_context(|| format!("failed to load config {}", path.display())),
            Err(e) => {
                tracing::debug!("No config directory ({}), using defaults", e);
                Ok(Config::default())
            }
        },
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    let config = load_config(cli.config.as_deref())?;

    let session = Session::load(&cli.session).await?;
    let mut canvas =
        TakeoffCanvas::initialize(canvas_options(&config), Box::new(OffscreenSurface::new()))
            .await
            .context("failed to initialize drawing surface")?;

    let report = session.replay(&mut canvas).await;
    canvas.render();

    let summary = TakeoffSummary::from(&canvas);
    print!("{}", format_summary(&summary, &config.takeoff.currency_symbol));

    if !report.is_clean() {
        for (index, message) in &report.failures {
            eprintln!("step {}: {}", index, message);
        }
        tracing::warn!(
            "{} of {} steps failed",
            report.failures.len(),
            session.steps.len()
        );
    }

    canvas.dispose();
    Ok(())
}
