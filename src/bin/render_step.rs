// Render Step Binary Entry Point
//
// Purpose: Build a step (or a whole workflow document) from JSON and print the view data
// Usage: cargo run --bin render_step -- <step-or-app.json> [strings.json]

use anyhow::{bail, Context};
use serde_json::Value;
use step_render::steps::{build_all, build_step_view, WorkflowDocument};
use step_render::{build_step_with, IdentityLocalizer, Localizer, RenderConfig, StepPayload, TableLocalizer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "step_render=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(input_path) = args.next() else {
        bail!("usage: render_step <step-or-app.json> [strings.json]");
    };
    let strings_path = args.next();

    let config = RenderConfig::from_env().context("loading render config")?;

    let localizer: Box<dyn Localizer + Sync> = match &strings_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
            let table = TableLocalizer::from_json_str(&raw)?;
            tracing::info!("Loaded {} strings from {}", table.len(), path);
            Box::new(table)
        }
        None => Box::new(IdentityLocalizer),
    };

    let raw = std::fs::read_to_string(&input_path).with_context(|| format!("reading {}", input_path))?;
    let input: Value = serde_json::from_str(&raw).with_context(|| format!("parsing {}", input_path))?;

    let views = if input.get("steps").is_some() {
        let document: WorkflowDocument = serde_json::from_value(input)?;
        build_all(&document, &*localizer, &config)
            .into_iter()
            .filter_map(|result| match result {
                Ok(step) => Some(build_step_view(&step)),
                Err(e) => {
                    tracing::error!("{}", e);
                    None
                }
            })
            .collect::<Vec<_>>()
    } else {
        let payload = StepPayload::from_value(input)?;
        let step = build_step_with(&payload, &*localizer, &config)?;
        vec![build_step_view(&step)]
    };

    println!("{}", serde_json::to_string_pretty(&views)?);
    Ok(())
}
