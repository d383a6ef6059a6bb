use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use blockbands::cli::{CliArgs, OutputFormat, RunConfig};
use blockbands::decorate::{LayerKind, RenderOutput};
use blockbands::watch::FileWatcher;
use blockbands::{Colorizer, Document};

fn main() -> Result<()> {
    blockbands::tracing::init();

    let config = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    let mut colorizer = Colorizer::new(config.colorizer.clone());
    run_once(&mut colorizer, &config)?;

    if config.watch {
        let watcher = FileWatcher::new(&config.path, Duration::from_millis(200))
            .with_context(|| format!("Failed to watch {}", config.path.display()))?;
        while watcher.wait_for_change() {
            tracing::debug!("{} changed", watcher.path().display());
            if let Err(e) = run_once(&mut colorizer, &config) {
                tracing::warn!("Refresh failed: {:#}", e);
            }
        }
    }

    Ok(())
}

fn run_once(colorizer: &mut Colorizer, config: &RunConfig) -> Result<()> {
    let mut doc = Document::from_path(&config.path)
        .with_context(|| format!("Failed to read {}", config.path.display()))?;
    if let Some(language) = config.language {
        doc.language = language;
    }

    let output = colorizer.refresh(&doc);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match config.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &output).context("Failed to write JSON")?;
            writeln!(out)?;
        }
        OutputFormat::Text => write_text(&mut out, &doc, &output)?,
    }
    out.flush()?;
    Ok(())
}

fn write_text(out: &mut impl Write, doc: &Document, output: &RenderOutput) -> Result<()> {
    let name = doc
        .file_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    writeln!(out, "{} ({})", name, doc.language.display_name())?;

    for range in &output.exclusions {
        writeln!(out, "  excluded {}..={}", range.start + 1, range.end + 1)?;
    }
    for marker in &output.unclosed {
        writeln!(out, "  unclosed region '{}' at line {}", marker.label, marker.line + 1)?;
    }

    for layer in output.painted_layers() {
        let kind = match layer.style.layer {
            LayerKind::Band => "band",
            LayerKind::Region => "region",
        };
        writeln!(
            out,
            "  [{}] {} {} ({} spans)",
            layer.handle.0,
            kind,
            layer.style.color,
            layer.entries.len()
        )?;
        for entry in layer.entries.iter().filter_map(|e| e.annotation.as_ref().map(|a| (e, a))) {
            writeln!(out, "      {:>5}  {}", entry.0.range.line + 1, entry.1)?;
        }
    }

    writeln!(out, "  jump list:")?;
    for jump in &output.jump_list {
        writeln!(out, "      {:>5}  {}", jump.line + 1, jump.label)?;
    }
    Ok(())
}
