use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use stadium::{EyePosture, Section, SectionCfg};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod table;

use provenance::Payload;

#[derive(Parser)]
#[command(name = "stadium-cli")]
#[command(about = "Seating bowl cross-section solver")]
struct Cmd {
    /// Optional run tag; propagated to logs and provenance
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build a section from a JSON configuration and write the results as JSON
    Run {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Export per-row results (riser, eye point, C-value) to .csv or .parquet
    Table {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = Posture::Seated)]
        posture: Posture,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Posture {
    Seated,
    Standing,
}

impl From<Posture> for EyePosture {
    fn from(p: Posture) -> Self {
        match p {
            Posture::Seated => EyePosture::Seated,
            Posture::Standing => EyePosture::Standing,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run { input, out } => run(&input, &out, cmd.tag),
        Action::Table {
            input,
            out,
            posture,
        } => export_table(&input, &out, posture.into(), cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn load_section(input: &Path) -> Result<Section> {
    let bytes = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let cfg: SectionCfg = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing section config {}", input.display()))?;
    let section = cfg
        .build()
        .with_context(|| format!("building section from {}", input.display()))?;
    tracing::info!(
        tiers = section.tiers.len(),
        rows = section.rows().count(),
        "section built"
    );
    Ok(section)
}

fn ensure_parent(out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn run(input: &Path, out: &Path, tag: Option<String>) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), tag = ?tag, "run");
    let section = load_section(input)?;

    ensure_parent(out)?;
    std::fs::write(out, serde_json::to_vec_pretty(&section)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let params = serde_json::json!({
        "command": "run",
        "tiers": section.tiers.len(),
        "pof": [section.pof.x, section.pof.y],
    });
    let payload = Payload::new(params, tag).with_input(input.to_string_lossy());
    provenance::write_sidecar(out, payload)?;
    Ok(())
}

fn export_table(input: &Path, out: &Path, posture: EyePosture, tag: Option<String>) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), ?posture, tag = ?tag, "table");
    let section = load_section(input)?;
    let mut df = table::row_frame(&section, posture)?;
    tracing::info!(rows = df.height(), cols = df.width(), "row_table_shape");

    ensure_parent(out)?;
    table::write_frame(&mut df, out)?;

    let params = serde_json::json!({
        "command": "table",
        "posture": posture,
        "shape": df.shape(),
    });
    let payload = Payload::new(params, tag).with_input(input.to_string_lossy());
    provenance::write_sidecar(out, payload)?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let mut obj = provenance::header(tag.as_deref());
    obj["params"] = serde_json::json!({});
    obj["outputs"] = serde_json::json!([]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
