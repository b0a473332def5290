//! Per-row result table and its CSV/Parquet export.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use stadium::{EyePosture, Section};
use std::fs::File;
use std::path::Path;

/// One row per spectator, in tier then row order. `riser` is null on the
/// last row of each tier.
pub fn row_frame(section: &Section, posture: EyePosture) -> Result<DataFrame> {
    let rows: Vec<_> = section.rows().collect();
    let eyes: Vec<_> = match posture {
        EyePosture::Seated => rows.iter().map(|r| (r.eye, r.cvalue)).collect(),
        EyePosture::Standing => rows
            .iter()
            .map(|r| (r.eye_standing, r.cvalue_standing))
            .collect(),
    };
    let df = df!(
        "tier" => rows.iter().map(|r| r.tier as u32).collect::<Vec<_>>(),
        "row" => rows.iter().map(|r| r.row as u32).collect::<Vec<_>>(),
        "riser" => rows.iter().map(|r| r.riser_height).collect::<Vec<_>>(),
        "eye_x" => eyes.iter().map(|(p, _)| p.x).collect::<Vec<_>>(),
        "eye_y" => eyes.iter().map(|(p, _)| p.y).collect::<Vec<_>>(),
        "cvalue" => eyes.iter().map(|(_, c)| *c).collect::<Vec<_>>(),
    )?;
    Ok(df)
}

/// Write `df` as CSV or Parquet, chosen by the extension of `out`.
pub fn write_frame(df: &mut DataFrame, out: &Path) -> Result<()> {
    let ext = out
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let create = || File::create(out).with_context(|| format!("creating {}", out.display()));
    match ext.as_deref() {
        Some("csv") => {
            let mut file = create()?;
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(df)
                .with_context(|| format!("writing {}", out.display()))?;
        }
        Some("parquet") => {
            ParquetWriter::new(create()?)
                .finish(df)
                .with_context(|| format!("writing {}", out.display()))?;
        }
        _ => bail!("unsupported table format: {} (use .csv or .parquet)", out.display()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stadium::TierCfg;
    use std::fs;
    use tempfile::tempdir;

    fn demo() -> Section {
        let first = TierCfg {
            start_pt: stadium::Pt2::new(6_000.0, 2_000.0),
            round_to: 10.0,
            ..TierCfg::uniform(4, 800.0)
        };
        let second = TierCfg {
            build_from_previous_tier: true,
            ..TierCfg::uniform(3, 850.0)
        };
        Section::with_xy_plane(vec![first, second]).unwrap()
    }

    #[test]
    fn frame_has_one_row_per_spectator() {
        let s = demo();
        let df = row_frame(&s, EyePosture::Seated).unwrap();
        assert_eq!(df.shape(), (7, 6));
        // one null riser per tier
        assert_eq!(df.column("riser").unwrap().null_count(), 2);
    }

    #[test]
    fn standing_frame_uses_standing_eyes() {
        let s = demo();
        let df = row_frame(&s, EyePosture::Standing).unwrap();
        let y = df.column("eye_y").unwrap().f64().unwrap().get(0).unwrap();
        assert_eq!(y, s.tiers[0].spectators[0].loc_standing.y);
    }

    #[test]
    fn writes_csv_and_parquet() {
        let dir = tempdir().unwrap();
        let mut df = row_frame(&demo(), EyePosture::Seated).unwrap();

        let csv = dir.path().join("rows.csv");
        write_frame(&mut df, &csv).unwrap();
        let text = fs::read_to_string(&csv).unwrap();
        assert!(text.starts_with("tier,row,riser,eye_x,eye_y,cvalue"));
        assert_eq!(text.lines().count(), 8);

        let pq = dir.path().join("rows.parquet");
        write_frame(&mut df, &pq).unwrap();
        let back = ParquetReader::new(File::open(&pq).unwrap()).finish().unwrap();
        assert_eq!(back.shape(), df.shape());
    }

    #[test]
    fn demo_config_builds() {
        let cfg: stadium::SectionCfg =
            serde_json::from_str(include_str!("../../../demos/bowl.json")).unwrap();
        let s = cfg.build().unwrap();
        let df = row_frame(&s, EyePosture::Standing).unwrap();
        assert_eq!(df.height(), 12 + 8);
        assert!(s.tiers[1].spectators.iter().all(|sp| sp.separation));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempdir().unwrap();
        let mut df = row_frame(&demo(), EyePosture::Seated).unwrap();
        assert!(write_frame(&mut df, &dir.path().join("rows.txt")).is_err());
    }
}
