mod provenance;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use searchgeo::containment::contains_with_buffer;
use searchgeo::drift::{project, DriftScenario};
use searchgeo::intersect::{intersect_with, IntersectCfg, MAX_CORNERS};
use searchgeo::sector::{build_sector_polygon, SectorSpec};
use searchgeo::{GeoPoint, Polygon};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

use provenance::Payload;

#[derive(Parser)]
#[command(name = "searchgeo")]
#[command(about = "Search-region geometry: sectors, overlaps, containment, drift")]
struct Cmd {
    /// Log debug events from the geometry core to stderr
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build a sector polygon from a SectorSpec JSON file
    Sector {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Intersect two regions (polygon arrays or SectorSpec objects)
    Intersect {
        #[arg(long)]
        a: PathBuf,
        #[arg(long)]
        b: PathBuf,
        #[arg(long, value_enum, default_value_t = Corners::Crossings)]
        corners: Corners,
        /// Retained "LAT,LON" points appended by the extremes strategy
        #[arg(long, value_parser = parse_point)]
        retain: Vec<GeoPoint>,
        #[arg(long, default_value_t = MAX_CORNERS)]
        max_corners: usize,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Test whether a point lies in a region
    Contains {
        #[arg(long)]
        polygon: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, default_value_t = 0.0)]
        buffer_miles: f64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Project a landing point from a DriftScenario JSON file
    Drift {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Corners {
    Crossings,
    Extremes,
}

/// A region given either literally or as a sector to build.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Region {
    Polygon(Polygon),
    Sector(SectorSpec),
}

impl Region {
    fn into_polygon(self) -> Result<Polygon> {
        match self {
            Region::Polygon(p) => Ok(p),
            Region::Sector(spec) => Ok(build_sector_polygon(&spec)?),
        }
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Sector { input, out } => sector(&input, out.as_deref()),
        Action::Intersect {
            a,
            b,
            corners,
            retain,
            max_corners,
            out,
        } => {
            let cfg = corner_cfg(corners, retain, max_corners)?;
            intersect(&a, &b, &cfg, out.as_deref())
        }
        Action::Contains {
            polygon,
            lat,
            lon,
            buffer_miles,
            out,
        } => contains(
            &polygon,
            GeoPoint::try_new(lat, lon)?,
            buffer_miles,
            out.as_deref(),
        ),
        Action::Drift { input, out } => drift(&input, out.as_deref()),
        Action::Report => report(),
    }
}

/// `--retain` only feeds the extremes strategy; reject it elsewhere.
fn corner_cfg(
    corners: Corners,
    retain: Vec<GeoPoint>,
    max_corners: usize,
) -> Result<IntersectCfg> {
    let mut cfg = match corners {
        Corners::Extremes => IntersectCfg::extremes(retain),
        Corners::Crossings if !retain.is_empty() => {
            bail!("--retain is only used with --corners extremes")
        }
        Corners::Crossings => IntersectCfg::default(),
    };
    cfg.max_corners = max_corners;
    Ok(cfg)
}

fn sector(input: &Path, out: Option<&Path>) -> Result<()> {
    let spec: SectorSpec = read_json(input)?;
    tracing::info!(input = %input.display(), "sector");
    let poly = build_sector_polygon(&spec)?;
    let payload = Payload::new(
        "sector",
        json!({ "input": input.display().to_string(), "spec": spec }),
    );
    emit(&poly, out, payload)
}

fn intersect(a: &Path, b: &Path, cfg: &IntersectCfg, out: Option<&Path>) -> Result<()> {
    tracing::info!(a = %a.display(), b = %b.display(), "intersect");
    let pa = read_json::<Region>(a)?.into_polygon()?;
    let pb = read_json::<Region>(b)?.into_polygon()?;
    let result = intersect_with(&pa, &pb, cfg)?;
    if result.is_empty() {
        tracing::info!("regions do not overlap");
    }
    let payload = Payload::new(
        "intersect",
        json!({
            "a": a.display().to_string(),
            "b": b.display().to_string(),
            "maxCorners": cfg.max_corners,
            "strategy": format!("{:?}", cfg.strategy),
        }),
    );
    emit(&result, out, payload)
}

fn contains(polygon: &Path, point: GeoPoint, buffer_miles: f64, out: Option<&Path>) -> Result<()> {
    tracing::info!(polygon = %polygon.display(), "contains");
    let poly = read_json::<Region>(polygon)?.into_polygon()?;
    let inside = contains_with_buffer(point, &poly, buffer_miles);
    let payload = Payload::new(
        "contains",
        json!({
            "polygon": polygon.display().to_string(),
            "point": point,
            "bufferMiles": buffer_miles,
        }),
    );
    emit(&inside, out, payload)
}

fn drift(input: &Path, out: Option<&Path>) -> Result<()> {
    let scenario: DriftScenario = read_json(input)?;
    tracing::info!(input = %input.display(), "drift");
    let projection = project(&scenario)?;
    let payload = Payload::new(
        "drift",
        json!({ "input": input.display().to_string(), "scenario": scenario }),
    );
    emit(&projection, out, payload)
}

fn report() -> Result<()> {
    let doc = provenance::document(&Payload::new("report", json!({})), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

/// Print `value` as JSON; with `out`, also write it there plus a provenance sidecar.
#[track_caller]
fn emit<T: Serialize>(value: &T, out: Option<&Path>, payload: Payload) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{text}");
    if let Some(out) = out {
        write_output(out, &text)?;
        let prov = provenance::write_sidecar(out, payload)?;
        tracing::info!(out = %out.display(), provenance = %prov.display(), "wrote output");
    }
    Ok(())
}

fn write_output(out: &Path, text: &str) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out, text).with_context(|| format!("writing {}", out.display()))
}

fn parse_point(s: &str) -> Result<GeoPoint> {
    let Some((lat, lon)) = s.split_once(',') else {
        bail!("expected LAT,LON, got {s:?}");
    };
    let lat: f64 = lat.trim().parse().context("latitude")?;
    let lon: f64 = lon.trim().parse().context("longitude")?;
    Ok(GeoPoint::try_new(lat, lon)?)
}
