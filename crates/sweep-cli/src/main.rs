// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sweep CLI
//!
//! Evaluates rigid and articulated motions read from JSON scene files and
//! prints sampled poses together with their conservative bounds.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::de::DeserializeOwned;
use sweep_chain::{Model, ModelBound, Movement};
use sweep_interp::InterpolationFactory;
use sweep_math::{Transform, Vec3};
use sweep_motion::{
    swept_aabb, AabbBoundVisitor, InterpMotion, Motion, ScrewMotion, SplineMotion,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod scene;

use scene::{ChainScene, Probe, RigidScene, SplineScene};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Screw motion between two poses
    Screw { scene: PathBuf },
    /// Linear interpolation between two poses
    Interp { scene: PathBuf },
    /// Cubic B-spline motion
    Spline { scene: PathBuf },
    /// Motion bounds of every link of an articulated model
    Chain { scene: PathBuf },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let mut out = std::io::stdout().lock();
    match args.cmd {
        Command::Screw { scene } => {
            let scene: RigidScene = read_scene(&scene)?;
            let motion = ScrewMotion::with_settings(
                scene.start.to_transform(),
                scene.end.to_transform(),
                &scene.probe.settings,
            );
            report_rigid(&mut out, &motion.into(), &scene.probe)
        }
        Command::Interp { scene } => {
            let scene: RigidScene = read_scene(&scene)?;
            let motion = InterpMotion::with_reference_point(
                scene.start.to_transform(),
                scene.end.to_transform(),
                Vec3::from(scene.reference_point),
            );
            report_rigid(&mut out, &motion.into(), &scene.probe)
        }
        Command::Spline { scene } => {
            let scene: SplineScene = read_scene(&scene)?;
            let motion = SplineMotion::with_settings(
                scene.translation_points.map(Vec3::from),
                scene.rotation_points.map(Vec3::from),
                &scene.probe.settings,
            );
            report_rigid(&mut out, &motion.into(), &scene.probe)
        }
        Command::Chain { scene } => {
            let scene: ChainScene = read_scene(&scene)?;
            report_chain(&mut out, &scene)
        }
    }
}

fn read_scene<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading scene {}", path.display()))?;
    let scene = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing scene {}", path.display()))?;
    info!(path = %path.display(), "scene loaded");
    Ok(scene)
}

fn format_pose(tf: &Transform) -> String {
    let [x, y, z] = tf.translation().to_array();
    let [qx, qy, qz, qw] = tf.rotation().to_array();
    format!("t=({x:.6}, {y:.6}, {z:.6}) q=({qx:.6}, {qy:.6}, {qz:.6}, {qw:.6})")
}

fn report_rigid(out: &mut impl Write, motion: &Motion, probe: &Probe) -> Result<()> {
    probe.settings.validate().context("invalid motion settings")?;
    let shape = probe.shape.to_aabb();
    let visitor = AabbBoundVisitor::new(shape, Vec3::from(probe.direction));
    let mut cache = motion.initial_cache()?;
    let samples = probe.samples.max(1);

    writeln!(out, "{} motion", motion.kind_name())?;
    for k in 0..=samples {
        let t = f64::from(k) / f64::from(samples);
        motion.integrate(&mut cache, t, 1.0)?;
        let rate = motion.compute_motion_bound(&mut cache, &visitor)?;
        writeln!(
            out,
            "  t={t:.3} {} rate={rate:.6}",
            format_pose(&cache.current_transform())
        )?;
    }

    motion.integrate(&mut cache, 0.0, 1.0)?;
    let swept = swept_aabb(motion, &mut cache, &shape)?;
    let [ax, ay, az] = swept.min().to_array();
    let [bx, by, bz] = swept.max().to_array();
    writeln!(
        out,
        "  swept box min=({ax:.6}, {ay:.6}, {az:.6}) max=({bx:.6}, {by:.6}, {bz:.6})"
    )?;
    Ok(())
}

fn report_chain(out: &mut impl Write, scene: &ChainScene) -> Result<()> {
    let model = Arc::new(Model::from_description(&scene.model).context("invalid model")?);
    let movement = Movement::with_interpolations(
        model.clone(),
        &scene.start,
        &scene.end,
        &scene.interpolation_map(),
        InterpolationFactory::builtin(),
    )
    .context("building movement")?;
    let mut bound = ModelBound::new(model.clone(), Arc::new(movement));
    let direction = Vec3::from(scene.direction);

    writeln!(
        out,
        "chain bounds over [{:.3}, {:.3}]",
        scene.start_time, scene.end_time
    )?;
    for (_, link) in model.links() {
        let value = bound.motion_bound(
            link.name(),
            (scene.start_time, scene.end_time),
            &direction,
            scene.max_distance,
        )?;
        writeln!(out, "  {:<24} {value:.6}", link.name())?;
    }
    Ok(())
}
