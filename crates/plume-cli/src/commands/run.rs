//! Headless simulation driver

use super::load_config;
use anyhow::{Context, Result};
use plume_core::Control;
use plume_particles::{ParticleRng, ParticleSystem, TexturePool};
use plume_runtime::{FrameClock, KeyBindings, RuntimeSystem};
use serde::Serialize;
use std::collections::BTreeMap;

/// Keys pressed just before the given frame (frames count from 1)
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledInput {
    pub frame: u64,
    pub keys: String,
}

pub struct RunArgs {
    pub config: Option<String>,
    pub frames: u64,
    pub seed: Option<u64>,
    pub inputs: Vec<ScheduledInput>,
    pub format: String,
    pub report_every: u64,
}

#[derive(Debug, Default, Serialize)]
struct RunReport {
    frames: u64,
    quit: bool,
    fountain_live: usize,
    smoke_live: usize,
    total_spawned: u64,
    total_culled: u64,
    fountain_population: usize,
    smoke_population: usize,
    gravity: f32,
    chaos_speed: f32,
    wind_speed: f32,
    wind_angle: f32,
    smoke_tint: [f32; 3],
    elapsed_seconds: f64,
    fps: f64,
}

pub fn run(args: RunArgs) -> Result<()> {
    if args.format != "text" && args.format != "json" {
        anyhow::bail!("Unknown format '{}' (expected text or json)", args.format);
    }

    let config = load_config(args.config.as_deref())?;
    let mut bindings = KeyBindings::new();
    bindings
        .apply_overrides(&config.keys)
        .context("Invalid [keys] table")?;
    let mut schedule = build_schedule(&bindings, &args.inputs);

    let textures = TexturePool::sequential(config.smoke.texture_count);
    let rng = match args.seed {
        Some(seed) => ParticleRng::new(seed),
        None => ParticleRng::from_entropy(),
    };
    let mut system = ParticleSystem::new(config, textures, rng)?;
    system.initialize()?;

    let mut clock = FrameClock::new();
    let mut report = RunReport::default();

    while system.frame_count() < args.frames {
        let next = system.frame_count() + 1;
        while let Some(entry) = schedule.first_entry() {
            if *entry.key() > next {
                break;
            }
            system.queue_controls(entry.remove());
        }

        clock.tick();
        let stats = system.frame();
        report.total_spawned += stats.spawned as u64;
        report.total_culled += stats.culled as u64;

        if args.report_every > 0 && stats.frame % args.report_every == 0 {
            log::info!(
                "frame {}: fountain {} smoke {} ({:.1} fps)",
                stats.frame,
                stats.fountain_live,
                stats.smoke_live,
                clock.fps()
            );
        }

        if system.quit_requested() {
            log::info!("quit requested at frame {}", stats.frame);
            break;
        }
    }

    system.shutdown()?;
    fill_report(&mut report, &system, &clock);

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }
    Ok(())
}

/// Group scheduled keypresses into controls by frame. Unbound keys are dropped.
fn build_schedule(
    bindings: &KeyBindings,
    inputs: &[ScheduledInput],
) -> BTreeMap<u64, Vec<Control>> {
    let mut schedule: BTreeMap<u64, Vec<Control>> = BTreeMap::new();
    for input in inputs {
        let controls = bindings.controls_for_keys(&input.keys);
        let unbound = input.keys.chars().count() - controls.len();
        if unbound > 0 {
            log::warn!(
                "{} unbound key(s) in '{}' at frame {}",
                unbound,
                input.keys,
                input.frame
            );
        }
        schedule.entry(input.frame).or_default().extend(controls);
    }
    schedule
}

fn fill_report(report: &mut RunReport, system: &ParticleSystem, clock: &FrameClock) {
    let env = system.environment();
    report.frames = system.frame_count();
    report.quit = system.quit_requested();
    report.fountain_live = system.fountain().live_count();
    report.smoke_live = system.smoke().live_count();
    report.fountain_population = env.fountain_population();
    report.smoke_population = env.smoke_population();
    report.gravity = env.gravity;
    report.chaos_speed = env.chaos_speed;
    report.wind_speed = env.wind.speed();
    report.wind_angle = env.wind.angle();
    report.smoke_tint = env.smoke_tint.to_array();
    report.elapsed_seconds = clock.total_time;
    report.fps = clock.fps();
}

fn print_text(report: &RunReport) {
    println!(
        "Frames:      {}{}",
        report.frames,
        if report.quit { " (quit)" } else { "" }
    );
    println!(
        "Fountain:    {} live / {} target",
        report.fountain_live, report.fountain_population
    );
    println!(
        "Smoke:       {} live / {} target",
        report.smoke_live, report.smoke_population
    );
    println!(
        "Spawned:     {}  culled: {}",
        report.total_spawned, report.total_culled
    );
    println!("Gravity:     {:.4}", report.gravity);
    println!("Chaos:       {:.5}", report.chaos_speed);
    println!(
        "Wind:        {:.3} at {:.0} deg",
        report.wind_speed, report.wind_angle
    );
    let [r, g, b] = report.smoke_tint;
    println!("Smoke tint:  ({:.2}, {:.2}, {:.2})", r, g, b);
    println!("FPS:         {:.1}", report.fps);
}
