use clap::{Parser, Subcommand};
use glam::Vec3;
use ironsight_core::Session;
use ironsight_scene::{Renderer, TextRenderer, compose};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ironsight-cli", about = "Headless tools for the ironsight demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate version info
    Info,
    /// Run a deterministic headless session with scripted shots
    Run {
        /// Seconds of simulated time
        #[arg(short, long, default_value = "5.0")]
        seconds: f32,
        /// Simulation steps per second
        #[arg(short, long, default_value = "60")]
        rate: u32,
        /// Seconds between scripted shots
        #[arg(short, long, default_value = "1.0")]
        fire_every: f32,
    },
    /// Fire one shot along a view direction and report what it hit
    Trace {
        /// Yaw in radians
        #[arg(long, default_value = "0.0")]
        yaw: f32,
        /// Pitch in radians
        #[arg(long, default_value = "0.0")]
        pitch: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("ironsight-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("core: targets={}", Session::new().targets.len());
            println!("common: {}", ironsight_common::crate_info());
            println!("input: {}", ironsight_input::crate_info());
            println!("assets: {}", ironsight_assets::crate_info());
            println!("scene: {}", ironsight_scene::crate_info());
        }
        Commands::Run {
            seconds,
            rate,
            fire_every,
        } => {
            run_headless(seconds, rate, fire_every);
        }
        Commands::Trace { yaw, pitch } => {
            trace_shot(yaw, pitch);
        }
    }

    Ok(())
}

/// Drive a session at a fixed rate, aiming dead-on at the enemy and firing
/// on a timer. Same arguments, same transcript.
fn run_headless(seconds: f32, rate: u32, fire_every: f32) {
    let rate = rate.max(1);
    let dt = 1.0 / rate as f32;
    let steps = (seconds * rate as f32).round() as u32;

    println!("Headless run: {seconds}s at {rate} Hz, firing every {fire_every}s");

    let mut session = Session::new();
    let mut since_shot = 0.0_f32;
    let mut shots = 0u32;
    let mut hits = 0u32;

    for step in 0..steps {
        session.update(dt);
        since_shot += dt;

        if since_shot >= fire_every && session.enemy.is_alive() {
            since_shot = 0.0;
            let chest = session.enemy.position + Vec3::new(0.0, session.enemy.height * 0.5, 0.0);
            session.aim_at(chest);
            let report = session.fire();
            shots += 1;
            if report.enemy_hit {
                hits += 1;
            }
            println!(
                "t={:5.2}s shot #{shots}: enemy_hit={} impact=({:.2}, {:.2}, {:.2}) health={:.0}",
                (step + 1) as f32 * dt,
                report.enemy_hit,
                report.impact.x,
                report.impact.y,
                report.impact.z,
                session.enemy.health,
            );
        }
    }

    let plan = compose(&session, false, 0.0);
    let mut text = TextRenderer::default();
    println!();
    print!("{}", text.render(&plan));
    println!(
        "Summary: {shots} shots, {hits} hits, enemy {} after {:.1}s",
        if session.enemy.is_alive() {
            "alive"
        } else {
            "down"
        },
        session.elapsed(),
    );

    tracing::debug!(shots, hits, "headless run complete");
}

/// One shot from the spawn position along the given view angles.
fn trace_shot(yaw: f32, pitch: f32) {
    let mut session = Session::new();
    session.player.yaw = yaw;
    session.player.pitch = pitch;
    // A zero-length step re-derives the camera from the player.
    session.update(0.0);

    let ray = session.aim_ray();
    println!(
        "Ray from ({:.2}, {:.2}, {:.2}) toward ({:.3}, {:.3}, {:.3})",
        ray.origin.x,
        ray.origin.y,
        ray.origin.z,
        ray.direction.x,
        ray.direction.y,
        ray.direction.z,
    );

    let report = session.fire();
    match report.target {
        Some(index) => println!("Cube hit: index {index}"),
        None => println!("Cube hit: none"),
    }
    println!("Enemy hit: {}", report.enemy_hit);
    println!(
        "Impact: ({:.2}, {:.2}, {:.2})",
        report.impact.x, report.impact.y, report.impact.z
    );
}
