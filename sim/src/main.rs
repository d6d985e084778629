use anyhow::Result;
use clap::Parser;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{info, warn};

use spotlight_sim::{
    SimOptions, Simulation,
    config::{Args, init_tracing},
};

// ============================================================================
// Main
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log)?;

    let config = args.spotlight_config()?;
    let mut sim = Simulation::new(
        config,
        SimOptions {
            seed: args.seed,
            restarts: args.restarts,
        },
    );

    info!("starting simulation loop at {} Hz{}", args.hz, if args.fast { " (fast)" } else { "" });

    // Run the world in a loop manually at the requested frequency
    let tick_duration = Duration::from_secs_f32(args.frame_delta());
    let mut interval = time::interval(tick_duration);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut last_frame = Instant::now();
    let mut frame: u64 = 0;
    while !sim.is_finished() && args.frames.is_none_or(|limit| frame < limit) {
        let dt = if args.fast {
            args.frame_delta()
        } else {
            interval.tick().await;
            let now = Instant::now();
            let dt = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;
            dt
        };

        let update_start = Instant::now();
        sim.step(dt);
        let update_elapsed = update_start.elapsed();

        if !args.fast && update_elapsed > tick_duration {
            warn!(
                "frame {} took {:.2}ms (exceeded {:.2}ms budget)",
                frame,
                update_elapsed.as_secs_f64() * 1000.0,
                tick_duration.as_secs_f64() * 1000.0
            );
        }

        frame += 1;
    }

    let session = sim.session();
    info!(
        "stopped after {} frames ({} lit in the last session): {:?}, {} sessions, {} detections, {} escapes, {} captures, {} wins",
        frame,
        sim.player().lit_frames,
        session.state,
        session.sessions,
        session.detections,
        session.escapes,
        session.captures,
        session.wins
    );
    Ok(())
}
