use chrono::TimeZone;

use panel_tracker::{run_end, simulate_day, SimulationConfig, TrackerRun};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    let tz = config.timezone()?;
    let location = config.location()?;
    let ephemeris = config.ephemeris();

    let day = tz
        .with_ymd_and_hms(2024, 6, 21, 0, 0, 0)
        .single()
        .ok_or("ambiguous start of day")?;

    let sim = simulate_day(&ephemeris, &location, &day, config.interval_minutes)?;

    println!("=== Day Simulation ===");
    println!(
        "Location: ({:.4}°, {:.4}°)  Zone: {}",
        location.latitude, location.longitude, config.timezone
    );
    println!("Date: {}", day.date_naive());
    println!("Interval: {} min, {} samples", config.interval_minutes, sim.len());
    println!();
    println!("{:>8} {:>10} {:>10} {:>10} {:>10}", "time", "elev°", "azim°", "roll°", "pitch°");
    for s in sim.iter() {
        println!(
            "{:>8} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            s.time.format("%H:%M"),
            s.elevation,
            s.azimuth,
            s.roll,
            s.pitch
        );
    }
    if let Some((_, peak)) = sim.peak_elevation() {
        println!();
        println!("Peak elevation {:.2}° at {}", peak.elevation, peak.time.format("%H:%M"));
    }

    println!();
    println!("=== Tracker Run ===");
    let end = run_end(&day, 23, 0)?;
    let run = TrackerRun::new(
        &ephemeris,
        location,
        day,
        end,
        config.tracker_step_minutes,
        config.panel,
    )?;
    for frame in run {
        let frame = frame?;
        let n = frame.panel_normal;
        println!(
            "{}  tilt {:>7.2}°  rotation {:>7.2}°  normal ({:+.3}, {:+.3}, {:+.3})",
            frame.time.format("%H:%M"),
            frame.angles.tilt_rad.to_degrees(),
            frame.angles.rotation_rad.to_degrees(),
            n.x,
            n.y,
            n.z
        );
    }

    Ok(())
}
