use thermodial::{DialConfig, DialController, DialError, DialGeometry, Point};

// Simulation constants - easy to adjust
const MIN_TEMPERATURE: i32 = 16;
const MAX_TEMPERATURE: i32 = 30;
const INITIAL_TEMPERATURE: i32 = 27;
const SAMPLES_PER_TURN: usize = 48; // Pointer samples in one full clockwise turn
const FINGER_WOBBLE: f64 = 6.0; // How far the finger strays from the track, in pixels

// Visualization constants
const BAR_WIDTH: usize = 40;

/// # Dial Drag Simulation
///
/// Drags a finger once around the dial, starting at 12 o'clock, and prints
/// the readout and progress arc after every pointer sample.
///
/// Run with `RUST_LOG=debug` to see the controller's own log output.
fn main() -> Result<(), DialError> {
    env_logger::init();

    let config = DialConfig::new()
        .with_range(MIN_TEMPERATURE, MAX_TEMPERATURE)
        .with_initial(INITIAL_TEMPERATURE);
    let geometry = DialGeometry::new();
    let mut dial = DialController::new(config)?;
    let center = geometry.center();

    println!(
        "Dial starts at {}°C (handle at {:.1}°)",
        dial.temperature(),
        dial.angle()
    );

    dial.on_drag_start();
    for i in 0..SAMPLES_PER_TURN {
        let angle = i as f64 * 360.0 / SAMPLES_PER_TURN as f64;
        let on_track = geometry.handle_position(angle);

        // Nobody drags in a perfect circle.
        let wobble = (i as f64 * 0.7).sin() * FINGER_WOBBLE;
        let pointer = Point::new(on_track.x + wobble, on_track.y - wobble);

        let state = dial.on_drag_move(pointer, center);
        println!(
            "{:>6.1}°  {:>3}°C  [{}]",
            state.angle(),
            state.temperature(),
            progress_bar(state.fraction())
        );
    }

    if let Some(summary) = dial.on_drag_end() {
        println!(
            "\nDrag summary: {}°C -> {}°C over {} moves ({} clamped)",
            summary.start_temperature,
            summary.end_temperature,
            summary.moves,
            summary.clamped_moves
        );
    }

    // A host that overshoots the track end gets clamped, not an error.
    let state = dial.update_angle(400.0);
    println!(
        "Overshoot to 400°: {}°C, handle at {:.1}°",
        state.temperature(),
        state.angle()
    );

    Ok(())
}

fn progress_bar(fraction: f64) -> String {
    let filled = (fraction * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
