use std::io;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::execute;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Points};
use ratatui::widgets::{Block, Gauge, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use thermodial::{DialConfig, DialController, DialGeometry, Point};

const MIN_TEMPERATURE: i32 = 16;
const MAX_TEMPERATURE: i32 = 30;
const INITIAL_TEMPERATURE: i32 = 27;

// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;
const CANVAS_BOUND: f64 = 1.2;
const ARC_STEP_DEGREES: usize = 3;

/// # Terminal Dial
///
/// A thermostat dial in the terminal. Drag around the ring with the left
/// mouse button; `r` resets, `q` quits.
fn main() -> io::Result<()> {
    let config = DialConfig::new()
        .with_range(MIN_TEMPERATURE, MAX_TEMPERATURE)
        .with_initial(INITIAL_TEMPERATURE);
    let mut dial = DialController::new(config).map_err(io::Error::other)?;

    let mut terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;
    let result = run(&mut terminal, &mut dial);
    execute!(io::stdout(), DisableMouseCapture)?;
    ratatui::restore();
    result
}

fn run(terminal: &mut DefaultTerminal, dial: &mut DialController) -> io::Result<()> {
    // Unit-diameter dial drawn on a canvas spanning [-CANVAS_BOUND, CANVAS_BOUND].
    let geometry = DialGeometry::new()
        .with_dial_size(2.0)
        .with_stroke_width(0.2)
        .with_handle_radius(0.1)
        .with_inner_dot_radius(0.03);
    let mut dial_area = Rect::default();

    loop {
        terminal.draw(|frame| dial_area = draw(frame, dial, &geometry))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('r') => dial.reset(),
                _ => {}
            },
            Event::Mouse(mouse) => {
                let pointer = Point::new(
                    f64::from(mouse.column) + 0.5,
                    (f64::from(mouse.row) + 0.5) * CELL_ASPECT,
                );
                let center = cell_center(dial_area);
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        dial.on_drag_start();
                        dial.on_drag_move(pointer, center);
                    }
                    MouseEventKind::Drag(MouseButton::Left) => {
                        dial.on_drag_move(pointer, center);
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        dial.on_drag_end();
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

/// Draw the dial and readout, returning the canvas area used for hit testing.
fn draw(frame: &mut Frame, dial: &DialController, geometry: &DialGeometry) -> Rect {
    let [top, readout_area, help_area] = Layout::vertical([
        Constraint::Min(8),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let dial_area = square_in_cells(top);
    let block = Block::bordered().title(" Thermostat ");
    let inner = block.inner(dial_area);
    let state = dial.state();

    // Frame coordinates have y growing downward; the canvas has it growing up.
    let to_canvas = |p: Point| {
        let c = geometry.center();
        (p.x - c.x, c.y - p.y)
    };

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-CANVAS_BOUND, CANVAS_BOUND])
        .y_bounds([-CANVAS_BOUND, CANVAS_BOUND])
        .paint(|ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: geometry.track_radius(),
                color: Color::DarkGray,
            });

            let arc: Vec<(f64, f64)> = (0..=state.angle() as usize)
                .step_by(ARC_STEP_DEGREES)
                .map(|deg| to_canvas(geometry.handle_position(deg as f64)))
                .collect();
            ctx.draw(&Points {
                coords: &arc,
                color: Color::Blue,
            });

            let (hx, hy) = to_canvas(geometry.handle_position(state.angle()));
            ctx.draw(&Circle {
                x: hx,
                y: hy,
                radius: geometry.handle_radius(),
                color: Color::White,
            });
            ctx.draw(&Points {
                coords: &[(hx, hy)],
                color: Color::Blue,
            });
        });
    frame.render_widget(canvas, dial_area);

    let gauge = Gauge::default()
        .block(Block::bordered().title(" Setpoint "))
        .gauge_style(Style::default().fg(Color::Blue))
        .ratio(state.fraction().clamp(0.0, 1.0))
        .label(format!("{} °C", state.temperature()));
    frame.render_widget(gauge, readout_area);

    frame.render_widget(
        Paragraph::new("drag the ring with the mouse, r to reset, q to quit"),
        help_area,
    );

    inner
}

/// Largest rect inside `area` that renders as a square, centered.
fn square_in_cells(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height * 2;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Dial center in the same scaled cell coordinates as mouse pointers.
fn cell_center(area: Rect) -> Point {
    Point::new(
        f64::from(area.x) + f64::from(area.width) / 2.0,
        (f64::from(area.y) + f64::from(area.height) / 2.0) * CELL_ASPECT,
    )
}
