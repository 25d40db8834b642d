use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info, warn};
use rand::Rng;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tile_raycast::grid_display::terminal_to_pixel;
use tile_raycast::{draw_grid, render_grid, GridModel, RaycastConfig};

const BANNER: &str = r#"
  ╔╦╗╦╦  ╔═╗  ╦═╗╔═╗╦ ╦╔═╗╔═╗╔═╗╔╦╗
   ║ ║║  ║╣   ╠╦╝╠═╣╚╦╝║  ╠═╣╚═╗ ║
   ╩ ╩╩═╝╚═╝  ╩╚═╩ ╩ ╩ ╚═╝╩ ╩╚═╝ ╩
"#;

const DEFAULT_SAVE_PATH: &str = "tile_raycast.json";
const TILE_SIZE_STEP: i32 = 8;

enum Action {
    Continue,
    Quit,
}

fn show_help() {
    println!("{}", BANNER);
    println!("Usage: tile_raycast [command]");
    println!();
    println!("Commands:");
    println!("  (no args)     Interactive grid in the terminal");
    println!("  print         Render the configured grid once and exit");
    println!("  help          Show this help message");
    println!();
    println!("Interactive keys:");
    println!("  Arrow keys    Move the end point by one tile");
    println!("  W A S D       Move the start point by one tile");
    println!("  + / -         Grow / shrink the tile size");
    println!("  C / c         Add / remove a column");
    println!("  R / r         Add / remove a row");
    println!("  x             Random endpoints");
    println!("  p             Save the current configuration");
    println!("  Mouse         Left click sets start, right click sets end");
    println!("  q / Esc       Quit");
    println!();
    println!("Configuration:");
    println!("  RAYCAST_CONFIG=<file.json>    Load configuration from a JSON file");
    println!("  RAYCAST_COLUMNS, RAYCAST_ROWS, RAYCAST_TILE_SIZE");
    println!("  RAYCAST_START_X, RAYCAST_START_Y, RAYCAST_END_X, RAYCAST_END_Y");
    println!("  RAYCAST_COLOR=true|false");
    println!();
}

fn print_once(config: &RaycastConfig) -> Result<(), Box<dyn std::error::Error>> {
    let model = GridModel::from_config(&config.grid);
    if config.display.use_color {
        let mut stdout = io::stdout();
        draw_grid(&mut stdout, &model, &config.display)?;
        stdout.flush()?;
    } else {
        print!("{}", render_grid(&model, &config.display));
    }
    Ok(())
}

fn move_point(point: (i32, i32), step: (i32, i32), tile_size: i32) -> (i32, i32) {
    (
        point.0.saturating_add(step.0 * tile_size),
        point.1.saturating_add(step.1 * tile_size),
    )
}

fn handle_key(model: &mut GridModel, config: &RaycastConfig, key: KeyEvent) -> Action {
    let tile = model.tile_size();
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Action::Quit;
        }
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            let step = match key.code {
                KeyCode::Up => (0, -1),
                KeyCode::Down => (0, 1),
                KeyCode::Left => (-1, 0),
                _ => (1, 0),
            };
            let (x, y) = move_point(model.end(), step, tile);
            model.set_end(x, y);
        }
        KeyCode::Char(c @ ('w' | 'a' | 's' | 'd')) => {
            let step = match c {
                'w' => (0, -1),
                's' => (0, 1),
                'a' => (-1, 0),
                _ => (1, 0),
            };
            let (x, y) = move_point(model.start(), step, tile);
            model.set_start(x, y);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            model.set_tile_size(tile + TILE_SIZE_STEP);
        }
        KeyCode::Char('-') => {
            model.set_tile_size(tile - TILE_SIZE_STEP);
        }
        KeyCode::Char('C') => {
            model.set_grid_size(model.cols() + 1, model.rows());
        }
        KeyCode::Char('c') => {
            model.set_grid_size(model.cols().saturating_sub(1).max(1), model.rows());
        }
        KeyCode::Char('R') => {
            model.set_grid_size(model.cols(), model.rows() + 1);
        }
        KeyCode::Char('r') => {
            model.set_grid_size(model.cols(), model.rows().saturating_sub(1).max(1));
        }
        KeyCode::Char('x') => {
            let mut rng = rand::thread_rng();
            let (width, height) = (model.pixel_width(), model.pixel_height());
            model.set_start(rng.gen_range(0..width), rng.gen_range(0..height));
            model.set_end(rng.gen_range(0..width), rng.gen_range(0..height));
        }
        KeyCode::Char('p') => {
            let path = std::env::var(tile_raycast::raycast_config::CONFIG_PATH_ENV)
                .unwrap_or_else(|_| DEFAULT_SAVE_PATH.to_string());
            let snapshot = RaycastConfig {
                grid: model.config(),
                display: config.display.clone(),
            };
            match snapshot.save_to_file(&path) {
                Ok(()) => info!("Saved configuration to {}", path),
                Err(e) => warn!("Failed to save configuration to {}: {}", path, e),
            }
        }
        _ => {}
    }
    Action::Continue
}

fn handle_mouse(model: &mut GridModel, config: &RaycastConfig, mouse: MouseEvent) {
    let button = match mouse.kind {
        MouseEventKind::Down(button) | MouseEventKind::Drag(button) => button,
        _ => return,
    };

    let Some((x, y)) = terminal_to_pixel(model, &config.display, mouse.column, mouse.row) else {
        return;
    };

    match button {
        MouseButton::Left => {
            model.set_start(x, y);
        }
        MouseButton::Right => {
            model.set_end(x, y);
        }
        MouseButton::Middle => {}
    }
}

fn redraw<W: Write>(
    stdout: &mut W,
    model: &GridModel,
    config: &RaycastConfig,
) -> io::Result<()> {
    queue!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    draw_grid(stdout, model, &config.display)?;
    queue!(
        stdout,
        cursor::MoveToNextLine(1),
        SetForegroundColor(Color::DarkGrey),
        Print("arrows/WASD move  +/- tile  c/C r/R grid  x random  p save  q quit"),
        ResetColor
    )?;
    stdout.flush()
}

fn run_loop<W: Write>(
    stdout: &mut W,
    model: &mut GridModel,
    config: &RaycastConfig,
    dirty: &AtomicBool,
) -> Result<(), Box<dyn std::error::Error>> {
    redraw(stdout, model, config)?;

    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Action::Quit = handle_key(model, config, key) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse(model, config, mouse),
            Event::Resize(_, _) => dirty.store(true, Ordering::Relaxed),
            _ => {}
        }

        if dirty.swap(false, Ordering::Relaxed) {
            redraw(stdout, model, config)?;
        }
    }
}

fn interactive_mode(config: RaycastConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut model = GridModel::from_config(&config.grid);

    let dirty = Arc::new(AtomicBool::new(false));
    let flag = dirty.clone();
    model.on_change(move |change| {
        debug!("Model changed: {:?}", change);
        flag.store(true, Ordering::Relaxed);
    });

    terminal::enable_raw_mode()?;
    with_terminal(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)
        },
        || run_loop(&mut io::stdout(), &mut model, &config, &dirty),
        || {
            let mut stdout = io::stdout();
            execute!(stdout, cursor::Show, DisableMouseCapture, LeaveAlternateScreen)
        },
        terminal::disable_raw_mode,
    )
}

/// Run `body` between `enter` and `leave`. Once raw mode is on it is always
/// switched off again, whichever step failed.
fn with_terminal<T>(
    enter: impl FnOnce() -> io::Result<()>,
    body: impl FnOnce() -> Result<T, Box<dyn std::error::Error>>,
    leave: impl FnOnce() -> io::Result<()>,
    disable_raw_mode: impl FnOnce() -> io::Result<()>,
) -> Result<T, Box<dyn std::error::Error>> {
    let result = match enter() {
        Ok(()) => body(),
        Err(e) => Err(e.into()),
    };
    let left = leave();
    disable_raw_mode()?;

    let value = result?;
    left?;
    Ok(value)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str());

    match command {
        Some("help") | Some("-h") | Some("--help") => {
            show_help();
            return Ok(());
        }
        Some("print") | None => {}
        Some(unknown) => {
            println!("Unknown command: {}", unknown);
            println!("Run 'tile_raycast help' for usage information");
            return Ok(());
        }
    }

    let config = RaycastConfig::load()?;
    if let Err(e) = config.validate() {
        warn!("{} - values will be clamped", e);
    }

    if command == Some("print") {
        print_once(&config)
    } else {
        interactive_mode(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn failing(step: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, format!("{} failed", step)))
    }

    #[test]
    fn test_raw_mode_disabled_when_enter_fails() {
        let calls = RefCell::new(Vec::new());
        let result: Result<(), _> = with_terminal(
            || failing("enter"),
            || {
                calls.borrow_mut().push("body");
                Ok(())
            },
            || {
                calls.borrow_mut().push("leave");
                Ok(())
            },
            || {
                calls.borrow_mut().push("disable");
                Ok(())
            },
        );

        assert_eq!(result.unwrap_err().to_string(), "enter failed");
        assert_eq!(*calls.borrow(), vec!["leave", "disable"]);
    }

    #[test]
    fn test_raw_mode_disabled_when_leave_fails() {
        let calls = RefCell::new(Vec::new());
        let result = with_terminal(
            || Ok(()),
            || Ok(7),
            || failing("leave"),
            || {
                calls.borrow_mut().push("disable");
                Ok(())
            },
        );

        assert_eq!(result.unwrap_err().to_string(), "leave failed");
        assert_eq!(*calls.borrow(), vec!["disable"]);
    }

    #[test]
    fn test_body_error_wins_and_terminal_restored() {
        let calls = RefCell::new(Vec::new());
        let result: Result<(), _> = with_terminal(
            || Ok(()),
            || Err("loop failed".into()),
            || {
                calls.borrow_mut().push("leave");
                Ok(())
            },
            || {
                calls.borrow_mut().push("disable");
                Ok(())
            },
        );

        assert_eq!(result.unwrap_err().to_string(), "loop failed");
        assert_eq!(*calls.borrow(), vec!["leave", "disable"]);
    }

    #[test]
    fn test_success_returns_body_value() {
        let result = with_terminal(|| Ok(()), || Ok("done"), || Ok(()), || Ok(()));
        assert_eq!(result.unwrap(), "done");
    }
}
