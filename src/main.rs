// Copyright (c) 2026 rezky_nightky

mod cell;
mod config;
mod field;
mod frame;
mod palette;
mod raindrop;
mod raster;
mod runtime;
mod sprite;
mod terminal;

use std::env;
use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use crossterm::event::{Event, KeyCode, KeyEventKind};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::config::{color_enabled_stdout, print_list_colors, Args, ColorBg, DEFAULT_PARAMS_USAGE};
use crate::field::{Field, FieldEvent, DEFAULT_SEED};
use crate::frame::Frame;
use crate::palette::build_palette;
use crate::raster::{draw_sprite, surface_size};
use crate::runtime::{ColorMode, ColorScheme};
use crate::terminal::{restore_terminal_best_effort, Terminal};

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

const SCHEME_KEYS: [(char, ColorScheme); 8] = [
    ('1', ColorScheme::Rain),
    ('2', ColorScheme::Ocean),
    ('3', ColorScheme::Green),
    ('4', ColorScheme::Cyan),
    ('5', ColorScheme::Purple),
    ('6', ColorScheme::Neon),
    ('7', ColorScheme::Gray),
    ('8', ColorScheme::Snow),
];

fn build_info() -> &'static str {
    env!("RAINRINGS_BUILD")
}

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn require_u16_range(name: &str, v: u16, min: u16, max: u16) -> u16 {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_f64_range(name: &str, v: f64, min: f64, max: f64) -> f64 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn detect_color_mode_auto() -> ColorMode {
    let colorterm = env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term == "dumb" {
        return ColorMode::Mono;
    }

    ColorMode::Color256
}

fn detect_color_mode(args: &Args) -> ColorMode {
    if let Some(m) = args.colormode {
        return match m {
            0 => ColorMode::Mono,
            8 => ColorMode::Color256,
            24 => ColorMode::TrueColor,
            _ => {
                eprintln!("invalid --colormode: {} (allowed: 0,8,24)", m);
                std::process::exit(1);
            }
        };
    }

    detect_color_mode_auto()
}

fn parse_color_scheme(s: &str) -> Result<ColorScheme, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "rain" => Ok(ColorScheme::Rain),
        "ocean" | "deep-sea" | "deep_sea" | "deepsea" => Ok(ColorScheme::Ocean),
        "green" => Ok(ColorScheme::Green),
        "cyan" => Ok(ColorScheme::Cyan),
        "purple" => Ok(ColorScheme::Purple),
        "neon" | "synthwave" => Ok(ColorScheme::Neon),
        "gray" | "grey" => Ok(ColorScheme::Gray),
        "snow" => Ok(ColorScheme::Snow),
        _ => Err(format!("invalid color: {} (see --list-colors)", s)),
    }
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let mut cmd = Args::command();
    cmd = cmd.styles(clap_styles());
    cmd = cmd.before_help(DEFAULT_PARAMS_USAGE);
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    cmd = cmd.help_template(help_template);
    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.list_colors {
        print_list_colors();
        return Ok(());
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", build_info());
        println!("Copyright: (c) 2026 {}", env!("CARGO_PKG_AUTHORS"));
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
        return Ok(());
    }

    let drops = require_u16_range("--drops", args.drops, 1, 64) as usize;
    let tick_ms = require_u16_range("--tick-ms", args.tick_ms, 16, 5000);
    let duration_s = args.duration.map(|s| {
        if !s.is_finite() {
            eprintln!("failed to apply --duration {} (must be a finite number)", s);
            std::process::exit(1);
        }
        if s > 0.0 {
            return require_f64_range("--duration", s, 0.1, 86400.0);
        }
        s
    });

    let color_mode = detect_color_mode(&args);
    let mut color_scheme = match parse_color_scheme(&args.color) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let default_background = matches!(
        args.color_bg,
        ColorBg::DefaultBackground | ColorBg::Transparent
    );

    let mut term = Terminal::new()?;
    let mut palette = build_palette(color_scheme, color_mode, default_background);

    let mut field = Field::new(args.seed.unwrap_or(DEFAULT_SEED), drops);

    // The size query is the only thing allowed to fail; the field then
    // keeps its default 1280x720 surface.
    let (cols, rows) = match term.size() {
        Ok((c, r)) => {
            let (w, h) = surface_size(c, r);
            field.update(FieldEvent::Resized {
                width: w,
                height: h,
            });
            (c, r)
        }
        Err(_) => {
            field.update(FieldEvent::SizeUnavailable);
            (80, 24)
        }
    };
    let mut frame = Frame::new(cols, rows, palette.bg);

    let tick_period = Duration::from_millis(tick_ms as u64);
    let start_time = Instant::now();
    let end_time = duration_s.and_then(|s| {
        if s <= 0.0 {
            return None;
        }
        Some(start_time + Duration::from_secs_f64(s))
    });

    let mut running = true;
    let mut paused = false;

    // First frame shows the freshly seeded field; ticks follow.
    frame.clear();
    for sprite in field.sprites() {
        draw_sprite(&mut frame, &sprite, &palette, color_mode);
    }
    term.draw(&mut frame)?;
    let mut next_tick = Instant::now() + tick_period;

    while running {
        if end_time.is_some_and(|end| Instant::now() >= end) {
            break;
        }
        let mut pending_resize: Option<(u16, u16)> = None;

        loop {
            while Terminal::poll_event(Duration::from_millis(0))? {
                match Terminal::read_event()? {
                    Event::Resize(nw, nh) => {
                        pending_resize = Some((nw, nh));
                    }
                    Event::Key(k) if k.kind == KeyEventKind::Press => {
                        if args.screensaver {
                            running = false;
                            break;
                        }

                        match k.code {
                            KeyCode::Esc | KeyCode::Char('q') => running = false,
                            KeyCode::Char(' ') => {
                                let (w, h) = surface_size(frame.width, frame.height);
                                field.update(FieldEvent::Resized {
                                    width: w,
                                    height: h,
                                });
                                frame.force_full_redraw();
                            }
                            KeyCode::Char('p') => paused = !paused,
                            KeyCode::Char(c) => {
                                if let Some(&(_, scheme)) =
                                    SCHEME_KEYS.iter().find(|&&(key, _)| key == c)
                                {
                                    color_scheme = scheme;
                                    palette =
                                        build_palette(color_scheme, color_mode, default_background);
                                    frame = Frame::new(frame.width, frame.height, palette.bg);
                                }
                            }
                            _ => {}
                        }
                    }
                    _ => {}
                }
            }

            if !running || pending_resize.is_some() {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                break;
            }

            let mut timeout = next_tick - now;
            if let Some(end) = end_time {
                if now >= end {
                    break;
                }
                timeout = timeout.min(end - now);
            }
            let _ = Terminal::poll_event(timeout)?;
        }

        if !running {
            break;
        }

        if let Some((nw, nh)) = pending_resize {
            let (w, h) = surface_size(nw, nh);
            field.update(FieldEvent::Resized {
                width: w,
                height: h,
            });
            frame = Frame::new(nw, nh, palette.bg);
        }

        let now = Instant::now();
        if now >= next_tick {
            if !paused {
                field.update(FieldEvent::Tick);
            }
            next_tick += tick_period;
            if Instant::now() > next_tick {
                next_tick = Instant::now();
            }
        }

        frame.clear();
        for sprite in field.sprites() {
            draw_sprite(&mut frame, &sprite, &palette, color_mode);
        }
        if frame.is_dirty_all() || !frame.dirty_indices().is_empty() {
            term.draw(&mut frame)?;
        }
    }

    Ok(())
}
