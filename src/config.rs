// Copyright (c) 2026 rezky_nightky

use std::io::IsTerminal;

use clap::Parser;

pub const DEFAULT_PARAMS_USAGE: &str = "DEFAULT PARAMS USAGE:\n  rainrings --color rain --color-bg black --drops 10 --tick-ms 120 --duration 0";

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBg {
    #[value(name = "black")]
    Black,
    #[value(name = "default-background")]
    DefaultBackground,
    #[value(name = "transparent")]
    Transparent,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "rainrings", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        short = 'c',
        long = "color",
        default_value = "rain",
        help_heading = "APPEARANCE",
        help = "Color theme (see --list-colors)"
    )]
    pub color: String,

    #[arg(
        long = "color-bg",
        default_value_t = ColorBg::Black,
        value_enum,
        help_heading = "APPEARANCE",
        help = "Background mode (black, default-background, transparent)"
    )]
    pub color_bg: ColorBg,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color mode (allowed: 0,8,24). Default: 24-bit if supported (COLORTERM), else 8-bit"
    )]
    pub colormode: Option<u16>,

    #[arg(
        short = 'n',
        long = "drops",
        default_value_t = crate::field::DROP_COUNT as u16,
        help_heading = "ANIMATION",
        help = "Number of raindrops (min 1 max 64)"
    )]
    pub drops: u16,

    #[arg(
        short = 't',
        long = "tick-ms",
        default_value_t = 120,
        help_heading = "ANIMATION",
        help = "Tick period in milliseconds (min 16 max 5000)"
    )]
    pub tick_ms: u16,

    #[arg(
        long = "seed",
        help_heading = "ANIMATION",
        help = "RNG seed override (same seed + size replays the same animation)"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        short = 's',
        long = "screensaver",
        help_heading = "GENERAL",
        help = "Screensaver mode (exit on keypress)"
    )]
    pub screensaver: bool,

    #[arg(
        long = "list-colors",
        help_heading = "HELP",
        help = "List available color themes and exit"
    )]
    pub list_colors: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

pub fn print_list_colors() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mAVAILABLE COLOR THEMES:\x1b[0m");
        println!("\x1b[2mNOTE: Use only the VALUE (left side) with --color.\x1b[0m");
    } else {
        println!("AVAILABLE COLOR THEMES:");
        println!("NOTE: Use only the VALUE (left side) with --color.");
    }
    println!();
    println!("VALUE        DESCRIPTION");
    println!("rain         Rain blue theme (default)");
    println!("ocean        Ocean theme (alias: deep-sea)");
    println!("green        Green theme");
    println!("cyan         Cyan theme");
    println!("purple       Purple theme");
    println!("neon         Neon theme (alias: synthwave)");
    println!("gray         Gray theme (alias: grey)");
    println!("snow         Snow / ice theme");
}
