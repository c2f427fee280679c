// Copyright (c) 2025 rezk_nightky

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    Color256,
    TrueColor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    Rain,
    Ocean,
    Green,
    Cyan,
    Purple,
    Neon,
    Gray,
    Snow,
}
