use pulse_core::{Tone, Trend};
use ratatui::style::Color;

#[derive(Clone, Copy)]
pub struct PulseTheme {
    pub bg: Color,
    pub surface: Color,
    pub border: Color,
    pub title: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub ok: Color,
    pub warn: Color,
    pub critical: Color,
    pub info: Color,
}

pub fn pulse_theme() -> PulseTheme {
    PulseTheme {
        bg: Color::Rgb(11, 18, 32),
        surface: Color::Rgb(17, 26, 46),
        border: Color::Rgb(71, 85, 105),
        title: Color::Rgb(191, 219, 254),
        text: Color::Rgb(226, 232, 240),
        muted: Color::Rgb(148, 163, 184),
        accent: Color::Rgb(56, 189, 248),
        ok: Color::Rgb(34, 197, 94),
        warn: Color::Rgb(245, 158, 11),
        critical: Color::Rgb(239, 68, 68),
        info: Color::Rgb(59, 130, 246),
    }
}

pub fn trend_color(trend: Trend, theme: PulseTheme) -> Color {
    match trend {
        Trend::Up => theme.ok,
        Trend::Down => theme.critical,
        Trend::Flat => theme.muted,
    }
}

pub fn trend_glyph(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "^",
        Trend::Down => "v",
        Trend::Flat => "=",
    }
}

pub fn tone_color(tone: Tone, theme: PulseTheme) -> Color {
    match tone {
        Tone::Info => theme.info,
        Tone::Success => theme.ok,
        Tone::Warn => theme.warn,
    }
}

pub fn mission_status_color(status: &str, theme: PulseTheme) -> Color {
    match status.to_ascii_lowercase().as_str() {
        "on track" | "done" => theme.ok,
        "at risk" => theme.warn,
        "blocked" | "late" => theme.critical,
        _ => theme.muted,
    }
}
