use crate::theme::{
    mission_status_color, pulse_theme, tone_color, trend_color, trend_glyph, PulseTheme,
};
use crate::{App, Section};
use pulse_core::{DashboardState, Scheduler, Stat, Ticker};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const COMPACT_WIDTH: u16 = 92;

pub fn render_ui<S: Scheduler>(frame: &mut ratatui::Frame, app: &App<S>) {
    let size = frame.size();
    let theme = pulse_theme();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(size);
    frame.render_widget(render_header(app, theme, size.width), layout[0]);
    render_stat_tiles(frame, app.dashboard.state(), theme, layout[1]);
    if app.section == Section::Dashboard && !is_compact(size.width) {
        render_split_body(frame, app, theme, layout[2]);
    } else {
        frame.render_widget(render_body(app, theme, size.width), layout[2]);
    }
    if app.help_open {
        render_help_overlay(frame, theme);
    }
}

fn panel(title: &str, theme: PulseTheme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.surface))
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_header<S: Scheduler>(app: &App<S>, theme: PulseTheme, width: u16) -> Paragraph<'static> {
    let state = app.dashboard.state();
    let inner_width = width.saturating_sub(4) as usize;
    let updated = app
        .last_tick_at
        .map(|at| at.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());
    let status_fields = vec![
        format!("Section: {}", state.active_section),
        format!("Pulses: {}", state.pulse_count),
        format!("Ticks: {}", state.tick_count),
        format!("Every: {}ms", app.dashboard.interval().as_millis()),
        format!("Updated: {updated}"),
    ];
    let status_line = fit_fields(&status_fields, inner_width.max(12));
    let action_text = format!("Last Action: {}", state.last_action);

    Paragraph::new(Text::from(vec![
        Line::from(Span::styled(status_line, Style::default().fg(theme.text))),
        Line::from(Span::styled(
            ellipsize(&action_text, inner_width.max(12)),
            Style::default().fg(theme.accent),
        )),
    ]))
    .style(Style::default().fg(theme.text).bg(theme.bg))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.bg))
            .title(Span::styled(
                "Pulse Mission Control",
                Style::default()
                    .fg(theme.title)
                    .add_modifier(Modifier::BOLD),
            )),
    )
}

fn render_stat_tiles(frame: &mut ratatui::Frame, state: &DashboardState, theme: PulseTheme, area: Rect) {
    if state.stats.is_empty() {
        frame.render_widget(
            Paragraph::new("No stats.").block(panel("Stats", theme)),
            area,
        );
        return;
    }
    let count = state.stats.len() as u32;
    let constraints: Vec<Constraint> = state
        .stats
        .iter()
        .map(|_| Constraint::Ratio(1, count))
        .collect();
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);
    for (stat, tile) in state.stats.iter().zip(tiles.iter()) {
        let color = trend_color(stat.trend, theme);
        let lines = vec![
            Line::from(Span::styled(
                format_stat_value(stat),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} {}", trend_glyph(stat.trend), format_signed(stat.delta)),
                Style::default().fg(color),
            )),
        ];
        frame.render_widget(
            Paragraph::new(Text::from(lines)).block(panel(&stat.label, theme)),
            *tile,
        );
    }
}

fn render_split_body<S: Scheduler>(
    frame: &mut ratatui::Frame,
    app: &App<S>,
    theme: PulseTheme,
    area: Rect,
) {
    let state = app.dashboard.state();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    frame.render_widget(
        Paragraph::new(Text::from(ticker_lines(&state.tickers, theme, false)))
            .block(panel("Tickers", theme))
            .scroll((app.scroll, 0)),
        columns[0],
    );
    frame.render_widget(
        Paragraph::new(Text::from(activity_lines(state, theme)))
            .block(panel("Activity", theme))
            .wrap(Wrap { trim: true }),
        columns[1],
    );
}

fn render_body<S: Scheduler>(app: &App<S>, theme: PulseTheme, width: u16) -> Paragraph<'static> {
    let state = app.dashboard.state();
    let compact = is_compact(width);
    let lines = match app.section {
        Section::Dashboard => {
            let mut lines = ticker_lines(&state.tickers, theme, compact);
            lines.push(Line::from(""));
            lines.extend(activity_lines(state, theme));
            lines
        }
        Section::Markets => ticker_lines(&state.tickers, theme, compact),
        Section::Missions => mission_lines(state, theme),
        Section::Activity => activity_lines(state, theme),
    };
    Paragraph::new(Text::from(lines))
        .style(Style::default().fg(theme.text).bg(theme.surface))
        .block(panel(app.section.title(), theme))
        .scroll((app.scroll, 0))
}

fn ticker_lines(tickers: &[Ticker], theme: PulseTheme, compact: bool) -> Vec<Line<'static>> {
    if tickers.is_empty() {
        return vec![Line::from(Span::styled(
            "No tickers.",
            Style::default().fg(theme.muted),
        ))];
    }
    tickers
        .iter()
        .map(|ticker| {
            let color = trend_color(ticker.trend, theme);
            let mut spans = vec![
                Span::styled(
                    format!("{:<6}", ticker.symbol),
                    Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:>12}", group_thousands(&format!("{:.2}", ticker.price))),
                    Style::default().fg(theme.text),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{} {:>7}", trend_glyph(ticker.trend), format_signed(ticker.change)),
                    Style::default().fg(color),
                ),
            ];
            if !compact {
                spans.push(Span::styled(
                    format!("  {}", ticker.trend.as_str()),
                    Style::default().fg(theme.muted),
                ));
            }
            Line::from(spans)
        })
        .collect()
}

fn activity_lines(state: &DashboardState, theme: PulseTheme) -> Vec<Line<'static>> {
    if state.activity.is_empty() {
        return vec![Line::from(Span::styled(
            "No activity yet.",
            Style::default().fg(theme.muted),
        ))];
    }
    state
        .activity
        .iter()
        .map(|entry| {
            let tone = entry.tone_or_default();
            Line::from(vec![
                Span::styled("* ", Style::default().fg(tone_color(tone, theme))),
                Span::styled(entry.label.clone(), Style::default().fg(theme.text)),
                Span::styled(
                    format!("  {}", entry.time),
                    Style::default().fg(theme.muted),
                ),
            ])
        })
        .collect()
}

fn mission_lines(state: &DashboardState, theme: PulseTheme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("{:<14} {:<10} {:<10} {}", "Project", "Status", "Owner", "Due"),
        Style::default().fg(theme.muted).add_modifier(Modifier::BOLD),
    ))];
    for mission in state.missions() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<14} ", ellipsize(&mission.project, 14)),
                Style::default().fg(theme.text),
            ),
            Span::styled(
                format!("{:<10} ", mission.status),
                Style::default().fg(mission_status_color(&mission.status, theme)),
            ),
            Span::styled(
                format!("{:<10} ", mission.owner),
                Style::default().fg(theme.text),
            ),
            Span::styled(mission.due.clone(), Style::default().fg(theme.muted)),
        ]));
    }
    lines
}

fn render_help_overlay(frame: &mut ratatui::Frame, theme: PulseTheme) {
    let area = centered_rect(70, 70, frame.size());
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let lines = vec![
        heading("Sections"),
        Line::from("  1/2/3/4  Dashboard/Markets/Missions/Activity"),
        Line::from("  Tab      cycle section"),
        Line::from("  j/k      scroll, g top"),
        Line::from(""),
        heading("Actions"),
        Line::from("  p        trigger pulse"),
        Line::from("  s        launch neural scan"),
        Line::from("  n        sync nodes"),
        Line::from("  r        generate report"),
        Line::from("  v        view full mission log"),
        Line::from(""),
        heading("Session & Exit"),
        Line::from("  ? or F1  toggle this help"),
        Line::from("  Esc      close help"),
        Line::from("  q        quit"),
    ];
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .style(Style::default().fg(theme.text).bg(theme.surface))
            .block(panel("Help", theme))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100u16.saturating_sub(percent_y)) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100u16.saturating_sub(percent_y)) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100u16.saturating_sub(percent_x)) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100u16.saturating_sub(percent_x)) / 2),
        ])
        .split(vertical[1])[1]
}

pub fn format_stat_value(stat: &Stat) -> String {
    if stat.is_percent() {
        format!("{:.2}%", stat.value)
    } else {
        let grouped = group_thousands(&format!("{:.2}", stat.value));
        match stat.unit.as_deref() {
            Some(unit) if !unit.is_empty() => format!("{grouped} {unit}"),
            _ => grouped,
        }
    }
}

pub fn format_signed(value: f64) -> String {
    format!("{value:+.2}")
}

/// Inserts `,` separators into the integer part of a formatted number.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

fn ellipsize(input: &str, max: usize) -> String {
    if input.chars().count() <= max {
        return input.to_string();
    }
    if max <= 3 {
        return "...".chars().take(max).collect();
    }
    let prefix: String = input.chars().take(max - 3).collect();
    format!("{prefix}...")
}

fn fit_fields(fields: &[String], max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let mut output = String::new();
    for field in fields {
        let candidate = if output.is_empty() {
            field.clone()
        } else {
            format!("{output} | {field}")
        };
        if candidate.chars().count() <= max {
            output = candidate;
            continue;
        }
        if output.is_empty() {
            return ellipsize(field, max);
        }
        break;
    }
    output
}

fn is_compact(width: u16) -> bool {
    width < COMPACT_WIDTH
}
