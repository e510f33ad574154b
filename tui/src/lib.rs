//! TUI rendering for Valentine using ratatui.

mod assets;
mod effects;
mod input;
mod state;
mod theme;

pub use assets::{art, dimensions};
pub use effects::{Confetti, TerminalEffects, scale_rect};
pub use input::{InputPump, apply_event, handle_events};
pub use state::{Focus, ViewState};
pub use theme::{Glyphs, Palette, glyphs, palette, spinner_frame, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use valentine_engine::{App, AssetId, EscalationLevel, EscalationState, Stage, view};

const BUTTON_HEIGHT: u16 = 3;
const BUTTON_PADDING: u16 = 6;

const ENVELOPE: [&str; 7] = [
    "+-----------------------------+",
    "|\\                           /|",
    "|  \\                       /  |",
    "|    \\                   /    |",
    "|      \\       {}      /      |",
    "|        \\___________/        |",
    "+-----------------------------+",
];

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App, ui: &ViewState) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),    // Stage content
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    match app.stage() {
        Stage::Envelope => draw_envelope(frame, chunks[0], &palette, &glyphs),
        Stage::Intro => draw_intro(frame, chunks[0], &palette),
        Stage::Loading => draw_loading(frame, app, ui, chunks[0], &palette),
        Stage::Asking => draw_asking(frame, app, ui, chunks[0], &palette),
        Stage::Accepted => draw_accepted(frame, app, chunks[0], &palette, &glyphs),
        Stage::Note => draw_note(frame, chunks[0], &palette, &glyphs),
    }
    draw_key_hints(frame, app.stage(), chunks[1], &palette, &glyphs);

    // Confetti sits above everything else.
    let area = frame.area();
    ui.confetti
        .render(area, frame.buffer_mut(), &palette, &glyphs);
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn text_width(text: &str) -> u16 {
    u16::try_from(UnicodeWidthStr::width(text)).unwrap_or(u16::MAX)
}

/// Stack `rows` of fixed heights vertically around the middle of `area`.
fn stack(area: Rect, rows: &[u16]) -> Vec<Rect> {
    let total: u16 = rows.iter().fold(0, |acc, h| acc.saturating_add(*h));
    let column = centered(area, area.width, total);
    let mut y = column.y;
    let bottom = column.y + column.height;
    rows.iter()
        .map(|&h| {
            let height = h.min(bottom.saturating_sub(y));
            let rect = Rect::new(column.x, y, column.width, height);
            y += height;
            rect
        })
        .collect()
}

fn art_paragraph(id: AssetId, style: Style) -> Paragraph<'static> {
    let lines: Vec<Line> = assets::art(id)
        .lines()
        .map(|l| Line::from(Span::styled(l, style)))
        .collect();
    Paragraph::new(lines)
}

fn draw_art(frame: &mut Frame, stage: Stage, area: Rect, style: Style) {
    let Some(id) = stage.asset() else {
        return;
    };
    let (width, height) = assets::dimensions(id);
    frame.render_widget(art_paragraph(id, style), centered(area, width, height));
}

fn draw_button(frame: &mut Frame, label: &str, area: Rect, style: Style) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(style);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height > 0 {
        let line = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
        frame.render_widget(
            Paragraph::new(label.to_string()).alignment(Alignment::Center),
            line,
        );
    }
}

fn draw_envelope(frame: &mut Frame, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let rows = stack(area, &[1, 1, ENVELOPE.len() as u16]);

    frame.render_widget(
        Paragraph::new("You have mail")
            .style(styles::heading(palette))
            .alignment(Alignment::Center),
        rows[0],
    );

    let paper = Style::default().fg(palette.paper);
    let heart = Style::default()
        .fg(palette.critical)
        .add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = ENVELOPE
        .iter()
        .map(|row| match row.split_once("{}") {
            Some((left, right)) => {
                // Keep the flap symmetric whatever width the heart glyph has.
                let pad = 2usize.saturating_sub(UnicodeWidthStr::width(glyphs.heart));
                Line::from(vec![
                    Span::styled(left, paper),
                    Span::styled(glyphs.heart, heart),
                    Span::styled(" ".repeat(pad), paper),
                    Span::styled(right, paper),
                ])
            }
            None => Line::from(Span::styled(*row, paper)),
        })
        .collect();
    let width = text_width(ENVELOPE[0]);
    frame.render_widget(
        Paragraph::new(lines),
        centered(rows[2], width, ENVELOPE.len() as u16),
    );
}

fn draw_intro(frame: &mut Frame, area: Rect, palette: &Palette) {
    let (_, art_height) = assets::dimensions(AssetId::Intro);
    let rows = stack(area, &[1, 1, art_height, 1, BUTTON_HEIGHT]);

    frame.render_widget(
        Paragraph::new("I have a question for you ;)")
            .style(styles::heading(palette))
            .alignment(Alignment::Center),
        rows[0],
    );
    draw_art(
        frame,
        Stage::Intro,
        rows[2],
        Style::default().fg(palette.plea),
    );

    let label = "Continue";
    let button = centered(rows[4], text_width(label) + BUTTON_PADDING, BUTTON_HEIGHT);
    draw_button(
        frame,
        label,
        button,
        styles::button(palette, palette.continue_button, true),
    );
}

fn draw_loading(frame: &mut Frame, app: &App, ui: &ViewState, area: Rect, palette: &Palette) {
    let spinner = spinner_frame(ui.spinner_tick(), app.ui_options());
    let line = Line::from(vec![
        Span::styled(format!("{spinner} "), styles::key_highlight(palette)),
        Span::styled(app.loading_message().to_string(), styles::code(palette)),
    ]);
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        centered(area, area.width, 1),
    );
}

fn draw_asking(frame: &mut Frame, app: &App, ui: &ViewState, area: Rect, palette: &Palette) {
    let escalation = app.snapshot().escalation;
    let rows = stack(area, &[1, 1, 2, 1, BUTTON_HEIGHT * 2, 1, 4]);

    let badge = Line::from(vec![
        Span::styled(
            format!(" NODE_DIST: {}km ", app.route_distance_km()),
            Style::default().fg(palette.text_on_button).bg(palette.bg_border),
        ),
        Span::raw(" "),
        Span::styled("SSL: SECURE_AFFECTION", styles::muted(palette)),
    ]);
    frame.render_widget(Paragraph::new(badge).alignment(Alignment::Center), rows[0]);

    let prompt_style = match escalation.level {
        EscalationLevel::Calm => styles::code(palette),
        EscalationLevel::Pleading => Style::default()
            .fg(palette.plea)
            .add_modifier(Modifier::BOLD),
        EscalationLevel::Hostile => Style::default()
            .fg(palette.critical)
            .add_modifier(Modifier::BOLD),
    };
    frame.render_widget(
        Paragraph::new(view::prompt_text(escalation.level, app.recipient()))
            .style(prompt_style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[2],
    );

    draw_choice_buttons(frame, &escalation, ui.focus, rows[4], palette);
    draw_status_panel(frame, app, &escalation, rows[6], palette);
}

fn draw_choice_buttons(
    frame: &mut Frame,
    escalation: &EscalationState,
    focus: Focus,
    area: Rect,
    palette: &Palette,
) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let accept_label = view::accept_label(escalation.level);
    let accept_focused =
        focus == Focus::Accept && view::accept_highlight_enabled(escalation.level);
    let accept_fill = if accept_focused {
        palette.accept_hover
    } else {
        palette.accept
    };
    let base = centered(
        halves[0],
        text_width(accept_label) + BUTTON_PADDING,
        BUTTON_HEIGHT,
    );
    let rect = scale_rect(base, view::accept_emphasis_scale(escalation), halves[0]);
    draw_button(
        frame,
        accept_label,
        rect,
        styles::button(palette, accept_fill, accept_focused),
    );

    let decline_label = view::decline_label(escalation.level);
    let decline_focused = focus == Focus::Decline;
    let decline_fill = if decline_focused {
        palette.decline_hover
    } else {
        palette.decline
    };
    let base = centered(
        halves[1],
        text_width(decline_label) + BUTTON_PADDING,
        BUTTON_HEIGHT,
    );
    let rect = scale_rect(base, view::decline_emphasis_scale(escalation), halves[1]);
    draw_button(
        frame,
        decline_label,
        rect,
        styles::button(palette, decline_fill, decline_focused),
    );
}

fn draw_status_panel(
    frame: &mut Frame,
    app: &App,
    escalation: &EscalationState,
    area: Rect,
    palette: &Palette,
) {
    let status = view::status_line(
        escalation.level,
        escalation.hostile_confirm_attempts,
        app.recipient(),
    );
    let tone = match status.tone {
        view::Tone::Neutral => styles::muted(palette),
        view::Tone::Warning => Style::default().fg(palette.warning),
        view::Tone::Critical => Style::default()
            .fg(palette.critical)
            .add_modifier(Modifier::BOLD),
    };
    let text = Text::from(vec![
        Line::from(Span::styled("$ status --check-affection", styles::code(palette))),
        Line::from(Span::styled(status.text, tone)),
    ]);

    let width = area.width.min(64);
    let panel = centered(area, width, area.height);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_panel));
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true }),
        panel,
    );
}

fn draw_accepted(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let escalation = app.snapshot().escalation;
    let errors = view::compilation_errors_line(escalation.refusal_count);
    let (_, art_height) = assets::dimensions(AssetId::Accepted);
    let errors_height = if errors.is_some() { 3 } else { 0 };
    let rows = stack(area, &[1, 1, art_height, 1, 1, errors_height, 1, 1]);

    let headline = Line::from(vec![
        Span::styled(
            "PR #01: Successfully merged into my heart ",
            styles::heading(palette),
        ),
        Span::styled(glyphs.heart, Style::default().fg(palette.critical)),
    ]);
    frame.render_widget(
        Paragraph::new(headline).alignment(Alignment::Center),
        rows[0],
    );
    draw_art(
        frame,
        Stage::Accepted,
        rows[2],
        Style::default().fg(palette.accept_hover),
    );
    frame.render_widget(
        Paragraph::new(format!(
            "Persistent link established across {}km.",
            app.route_distance_km()
        ))
        .style(styles::muted(palette))
        .alignment(Alignment::Center),
        rows[4],
    );

    if let Some(errors) = errors {
        let width = text_width(&errors) + 4;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.bg_border));
        frame.render_widget(
            Paragraph::new(errors)
                .style(Style::default().fg(palette.warning))
                .alignment(Alignment::Center)
                .block(block),
            centered(rows[5], width, errors_height),
        );
    }

    frame.render_widget(
        Paragraph::new("View Note from Developer")
            .style(styles::ghost_button(palette).add_modifier(Modifier::UNDERLINED))
            .alignment(Alignment::Center),
        rows[7],
    );
}

fn draw_note(frame: &mut Frame, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let (_, art_height) = assets::dimensions(AssetId::Note);
    let rows = stack(area, &[art_height, 1, 1]);
    draw_art(
        frame,
        Stage::Note,
        rows[0],
        Style::default().fg(palette.paper),
    );
    frame.render_widget(
        Paragraph::new(format!("{} Back", glyphs.back))
            .style(styles::ghost_button(palette))
            .alignment(Alignment::Center),
        rows[2],
    );
}

fn key_hints(stage: Stage) -> &'static [(&'static str, &'static str)] {
    match stage {
        Stage::Envelope => &[("Enter", "open"), ("h", "hug"), ("q", "quit")],
        Stage::Intro => &[("Enter", "continue"), ("q", "quit")],
        Stage::Loading => &[("q", "quit")],
        Stage::Asking => &[
            ("y", "yes"),
            ("n", "no"),
            ("Tab", "focus"),
            ("Enter", "press"),
            ("q", "quit"),
        ],
        Stage::Accepted => &[("v", "view note"), ("q", "quit")],
        Stage::Note => &[("Esc", "back"), ("q", "quit")],
    }
}

fn draw_key_hints(frame: &mut Frame, stage: Stage, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let mut spans = Vec::new();
    for (i, (key, action)) in key_hints(stage).iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(
                format!(" {} ", glyphs.separator),
                styles::key_hint(palette),
            ));
        }
        spans.push(Span::styled(*key, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {action}"), styles::key_hint(palette)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
