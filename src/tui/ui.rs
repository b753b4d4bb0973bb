//! TUI rendering with ratatui.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::{self, Marker},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Block, Borders, Clear, List, ListItem, Paragraph,
    },
    Frame,
};

use super::app::TuiState;
use crate::gate::format_remaining;
use crate::wheel::geometry;

/// Spinner frames for animation.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Wheel radius in canvas units.
const WHEEL_RADIUS: f64 = 1.0;

/// Half-height of the canvas in canvas units, leaving room for the pointer.
const CANVAS_EXTENT: f64 = 1.25;

/// Labels are centred at this fraction of the radius.
const LABEL_RADIUS: f64 = 0.62;

/// Longest label drawn on a segment.
const MAX_LABEL_CHARS: usize = 12;

/// Draw the entire TUI.
pub fn draw(f: &mut Frame, state: &TuiState) {
    let area = f.area();

    // Main layout: header, body, footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(3), // Footer
        ])
        .split(area);

    draw_header(f, main_chunks[0], state);
    draw_body(f, main_chunks[1], state);
    draw_footer(f, main_chunks[2], state);

    if state.show_winner {
        draw_winner_popup(f, area, state);
    }
}

/// Draw the header bar.
fn draw_header(f: &mut Frame, area: Rect, state: &TuiState) {
    let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);
    let separator = || Span::styled(" │ ", Style::default().fg(Color::DarkGray));

    let mut spans = vec![
        Span::styled(" ◉ ", bold(Color::Green)),
        Span::styled("dinewheel", bold(Color::Cyan)),
        separator(),
    ];

    if state.spinning {
        let spinner = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(spinner, bold(Color::Cyan)));
        spans.push(Span::styled(" Spinning...", bold(Color::White)));
    } else {
        match &state.lock {
            Some((lock, remaining)) => {
                spans.push(Span::styled(lock.message(), bold(Color::Red)));
                spans.push(Span::styled(" ", Style::default()));
                spans.push(Span::styled(
                    format_remaining(*remaining),
                    Style::default().fg(Color::Yellow),
                ));
            }
            None => spans.push(Span::styled("Ready to spin", bold(Color::Green))),
        }
    }

    if !state.window.is_empty() {
        spans.push(separator());
        spans.push(Span::styled("window ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            state.window.clone(),
            Style::default().fg(Color::Blue),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray))
            .border_set(symbols::border::ROUNDED),
    );

    f.render_widget(header, area);
}

/// Draw the main body area.
fn draw_body(f: &mut Frame, area: Rect, state: &TuiState) {
    // Split into wheel (left) and sidebar (right)
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Wheel
            Constraint::Length(32), // Sidebar
        ])
        .split(area);

    draw_wheel(f, body_chunks[0], state);
    draw_sidebar(f, body_chunks[1], state);
}

/// Point on the wheel at `radius` for a wheel-frame angle, with the wheel
/// turned clockwise by `rotation`.
fn wheel_point(angle: f64, rotation: f64, radius: f64) -> (f64, f64) {
    let screen = angle + rotation;
    (radius * screen.sin(), radius * screen.cos())
}

/// Horizontal canvas extent that keeps the wheel round.
///
/// A terminal cell is roughly twice as tall as it is wide.
fn x_extent(area: Rect) -> f64 {
    let inner_width = area.width.saturating_sub(2).max(1) as f64;
    let inner_height = area.height.saturating_sub(2).max(1) as f64;
    CANVAS_EXTENT * inner_width / (2.0 * inner_height)
}

/// Draw the wheel with the pointer at the top.
fn draw_wheel(f: &mut Frame, area: Rect, state: &TuiState) {
    let count = state.labels.len();
    let rotation = state.orientation;
    let pointed = state.pointer_index();
    let x_extent = x_extent(area);
    let inner_height = area.height.saturating_sub(2).max(1) as f64;
    // Canvas units covered by one character column
    let char_width = CANVAS_EXTENT / inner_height;

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(" Wheel ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .border_set(symbols::border::ROUNDED),
        )
        .marker(Marker::Braille)
        .x_bounds([-x_extent, x_extent])
        .y_bounds([-CANVAS_EXTENT, CANVAS_EXTENT])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: WHEEL_RADIUS,
                color: Color::White,
            });

            if count == 0 {
                let text = "No restaurants available";
                ctx.print(
                    -(text.len() as f64) * char_width / 2.0,
                    0.0,
                    Span::styled(text, Style::default().fg(Color::DarkGray)),
                );
            }

            // Segment boundaries; a single segment has none
            if count > 1 {
                for k in 0..count {
                    let (x, y) = wheel_point(geometry::boundary(k, count), rotation, WHEEL_RADIUS);
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: 0.0,
                        x2: x,
                        y2: y,
                        color: Color::DarkGray,
                    });
                }
            }

            ctx.layer();

            for (i, label) in state.labels.iter().enumerate() {
                let (x, y) = wheel_point(
                    geometry::segment_center(i, count),
                    rotation,
                    WHEEL_RADIUS * LABEL_RADIUS,
                );
                let text = truncate_line(label, MAX_LABEL_CHARS);
                let style = if Some(i) == pointed {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(segment_color(i))
                };
                let offset = text.chars().count() as f64 * char_width / 2.0;
                ctx.print(x - offset, y, Span::styled(text, style));
            }

            // Pointer, tip down onto the rim
            let tip = WHEEL_RADIUS * 0.98;
            let top = WHEEL_RADIUS * 1.18;
            let half = 0.09;
            for (x1, y1, x2, y2) in [
                (0.0, tip, -half, top),
                (0.0, tip, half, top),
                (-half, top, half, top),
            ] {
                ctx.draw(&CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: Color::Red,
                });
            }
        });

    f.render_widget(canvas, area);
}

/// Cycling colour for unhighlighted segment labels.
fn segment_color(index: usize) -> Color {
    const COLORS: [Color; 4] = [Color::Cyan, Color::Magenta, Color::Green, Color::Blue];
    COLORS[index % COLORS.len()]
}

/// Draw the restaurant list.
fn draw_sidebar(f: &mut Frame, area: Rect, state: &TuiState) {
    let pointed = state.pointer_index();
    let width = area.width.saturating_sub(8) as usize;

    let items: Vec<ListItem> = state
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let (marker, style) = if Some(i) == pointed {
                (
                    "▶ ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("  ", Style::default().fg(Color::White))
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(format!("{:>2} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(truncate_line(label, width), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Restaurants ")
            .title_style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .border_set(symbols::border::ROUNDED),
    );

    f.render_widget(list, area);
}

/// Draw the footer bar.
fn draw_footer(f: &mut Frame, area: Rect, state: &TuiState) {
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    };
    let text = |t: &'static str| Span::styled(t, Style::default().fg(Color::DarkGray));

    let mut lines = vec![Line::from(vec![
        key(" space"),
        text(" spin  "),
        key("m"),
        text(" map  "),
        key("s"),
        text(" share  "),
        key("R"),
        text(" reset  "),
        key("q"),
        text(" quit"),
    ])];
    if let Some(notice) = &state.notice {
        lines.push(Line::from(Span::styled(
            format!(" {notice}"),
            Style::default().fg(Color::White),
        )));
    }

    let footer = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray))
            .border_set(symbols::border::ROUNDED),
    );

    f.render_widget(footer, area);
}

/// Draw the winner popup over the wheel.
fn draw_winner_popup(f: &mut Frame, area: Rect, state: &TuiState) {
    let Some(winner) = &state.winner else {
        return;
    };
    let popup = centered_rect(area, 46, 12);

    let label = |t: &'static str| Span::styled(t, Style::default().fg(Color::DarkGray));
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            winner.name.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if !winner.cuisine.is_empty() {
        lines.push(Line::from(vec![
            label("Cuisine:  "),
            Span::raw(format!("{} ({:.1}★)", winner.cuisine, winner.rating)),
        ]));
    }
    if !winner.address.is_empty() {
        lines.push(Line::from(vec![
            label("Address:  "),
            Span::raw(winner.address.clone()),
        ]));
    }
    if !winner.discount.is_empty() {
        lines.push(Line::from(vec![
            label("Deal:     "),
            Span::styled(winner.discount.clone(), Style::default().fg(Color::Green)),
        ]));
    }
    if let Some(code) = &state.discount_code {
        lines.push(Line::from(vec![
            label("Code:     "),
            Span::styled(
                code.clone(),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "m map · s share · enter close",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" ★ Winner ")
                .title_style(
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .border_set(symbols::border::DOUBLE),
        )
        .centered();

    f.render_widget(Clear, popup);
    f.render_widget(panel, popup);
}

/// Rectangle of at most `width` x `height` centred in `area`.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Truncate a line to fit within width.
fn truncate_line(line: &str, max_width: usize) -> String {
    if line.chars().count() <= max_width {
        line.to_string()
    } else {
        let truncated: String = line.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RestaurantDataset;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(state: &TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn labelled_state() -> TuiState {
        let dataset = RestaurantDataset::bundled().unwrap();
        TuiState {
            labels: dataset.restaurants.iter().map(|r| r.name.clone()).collect(),
            window: "00:00-10:00".into(),
            ..TuiState::default()
        }
    }

    #[test]
    fn test_draw_shows_header_and_keys() {
        let screen = render(&labelled_state());
        assert!(screen.contains("dinewheel"));
        assert!(screen.contains("Ready to spin"));
        assert!(screen.contains("spin"));
        assert!(screen.contains("Restaurants"));
    }

    #[test]
    fn test_draw_empty_wheel() {
        let screen = render(&TuiState::default());
        assert!(screen.contains("No restaurants available"));
    }

    #[test]
    fn test_draw_winner_popup() {
        let dataset = RestaurantDataset::bundled().unwrap();
        let mut state = labelled_state();
        state.winner = dataset.get(0).cloned();
        state.discount_code = Some("SPIN10".into());
        state.show_winner = true;

        let screen = render(&state);
        assert!(screen.contains("Winner"));
        assert!(screen.contains("SPIN10"));
    }

    #[test]
    fn test_truncate_line() {
        assert_eq!(truncate_line("short", 10), "short");
        assert_eq!(truncate_line("a much longer name", 10), "a much ...");
    }

    #[test]
    fn test_centered_rect_fits_small_area() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(area, 46, 12);
        assert_eq!(rect, Rect::new(0, 0, 20, 5));

        let rect = centered_rect(Rect::new(0, 0, 100, 30), 46, 12);
        assert_eq!(rect, Rect::new(27, 9, 46, 12));
    }

    #[test]
    fn test_wheel_point_top_is_pointer() {
        let (x, y) = wheel_point(0.0, 0.0, 1.0);
        assert!(x.abs() < 1e-12);
        assert!((y - 1.0).abs() < 1e-12);

        // A clockwise quarter turn moves the zero mark to the right
        let (x, y) = wheel_point(0.0, std::f64::consts::FRAC_PI_2, 1.0);
        assert!((x - 1.0).abs() < 1e-12);
        assert!(y.abs() < 1e-12);
    }
}
