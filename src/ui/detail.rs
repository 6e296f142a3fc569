// ============================================================================
// Detail - Rendu de l'écran de détail
// ============================================================================
// Titre "Nom (SYMBOLE)", prix, graphique sur 30 jours et indicateurs.
//
// CONCEPTS RUST :
// 1. Pattern matching sur HistoryState : un rendu par état
// 2. Iterator chaining : indicateurs -> lignes de texte
//
// CONCEPTS RATATUI :
// 1. Chart widget : graphique ligne
// 2. Axis : bornes et labels calculés depuis l'historique
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::models::{format_usd, MarketEntry, PriceHistory, Tone, HISTORY_DAYS};
use crate::screens::{DetailScreen, HistoryState};
use crate::ui::dashboard::{render_footer, render_header};
use crate::ui::{tone_color, ACCENT, LOSS, MUTED};

/// Dessine l'écran de détail
pub fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Titre + prix
            Constraint::Min(0),    // Graphique
            Constraint::Length(5), // Indicateurs
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(frame, Screen::Detail.title(), chunks[0]);

    let Some(entry) = app.detail.entry.as_ref() else {
        render_message(frame, chunks[2], "Aucune entrée sélectionnée", MUTED);
        render_footer(frame, app, chunks[4]);
        return;
    };

    render_summary(frame, &app.detail, entry, chunks[1]);
    render_history(frame, &app.detail.history, entry, chunks[2]);
    render_indicators(frame, &app.detail, chunks[3]);
    render_footer(frame, app, chunks[4]);
}

/// Titre et prix de l'entrée
fn render_summary(frame: &mut Frame, detail: &DetailScreen, entry: &MarketEntry, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            detail.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                entry.formatted_price(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                entry.formatted_change(),
                Style::default().fg(tone_color(entry.tone())),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT)
                .border_style(Style::default().fg(ACCENT)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Graphique de l'historique
// ============================================================================

fn render_history(frame: &mut Frame, history: &HistoryState, entry: &MarketEntry, area: Rect) {
    match history {
        HistoryState::Loaded(history) if !history.is_empty() => {
            render_chart(frame, history, entry, area)
        }
        HistoryState::Loaded(_) => render_message(frame, area, "Historique vide", MUTED),
        HistoryState::Loading => render_message(frame, area, "Chargement de l'historique...", MUTED),
        HistoryState::Unavailable => render_message(frame, area, "Historique indisponible", LOSS),
        HistoryState::Idle => render_message(frame, area, "", MUTED),
    }
}

/// Bornes de l'axe Y avec une marge de 5%
///
/// Un historique plat reçoit une marge relative au prix pour que la ligne
/// reste au milieu du graphique.
pub fn y_bounds(min: f64, max: f64) -> [f64; 2] {
    let spread = max - min;
    let margin = if spread > 0.0 {
        spread * 0.05
    } else {
        (max.abs() * 0.05).max(1.0)
    };
    [(min - margin).max(0.0), max + margin]
}

/// Dessine le graphique ligne
///
/// CONCEPT RUST : fold pour les bornes, déjà fait par price_range()
fn render_chart(frame: &mut Frame, history: &PriceHistory, entry: &MarketEntry, area: Rect) {
    let points = history.chart_points();
    let Some((min_price, max_price)) = history.price_range() else {
        render_message(frame, area, "Historique vide", MUTED);
        return;
    };
    let [y_min, y_max] = y_bounds(min_price, max_price);
    let x_max = points.last().map(|&(x, _)| x).unwrap_or(0.0).max(1.0);

    // La couleur suit la tendance sur la période affichée
    let tone = history
        .change_percent()
        .map(Tone::from_change)
        .unwrap_or(entry.tone());

    let datasets = vec![Dataset::default()
        .name(entry.display_symbol())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(tone_color(tone)))
        .data(&points)];

    let x_axis = Axis::default()
        .title("Jours")
        .style(Style::default().fg(MUTED))
        .bounds([0.0, x_max])
        .labels(vec![
            Span::raw(format!("-{}j", HISTORY_DAYS)),
            Span::raw(""),
            Span::raw("auj."),
        ]);

    let y_axis = Axis::default()
        .title("Prix ($)")
        .style(Style::default().fg(MUTED))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format_usd(y_min)),
            Span::raw(format_usd((y_min + y_max) / 2.0)),
            Span::raw(format_usd(y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(format!(" {} - {} jours ", entry.display_symbol(), HISTORY_DAYS)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

// ============================================================================
// Indicateurs
// ============================================================================

fn render_indicators(frame: &mut Frame, detail: &DetailScreen, area: Rect) {
    let lines: Vec<Line> = detail
        .indicators
        .iter()
        .map(|indicator| Line::from(indicator.display()))
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT))
            .title(" Technical Indicators "),
    );

    frame.render_widget(paragraph, area);
}

/// Message centré dans un bloc (chargement, erreur)
fn render_message(frame: &mut Frame, area: Rect, message: &str, color: ratatui::style::Color) {
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(color))),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT)),
    )
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
