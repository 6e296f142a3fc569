// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Route le rendu vers l'écran courant et dessine l'écran d'accueil :
// en-tête, grille de cartes à deux colonnes, bouton des actualités, footer.
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones
// 3. Rect calculés à la main pour la grille, réutilisés pour le hit-test
//    des clics souris (même calcul au rendu et à l'entrée)
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::screens::{Card, ListingScreen, GRID_COLUMNS};
use crate::ui::{detail, news, tone_color, ACCENT, BACKGROUND, MUTED, TEXT};

/// Hauteur d'une carte : bordures + nom/symbole, prix, variation
pub const CARD_HEIGHT: u16 = 5;

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le fond est peint d'abord, puis l'écran courant par-dessus
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.size();
    frame.render_widget(
        Block::default().style(Style::default().bg(BACKGROUND).fg(TEXT)),
        area,
    );

    match app.current_screen {
        Screen::Home => render_home(frame, app, area),
        Screen::Detail => detail::render_detail(frame, app, area),
        Screen::News => news::render_news(frame, app, area),
    }
}

// ============================================================================
// Layout : Découpage de l'écran
// ============================================================================

/// Zones de l'écran d'accueil
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeLayout {
    pub header: Rect,
    pub grid: Rect,
    pub news_button: Rect,
    pub footer: Rect,
}

/// Crée le layout de l'accueil (header, grille, bouton, footer)
pub fn home_layout(area: Rect) -> HomeLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Grille : tout le reste
            Constraint::Length(3), // Bouton actualités
            Constraint::Length(3), // Footer
        ])
        .split(area);

    HomeLayout {
        header: chunks[0],
        grid: chunks[1],
        news_button: chunks[2],
        footer: chunks[3],
    }
}

fn grid_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Top 10 ")
}

/// Première rangée visible pour que la carte sélectionnée reste à l'écran
pub fn first_visible_row(selected: usize, visible_rows: usize) -> usize {
    let selected_row = selected / GRID_COLUMNS;
    if visible_rows == 0 || selected_row < visible_rows {
        0
    } else {
        selected_row + 1 - visible_rows
    }
}

/// Zones des cartes visibles dans la grille, avec l'index de leur carte
///
/// CONCEPT : Association explicite carte <-> index
/// - Le rendu et le hit-test utilisent cette même fonction
/// - Un clic retrouve l'index, l'index retrouve l'entrée
pub fn card_areas(grid: Rect, count: usize, selected: usize) -> Vec<(usize, Rect)> {
    let inner = grid_block().inner(grid);
    let visible_rows = (inner.height / CARD_HEIGHT) as usize;
    if visible_rows == 0 || inner.width < GRID_COLUMNS as u16 {
        return Vec::new();
    }

    let first_row = first_visible_row(selected, visible_rows);
    let left_width = inner.width / GRID_COLUMNS as u16;

    (0..count)
        .filter_map(|index| {
            let row = index / GRID_COLUMNS;
            let column = index % GRID_COLUMNS;
            if row < first_row || row >= first_row + visible_rows {
                return None;
            }

            let y = inner.y + ((row - first_row) as u16) * CARD_HEIGHT;
            let (x, width) = if column == 0 {
                (inner.x, left_width)
            } else {
                (inner.x + left_width, inner.width - left_width)
            };
            Some((index, Rect::new(x, y, width, CARD_HEIGHT)))
        })
        .collect()
}

/// Élément de l'accueil sous un clic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeTarget {
    Card(usize),
    NewsButton,
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Retrouve la carte (ou le bouton) sous la position (colonne, ligne)
pub fn hit_test(viewport: Rect, listing: &ListingScreen, column: u16, row: u16) -> Option<HomeTarget> {
    let layout = home_layout(viewport);

    if contains(layout.news_button, column, row) {
        return Some(HomeTarget::NewsButton);
    }

    card_areas(layout.grid, listing.cards.len(), listing.selected)
        .into_iter()
        .find(|(_, area)| contains(*area, column, row))
        .map(|(index, _)| HomeTarget::Card(index))
}

// ============================================================================
// Écran d'accueil
// ============================================================================

fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let layout = home_layout(area);

    render_header(frame, Screen::Home.title(), layout.header);
    render_grid(frame, &app.listing, layout.grid);
    render_news_button(frame, layout.news_button);
    render_footer(frame, app, layout.footer);
}

/// Dessine l'en-tête avec le titre de l'écran
pub fn render_header(frame: &mut Frame, title: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let paragraph = Paragraph::new(Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )))
    .block(block)
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_grid(frame: &mut Frame, listing: &ListingScreen, area: Rect) {
    if listing.is_empty() {
        let message = if listing.loading || !listing.loaded {
            "Chargement..."
        } else {
            "Aucune donnée de marché"
        };
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(MUTED))),
        ])
        .block(grid_block())
        .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
        return;
    }

    frame.render_widget(grid_block(), area);

    for (index, card_area) in card_areas(area, listing.cards.len(), listing.selected) {
        if let Some(card) = listing.card(index) {
            render_card(frame, card, index == listing.selected, card_area);
        }
    }
}

/// Dessine une carte : nom + symbole, prix, variation colorée
fn render_card(frame: &mut Frame, card: &Card, selected: bool, area: Rect) {
    let color = tone_color(card.tone);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED));
    if selected {
        block = block
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    }

    let text = vec![
        Line::from(vec![
            Span::styled(card.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(card.symbol.clone(), Style::default().fg(MUTED)),
        ]),
        Line::from(Span::styled(
            card.price.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(card.change.clone(), Style::default().fg(color))),
    ];

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_news_button(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        "Crypto News",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT)),
    )
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer : Instructions
// ============================================================================

/// Dessine le footer : confirmation de quit, chargement ou raccourcis
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);

    let line = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("Appuyez sur ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(crate::ui::LOSS)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler",
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])
    } else if let Some(message) = app.loading_message() {
        Line::from(Span::styled(message, Style::default().fg(MUTED)))
    } else {
        let shortcuts: &[(&str, &str)] = match app.current_screen {
            Screen::Home => &[
                ("[q]", " Quit  "),
                ("[←↑↓→]", " Move  "),
                ("[Enter/Click]", " Detail  "),
                ("[n]", " News  "),
                ("[r]", " Refresh"),
            ],
            Screen::Detail => &[("[q]", " Quit  "), ("[Esc]", " Back")],
            Screen::News => &[("[q]", " Quit  "), ("[↑↓]", " Scroll  "), ("[Esc]", " Back")],
        };
        Line::from(
            shortcuts
                .iter()
                .flat_map(|&(key, label)| [Span::styled(key, key_style), Span::raw(label)])
                .collect::<Vec<_>>(),
        )
    };

    let paragraph = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::models::MarketEntry;
    use crate::ui::test_support::{draw, text};
    use crate::ui::{GAIN, LOSS};
    use crate::worker::AppResult;

    fn app_with(entries: Vec<MarketEntry>) -> App {
        let mut app = App::new();
        app.start();
        app.apply_result(AppResult::MarketsLoaded(Ok(entries)));
        app
    }

    #[test]
    fn test_first_visible_row() {
        assert_eq!(first_visible_row(0, 3), 0);
        assert_eq!(first_visible_row(5, 3), 0);
        assert_eq!(first_visible_row(6, 3), 1);
        assert_eq!(first_visible_row(9, 2), 3);
    }

    #[test]
    fn test_card_areas_two_columns() {
        let grid = Rect::new(0, 3, 80, 30);
        let areas = card_areas(grid, 5, 0);
        assert_eq!(areas.len(), 5);

        let (_, first) = areas[0];
        let (_, second) = areas[1];
        let (_, third) = areas[2];
        assert_eq!(first.y, second.y);
        assert_eq!(first.x + first.width, second.x);
        assert_eq!(third.x, first.x);
        assert_eq!(third.y, first.y + CARD_HEIGHT);
    }

    #[test]
    fn test_card_areas_scroll_with_selection() {
        // 2 rangées visibles
        let grid = Rect::new(0, 0, 60, 12);
        let areas = card_areas(grid, 10, 9);
        let indices: Vec<_> = areas.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![6, 7, 8, 9]);
    }

    #[test]
    fn test_hit_test_outside_cards() {
        let app = app_with(vec![MarketEntry::sample()]);
        let viewport = Rect::new(0, 0, 80, 40);
        assert_eq!(hit_test(viewport, &app.listing, 0, 0), None);
    }

    #[test]
    fn test_render_cards() {
        let app = app_with(vec![
            MarketEntry::new("bitcoin", "Bitcoin", "btc", 64_123.5, 1.75),
            MarketEntry::new("ethereum", "Ethereum", "eth", 3_150.2, -0.42),
            MarketEntry::new("tether", "Tether", "usdt", 1.0, 0.0),
        ]);
        let buffer = draw(&app, 80, 40);
        let screen = text(&buffer);

        assert!(screen.contains("MORKAN"));
        assert!(screen.contains("Bitcoin  BTC"));
        assert!(screen.contains("$64,123.50"));
        assert!(screen.contains("+1.75%"));
        assert!(screen.contains("Ethereum  ETH"));
        assert!(screen.contains("-0.42%"));
        assert!(screen.contains("USDT"));
        assert!(screen.contains("+0.00%"));
        assert!(screen.contains("Crypto News"));
        assert_eq!(screen.matches('%').count(), 3);
    }

    #[test]
    fn test_change_colors() {
        let app = app_with(vec![
            MarketEntry::new("a", "Alpha", "a", 1.0, 0.0),
            MarketEntry::new("b", "Beta", "b", 1.0, -1.0),
        ]);
        let buffer = draw(&app, 80, 40);

        let colors: Vec<_> = buffer
            .content
            .iter()
            .filter(|cell| cell.symbol() == "%")
            .map(|cell| cell.fg)
            .collect();
        assert_eq!(colors, vec![GAIN, LOSS]);
    }

    #[test]
    fn test_render_failure_sample() {
        let mut app = App::new();
        app.start();
        app.apply_result(AppResult::MarketsLoaded(Err(FetchError::Timestamp {
            value: "simulated".to_string(),
        })));

        let screen = text(&draw(&app, 80, 40));
        assert!(screen.contains("Bitcoin  BTC"));
        assert!(screen.contains("$50,000.00"));
        assert!(screen.contains("+2.50%"));
        assert_eq!(screen.matches('%').count(), 1);
    }

    #[test]
    fn test_background_is_painted() {
        let app = App::new();
        let buffer = draw(&app, 40, 20);
        assert!(buffer.content.iter().all(|cell| cell.bg == BACKGROUND));
    }
}
