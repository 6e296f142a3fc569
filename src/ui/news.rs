// ============================================================================
// News - Rendu de l'écran des actualités
// ============================================================================
// Une rangée par article : titre en gras, description, puis "source - date".
// Le défilement commence à l'article `scroll`.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Screen};
use crate::models::NewsArticle;
use crate::ui::dashboard::{render_footer, render_header};
use crate::ui::{ACCENT, MUTED};

/// Dessine l'écran des actualités
pub fn render_news(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Articles
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(frame, Screen::News.title(), chunks[0]);
    render_articles(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

/// Lignes d'un article, suivies d'une ligne vide de séparation
fn article_lines(article: &NewsArticle) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            article.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(article.description.clone()),
        Line::from(Span::styled(article.byline(), Style::default().fg(MUTED))),
        Line::from(""),
    ]
}

fn render_articles(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    if app.news.articles.is_empty() {
        let message = if app.news.loading {
            "Chargement..."
        } else {
            "Aucun article"
        };
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(MUTED))),
        ])
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let lines: Vec<Line> = app
        .news
        .articles
        .iter()
        .skip(app.news.scroll)
        .flat_map(article_lines)
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block.title(format!(
            " {}/{} ",
            app.news.scroll + 1,
            app.news.articles.len()
        )))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Transition;
    use crate::error::FetchError;
    use crate::models::news_article::parse_published_at;
    use crate::ui::test_support::{draw, text};
    use crate::worker::AppResult;

    fn article(title: &str, source: &str) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            description: format!("About {}", title),
            source_name: source.to_string(),
            published_at: parse_published_at("2024-01-05T10:00:00Z").unwrap(),
        }
    }

    fn news_app(result: Result<Vec<NewsArticle>, FetchError>) -> App {
        let mut app = App::new();
        app.start();
        app.apply_result(AppResult::MarketsLoaded(Ok(Vec::new())));
        app.navigate(Transition::News);
        app.apply_result(AppResult::NewsLoaded(result));
        app
    }

    #[test]
    fn test_render_rows() {
        let app = news_app(Ok(vec![article("ETF inflows", "Reuters"), article("Halving", "CoinDesk")]));
        let screen = text(&draw(&app, 80, 40));

        assert!(screen.contains("Crypto News"));
        assert!(screen.contains("ETF inflows"));
        assert!(screen.contains("About ETF inflows"));
        assert!(screen.contains("Reuters - 05/01/2024"));
        assert!(screen.contains("CoinDesk - 05/01/2024"));
    }

    #[test]
    fn test_render_scrolled() {
        let mut app = news_app(Ok(vec![article("First story", "A"), article("Second story", "B")]));
        app.news.scroll_down();

        let screen = text(&draw(&app, 80, 40));
        assert!(!screen.contains("First story"));
        assert!(screen.contains("Second story"));
        assert!(screen.contains("2/2"));
    }

    #[test]
    fn test_render_failure_sample() {
        let app = news_app(Err(FetchError::Timestamp {
            value: "simulated".to_string(),
        }));
        let screen = text(&draw(&app, 80, 40));

        assert!(screen.contains("Bitcoin Breaks Higher"));
        assert!(screen.contains("Crypto News - "));
    }
}
