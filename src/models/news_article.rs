// ============================================================================
// Structure : NewsArticle
// ============================================================================
// Un article de /v2/everything (NewsAPI)
//
// La date de publication arrive au format fixe "YYYY-MM-DDTHH:MM:SSZ".
// Elle est affichée telle quelle en jour/mois/année, sans conversion de
// fuseau horaire.
// ============================================================================

use chrono::{NaiveDateTime, Utc};

use crate::error::FetchError;

/// Format de `publishedAt` dans les réponses NewsAPI
pub const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format d'affichage de la date
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq)]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub source_name: String,
    pub published_at: NaiveDateTime,
}

impl NewsArticle {
    /// Article affiché à la place du flux quand la récupération échoue
    pub fn sample() -> Self {
        Self {
            title: "Bitcoin Breaks Higher".to_string(),
            description: "Bitcoin gained 5% over the last 24 hours and climbed past the $50,000 level."
                .to_string(),
            source_name: "Crypto News".to_string(),
            published_at: Utc::now().naive_utc(),
        }
    }

    /// Date de publication au format jj/mm/aaaa
    pub fn formatted_date(&self) -> String {
        self.published_at.format(DISPLAY_DATE_FORMAT).to_string()
    }

    /// Ligne "source - date" sous la description
    pub fn byline(&self) -> String {
        format!("{} - {}", self.source_name, self.formatted_date())
    }
}

/// Parse un `publishedAt` NewsAPI
pub fn parse_published_at(value: &str) -> Result<NaiveDateTime, FetchError> {
    NaiveDateTime::parse_from_str(value, PUBLISHED_AT_FORMAT).map_err(|_| FetchError::Timestamp {
        value: value.to_string(),
    })
}

/// Reformate un `publishedAt` NewsAPI en jj/mm/aaaa
pub fn reformat_published_at(value: &str) -> Result<String, FetchError> {
    Ok(parse_published_at(value)?.format(DISPLAY_DATE_FORMAT).to_string())
}
