// ============================================================================
// Structure : PriceHistory
// ============================================================================
// Historique de prix sur 30 jours renvoyé par /coins/{id}/market_chart
//
// CONCEPTS RUST :
// 1. DateTime<Utc> : timestamps avec timezone UTC
// 2. Iterators : min/max/first/last sans copier les points
// ============================================================================

use chrono::{DateTime, Utc};

/// Nombre de jours d'historique demandés
pub const HISTORY_DAYS: u32 = 30;

/// Un point (date, prix) de l'historique
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceHistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PriceHistoryPoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Historique de prix d'une entrée, trié par date croissante
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    /// Identifiant CoinGecko de l'entrée
    pub id: String,

    pub points: Vec<PriceHistoryPoint>,
}

impl PriceHistory {
    pub fn new(id: String) -> Self {
        Self {
            id,
            points: Vec::new(),
        }
    }

    pub fn add_point(&mut self, point: PriceHistoryPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PriceHistoryPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PriceHistoryPoint> {
        self.points.last()
    }

    /// Bornes (min, max) des prix, None si l'historique est vide
    ///
    /// CONCEPT RUST : fold en un seul passage
    pub fn price_range(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points.iter().fold((f64::MAX, f64::MIN), |(min, max), p| {
            (min.min(p.price), max.max(p.price))
        }))
    }

    /// Variation en % entre le premier et le dernier point
    pub fn change_percent(&self) -> Option<f64> {
        let first = self.first()?.price;
        let last = self.last()?.price;
        if first == 0.0 {
            return None;
        }
        Some((last - first) / first * 100.0)
    }

    /// Points (jours écoulés depuis le premier point, prix) pour le graphique
    pub fn chart_points(&self) -> Vec<(f64, f64)> {
        let Some(origin) = self.first().map(|p| p.timestamp) else {
            return Vec::new();
        };
        self.points
            .iter()
            .map(|p| {
                let days = (p.timestamp - origin).num_seconds() as f64 / 86_400.0;
                (days, p.price)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn history(prices: &[f64]) -> PriceHistory {
        let start = Utc::now() - Duration::days(prices.len() as i64);
        let mut history = PriceHistory::new("bitcoin".to_string());
        for (i, &price) in prices.iter().enumerate() {
            history.add_point(PriceHistoryPoint::new(start + Duration::days(i as i64), price));
        }
        history
    }

    #[test]
    fn test_price_range() {
        let h = history(&[100.0, 80.0, 120.0, 110.0]);
        assert_eq!(h.price_range(), Some((80.0, 120.0)));
        assert!(PriceHistory::new("x".to_string()).price_range().is_none());
    }

    #[test]
    fn test_change_percent() {
        let h = history(&[100.0, 150.0]);
        assert_eq!(h.change_percent(), Some(50.0));
    }

    #[test]
    fn test_chart_points_are_in_days() {
        let h = history(&[1.0, 2.0, 3.0]);
        let points = h.chart_points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], (0.0, 1.0));
        assert_eq!(points[2], (2.0, 3.0));
    }
}
