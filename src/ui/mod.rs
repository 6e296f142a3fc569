// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

use ratatui::style::Color;

use crate::models::Tone;

pub mod dashboard; // Routage du rendu + écran d'accueil
pub mod detail;    // Écran de détail (graphique + indicateurs)
pub mod events;    // Gestion des événements clavier/souris
pub mod news;      // Écran des actualités

// Re-exports pour simplifier les imports
pub use dashboard::render;
pub use events::{Event, EventHandler};

// ============================================================================
// Palette
// ============================================================================

/// Fond statique peint sur toute la fenêtre avant chaque écran
pub const BACKGROUND: Color = Color::Rgb(242, 242, 242);

/// Texte par défaut
pub const TEXT: Color = Color::Black;

/// Couleur d'accent (bordures, en-têtes, bouton)
pub const ACCENT: Color = Color::Rgb(30, 136, 229);

/// Texte secondaire (symboles, sources, dates)
pub const MUTED: Color = Color::Rgb(110, 110, 110);

pub const GAIN: Color = Color::Green;
pub const LOSS: Color = Color::Red;

/// Vert pour une hausse (variation >= 0), rouge pour une baisse
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Gain => GAIN,
        Tone::Loss => LOSS,
    }
}

// ============================================================================
// Helpers de test
// ============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    use crate::app::App;

    /// Rend l'application dans un terminal virtuel
    pub fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| super::render(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    /// Contenu texte du buffer, une ligne par rangée
    pub fn text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
