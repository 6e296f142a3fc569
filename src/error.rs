// ============================================================================
// Erreurs de récupération de données
// ============================================================================
// Une seule taxonomie : "échec de récupération". Elle couvre les erreurs de
// connexion, les statuts HTTP non-2xx, le JSON malformé et les champs
// manquants. Les écrans l'attrapent à leur frontière et la remplacent par
// un enregistrement d'exemple.
// ============================================================================

use thiserror::Error;

/// Échec lors de la récupération d'une ressource distante
#[derive(Error, Debug)]
pub enum FetchError {
    /// Erreur de transport (connexion refusée, DNS, TLS, etc.)
    #[error("HTTP request to {endpoint} failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Le serveur a répondu avec un statut non-2xx
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },

    /// JSON malformé ou champ manquant
    #[error("malformed {endpoint} payload: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Horodatage illisible dans la réponse
    #[error("invalid timestamp {value:?}")]
    Timestamp { value: String },
}

impl FetchError {
    /// Nom court de l'endpoint concerné, utilisé comme champ de log
    pub fn endpoint(&self) -> &'static str {
        match self {
            FetchError::Request { endpoint, .. }
            | FetchError::Status { endpoint, .. }
            | FetchError::Decode { endpoint, .. } => endpoint,
            FetchError::Timestamp { .. } => "timestamp",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = FetchError::Status {
            endpoint: "coins/markets",
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
        };
        assert_eq!(err.endpoint(), "coins/markets");
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn test_decode_message() {
        let source = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        let err = FetchError::Decode {
            endpoint: "everything",
            source,
        };
        assert!(err.to_string().starts_with("malformed everything payload"));
    }
}
