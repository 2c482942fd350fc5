//! Begrenztes Log aller angenommenen Änderungswünsche.

use super::events::EditRequest;

/// Speichert übergebene Requests in Reihenfolge.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<EditRequest>,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;
}

impl CommandLog {
    /// Erstellt ein leeres Command-Log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Fügt einen angenommenen Request hinzu.
    /// Begrenzt auf MAX_ENTRIES, ältere Einträge werden verworfen.
    pub fn record(&mut self, request: &EditRequest) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(request.clone());
    }

    /// Gibt die Anzahl der geloggten Requests zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Requests vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Liefert eine read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[EditRequest] {
        &self.entries
    }

    /// Zuletzt angenommener Request.
    pub fn last(&self) -> Option<&EditRequest> {
        self.entries.last()
    }

    /// Merge-Flags aller Einträge, z.B. zum Prüfen der Undo-Gruppierung.
    pub fn merge_flags(&self) -> Vec<bool> {
        self.entries
            .iter()
            .map(EditRequest::merges_with_previous)
            .collect()
    }

    /// Leert das Log.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
