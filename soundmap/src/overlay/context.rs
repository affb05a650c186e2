//! Active overlay state.

use tracing::info;

use crate::delimit::DelimitingSet;

/// State shared by the delimiting and circle cycles.
///
/// Owns the active [`DelimitingSet`]; the only writers are
/// [`OverlayContext::replace_delimiting`] and the green-area loader, both of
/// which take `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct OverlayContext {
    delimiting: DelimitingSet,
    green_loaded: bool,
}

impl OverlayContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The set features are currently filtered against.
    pub fn delimiting(&self) -> &DelimitingSet {
        &self.delimiting
    }

    /// Swap the active set wholesale, returning the previous one.
    pub fn replace_delimiting(&mut self, set: DelimitingSet) -> DelimitingSet {
        info!(polygons = set.len(), "Active delimiting set replaced");
        std::mem::replace(&mut self.delimiting, set)
    }

    /// Whether a green-area layer has already been loaded.
    pub fn is_green_loaded(&self) -> bool {
        self.green_loaded
    }

    pub(crate) fn mark_green_loaded(&mut self) {
        self.green_loaded = true;
    }
}
