//! Green-area loading from Overpass.

use tracing::{debug, info};

use super::{OverlayContext, OverlayError};
use crate::feature::FeatureCollection;
use crate::fetch::AsyncHttpClient;
use crate::geometry::BoundingBox;
use crate::overpass::{normalize_query_result, GreenAreaQuery, QueryResult, DEFAULT_OVERPASS_ENDPOINT};

/// Fetches green areas for a bounding box and clips them to the active
/// delimiting set.
pub struct GreenAreaLoader<C> {
    client: C,
    endpoint: String,
    query: GreenAreaQuery,
}

impl<C: AsyncHttpClient> GreenAreaLoader<C> {
    /// Create a loader against the public Overpass endpoint with the default
    /// green-area query.
    pub fn new(client: C) -> Self {
        Self {
            client,
            endpoint: DEFAULT_OVERPASS_ENDPOINT.to_string(),
            query: GreenAreaQuery::default(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_query(mut self, query: GreenAreaQuery) -> Self {
        self.query = query;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Load green areas inside `bbox`.
    ///
    /// Features are kept only if they intersect the context's delimiting
    /// set; an empty set keeps everything. On success the context is marked
    /// loaded.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if a green layer was already loaded, otherwise the
    /// filtered collection.
    ///
    /// # Errors
    ///
    /// Transport and decoding failures. The context is left unchanged, so a
    /// later call may retry.
    pub async fn load(
        &self,
        ctx: &mut OverlayContext,
        bbox: BoundingBox,
    ) -> Result<Option<FeatureCollection>, OverlayError> {
        if ctx.is_green_loaded() {
            debug!("Green areas already loaded, skipping");
            return Ok(None);
        }

        info!(bbox = %bbox, endpoint = %self.endpoint, "Loading green areas");

        let body = self
            .client
            .post_text(&self.endpoint, &self.query.render(&bbox))
            .await?;
        let raw = QueryResult::from_slice(&body)?;

        let mut features = normalize_query_result(&raw);
        let fetched = features.len();
        if !ctx.delimiting().is_empty() {
            features = ctx.delimiting().filter(features);
        }

        ctx.mark_green_loaded();
        info!(
            fetched,
            kept = features.len(),
            vertices = features
                .iter()
                .map(|f| f.geometry.coordinates.position_count())
                .sum::<usize>(),
            "Green areas loaded (inside delimiting area)"
        );

        Ok(Some(FeatureCollection::new(features)))
    }
}
