//! Overpass QL query construction.

use std::fmt::Write as _;

use crate::geometry::BoundingBox;

/// Default server-side timeout for Overpass queries, in seconds.
pub const DEFAULT_QUERY_TIMEOUT_SECS: u32 = 25;

/// A `key=value` tag filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    pub key: String,
    pub value: String,
}

impl TagFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Query for green areas: parks, woods, grass and recreation grounds.
///
/// Every tag filter is applied to both ways and relations, and geometry is
/// requested inline (`out body geom`) so no node lookups are needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreenAreaQuery {
    tags: Vec<TagFilter>,
    timeout_secs: u32,
}

impl Default for GreenAreaQuery {
    fn default() -> Self {
        Self {
            tags: vec![
                TagFilter::new("leisure", "park"),
                TagFilter::new("natural", "wood"),
                TagFilter::new("landuse", "grass"),
                TagFilter::new("landuse", "recreation_ground"),
            ],
            timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
        }
    }
}

impl GreenAreaQuery {
    pub fn new(tags: Vec<TagFilter>) -> Self {
        Self {
            tags,
            ..Self::default()
        }
    }

    /// Set the `[timeout:N]` setting.
    pub fn with_timeout_secs(mut self, secs: u32) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn tags(&self) -> &[TagFilter] {
        &self.tags
    }

    pub fn timeout_secs(&self) -> u32 {
        self.timeout_secs
    }

    /// Render the Overpass QL for `bbox`.
    pub fn render(&self, bbox: &BoundingBox) -> String {
        let mut q = String::new();
        let _ = writeln!(q, "[out:json][timeout:{}];", self.timeout_secs);
        q.push_str("(\n");
        for tag in &self.tags {
            for element in ["way", "relation"] {
                let _ = writeln!(
                    q,
                    "{}[\"{}\"=\"{}\"]({});",
                    element,
                    escape(&tag.key),
                    escape(&tag.value),
                    bbox
                );
            }
        }
        q.push_str(");\nout body geom;\n");
        q
    }
}

/// Escape a tag key or value for use inside a double-quoted QL string.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_text() {
        let bbox = BoundingBox::new(4.5, -74.1, 4.7, -74.0);
        let expected = "[out:json][timeout:25];\n\
(\n\
way[\"leisure\"=\"park\"](4.5,-74.1,4.7,-74);\n\
relation[\"leisure\"=\"park\"](4.5,-74.1,4.7,-74);\n\
way[\"natural\"=\"wood\"](4.5,-74.1,4.7,-74);\n\
relation[\"natural\"=\"wood\"](4.5,-74.1,4.7,-74);\n\
way[\"landuse\"=\"grass\"](4.5,-74.1,4.7,-74);\n\
relation[\"landuse\"=\"grass\"](4.5,-74.1,4.7,-74);\n\
way[\"landuse\"=\"recreation_ground\"](4.5,-74.1,4.7,-74);\n\
relation[\"landuse\"=\"recreation_ground\"](4.5,-74.1,4.7,-74);\n\
);\n\
out body geom;\n";

        assert_eq!(GreenAreaQuery::default().render(&bbox), expected);
    }

    #[test]
    fn test_custom_tags_and_timeout() {
        let query = GreenAreaQuery::new(vec![TagFilter::new("leisure", "garden")]).with_timeout_secs(60);
        let text = query.render(&BoundingBox::new(0.0, 0.0, 1.0, 1.0));

        assert!(text.starts_with("[out:json][timeout:60];"));
        assert!(text.contains("way[\"leisure\"=\"garden\"](0,0,1,1);"));
        assert!(text.contains("relation[\"leisure\"=\"garden\"](0,0,1,1);"));
        assert!(!text.contains("park"));
    }

    #[test]
    fn test_quotes_are_escaped() {
        let query = GreenAreaQuery::new(vec![TagFilter::new("name", "El \"Parque\"")]);
        let text = query.render(&BoundingBox::new(0.0, 0.0, 1.0, 1.0));
        assert!(text.contains(r#"way["name"="El \"Parque\""]"#));
    }
}
