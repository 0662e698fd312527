/// Query for a Cloud Controller collection listing.
///
/// Filters are rendered with the server's `q=<field>:<value>` syntax. Field
/// and value are percent-encoded separately; the separating colon is kept
/// literal because the server splits on it.
///
/// # Example
///
/// ```ignore
/// let query = ListQuery::new()
///     .filter("name", "my group")
///     .inline_relations_depth(1);
///
/// assert_eq!(query.to_query_string(), "q=name:my%20group&inline-relations-depth=1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct ListQuery {
    filters: Vec<(String, String)>,
    inline_relations_depth: Option<u8>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `q=<field>:<value>` filter. Multiple filters are combined by the server.
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Ask the server to embed related resources up to `depth` levels.
    pub fn inline_relations_depth(mut self, depth: u8) -> Self {
        self.inline_relations_depth = Some(depth);
        self
    }

    /// Whether the query adds nothing to the URL.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.inline_relations_depth.is_none()
    }

    /// Render the query string (without the leading `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<String> = self
            .filters
            .iter()
            .map(|(field, value)| {
                format!(
                    "q={}:{}",
                    urlencoding::encode(field),
                    urlencoding::encode(value)
                )
            })
            .collect();

        if let Some(depth) = self.inline_relations_depth {
            pairs.push(format!("inline-relations-depth={depth}"));
        }

        pairs.join("&")
    }
}
