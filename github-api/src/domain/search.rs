use serde::{Deserialize, Serialize};

/// Envelope of every `/search/*` endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse<T> {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Query parameters of a search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub q: String,
    /// API sort vocabulary: `stars` or `updated`.
    pub sort: String,
    pub order: String,
    pub page: u32,
    pub per_page: u32,
}

impl SearchParams {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.q.clone()),
            ("sort", self.sort.clone()),
            ("order", self.order.clone()),
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;

    #[test]
    fn empty_envelope_defaults() {
        let response: SearchResponse<User> = serde_json::from_str("{}").unwrap();
        assert_eq!(response.total_count, 0);
        assert!(response.items.is_empty());
    }

    #[test]
    fn params_render_in_order() {
        let params = SearchParams {
            q: "tokio".to_string(),
            sort: "stars".to_string(),
            order: "desc".to_string(),
            page: 2,
            per_page: 30,
        };
        let query = params.to_query();
        assert_eq!(query[0], ("q", "tokio".to_string()));
        assert_eq!(query[3], ("page", "2".to_string()));
    }
}
