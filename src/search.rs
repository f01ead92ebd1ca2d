//! Client-side text search over one page of list results.
//!
//! Upstream list endpoints only filter on exact values, so substring search
//! is done here: the page is fetched as usual and the `results` array is
//! narrowed in place. `pagination.total_results` is overwritten with the
//! number of matches on that page; it is not a global count.

use serde_json::Value;

/// Lower-cases a needle, treating blank input as "no filter".
///
/// Surrounding whitespace in a non-blank needle is part of the search text.
fn needle(raw: Option<&str>) -> Option<String> {
    raw.filter(|text| !text.trim().is_empty())
        .map(str::to_lowercase)
}

/// Whether `value` (a string or number) contains `needle`, case-insensitively.
fn text_contains(value: Option<&Value>, needle: &str) -> bool {
    value.is_some_and(|field| {
        field.as_str().map_or_else(
            || field.is_number() && field.to_string().contains(needle),
            |text| text.to_lowercase().contains(needle),
        )
    })
}

/// Keeps only the results matching `keep` and rewrites the total.
///
/// Envelopes without a `results` array are returned unchanged.
fn narrow<F>(mut envelope: Value, keep: F) -> Value
where
    F: Fn(&Value) -> bool,
{
    let Some(results) = envelope.get_mut("results").and_then(Value::as_array_mut) else {
        return envelope;
    };
    let fetched = results.len();
    results.retain(|item| keep(item));
    let matched = results.len();
    tracing::debug!(fetched, matched, "applied client-side search filter");

    if let Some(pagination) = envelope.get_mut("pagination").and_then(Value::as_object_mut) {
        let _previous = pagination.insert("total_results".to_owned(), Value::from(matched));
    }
    envelope
}

/// Substring filters for product search.
#[derive(Debug, Clone, Default)]
pub(crate) struct ProductFilter {
    /// Lower-cased code needle.
    code: Option<String>,
    /// Lower-cased name needle.
    name: Option<String>,
}

impl ProductFilter {
    /// Builds a filter from raw user input.
    pub(crate) fn new(code: Option<&str>, name: Option<&str>) -> Self {
        Self {
            code: needle(code),
            name: needle(name),
        }
    }

    /// Whether no text filter is active.
    pub(crate) const fn is_empty(&self) -> bool {
        self.code.is_none() && self.name.is_none()
    }

    /// Whether `product` satisfies every active filter.
    fn matches(&self, product: &Value) -> bool {
        self.code
            .as_deref()
            .is_none_or(|code| text_contains(product.get("code"), code))
            && self
                .name
                .as_deref()
                .is_none_or(|name| text_contains(product.get("name"), name))
    }

    /// Narrows a product list envelope. Without active filters the envelope
    /// is returned untouched.
    pub(crate) fn apply(&self, envelope: Value) -> Value {
        if self.is_empty() {
            return envelope;
        }
        narrow(envelope, |product| self.matches(product))
    }
}

/// Substring filters for customer search.
#[derive(Debug, Clone, Default)]
pub(crate) struct CustomerFilter {
    /// Lower-cased identification needle.
    identification: Option<String>,
    /// Lower-cased name needle.
    name: Option<String>,
}

impl CustomerFilter {
    /// Builds a filter from raw user input.
    pub(crate) fn new(identification: Option<&str>, name: Option<&str>) -> Self {
        Self {
            identification: needle(identification),
            name: needle(name),
        }
    }

    /// Whether no text filter is active.
    pub(crate) const fn is_empty(&self) -> bool {
        self.identification.is_none() && self.name.is_none()
    }

    /// Name match: any element of the `name` parts, falling back to
    /// `commercial_name` only when no part matches.
    fn name_matches(customer: &Value, name: &str) -> bool {
        let name_field = customer.get("name");
        let in_parts = name_field.and_then(Value::as_array).map_or_else(
            || text_contains(name_field, name),
            |parts| parts.iter().any(|part| text_contains(Some(part), name)),
        );
        in_parts || text_contains(customer.get("commercial_name"), name)
    }

    /// Whether `customer` satisfies every active filter.
    fn matches(&self, customer: &Value) -> bool {
        self.identification
            .as_deref()
            .is_none_or(|id| text_contains(customer.get("identification"), id))
            && self
                .name
                .as_deref()
                .is_none_or(|name| Self::name_matches(customer, name))
    }

    /// Narrows a customer list envelope. Without active filters the envelope
    /// is returned untouched.
    pub(crate) fn apply(&self, envelope: Value) -> Value {
        if self.is_empty() {
            return envelope;
        }
        narrow(envelope, |customer| self.matches(customer))
    }
}

#[cfg(test)]
#[allow(
    clippy::indexing_slicing,
    clippy::missing_docs_in_private_items,
    reason = "test code indexes JSON for readability"
)]
mod tests {
    use serde_json::{Value, json};

    use super::{CustomerFilter, ProductFilter};

    fn product_page() -> Value {
        json!({
            "pagination": {"page": 1, "page_size": 25, "total_results": 340},
            "results": [
                {"id": "1", "code": "ABC-001", "name": "Blue Widget"},
                {"id": "2", "code": "XYZ-002", "name": "Red Gadget"},
                {"id": "3", "code": "abc-003", "name": "Green Widget"}
            ],
            "_links": {"self": {"href": "https://api.siigo.com/v1/products?page=1"}}
        })
    }

    fn customer_page() -> Value {
        json!({
            "pagination": {"page": 1, "page_size": 25, "total_results": 3},
            "results": [
                {"id": "c1", "identification": "900123456", "name": ["Acme Corp"]},
                {
                    "id": "c2",
                    "identification": "800555111",
                    "name": ["Juan", "Perez"],
                    "commercial_name": "ACME S.A."
                },
                {"id": "c3", "identification": "900999888", "name": ["Globex"]}
            ]
        })
    }

    fn ids(envelope: &Value) -> Vec<&str> {
        envelope["results"]
            .as_array()
            .map(|items| items.iter().filter_map(|item| item["id"].as_str()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn no_filter_returns_envelope_unchanged() {
        let filter = ProductFilter::new(None, Some("   "));
        assert!(filter.is_empty());
        assert_eq!(filter.apply(product_page()), product_page());
        assert_eq!(CustomerFilter::default().apply(customer_page()), customer_page());
    }

    #[test]
    fn code_filter_is_case_insensitive_and_recounts() {
        let filtered = ProductFilter::new(Some("abc"), None).apply(product_page());
        assert_eq!(ids(&filtered), vec!["1", "3"]);
        assert_eq!(filtered["pagination"]["total_results"], 2);
        assert_eq!(filtered["pagination"]["page"], 1);
        assert_eq!(filtered["pagination"]["page_size"], 25);
        assert_eq!(filtered["_links"], product_page()["_links"]);
    }

    #[test]
    fn surrounding_whitespace_is_matched_literally() {
        let trailing = ProductFilter::new(None, Some("widget ")).apply(product_page());
        assert!(ids(&trailing).is_empty());
        assert_eq!(trailing["pagination"]["total_results"], 0);

        let leading = ProductFilter::new(None, Some(" widget")).apply(product_page());
        assert_eq!(ids(&leading), vec!["1", "3"]);
    }

    #[test]
    fn code_and_name_filters_intersect() {
        let filtered = ProductFilter::new(Some("ABC"), Some("green")).apply(product_page());
        assert_eq!(ids(&filtered), vec!["3"]);
        assert_eq!(filtered["pagination"]["total_results"], 1);
    }

    #[test]
    fn customer_name_matches_name_parts() {
        let filtered = CustomerFilter::new(None, Some("acme")).apply(customer_page());
        assert_eq!(ids(&filtered), vec!["c1", "c2"]);
    }

    #[test]
    fn customer_name_falls_back_to_commercial_name() {
        let filtered = CustomerFilter::new(None, Some("s.a.")).apply(customer_page());
        assert_eq!(ids(&filtered), vec!["c2"]);
        assert_eq!(filtered["pagination"]["total_results"], 1);
    }

    #[test]
    fn identification_and_name_intersect() {
        let filtered = CustomerFilter::new(Some("900"), Some("acme")).apply(customer_page());
        assert_eq!(ids(&filtered), vec!["c1"]);
    }

    #[test]
    fn no_match_yields_empty_page() {
        let filtered = CustomerFilter::new(Some("123456789"), None).apply(customer_page());
        assert!(ids(&filtered).is_empty());
        assert_eq!(filtered["pagination"]["total_results"], 0);
    }

    #[test]
    fn envelope_without_results_is_left_alone() {
        let error = json!({"Errors": [{"Code": "unauthorized"}], "Status": 401});
        assert_eq!(ProductFilter::new(Some("abc"), None).apply(error.clone()), error);
    }
}
