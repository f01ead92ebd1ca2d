//! Operation catalog: every upstream action as a declarative descriptor,
//! executed by one generic dispatch routine.
//!
//! A tool shapes its arguments into an [`OperationCall`] (path id, query,
//! body, extra headers) and hands it to [`Catalog::invoke`] together with its
//! name. The descriptor supplies the HTTP method and path template. The two
//! search operations add a client-side filter on top of a plain list call.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::client::{ApiRequest, SiigoClient};
use crate::error::ClientError;
use crate::params::{PageParams, SearchCustomersParams, SearchProductsParams};
use crate::payloads::CustomerType;
use crate::response::Envelope;
use crate::search::{CustomerFilter, ProductFilter};

/// Largest page size upstream accepts.
const MAX_PAGE_SIZE: u64 = 100;

/// Placeholder for the resource ID in path templates.
const ID_PLACEHOLDER: &str = "{id}";

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// The corresponding `reqwest` method.
    const fn to_method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Delete => Method::DELETE,
        }
    }
}

/// Side-effect class of an operation, surfaced as tool annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    /// Does not modify upstream state.
    ReadOnly,
    /// Creates or modifies resources.
    Write,
    /// Deletes or voids resources.
    Destructive,
}

/// Static description of one callable operation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Operation {
    /// Tool name.
    pub(crate) name: &'static str,
    /// HTTP method.
    pub(crate) method: HttpMethod,
    /// Path template below the base URL; `{id}` is replaced by the call's ID.
    pub(crate) path: &'static str,
    /// Side-effect class.
    pub(crate) access: Access,
}

impl Operation {
    /// Renders the path template with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidParams`] if the template needs an ID and
    /// none (or an unsafe one) was given.
    pub(crate) fn render_path(&self, id: Option<&str>) -> Result<String, ClientError> {
        if !self.path.contains(ID_PLACEHOLDER) {
            return Ok(self.path.to_owned());
        }
        let trimmed = id.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Err(ClientError::InvalidParams(format!(
                "{} requires a resource id",
                self.name
            )));
        }
        if trimmed.contains(['/', '?', '#']) {
            return Err(ClientError::InvalidParams(format!(
                "invalid resource id '{trimmed}'"
            )));
        }
        Ok(self.path.replace(ID_PLACEHOLDER, trimmed))
    }
}

/// Shorthand constructor for the descriptor table.
const fn op(
    name: &'static str,
    method: HttpMethod,
    path: &'static str,
    access: Access,
) -> Operation {
    Operation {
        name,
        method,
        path,
        access,
    }
}

/// Every operation exposed as a tool.
pub(crate) static OPERATIONS: &[Operation] = &[
    // Products
    op("list_products", HttpMethod::Get, "/v1/products", Access::ReadOnly),
    op("get_product", HttpMethod::Get, "/v1/products/{id}", Access::ReadOnly),
    op("create_product", HttpMethod::Post, "/v1/products", Access::Write),
    op("update_product", HttpMethod::Put, "/v1/products/{id}", Access::Write),
    op("delete_product", HttpMethod::Delete, "/v1/products/{id}", Access::Destructive),
    op("search_products", HttpMethod::Get, "/v1/products", Access::ReadOnly),
    // Customers
    op("list_customers", HttpMethod::Get, "/v1/customers", Access::ReadOnly),
    op("get_customer", HttpMethod::Get, "/v1/customers/{id}", Access::ReadOnly),
    op("create_customer", HttpMethod::Post, "/v1/customers", Access::Write),
    op("update_customer", HttpMethod::Put, "/v1/customers/{id}", Access::Write),
    op("delete_customer", HttpMethod::Delete, "/v1/customers/{id}", Access::Destructive),
    op("search_customers", HttpMethod::Get, "/v1/customers", Access::ReadOnly),
    // Invoices
    op("list_invoices", HttpMethod::Get, "/v1/invoices", Access::ReadOnly),
    op("get_invoice", HttpMethod::Get, "/v1/invoices/{id}", Access::ReadOnly),
    op("create_invoice", HttpMethod::Post, "/v1/invoices", Access::Write),
    op("update_invoice", HttpMethod::Put, "/v1/invoices/{id}", Access::Write),
    op("delete_invoice", HttpMethod::Delete, "/v1/invoices/{id}", Access::Destructive),
    op("get_invoice_pdf", HttpMethod::Get, "/v1/invoices/{id}/pdf", Access::ReadOnly),
    op("get_invoice_xml", HttpMethod::Get, "/v1/invoices/{id}/xml", Access::ReadOnly),
    op("send_invoice_email", HttpMethod::Post, "/v1/invoices/{id}/mail", Access::Write),
    op("annul_invoice", HttpMethod::Post, "/v1/invoices/{id}/annul", Access::Destructive),
    op(
        "get_invoice_stamp_errors",
        HttpMethod::Get,
        "/v1/invoices/{id}/stamp/errors",
        Access::ReadOnly,
    ),
    op("create_invoice_batch", HttpMethod::Post, "/v1/invoices/batch", Access::Write),
    // Credit notes
    op("list_credit_notes", HttpMethod::Get, "/v1/credit-notes", Access::ReadOnly),
    op("get_credit_note", HttpMethod::Get, "/v1/credit-notes/{id}", Access::ReadOnly),
    op("create_credit_note", HttpMethod::Post, "/v1/credit-notes", Access::Write),
    op("get_credit_note_pdf", HttpMethod::Get, "/v1/credit-notes/{id}/pdf", Access::ReadOnly),
    op("get_credit_note_xml", HttpMethod::Get, "/v1/credit-notes/{id}/xml", Access::ReadOnly),
    op("send_credit_note_email", HttpMethod::Post, "/v1/credit-notes/{id}/mail", Access::Write),
    // Cash receipts
    op("list_vouchers", HttpMethod::Get, "/v1/vouchers", Access::ReadOnly),
    op("get_voucher", HttpMethod::Get, "/v1/vouchers/{id}", Access::ReadOnly),
    op("create_voucher", HttpMethod::Post, "/v1/vouchers", Access::Write),
    // Purchases
    op("list_purchases", HttpMethod::Get, "/v1/purchases", Access::ReadOnly),
    op("get_purchase", HttpMethod::Get, "/v1/purchases/{id}", Access::ReadOnly),
    op("create_purchase", HttpMethod::Post, "/v1/purchases", Access::Write),
    op("update_purchase", HttpMethod::Put, "/v1/purchases/{id}", Access::Write),
    op("delete_purchase", HttpMethod::Delete, "/v1/purchases/{id}", Access::Destructive),
    // Journals
    op("list_journals", HttpMethod::Get, "/v1/journals", Access::ReadOnly),
    op("get_journal", HttpMethod::Get, "/v1/journals/{id}", Access::ReadOnly),
    op("create_journal", HttpMethod::Post, "/v1/journals", Access::Write),
    // Payment receipts
    op("list_payment_receipts", HttpMethod::Get, "/v1/payment-receipts", Access::ReadOnly),
    op("get_payment_receipt", HttpMethod::Get, "/v1/payment-receipts/{id}", Access::ReadOnly),
    op("create_payment_receipt", HttpMethod::Post, "/v1/payment-receipts", Access::Write),
    op("update_payment_receipt", HttpMethod::Put, "/v1/payment-receipts/{id}", Access::Write),
    op(
        "delete_payment_receipt",
        HttpMethod::Delete,
        "/v1/payment-receipts/{id}",
        Access::Destructive,
    ),
    // Quotations
    op("list_quotations", HttpMethod::Get, "/v1/quotations", Access::ReadOnly),
    op("get_quotation", HttpMethod::Get, "/v1/quotations/{id}", Access::ReadOnly),
    op("create_quotation", HttpMethod::Post, "/v1/quotations", Access::Write),
    op("update_quotation", HttpMethod::Put, "/v1/quotations/{id}", Access::Write),
    op("delete_quotation", HttpMethod::Delete, "/v1/quotations/{id}", Access::Destructive),
    // Catalogs
    op("list_account_groups", HttpMethod::Get, "/v1/account-groups", Access::ReadOnly),
    op("list_taxes", HttpMethod::Get, "/v1/taxes", Access::ReadOnly),
    op("list_price_lists", HttpMethod::Get, "/v1/price-lists", Access::ReadOnly),
    op("list_warehouses", HttpMethod::Get, "/v1/warehouses", Access::ReadOnly),
    op("list_users", HttpMethod::Get, "/v1/users", Access::ReadOnly),
    op("list_document_types", HttpMethod::Get, "/v1/document-types", Access::ReadOnly),
    op("list_payment_types", HttpMethod::Get, "/v1/payment-types", Access::ReadOnly),
    op("list_cost_centers", HttpMethod::Get, "/v1/cost-centers", Access::ReadOnly),
    op("list_fixed_assets", HttpMethod::Get, "/v1/fixed-assets", Access::ReadOnly),
    // Reports; both trial balances are POST with a JSON body upstream.
    op("get_trial_balance", HttpMethod::Post, "/v1/test-balance-report", Access::ReadOnly),
    op(
        "get_trial_balance_by_third",
        HttpMethod::Post,
        "/v1/test-balance-report-by-thirdparty",
        Access::ReadOnly,
    ),
    op("get_accounts_payable", HttpMethod::Get, "/v1/accounts-payable", Access::ReadOnly),
    // Webhooks
    op("list_webhooks", HttpMethod::Get, "/v1/webhooks", Access::ReadOnly),
    op("create_webhook", HttpMethod::Post, "/v1/webhooks", Access::Write),
    op("update_webhook", HttpMethod::Put, "/v1/webhooks/{id}", Access::Write),
    op("delete_webhook", HttpMethod::Delete, "/v1/webhooks/{id}", Access::Destructive),
];

/// Looks an operation up by tool name.
pub(crate) fn operation(name: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|candidate| candidate.name == name)
}

/// Arguments of one operation call, already shaped for HTTP.
#[derive(Debug, Clone, Default)]
pub(crate) struct OperationCall {
    /// Value for the `{id}` path placeholder.
    id: Option<String>,
    /// Query string pairs.
    query: Vec<(String, String)>,
    /// JSON body.
    body: Option<Value>,
    /// Extra headers.
    headers: Vec<(&'static str, String)>,
}

impl OperationCall {
    /// Creates an empty call.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sets the path ID.
    pub(crate) fn with_id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }

    /// Adds the fields of `params` as query parameters. `null` fields are
    /// dropped; `page` and `page_size` are range-checked.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidParams`] if `params` is not an object or
    /// the paging values are out of range.
    pub(crate) fn with_query<T: Serialize>(mut self, params: &T) -> Result<Self, ClientError> {
        let value = serde_json::to_value(params)
            .map_err(|err| ClientError::InvalidParams(err.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(ClientError::InvalidParams(
                "query parameters must be an object".to_owned(),
            ));
        };
        for (key, field) in fields {
            if field.is_null() {
                continue;
            }
            check_paging(&key, &field)?;
            let text = field
                .as_str()
                .map_or_else(|| field.to_string(), ToOwned::to_owned);
            self.query.push((key, text));
        }
        Ok(self)
    }

    /// Sets the JSON body from `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidParams`] if `payload` cannot be serialized.
    pub(crate) fn with_body<T: Serialize>(mut self, payload: &T) -> Result<Self, ClientError> {
        let body = serde_json::to_value(payload)
            .map_err(|err| ClientError::InvalidParams(err.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }

    /// Adds a request header.
    pub(crate) fn with_header(mut self, name: &'static str, value: String) -> Self {
        self.headers.push((name, value));
        self
    }
}

/// Rejects out-of-range `page` / `page_size` values before any request.
fn check_paging(key: &str, value: &Value) -> Result<(), ClientError> {
    let in_range = match key {
        "page" => value.as_u64().is_some_and(|page| page >= 1),
        "page_size" => value
            .as_u64()
            .is_some_and(|size| (1..=MAX_PAGE_SIZE).contains(&size)),
        _ => true,
    };
    if in_range {
        Ok(())
    } else {
        Err(ClientError::InvalidParams(format!(
            "{key} out of range: {value}"
        )))
    }
}

/// Server-side part of a customer search.
#[derive(Debug, Serialize)]
struct CustomerSearchQuery {
    /// Page number.
    page: Option<u32>,
    /// Page size.
    page_size: Option<u32>,
    /// Third-party role.
    #[serde(rename = "type")]
    kind: Option<CustomerType>,
}

/// Logs the upstream pagination of a page about to be filtered.
fn log_fetched_page(operation: &str, envelope: &Value) {
    let pagination = Envelope::inspect(envelope).pagination.unwrap_or_default();
    tracing::debug!(
        operation,
        page = ?pagination.page,
        page_size = ?pagination.page_size,
        upstream_total = ?pagination.total_results,
        "fetched page for client-side search"
    );
}

/// Executes catalog operations through one authenticated client.
#[derive(Debug)]
pub(crate) struct Catalog {
    /// Upstream client.
    client: SiigoClient,
}

impl Catalog {
    /// Creates a catalog backed by `client`.
    pub(crate) const fn new(client: SiigoClient) -> Self {
        Self { client }
    }

    /// Runs the operation registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnknownOperation`] for an unregistered name,
    /// [`ClientError::InvalidParams`] when the path cannot be rendered, and
    /// any error of [`SiigoClient::request`].
    pub(crate) async fn invoke(
        &self,
        name: &str,
        call: OperationCall,
    ) -> Result<Value, ClientError> {
        let descriptor =
            operation(name).ok_or_else(|| ClientError::UnknownOperation(name.to_owned()))?;
        let path = descriptor.render_path(call.id.as_deref())?;
        tracing::debug!(
            operation = descriptor.name,
            access = ?descriptor.access,
            %path,
            "invoking operation"
        );

        let mut request = ApiRequest::new(descriptor.method.to_method(), path);
        request.query = call.query;
        request.body = call.body;
        request.headers = call.headers;
        self.client.request(request).await
    }

    /// Lists one page of products and keeps those whose code and name
    /// contain the given substrings.
    ///
    /// # Errors
    ///
    /// Returns any error of [`Catalog::invoke`].
    pub(crate) async fn search_products(
        &self,
        params: &SearchProductsParams,
    ) -> Result<Value, ClientError> {
        let call = OperationCall::new().with_query(&PageParams {
            page: params.page,
            page_size: params.page_size,
        })?;
        let envelope = self.invoke("search_products", call).await?;
        log_fetched_page("search_products", &envelope);
        let filter = ProductFilter::new(params.code.as_deref(), params.name.as_deref());
        Ok(filter.apply(envelope))
    }

    /// Lists one page of customers and keeps those whose identification and
    /// name (or trade name) contain the given substrings.
    ///
    /// # Errors
    ///
    /// Returns any error of [`Catalog::invoke`].
    pub(crate) async fn search_customers(
        &self,
        params: &SearchCustomersParams,
    ) -> Result<Value, ClientError> {
        let call = OperationCall::new().with_query(&CustomerSearchQuery {
            page: params.page,
            page_size: params.page_size,
            kind: params.kind,
        })?;
        let envelope = self.invoke("search_customers", call).await?;
        log_fetched_page("search_customers", &envelope);
        let filter = CustomerFilter::new(params.identification.as_deref(), params.name.as_deref());
        Ok(filter.apply(envelope))
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "test code uses expect for readability"
)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{Access, Catalog, HttpMethod, OPERATIONS, OperationCall, operation};
    use crate::client::SiigoClient;
    use crate::client::tests::{mount_auth, test_config};
    use crate::error::ClientError;
    use crate::params::{
        ListProductsParams, SearchCustomersParams, SearchProductsParams,
        TrialBalanceByThirdParams, TrialBalanceParams,
    };

    async fn catalog_for(server: &MockServer) -> Catalog {
        mount_auth(server, 1).await;
        Catalog::new(SiigoClient::new(&test_config(&server.uri())).expect("client"))
    }

    #[test]
    fn operation_names_are_unique_and_paths_versioned() {
        let mut seen = HashSet::new();
        for entry in OPERATIONS {
            assert!(seen.insert(entry.name), "duplicate operation {}", entry.name);
            assert!(entry.path.starts_with("/v1/"), "{} is not versioned", entry.name);
        }
        assert!(OPERATIONS.len() >= 60);
    }

    #[test]
    fn deletes_are_destructive_and_gets_read_only() {
        for entry in OPERATIONS {
            if entry.method == HttpMethod::Delete {
                assert_eq!(entry.access, Access::Destructive, "{}", entry.name);
            }
            if entry.method == HttpMethod::Get {
                assert_eq!(entry.access, Access::ReadOnly, "{}", entry.name);
            }
        }
    }

    #[test]
    fn trial_balances_are_post() {
        for name in ["get_trial_balance", "get_trial_balance_by_third"] {
            let entry = operation(name).expect("registered");
            assert_eq!(entry.method, HttpMethod::Post);
        }
    }

    #[test]
    fn render_path_substitutes_id() {
        let entry = operation("get_invoice_pdf").expect("registered");
        assert_eq!(
            entry.render_path(Some("inv-42")).expect("path"),
            "/v1/invoices/inv-42/pdf"
        );
        assert_eq!(
            operation("list_taxes").expect("registered").render_path(None).expect("path"),
            "/v1/taxes"
        );
    }

    #[test]
    fn render_path_rejects_missing_or_unsafe_id() {
        let entry = operation("delete_product").expect("registered");
        assert!(matches!(entry.render_path(None), Err(ClientError::InvalidParams(_))));
        assert!(matches!(entry.render_path(Some("  ")), Err(ClientError::InvalidParams(_))));
        assert!(matches!(
            entry.render_path(Some("../customers/1")),
            Err(ClientError::InvalidParams(_))
        ));
    }

    #[test]
    fn query_drops_nulls_and_stringifies_values() {
        let params = ListProductsParams {
            page: Some(2),
            code: Some("P-1".to_owned()),
            ..ListProductsParams::default()
        };
        let call = OperationCall::new().with_query(&params).expect("query");
        assert_eq!(
            call.query,
            vec![
                ("page".to_owned(), "2".to_owned()),
                ("code".to_owned(), "P-1".to_owned())
            ]
        );
    }

    #[test]
    fn query_rejects_oversized_pages() {
        let oversized = ListProductsParams {
            page_size: Some(500),
            ..ListProductsParams::default()
        };
        let call = OperationCall::new().with_query(&oversized);
        assert!(matches!(call, Err(ClientError::InvalidParams(_))));
        let page_zero = ListProductsParams {
            page: Some(0),
            ..ListProductsParams::default()
        };
        let call_zero = OperationCall::new().with_query(&page_zero);
        assert!(matches!(call_zero, Err(ClientError::InvalidParams(_))));
    }

    #[tokio::test]
    async fn unknown_operation_is_reported() {
        let server = MockServer::start().await;
        let catalog = Catalog::new(SiigoClient::new(&test_config(&server.uri())).expect("client"));
        let result = catalog.invoke("list_spaceships", OperationCall::new()).await;
        assert!(matches!(result, Err(ClientError::UnknownOperation(_))));
        assert_eq!(
            result.err().map(|err| err.to_string()),
            Some("unknown operation 'list_spaceships'".to_owned())
        );
    }

    #[tokio::test]
    async fn trial_balance_posts_json_body() {
        let server = MockServer::start().await;
        let catalog = catalog_for(&server).await;
        let report = json!({"file_id": "f-1", "file_url": "https://example.com/report.xlsx"});
        Mock::given(method("POST"))
            .and(path("/v1/test-balance-report"))
            .and(body_json(json!({
                "account_start": "1105",
                "account_end": "2805",
                "year": 2024,
                "month_start": 1,
                "month_end": 12,
                "includes_tax_difference": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(report.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let params = TrialBalanceParams {
            account_start: "1105".to_owned(),
            account_end: "2805".to_owned(),
            year: 2024,
            month_start: 1,
            month_end: 12,
            includes_tax_difference: false,
        };
        let call = OperationCall::new().with_body(&params).expect("body");
        let body = catalog.invoke("get_trial_balance", call).await.expect("report");
        assert_eq!(body, report);
    }

    #[tokio::test]
    async fn trial_balance_by_third_posts_range_and_customer() {
        let server = MockServer::start().await;
        let catalog = catalog_for(&server).await;
        let request = json!({
            "account_start": "1305",
            "account_end": "1305",
            "year": 2024,
            "month_start": 1,
            "month_end": 13,
            "includes_tax_difference": true,
            "customer": {"identification": "900123456", "branch_office": 0}
        });
        let report = json!({"file_id": "f-2", "file_url": "https://example.com/by-third.xlsx"});
        Mock::given(method("POST"))
            .and(path("/v1/test-balance-report-by-thirdparty"))
            .and(body_json(request.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(report.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let params: TrialBalanceByThirdParams =
            serde_json::from_value(request).expect("params");
        let call = OperationCall::new().with_body(&params).expect("body");
        let body = catalog
            .invoke("get_trial_balance_by_third", call)
            .await
            .expect("report");
        assert_eq!(body, report);
    }

    #[tokio::test]
    async fn product_search_forwards_only_paging() {
        let server = MockServer::start().await;
        let catalog = catalog_for(&server).await;
        Mock::given(method("GET"))
            .and(path("/v1/products"))
            .and(query_param("page", "1"))
            .and(query_param("page_size", "100"))
            .and(query_param_is_missing("code"))
            .and(query_param_is_missing("name"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pagination": {"page": 1, "page_size": 100, "total_results": 250},
                "results": [
                    {"id": "1", "code": "ABC-1", "name": "Widget"},
                    {"id": "2", "code": "ZZZ-9", "name": "Gizmo"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let params = SearchProductsParams {
            page: Some(1),
            page_size: Some(100),
            code: Some("abc".to_owned()),
            name: None,
        };
        let body = catalog.search_products(&params).await.expect("search");
        assert_eq!(
            body,
            json!({
                "pagination": {"page": 1, "page_size": 100, "total_results": 1},
                "results": [{"id": "1", "code": "ABC-1", "name": "Widget"}]
            })
        );
    }

    #[tokio::test]
    async fn customer_search_without_text_filters_is_verbatim() {
        let server = MockServer::start().await;
        let catalog = catalog_for(&server).await;
        let page = json!({
            "pagination": {"page": 1, "page_size": 25, "total_results": 2},
            "results": [
                {"id": "c1", "identification": "900123456", "name": ["Acme Corp"]},
                {"id": "c2", "identification": "800555111", "name": ["Globex"]}
            ]
        });
        Mock::given(method("GET"))
            .and(path("/v1/customers"))
            .and(query_param("type", "Supplier"))
            .and(query_param_is_missing("identification"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let params: SearchCustomersParams =
            serde_json::from_value(json!({"type": "Supplier"})).expect("params");
        let body = catalog.search_customers(&params).await.expect("search");
        assert_eq!(body, page);
    }

    #[tokio::test]
    async fn customer_search_intersects_filters() {
        let server = MockServer::start().await;
        let catalog = catalog_for(&server).await;
        Mock::given(method("GET"))
            .and(path("/v1/customers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pagination": {"page": 1, "page_size": 25, "total_results": 3},
                "results": [
                    {"id": "c1", "identification": "900123456", "name": ["Acme Corp"]},
                    {
                        "id": "c2",
                        "identification": "800555111",
                        "name": ["Juan"],
                        "commercial_name": "ACME S.A."
                    },
                    {"id": "c3", "identification": "900999888", "name": ["Globex"]}
                ]
            })))
            .mount(&server)
            .await;

        let params: SearchCustomersParams =
            serde_json::from_value(json!({"identification": "900", "name": "acme"}))
                .expect("params");
        let body = catalog.search_customers(&params).await.expect("search");
        assert_eq!(
            body,
            json!({
                "pagination": {"page": 1, "page_size": 25, "total_results": 1},
                "results": [{"id": "c1", "identification": "900123456", "name": ["Acme Corp"]}]
            })
        );
    }
}
