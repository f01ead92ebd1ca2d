//! MCP server exposing the Siigo catalog operations as tools.
//!
//! Uses `rmcp` macros to declare one tool per catalog descriptor. Every tool
//! only shapes its arguments into an [`OperationCall`]; the catalog does the
//! rest and the upstream JSON is relayed verbatim.

extern crate alloc;

use alloc::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use crate::catalog::{Catalog, OperationCall};
use crate::error::ClientError;
use crate::params::{
    AccountsPayableParams, CreateWebhookParams, DocumentTypesParams, IdParams,
    InvoiceBatchParams, ListCustomersParams, ListDocumentsParams, ListProductsParams,
    PaymentTypesParams, SearchCustomersParams, SearchProductsParams, SendEmailParams,
    TrialBalanceByThirdParams, TrialBalanceParams, UpdateCustomerParams, UpdateInvoiceParams,
    UpdatePaymentReceiptParams, UpdateProductParams, UpdatePurchaseParams,
    UpdateQuotationParams, UpdateWebhookParams,
};
use crate::payloads::{
    CreditNotePayload, CustomerPayload, InvoicePayload, JournalPayload, PaymentReceiptPayload,
    ProductPayload, PurchasePayload, QuotationPayload, VoucherPayload,
};
use crate::response::tool_result;

/// Header carrying the batch deduplication key.
const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// MCP server wrapping the Siigo accounting API.
#[derive(Clone)]
pub(crate) struct SiigoMcpServer {
    /// Operation catalog (shared via Arc).
    catalog: Arc<Catalog>,
    /// Tool router for dispatching MCP tool calls.
    tool_router: ToolRouter<Self>,
}

impl core::fmt::Debug for SiigoMcpServer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SiigoMcpServer").finish_non_exhaustive()
    }
}

#[tool_router]
impl SiigoMcpServer {
    /// Creates a new MCP server over the given catalog.
    pub(crate) fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            tool_router: Self::tool_router(),
        }
    }

    /// Runs operation `name` with an already shaped call.
    async fn dispatch(
        &self,
        name: &str,
        call: Result<OperationCall, ClientError>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = match call {
            Ok(shaped) => self.catalog.invoke(name, shaped).await,
            Err(err) => Err(err),
        };
        tool_result(name, outcome)
    }

    /// Runs a list-style operation with `query` as the query string.
    async fn list<Q: Serialize + Sync>(
        &self,
        name: &str,
        query: &Q,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(name, OperationCall::new().with_query(query))
            .await
    }

    /// Runs an operation addressing one resource, without a body.
    async fn by_id(&self, name: &str, id: String) -> Result<CallToolResult, McpError> {
        self.dispatch(name, Ok(OperationCall::new().with_id(id)))
            .await
    }

    /// Runs an operation with `body` as the JSON payload.
    async fn send<B: Serialize + Sync>(
        &self,
        name: &str,
        body: &B,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(name, OperationCall::new().with_body(body))
            .await
    }

    /// Runs an operation addressing one resource with `body` as the payload.
    async fn send_to<B: Serialize + Sync>(
        &self,
        name: &str,
        id: String,
        body: &B,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(name, OperationCall::new().with_id(id).with_body(body))
            .await
    }

    // ── Products ────────────────────────────────────────────────────

    /// List products, optionally filtered by exact code and creation/update dates.
    #[tool(
        annotations(read_only_hint = true),
        description = "List products, optionally filtered by exact code and creation/update dates"
    )]
    async fn list_products(
        &self,
        params: Parameters<ListProductsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.list("list_products", &params.0).await
    }

    /// Get a product by its ID.
    #[tool(annotations(read_only_hint = true), description = "Get a product by its ID")]
    async fn get_product(&self, params: Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        self.by_id("get_product", params.0.id).await
    }

    /// Create a product.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Create a product. Requires code, name and account_group"
    )]
    async fn create_product(
        &self,
        params: Parameters<ProductPayload>,
    ) -> Result<CallToolResult, McpError> {
        self.send("create_product", &params.0).await
    }

    /// Update a product.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Update a product. Only the fields provided are sent"
    )]
    async fn update_product(
        &self,
        params: Parameters<UpdateProductParams>,
    ) -> Result<CallToolResult, McpError> {
        let Parameters(UpdateProductParams { id, patch }) = params;
        self.send_to("update_product", id, &patch).await
    }

    /// Delete a product by its ID.
    #[tool(
        annotations(destructive_hint = true),
        description = "Delete a product by its ID"
    )]
    async fn delete_product(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id("delete_product", params.0.id).await
    }

    /// Fetches one page of products and narrows it locally.
    #[tool(
        annotations(read_only_hint = true),
        description = "Search one page of products by case-insensitive substring of code and/or name. total_results reflects matches on the fetched page only"
    )]
    async fn search_products(
        &self,
        params: Parameters<SearchProductsParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self.catalog.search_products(&params.0).await;
        tool_result("search_products", outcome)
    }

    // ── Customers ───────────────────────────────────────────────────

    /// List customers and suppliers, optionally filtered by identification, branch office and dates.
    #[tool(
        annotations(read_only_hint = true),
        description = "List customers and suppliers, optionally filtered by identification, branch office and dates"
    )]
    async fn list_customers(
        &self,
        params: Parameters<ListCustomersParams>,
    ) -> Result<CallToolResult, McpError> {
        self.list("list_customers", &params.0).await
    }

    /// Get a customer by its ID.
    #[tool(annotations(read_only_hint = true), description = "Get a customer by its ID")]
    async fn get_customer(&self, params: Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        self.by_id("get_customer", params.0.id).await
    }

    /// Create a customer or supplier.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Create a customer or supplier"
    )]
    async fn create_customer(
        &self,
        params: Parameters<CustomerPayload>,
    ) -> Result<CallToolResult, McpError> {
        self.send("create_customer", &params.0).await
    }

    /// Update a customer.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Update a customer. Only the fields provided are sent"
    )]
    async fn update_customer(
        &self,
        params: Parameters<UpdateCustomerParams>,
    ) -> Result<CallToolResult, McpError> {
        let Parameters(UpdateCustomerParams { id, patch }) = params;
        self.send_to("update_customer", id, &patch).await
    }

    /// Delete a customer by its ID.
    #[tool(
        annotations(destructive_hint = true),
        description = "Delete a customer by its ID"
    )]
    async fn delete_customer(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id("delete_customer", params.0.id).await
    }

    /// Fetches one page of customers and narrows it locally.
    #[tool(
        annotations(read_only_hint = true),
        description = "Search one page of customers by case-insensitive substring of identification and/or name (name parts or trade name). type is filtered upstream. total_results reflects matches on the fetched page only"
    )]
    async fn search_customers(
        &self,
        params: Parameters<SearchCustomersParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self.catalog.search_customers(&params.0).await;
        tool_result("search_customers", outcome)
    }

    // ── Invoices ────────────────────────────────────────────────────

    /// List sales invoices, optionally filtered by document type, dates and customer.
    #[tool(
        annotations(read_only_hint = true),
        description = "List sales invoices, optionally filtered by document type, dates and customer"
    )]
    async fn list_invoices(
        &self,
        params: Parameters<ListDocumentsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.list("list_invoices", &params.0).await
    }

    /// Get a sales invoice by its ID.
    #[tool(annotations(read_only_hint = true), description = "Get a sales invoice by its ID")]
    async fn get_invoice(&self, params: Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        self.by_id("get_invoice", params.0.id).await
    }

    /// Create a sales invoice.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Create a sales invoice"
    )]
    async fn create_invoice(
        &self,
        params: Parameters<InvoicePayload>,
    ) -> Result<CallToolResult, McpError> {
        self.send("create_invoice", &params.0).await
    }

    /// Update a sales invoice.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Update a sales invoice. Only the fields provided are sent"
    )]
    async fn update_invoice(
        &self,
        params: Parameters<UpdateInvoiceParams>,
    ) -> Result<CallToolResult, McpError> {
        let Parameters(UpdateInvoiceParams { id, patch }) = params;
        self.send_to("update_invoice", id, &patch).await
    }

    /// Delete a sales invoice by its ID.
    #[tool(
        annotations(destructive_hint = true),
        description = "Delete a sales invoice by its ID"
    )]
    async fn delete_invoice(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id("delete_invoice", params.0.id).await
    }

    /// Get the PDF of a sales invoice (base64 encoded).
    #[tool(
        annotations(read_only_hint = true),
        description = "Get the PDF of a sales invoice (base64 encoded)"
    )]
    async fn get_invoice_pdf(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id("get_invoice_pdf", params.0.id).await
    }

    /// Get the electronic XML of a sales invoice (base64 encoded).
    #[tool(
        annotations(read_only_hint = true),
        description = "Get the electronic XML of a sales invoice (base64 encoded)"
    )]
    async fn get_invoice_xml(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id("get_invoice_xml", params.0.id).await
    }

    /// Email a sales invoice to `mail_to`, with optional `copy_to` recipients.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Email a sales invoice to mail_to, with optional copy_to recipients"
    )]
    async fn send_invoice_email(
        &self,
        params: Parameters<SendEmailParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = params.0.id.clone();
        self.send_to("send_invoice_email", id, &params.0).await
    }

    /// Annul (void) a sales invoice by its ID.
    #[tool(
        annotations(destructive_hint = true),
        description = "Annul (void) a sales invoice by its ID"
    )]
    async fn annul_invoice(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id("annul_invoice", params.0.id).await
    }

    /// Get the electronic stamping rejection errors of a sales invoice.
    #[tool(
        annotations(read_only_hint = true),
        description = "Get the electronic stamping rejection errors of a sales invoice"
    )]
    async fn get_invoice_stamp_errors(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id("get_invoice_stamp_errors", params.0.id).await
    }

    /// Submits a batch; a random idempotency key is used when none is given.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Create several sales invoices asynchronously. Upstream calls notification_url when done. Pass idempotency_key to make resubmission safe"
    )]
    async fn create_invoice_batch(
        &self,
        params: Parameters<InvoiceBatchParams>,
    ) -> Result<CallToolResult, McpError> {
        let key = params
            .0
            .idempotency_key
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        tracing::debug!(
            idempotency_key = %key,
            invoices = params.0.invoices.len(),
            "submitting invoice batch"
        );
        let call = OperationCall::new()
            .with_header(IDEMPOTENCY_KEY_HEADER, key)
            .with_body(&params.0);
        self.dispatch("create_invoice_batch", call).await
    }

    // ── Credit notes ────────────────────────────────────────────────

    /// List credit notes, optionally filtered by document type, dates and customer.
    #[tool(
        annotations(read_only_hint = true),
        description = "List credit notes, optionally filtered by document type, dates and customer"
    )]
    async fn list_credit_notes(
        &self,
        params: Parameters<ListDocumentsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.list("list_credit_notes", &params.0).await
    }

    /// Get a credit note by its ID.
    #[tool(annotations(read_only_hint = true), description = "Get a credit note by its ID")]
    async fn get_credit_note(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id("get_credit_note", params.0.id).await
    }

    /// Create a credit note against an invoice.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Create a credit note against an invoice"
    )]
    async fn create_credit_note(
        &self,
        params: Parameters<CreditNotePayload>,
    ) -> Result<CallToolResult, McpError> {
        self.send("create_credit_note", &params.0).await
    }

    /// Get the PDF of a credit note (base64 encoded).
    #[tool(
        annotations(read_only_hint = true),
        description = "Get the PDF of a credit note (base64 encoded)"
    )]
    async fn get_credit_note_pdf(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id("get_credit_note_pdf", params.0.id).await
    }

    /// Get the electronic XML of a credit note (base64 encoded).
    #[tool(
        annotations(read_only_hint = true),
        description = "Get the electronic XML of a credit note (base64 encoded)"
    )]
    async fn get_credit_note_xml(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id("get_credit_note_xml", params.0.id).await
    }

    /// Email a credit note to `mail_to`, with optional `copy_to` recipients.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Email a credit note to mail_to, with optional copy_to recipients"
    )]
    async fn send_credit_note_email(
        &self,
        params: Parameters<SendEmailParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = params.0.id.clone();
        self.send_to("send_credit_note_email", id, &params.0).await
    }

    // ── Cash receipts ───────────────────────────────────────────────

    /// List cash receipts (vouchers), optionally filtered by document type, dates and customer.
    #[tool(
        annotations(read_only_hint = true),
        description = "List cash receipts (vouchers), optionally filtered by document type, dates and customer"
    )]
    async fn list_vouchers(
        &self,
        params: Parameters<ListDocumentsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.list("list_vouchers", &params.0).await
    }

    /// Get a cash receipt by its ID.
    #[tool(annotations(read_only_hint = true), description = "Get a cash receipt by its ID")]
    async fn get_voucher(&self, params: Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        self.by_id("get_voucher", params.0.id).await
    }

    /// Create a cash receipt: DebtPayment, AdvancePayment or Detailed.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Create a cash receipt: DebtPayment, AdvancePayment or Detailed"
    )]
    async fn create_voucher(
        &self,
        params: Parameters<VoucherPayload>,
    ) -> Result<CallToolResult, McpError> {
        self.send("create_voucher", &params.0).await
    }

    // ── Purchases ───────────────────────────────────────────────────

    /// List purchase invoices, optionally filtered by document type, dates and supplier.
    #[tool(
        annotations(read_only_hint = true),
        description = "List purchase invoices, optionally filtered by document type, dates and supplier"
    )]
    async fn list_purchases(
        &self,
        params: Parameters<ListDocumentsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.list("list_purchases", &params.0).await
    }

    /// Get a purchase invoice by its ID.
    #[tool(annotations(read_only_hint = true), description = "Get a purchase invoice by its ID")]
    async fn get_purchase(&self, params: Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        self.by_id("get_purchase", params.0.id).await
    }

    /// Create a purchase invoice.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Create a purchase invoice"
    )]
    async fn create_purchase(
        &self,
        params: Parameters<PurchasePayload>,
    ) -> Result<CallToolResult, McpError> {
        self.send("create_purchase", &params.0).await
    }

    /// Update a purchase invoice.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Update a purchase invoice. Only the fields provided are sent"
    )]
    async fn update_purchase(
        &self,
        params: Parameters<UpdatePurchaseParams>,
    ) -> Result<CallToolResult, McpError> {
        let Parameters(UpdatePurchaseParams { id, patch }) = params;
        self.send_to("update_purchase", id, &patch).await
    }

    /// Delete a purchase invoice by its ID.
    #[tool(
        annotations(destructive_hint = true),
        description = "Delete a purchase invoice by its ID"
    )]
    async fn delete_purchase(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id("delete_purchase", params.0.id).await
    }

    // ── Journals ────────────────────────────────────────────────────

    /// List accounting journals, optionally filtered by document type and dates.
    #[tool(
        annotations(read_only_hint = true),
        description = "List accounting journals, optionally filtered by document type and dates"
    )]
    async fn list_journals(
        &self,
        params: Parameters<ListDocumentsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.list("list_journals", &params.0).await
    }

    /// Get an accounting journal by its ID.
    #[tool(annotations(read_only_hint = true), description = "Get an accounting journal by its ID")]
    async fn get_journal(&self, params: Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        self.by_id("get_journal", params.0.id).await
    }

    /// Create an accounting journal.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Create an accounting journal. Debit and credit movements must balance"
    )]
    async fn create_journal(
        &self,
        params: Parameters<JournalPayload>,
    ) -> Result<CallToolResult, McpError> {
        self.send("create_journal", &params.0).await
    }

    // ── Payment receipts ────────────────────────────────────────────

    /// List payment receipts (disbursements), optionally filtered by document type, dates and supplier.
    #[tool(
        annotations(read_only_hint = true),
        description = "List payment receipts (disbursements), optionally filtered by document type, dates and supplier"
    )]
    async fn list_payment_receipts(
        &self,
        params: Parameters<ListDocumentsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.list("list_payment_receipts", &params.0).await
    }

    /// Get a payment receipt by its ID.
    #[tool(annotations(read_only_hint = true), description = "Get a payment receipt by its ID")]
    async fn get_payment_receipt(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id("get_payment_receipt", params.0.id).await
    }

    /// Create a payment receipt.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Create a payment receipt"
    )]
    async fn create_payment_receipt(
        &self,
        params: Parameters<PaymentReceiptPayload>,
    ) -> Result<CallToolResult, McpError> {
        self.send("create_payment_receipt", &params.0).await
    }

    /// Update a payment receipt.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Update a payment receipt. Only the fields provided are sent"
    )]
    async fn update_payment_receipt(
        &self,
        params: Parameters<UpdatePaymentReceiptParams>,
    ) -> Result<CallToolResult, McpError> {
        let Parameters(UpdatePaymentReceiptParams { id, patch }) = params;
        self.send_to("update_payment_receipt", id, &patch).await
    }

    /// Delete a payment receipt by its ID.
    #[tool(
        annotations(destructive_hint = true),
        description = "Delete a payment receipt by its ID"
    )]
    async fn delete_payment_receipt(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id("delete_payment_receipt", params.0.id).await
    }

    // ── Quotations ──────────────────────────────────────────────────

    /// List quotations, optionally filtered by document type, dates and customer.
    #[tool(
        annotations(read_only_hint = true),
        description = "List quotations, optionally filtered by document type, dates and customer"
    )]
    async fn list_quotations(
        &self,
        params: Parameters<ListDocumentsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.list("list_quotations", &params.0).await
    }

    /// Get a quotation by its ID.
    #[tool(annotations(read_only_hint = true), description = "Get a quotation by its ID")]
    async fn get_quotation(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id("get_quotation", params.0.id).await
    }

    /// Create a quotation.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Create a quotation"
    )]
    async fn create_quotation(
        &self,
        params: Parameters<QuotationPayload>,
    ) -> Result<CallToolResult, McpError> {
        self.send("create_quotation", &params.0).await
    }

    /// Update a quotation.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Update a quotation. Only the fields provided are sent"
    )]
    async fn update_quotation(
        &self,
        params: Parameters<UpdateQuotationParams>,
    ) -> Result<CallToolResult, McpError> {
        let Parameters(UpdateQuotationParams { id, patch }) = params;
        self.send_to("update_quotation", id, &patch).await
    }

    /// Delete a quotation by its ID.
    #[tool(
        annotations(destructive_hint = true),
        description = "Delete a quotation by its ID"
    )]
    async fn delete_quotation(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id("delete_quotation", params.0.id).await
    }

    // ── Catalogs ────────────────────────────────────────────────────

    /// List account groups (inventory classification) used by products.
    #[tool(
        annotations(read_only_hint = true),
        description = "List account groups (inventory classification) used by products"
    )]
    async fn list_account_groups(&self) -> Result<CallToolResult, McpError> {
        self.dispatch("list_account_groups", Ok(OperationCall::new()))
            .await
    }

    /// List configured taxes.
    #[tool(annotations(read_only_hint = true), description = "List configured taxes")]
    async fn list_taxes(&self) -> Result<CallToolResult, McpError> {
        self.dispatch("list_taxes", Ok(OperationCall::new())).await
    }

    /// List price lists.
    #[tool(annotations(read_only_hint = true), description = "List price lists")]
    async fn list_price_lists(&self) -> Result<CallToolResult, McpError> {
        self.dispatch("list_price_lists", Ok(OperationCall::new()))
            .await
    }

    /// List warehouses.
    #[tool(annotations(read_only_hint = true), description = "List warehouses")]
    async fn list_warehouses(&self) -> Result<CallToolResult, McpError> {
        self.dispatch("list_warehouses", Ok(OperationCall::new()))
            .await
    }

    /// List users (sellers) of the company.
    #[tool(
        annotations(read_only_hint = true),
        description = "List users (sellers) of the company"
    )]
    async fn list_users(&self) -> Result<CallToolResult, McpError> {
        self.dispatch("list_users", Ok(OperationCall::new())).await
    }

    /// List document types for a family: FV invoice, NC credit note, FC purchase, RC cash receipt, RP payment receipt, CC journal, C quotation.
    #[tool(
        annotations(read_only_hint = true),
        description = "List document types for a family: FV invoice, NC credit note, FC purchase, RC cash receipt, RP payment receipt, CC journal, C quotation"
    )]
    async fn list_document_types(
        &self,
        params: Parameters<DocumentTypesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.list("list_document_types", &params.0).await
    }

    /// List payment methods available for a document family (FV, NC, FC, RC, RP, CC, C).
    #[tool(
        annotations(read_only_hint = true),
        description = "List payment methods available for a document family (FV, NC, FC, RC, RP, CC, C)"
    )]
    async fn list_payment_types(
        &self,
        params: Parameters<PaymentTypesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.list("list_payment_types", &params.0).await
    }

    /// List cost centers.
    #[tool(annotations(read_only_hint = true), description = "List cost centers")]
    async fn list_cost_centers(&self) -> Result<CallToolResult, McpError> {
        self.dispatch("list_cost_centers", Ok(OperationCall::new()))
            .await
    }

    /// List fixed assets.
    #[tool(annotations(read_only_hint = true), description = "List fixed assets")]
    async fn list_fixed_assets(&self) -> Result<CallToolResult, McpError> {
        self.dispatch("list_fixed_assets", Ok(OperationCall::new()))
            .await
    }

    // ── Reports ─────────────────────────────────────────────────────

    /// Generate a trial balance report for an account range and period.
    #[tool(
        annotations(read_only_hint = true),
        description = "Generate a trial balance report for an account range and period. Returns a link to the generated file"
    )]
    async fn get_trial_balance(
        &self,
        params: Parameters<TrialBalanceParams>,
    ) -> Result<CallToolResult, McpError> {
        self.send("get_trial_balance", &params.0).await
    }

    /// Generate a trial balance report broken down by third party, optionally for one customer.
    #[tool(
        annotations(read_only_hint = true),
        description = "Generate a trial balance report broken down by third party, optionally for one customer. Returns a link to the generated file"
    )]
    async fn get_trial_balance_by_third(
        &self,
        params: Parameters<TrialBalanceByThirdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.send("get_trial_balance_by_third", &params.0).await
    }

    /// List accounts payable, optionally filtered by due date and supplier.
    #[tool(
        annotations(read_only_hint = true),
        description = "List accounts payable, optionally filtered by due date and supplier"
    )]
    async fn get_accounts_payable(
        &self,
        params: Parameters<AccountsPayableParams>,
    ) -> Result<CallToolResult, McpError> {
        self.list("get_accounts_payable", &params.0).await
    }

    // ── Webhooks ────────────────────────────────────────────────────

    /// List webhook subscriptions.
    #[tool(annotations(read_only_hint = true), description = "List webhook subscriptions")]
    async fn list_webhooks(&self) -> Result<CallToolResult, McpError> {
        self.dispatch("list_webhooks", Ok(OperationCall::new())).await
    }

    /// Subscribe a URL to an event topic.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Subscribe a URL to an event topic"
    )]
    async fn create_webhook(
        &self,
        params: Parameters<CreateWebhookParams>,
    ) -> Result<CallToolResult, McpError> {
        self.send("create_webhook", &params.0).await
    }

    /// Update a webhook subscription.
    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Update a webhook subscription. Only the fields provided are sent"
    )]
    async fn update_webhook(
        &self,
        params: Parameters<UpdateWebhookParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = params.0.id.clone();
        self.send_to("update_webhook", id, &params.0).await
    }

    /// Delete a webhook subscription by its ID.
    #[tool(
        annotations(destructive_hint = true),
        description = "Delete a webhook subscription by its ID"
    )]
    async fn delete_webhook(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.by_id("delete_webhook", params.0.id).await
    }
}

#[tool_handler]
impl ServerHandler for SiigoMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Siigo accounting MCP server. \
                 Manage products, customers, invoices, credit notes, cash receipts, \
                 purchases, journals, payment receipts and quotations; look up \
                 catalogs (taxes, document types, payment types, warehouses); \
                 generate reports and manage webhooks. Use list_document_types \
                 and list_taxes to find the IDs documents need."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::missing_docs_in_private_items,
    reason = "test code uses expect and indexing for readability"
)]
mod tests {
    use std::collections::HashSet;

    use rmcp::handler::server::wrapper::Parameters;
    use rmcp::model::CallToolResult;
    use serde_json::{Value, json};
    use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::SiigoMcpServer;
    use crate::catalog::{Access, Catalog, OPERATIONS, operation};
    use crate::client::SiigoClient;
    use crate::client::tests::{mount_auth, test_config};
    use crate::params::IdParams;

    fn server_for(base_url: &str) -> SiigoMcpServer {
        let client = SiigoClient::new(&test_config(base_url)).expect("client");
        SiigoMcpServer::new(Catalog::new(client))
    }

    fn text_of(result: &CallToolResult) -> String {
        result.content[0]
            .as_text()
            .map(|content| content.text.clone())
            .expect("text content")
    }

    fn json_of(result: &CallToolResult) -> Value {
        serde_json::from_str(&text_of(result)).expect("json content")
    }

    fn id(value: &str) -> Parameters<IdParams> {
        Parameters(IdParams {
            id: value.to_owned(),
        })
    }

    #[test]
    fn every_descriptor_has_exactly_one_tool() {
        let server = server_for("http://127.0.0.1:9");
        let tools: HashSet<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        let descriptors: HashSet<String> =
            OPERATIONS.iter().map(|entry| entry.name.to_owned()).collect();
        assert_eq!(tools, descriptors);
    }

    #[test]
    fn tool_annotations_follow_descriptor_access() {
        let server = server_for("http://127.0.0.1:9");
        for tool in server.tool_router.list_all() {
            let entry = operation(&tool.name).expect("descriptor");
            let hints = tool.annotations.expect("annotations");
            match entry.access {
                Access::ReadOnly => assert_eq!(hints.read_only_hint, Some(true), "{}", entry.name),
                Access::Write => {
                    assert_eq!(hints.read_only_hint, Some(false), "{}", entry.name);
                    assert_eq!(hints.destructive_hint, Some(false), "{}", entry.name);
                }
                Access::Destructive => {
                    assert_eq!(hints.destructive_hint, Some(true), "{}", entry.name);
                }
            }
        }
    }

    #[tokio::test]
    async fn create_product_relays_reply_verbatim() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        let created = json!({
            "id": "8f0d",
            "code": "P1",
            "name": "Widget",
            "account_group": {"id": 10}
        });
        Mock::given(method("POST"))
            .and(path("/v1/products"))
            .and(body_json(json!({"code": "P1", "name": "Widget", "account_group": 10})))
            .respond_with(ResponseTemplate::new(201).set_body_json(created.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let mcp = server_for(&server.uri());
        let payload =
            serde_json::from_value(json!({"code": "P1", "name": "Widget", "account_group": 10}))
                .expect("payload");
        let result = mcp.create_product(Parameters(payload)).await.expect("tool result");
        assert_ne!(result.is_error, Some(true));
        assert_eq!(json_of(&result), created);
    }

    #[tokio::test]
    async fn upstream_validation_error_is_a_successful_result() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        let rejection = json!({
            "Errors": [{"Code": "not_found", "Message": "Product not found"}],
            "Status": 404
        });
        Mock::given(method("GET"))
            .and(path("/v1/products/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(rejection.clone()))
            .mount(&server)
            .await;

        let mcp = server_for(&server.uri());
        let result = mcp.get_product(id("missing")).await.expect("tool result");
        assert_ne!(result.is_error, Some(true));
        assert_eq!(json_of(&result), rejection);
    }

    #[tokio::test]
    async fn failure_is_reported_and_server_keeps_serving() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/v1/taxes"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/taxes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
            .mount(&server)
            .await;

        let mcp = server_for(&server.uri());
        let failed = mcp.list_taxes().await.expect("tool result");
        assert_eq!(failed.is_error, Some(true));
        assert!(text_of(&failed).starts_with("Error executing list_taxes: "));

        let recovered = mcp.list_taxes().await.expect("tool result");
        assert_ne!(recovered.is_error, Some(true));
        assert_eq!(json_of(&recovered), json!([{"id": 1}]));
    }

    #[tokio::test]
    async fn missing_id_fails_without_a_request() {
        let server = MockServer::start().await;
        mount_auth(&server, 0).await;
        let mcp = server_for(&server.uri());
        let result = mcp.delete_product(id("")).await.expect("tool result");
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("Error executing delete_product: "));
    }

    #[tokio::test]
    async fn annul_sends_no_body() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        Mock::given(method("POST"))
            .and(path("/v1/invoices/inv-7/annul"))
            .and(|request: &Request| request.body.is_empty())
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "inv-7", "annulled": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mcp = server_for(&server.uri());
        let result = mcp.annul_invoice(id("inv-7")).await.expect("tool result");
        assert_eq!(json_of(&result)["annulled"], true);
    }

    #[tokio::test]
    async fn update_puts_only_the_patch() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        let updated = json!({"id": "8f0d", "code": "P1", "name": "Widget v2", "description": null});
        Mock::given(method("PUT"))
            .and(path("/v1/products/8f0d"))
            .and(body_json(json!({"name": "Widget v2", "description": null})))
            .respond_with(ResponseTemplate::new(200).set_body_json(updated.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let mcp = server_for(&server.uri());
        let params = serde_json::from_value(json!({
            "id": "8f0d",
            "name": "Widget v2",
            "description": null
        }))
        .expect("params");
        let result = mcp.update_product(Parameters(params)).await.expect("tool result");
        assert_ne!(result.is_error, Some(true));
        assert_eq!(json_of(&result), updated);
    }

    #[tokio::test]
    async fn send_email_posts_recipients_only() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        Mock::given(method("POST"))
            .and(path("/v1/credit-notes/nc-3/mail"))
            .and(body_json(json!({
                "mail_to": "billing@example.com",
                "copy_to": "boss@example.com"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "sent"})))
            .expect(1)
            .mount(&server)
            .await;

        let mcp = server_for(&server.uri());
        let params = serde_json::from_value(json!({
            "id": "nc-3",
            "mail_to": "billing@example.com",
            "copy_to": "boss@example.com"
        }))
        .expect("params");
        let result = mcp.send_credit_note_email(Parameters(params)).await.expect("tool result");
        assert_eq!(json_of(&result), json!({"status": "sent"}));
    }

    #[tokio::test]
    async fn invoice_batch_forwards_caller_key() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        Mock::given(method("POST"))
            .and(path("/v1/invoices/batch"))
            .and(header("Idempotency-Key", "batch-2024-03-01"))
            .and(body_json(json!({"notification_url": "https://example.com/hook", "invoices": []})))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({"batch_id": "b-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let mcp = server_for(&server.uri());
        let params = serde_json::from_value(json!({
            "idempotency_key": "batch-2024-03-01",
            "notification_url": "https://example.com/hook",
            "invoices": []
        }))
        .expect("params");
        let result = mcp.create_invoice_batch(Parameters(params)).await.expect("tool result");
        assert_eq!(json_of(&result), json!({"batch_id": "b-1"}));
    }

    #[tokio::test]
    async fn invoice_batch_generates_key_when_omitted() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        Mock::given(method("POST"))
            .and(path("/v1/invoices/batch"))
            .and(header_exists("Idempotency-Key"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({"batch_id": "b-2"})))
            .expect(1)
            .mount(&server)
            .await;

        let mcp = server_for(&server.uri());
        let params = serde_json::from_value(json!({
            "notification_url": "https://example.com/hook",
            "invoices": []
        }))
        .expect("params");
        let result = mcp.create_invoice_batch(Parameters(params)).await.expect("tool result");
        assert_ne!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn document_types_use_type_query() {
        let server = MockServer::start().await;
        mount_auth(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/v1/document-types"))
            .and(query_param("type", "NC"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": 24446, "code": 1}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mcp = server_for(&server.uri());
        let params = serde_json::from_value(json!({"type": "NC"})).expect("params");
        let result = mcp.list_document_types(Parameters(params)).await.expect("tool result");
        assert_eq!(json_of(&result), json!([{"id": 24446, "code": 1}]));
    }
}
