//! Parameter structs for MCP tool inputs.
//!
//! Each struct derives [`serde::Deserialize`] and [`schemars::JsonSchema`]
//! so that `rmcp` can auto-generate JSON schemas for tool parameters, and
//! [`serde::Serialize`] so the catalog can turn it into a query string or a
//! request body. Path identifiers are marked `skip_serializing` so they never
//! leak into the body.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::payloads::{
    CustomerPatch, CustomerType, InvoicePatch, InvoicePayload, PaymentReceiptPatch, ProductPatch,
    PurchasePatch, QuotationPatch, ThirdPartyRef,
};

/// Parameters for tools addressing one resource by ID.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct IdParams {
    /// Resource ID (GUID).
    #[serde(skip_serializing)]
    pub(crate) id: String,
}

/// Pagination only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub(crate) struct PageParams {
    /// Page number, starting at 1.
    pub(crate) page: Option<u32>,
    /// Results per page (1-100).
    pub(crate) page_size: Option<u32>,
}

/// Parameters for the `list_products` tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub(crate) struct ListProductsParams {
    /// Page number, starting at 1.
    pub(crate) page: Option<u32>,
    /// Results per page (1-100).
    pub(crate) page_size: Option<u32>,
    /// Exact product code.
    pub(crate) code: Option<String>,
    /// Created on or after, `YYYY-MM-DD`.
    pub(crate) created_start: Option<String>,
    /// Created on or before, `YYYY-MM-DD`.
    pub(crate) created_end: Option<String>,
    /// Updated on or after, `YYYY-MM-DD`.
    pub(crate) updated_start: Option<String>,
    /// Updated on or before, `YYYY-MM-DD`.
    pub(crate) updated_end: Option<String>,
}

/// Parameters for the `list_customers` tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub(crate) struct ListCustomersParams {
    /// Page number, starting at 1.
    pub(crate) page: Option<u32>,
    /// Results per page (1-100).
    pub(crate) page_size: Option<u32>,
    /// Exact identification number.
    pub(crate) identification: Option<String>,
    /// Branch office.
    pub(crate) branch_office: Option<i64>,
    /// Created on or after, `YYYY-MM-DD`.
    pub(crate) created_start: Option<String>,
    /// Created on or before, `YYYY-MM-DD`.
    pub(crate) created_end: Option<String>,
    /// Updated on or after, `YYYY-MM-DD`.
    pub(crate) updated_start: Option<String>,
    /// Updated on or before, `YYYY-MM-DD`.
    pub(crate) updated_end: Option<String>,
}

/// Parameters for listing documents (invoices, credit notes, vouchers,
/// purchases, journals, payment receipts, quotations).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub(crate) struct ListDocumentsParams {
    /// Page number, starting at 1.
    pub(crate) page: Option<u32>,
    /// Results per page (1-100).
    pub(crate) page_size: Option<u32>,
    /// Document type ID.
    pub(crate) document_id: Option<String>,
    /// Document date on or after, `YYYY-MM-DD`.
    pub(crate) date_start: Option<String>,
    /// Document date on or before, `YYYY-MM-DD`.
    pub(crate) date_end: Option<String>,
    /// Created on or after, `YYYY-MM-DD`.
    pub(crate) created_start: Option<String>,
    /// Created on or before, `YYYY-MM-DD`.
    pub(crate) created_end: Option<String>,
    /// Updated on or after, `YYYY-MM-DD`.
    pub(crate) updated_start: Option<String>,
    /// Updated on or before, `YYYY-MM-DD`.
    pub(crate) updated_end: Option<String>,
    /// Customer or supplier identification.
    pub(crate) customer_identification: Option<String>,
    /// Customer or supplier branch office.
    pub(crate) customer_branch_office: Option<i64>,
}

/// Parameters for the `search_products` tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub(crate) struct SearchProductsParams {
    /// Page number to fetch, starting at 1.
    pub(crate) page: Option<u32>,
    /// Results per page to fetch (1-100).
    pub(crate) page_size: Option<u32>,
    /// Substring of the product code (case-insensitive).
    pub(crate) code: Option<String>,
    /// Substring of the product name (case-insensitive).
    pub(crate) name: Option<String>,
}

/// Parameters for the `search_customers` tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub(crate) struct SearchCustomersParams {
    /// Page number to fetch, starting at 1.
    pub(crate) page: Option<u32>,
    /// Results per page to fetch (1-100).
    pub(crate) page_size: Option<u32>,
    /// Restrict to one third-party role (filtered upstream).
    #[serde(rename = "type")]
    pub(crate) kind: Option<CustomerType>,
    /// Substring of the identification number (case-insensitive).
    pub(crate) identification: Option<String>,
    /// Substring of any name part or the trade name (case-insensitive).
    pub(crate) name: Option<String>,
}

/// Parameters for the `update_product` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct UpdateProductParams {
    /// Product ID.
    #[serde(skip_serializing)]
    pub(crate) id: String,
    /// Fields to change.
    #[serde(flatten)]
    pub(crate) patch: ProductPatch,
}

/// Parameters for the `update_customer` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct UpdateCustomerParams {
    /// Customer ID.
    #[serde(skip_serializing)]
    pub(crate) id: String,
    /// Fields to change.
    #[serde(flatten)]
    pub(crate) patch: CustomerPatch,
}

/// Parameters for the `update_invoice` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct UpdateInvoiceParams {
    /// Invoice ID.
    #[serde(skip_serializing)]
    pub(crate) id: String,
    /// Fields to change.
    #[serde(flatten)]
    pub(crate) patch: InvoicePatch,
}

/// Parameters for the `update_purchase` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct UpdatePurchaseParams {
    /// Purchase ID.
    #[serde(skip_serializing)]
    pub(crate) id: String,
    /// Fields to change.
    #[serde(flatten)]
    pub(crate) patch: PurchasePatch,
}

/// Parameters for the `update_payment_receipt` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct UpdatePaymentReceiptParams {
    /// Payment receipt ID.
    #[serde(skip_serializing)]
    pub(crate) id: String,
    /// Fields to change.
    #[serde(flatten)]
    pub(crate) patch: PaymentReceiptPatch,
}

/// Parameters for the `update_quotation` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct UpdateQuotationParams {
    /// Quotation ID.
    #[serde(skip_serializing)]
    pub(crate) id: String,
    /// Fields to change.
    #[serde(flatten)]
    pub(crate) patch: QuotationPatch,
}

/// Parameters for the `send_*_email` tools.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct SendEmailParams {
    /// Document ID.
    #[serde(skip_serializing)]
    pub(crate) id: String,
    /// Recipient address.
    pub(crate) mail_to: String,
    /// Additional recipients, separated by `;`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) copy_to: Option<String>,
}

/// Parameters for the `create_invoice_batch` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct InvoiceBatchParams {
    /// Key letting upstream deduplicate a resubmitted batch. A random one is
    /// generated when omitted.
    #[serde(default, skip_serializing)]
    pub(crate) idempotency_key: Option<String>,
    /// URL upstream calls back once the batch has been processed.
    pub(crate) notification_url: String,
    /// Invoices to create.
    pub(crate) invoices: Vec<InvoicePayload>,
}

/// Document type codes accepted by catalog lookups.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub(crate) enum DocumentTypeCode {
    /// Sales invoice.
    #[serde(rename = "FV")]
    Invoice,
    /// Credit note.
    #[serde(rename = "NC")]
    CreditNote,
    /// Purchase invoice.
    #[serde(rename = "FC")]
    Purchase,
    /// Cash receipt.
    #[serde(rename = "RC")]
    CashReceipt,
    /// Payment receipt.
    #[serde(rename = "RP")]
    PaymentReceipt,
    /// Accounting journal.
    #[serde(rename = "CC")]
    Journal,
    /// Quotation.
    #[serde(rename = "C")]
    Quotation,
}

/// Parameters for the `list_document_types` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct DocumentTypesParams {
    /// Document family to list types for.
    #[serde(rename = "type")]
    pub(crate) kind: DocumentTypeCode,
}

/// Parameters for the `list_payment_types` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct PaymentTypesParams {
    /// Document family the payment types apply to.
    pub(crate) document_type: DocumentTypeCode,
}

/// Parameters for the `get_accounts_payable` tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub(crate) struct AccountsPayableParams {
    /// Page number, starting at 1.
    pub(crate) page: Option<u32>,
    /// Results per page (1-100).
    pub(crate) page_size: Option<u32>,
    /// Due on or after, `YYYY-MM-DD`.
    pub(crate) due_date_start: Option<String>,
    /// Due on or before, `YYYY-MM-DD`.
    pub(crate) due_date_end: Option<String>,
    /// Supplier identification.
    pub(crate) provider_identification: Option<String>,
    /// Supplier branch office.
    pub(crate) provider_branch_office: Option<i64>,
}

/// Parameters for the `get_trial_balance` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct TrialBalanceParams {
    /// First account code of the range.
    pub(crate) account_start: String,
    /// Last account code of the range.
    pub(crate) account_end: String,
    /// Fiscal year.
    pub(crate) year: i32,
    /// First month (1-13; 13 is the closing period).
    pub(crate) month_start: u8,
    /// Last month (1-13).
    pub(crate) month_end: u8,
    /// Whether to include tax differences.
    #[serde(default)]
    pub(crate) includes_tax_difference: bool,
}

/// Parameters for the `get_trial_balance_by_third` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct TrialBalanceByThirdParams {
    /// Account and period range.
    #[serde(flatten)]
    pub(crate) range: TrialBalanceParams,
    /// Restrict the report to one third party.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) customer: Option<ThirdPartyRef>,
}

/// Parameters for the `create_webhook` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct CreateWebhookParams {
    /// Application identifier registered upstream.
    pub(crate) application_id: String,
    /// HTTPS endpoint receiving notifications.
    pub(crate) url: String,
    /// Event topic, e.g. `public.siigoapi.products.create`.
    pub(crate) topic: String,
}

/// Parameters for the `update_webhook` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct UpdateWebhookParams {
    /// Webhook subscription ID.
    #[serde(skip_serializing)]
    pub(crate) id: String,
    /// Application identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) application_id: Option<String>,
    /// HTTPS endpoint receiving notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) url: Option<String>,
    /// Event topic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) topic: Option<String>,
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "test code uses expect for readability"
)]
mod tests {
    use serde_json::json;

    use super::{
        DocumentTypesParams, IdParams, InvoiceBatchParams, ListDocumentsParams,
        SearchCustomersParams, SendEmailParams, TrialBalanceByThirdParams, UpdateProductParams,
    };

    #[test]
    fn list_documents_defaults_to_empty_filter() {
        let params: ListDocumentsParams =
            serde_json::from_str("{}").expect("should deserialize empty object");
        assert!(params.page.is_none());
        assert!(params.date_start.is_none());
        assert!(params.customer_identification.is_none());
    }

    #[test]
    fn id_is_not_serialized() {
        let params: IdParams =
            serde_json::from_value(json!({"id": "6b2a4f0e"})).expect("should deserialize");
        assert_eq!(params.id, "6b2a4f0e");
        assert_eq!(serde_json::to_value(&params).expect("serialize"), json!({}));
    }

    #[test]
    fn update_params_split_id_from_patch() {
        let params: UpdateProductParams = serde_json::from_value(json!({
            "id": "6b2a4f0e",
            "name": "Widget v2",
            "active": false
        }))
        .expect("should deserialize");
        assert_eq!(params.id, "6b2a4f0e");
        assert_eq!(params.patch.name, Some(Some("Widget v2".to_owned())));
        assert_eq!(
            serde_json::to_value(&params).expect("serialize"),
            json!({"name": "Widget v2", "active": false})
        );
    }

    #[test]
    fn send_email_body_omits_id() {
        let params: SendEmailParams = serde_json::from_value(json!({
            "id": "inv-1",
            "mail_to": "billing@example.com"
        }))
        .expect("should deserialize");
        assert_eq!(
            serde_json::to_value(&params).expect("serialize"),
            json!({"mail_to": "billing@example.com"})
        );
    }

    #[test]
    fn batch_key_is_kept_out_of_body() {
        let params: InvoiceBatchParams = serde_json::from_value(json!({
            "idempotency_key": "batch-2024-03-01",
            "notification_url": "https://example.com/hooks/siigo",
            "invoices": []
        }))
        .expect("should deserialize");
        assert_eq!(params.idempotency_key.as_deref(), Some("batch-2024-03-01"));
        assert_eq!(
            serde_json::to_value(&params).expect("serialize"),
            json!({"notification_url": "https://example.com/hooks/siigo", "invoices": []})
        );
    }

    #[test]
    fn document_type_uses_upstream_codes() {
        let params: DocumentTypesParams =
            serde_json::from_value(json!({"type": "FV"})).expect("should deserialize");
        assert_eq!(serde_json::to_value(&params).expect("serialize"), json!({"type": "FV"}));
        assert!(serde_json::from_value::<DocumentTypesParams>(json!({"type": "XX"})).is_err());
    }

    #[test]
    fn customer_search_reads_type_filter() {
        let params: SearchCustomersParams = serde_json::from_value(json!({
            "type": "Supplier",
            "name": "acme"
        }))
        .expect("should deserialize");
        assert!(params.kind.is_some());
        assert_eq!(params.name.as_deref(), Some("acme"));
        assert!(params.identification.is_none());
    }

    #[test]
    fn trial_balance_by_third_flattens_range() {
        let params: TrialBalanceByThirdParams = serde_json::from_value(json!({
            "account_start": "1105",
            "account_end": "2805",
            "year": 2024,
            "month_start": 1,
            "month_end": 13,
            "customer": {"identification": "900123456", "branch_office": 0}
        }))
        .expect("should deserialize");
        assert_eq!(params.range.year, 2024);
        assert_eq!(
            serde_json::to_value(&params).expect("serialize"),
            json!({
                "account_start": "1105",
                "account_end": "2805",
                "year": 2024,
                "month_start": 1,
                "month_end": 13,
                "includes_tax_difference": false,
                "customer": {"identification": "900123456", "branch_office": 0}
            })
        );
    }
}
