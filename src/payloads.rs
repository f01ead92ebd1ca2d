//! Resource payloads sent as request bodies.
//!
//! Every payload struct, nested ones included, types the fields upstream
//! documents and keeps an `extra` map for everything else. Amounts and
//! quantities are [`Number`]s so the caller's literal is forwarded unchanged.
//! Patch payloads are explicit partial structs: a field the caller omitted is
//! not serialized, one set to `null` is sent as `null`. They are forwarded
//! as-is; no merging with the stored resource happens here.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Deserializes a present patch field as `Some`, so an explicit `null`
/// becomes `Some(None)` and is forwarded instead of being dropped.
#[allow(
    clippy::option_option,
    reason = "absent and explicit null are different patches"
)]
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Reference to a document type by its numeric ID.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct DocumentRef {
    /// Document type ID (see `list_document_types`).
    pub(crate) id: i64,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Reference to a customer or supplier.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct ThirdPartyRef {
    /// Identification number (NIT, CC, ...).
    pub(crate) identification: String,
    /// Branch office, `0` for the main one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) branch_office: Option<i64>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Reference to a tax by ID.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct TaxRef {
    /// Tax ID (see `list_taxes`).
    pub(crate) id: i64,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// One line of a commercial document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct DocumentItem {
    /// Product code.
    pub(crate) code: String,
    /// Line description; defaults upstream to the product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    /// Quantity.
    pub(crate) quantity: Number,
    /// Unit price.
    pub(crate) price: Number,
    /// Discount value for the line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) discount: Option<Number>,
    /// Warehouse ID, for inventory-controlled products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) warehouse: Option<i64>,
    /// Taxes applied to the line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) taxes: Vec<TaxRef>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// One payment line of a document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct PaymentLine {
    /// Payment type ID (see `list_payment_types`).
    pub(crate) id: i64,
    /// Amount paid with this method.
    pub(crate) value: Number,
    /// Due date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) due_date: Option<String>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Currency of a foreign-currency document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct CurrencyRef {
    /// ISO currency code, e.g. `USD`.
    pub(crate) code: String,
    /// Exchange rate to the local currency.
    pub(crate) exchange_rate: Number,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// On/off switch used by `stamp` and `mail` invoice options.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct SendFlag {
    /// Whether to perform the action.
    pub(crate) send: bool,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

// ── Products ────────────────────────────────────────────────────────

/// Kind of product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub(crate) enum ProductType {
    /// Physical product.
    Product,
    /// Service.
    Service,
    /// Consumer good.
    ConsumerGood,
}

/// Tax classification of a product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub(crate) enum TaxClassification {
    /// Taxed.
    Taxed,
    /// Exempt.
    Exempt,
    /// Excluded.
    Excluded,
}

/// One price within a price list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct PriceListEntry {
    /// Price list position, starting at 1.
    pub(crate) position: u32,
    /// Price value.
    pub(crate) value: Number,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Prices of a product in one currency.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct ProductPrice {
    /// ISO currency code.
    pub(crate) currency_code: String,
    /// Prices per list.
    pub(crate) price_list: Vec<PriceListEntry>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Body for `create_product`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct ProductPayload {
    /// Unique product code.
    pub(crate) code: String,
    /// Product name.
    pub(crate) name: String,
    /// Inventory account group ID (see `list_account_groups`).
    pub(crate) account_group: i64,
    /// Product kind.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub(crate) kind: Option<ProductType>,
    /// Whether stock is tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) stock_control: Option<bool>,
    /// Whether the product is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) active: Option<bool>,
    /// Tax classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) tax_classification: Option<TaxClassification>,
    /// Whether prices include tax.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) tax_included: Option<bool>,
    /// Taxes applied to the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) taxes: Option<Vec<TaxRef>>,
    /// Prices per currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) prices: Option<Vec<ProductPrice>>,
    /// Unit of measure code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) unit: Option<String>,
    /// Unit label printed on documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) unit_label: Option<String>,
    /// Manufacturer reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) reference: Option<String>,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Partial body for `update_product`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[allow(
    clippy::option_option,
    reason = "absent and explicit null are different patches"
)]
pub(crate) struct ProductPatch {
    /// Product code.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) code: Option<Option<String>>,
    /// Product name.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) name: Option<Option<String>>,
    /// Inventory account group ID.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) account_group: Option<Option<i64>>,
    /// Product kind.
    #[serde(
        default,
        rename = "type",
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) kind: Option<Option<ProductType>>,
    /// Whether stock is tracked.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) stock_control: Option<Option<bool>>,
    /// Whether the product is active.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) active: Option<Option<bool>>,
    /// Tax classification.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) tax_classification: Option<Option<TaxClassification>>,
    /// Whether prices include tax.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) tax_included: Option<Option<bool>>,
    /// Taxes applied to the product.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) taxes: Option<Option<Vec<TaxRef>>>,
    /// Prices per currency.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) prices: Option<Option<Vec<ProductPrice>>>,
    /// Unit of measure code.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) unit: Option<Option<String>>,
    /// Free-text description.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) description: Option<Option<String>>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

// ── Customers ───────────────────────────────────────────────────────

/// Role of a third party.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub(crate) enum CustomerType {
    /// Customer.
    Customer,
    /// Supplier.
    Supplier,
    /// Any other third party.
    Other,
}

/// Legal nature of a third party.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub(crate) enum PersonType {
    /// Natural person.
    Person,
    /// Company.
    Company,
}

/// City reference using DANE codes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct CityRef {
    /// Country code, e.g. `Co`.
    pub(crate) country_code: String,
    /// State code, e.g. `11`.
    pub(crate) state_code: String,
    /// City code, e.g. `11001`.
    pub(crate) city_code: String,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Postal address.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct Address {
    /// Street address.
    pub(crate) address: String,
    /// City.
    pub(crate) city: CityRef,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) postal_code: Option<String>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Phone number.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct Phone {
    /// Country dialling prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) indicative: Option<String>,
    /// Number.
    pub(crate) number: String,
    /// Extension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) extension: Option<String>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Contact person.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct Contact {
    /// First name.
    pub(crate) first_name: String,
    /// Last name.
    pub(crate) last_name: String,
    /// E-mail address.
    pub(crate) email: String,
    /// Phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) phone: Option<Phone>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Body for `create_customer`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct CustomerPayload {
    /// Role of the third party; defaults upstream to `Customer`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub(crate) kind: Option<CustomerType>,
    /// Natural person or company.
    pub(crate) person_type: PersonType,
    /// Identification document type code, e.g. `13` (CC) or `31` (NIT).
    pub(crate) id_type: String,
    /// Identification number.
    pub(crate) identification: String,
    /// NIT check digit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) check_digit: Option<String>,
    /// Name parts: `[first, last]` for persons, `[company name]` for companies.
    pub(crate) name: Vec<String>,
    /// Trade name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) commercial_name: Option<String>,
    /// Branch office, `0` for the main one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) branch_office: Option<i64>,
    /// Whether the third party is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) active: Option<bool>,
    /// Whether the third party is VAT responsible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) vat_responsible: Option<bool>,
    /// Fiscal responsibility codes, e.g. `[{"code": "R-99-PN"}]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) fiscal_responsibilities: Option<Vec<Value>>,
    /// Postal address.
    pub(crate) address: Address,
    /// Phone numbers.
    pub(crate) phones: Vec<Phone>,
    /// Contact people.
    pub(crate) contacts: Vec<Contact>,
    /// Free-text comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) comments: Option<String>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Partial body for `update_customer`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[allow(
    clippy::option_option,
    reason = "absent and explicit null are different patches"
)]
pub(crate) struct CustomerPatch {
    /// Role of the third party.
    #[serde(
        default,
        rename = "type",
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) kind: Option<Option<CustomerType>>,
    /// Natural person or company.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) person_type: Option<Option<PersonType>>,
    /// Identification document type code.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) id_type: Option<Option<String>>,
    /// Identification number.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) identification: Option<Option<String>>,
    /// Name parts.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) name: Option<Option<Vec<String>>>,
    /// Trade name.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) commercial_name: Option<Option<String>>,
    /// Whether the third party is active.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) active: Option<Option<bool>>,
    /// Whether the third party is VAT responsible.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) vat_responsible: Option<Option<bool>>,
    /// Postal address.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) address: Option<Option<Address>>,
    /// Phone numbers.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) phones: Option<Option<Vec<Phone>>>,
    /// Contact people.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) contacts: Option<Option<Vec<Contact>>>,
    /// Free-text comments.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) comments: Option<Option<String>>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

// ── Invoices ────────────────────────────────────────────────────────

/// Body for `create_invoice` and one element of `create_invoice_batch`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct InvoicePayload {
    /// Invoice document type.
    pub(crate) document: DocumentRef,
    /// Issue date, `YYYY-MM-DD`.
    pub(crate) date: String,
    /// Customer being invoiced.
    pub(crate) customer: ThirdPartyRef,
    /// Cost center ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) cost_center: Option<i64>,
    /// Seller user ID (see `list_users`).
    pub(crate) seller: i64,
    /// Invoice lines.
    pub(crate) items: Vec<DocumentItem>,
    /// Payment lines; their sum must match the invoice total upstream.
    pub(crate) payments: Vec<PaymentLine>,
    /// Observations printed on the invoice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) observations: Option<String>,
    /// Foreign currency, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) currency: Option<CurrencyRef>,
    /// Whether to send the invoice to the tax authority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) stamp: Option<SendFlag>,
    /// Whether to e-mail the invoice to the customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) mail: Option<SendFlag>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Partial body for `update_invoice`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[allow(
    clippy::option_option,
    reason = "absent and explicit null are different patches"
)]
pub(crate) struct InvoicePatch {
    /// Invoice document type.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) document: Option<Option<DocumentRef>>,
    /// Issue date.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) date: Option<Option<String>>,
    /// Customer.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) customer: Option<Option<ThirdPartyRef>>,
    /// Cost center ID.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) cost_center: Option<Option<i64>>,
    /// Seller user ID.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) seller: Option<Option<i64>>,
    /// Invoice lines.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) items: Option<Option<Vec<DocumentItem>>>,
    /// Payment lines.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) payments: Option<Option<Vec<PaymentLine>>>,
    /// Observations.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) observations: Option<Option<String>>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

// ── Credit notes ────────────────────────────────────────────────────

/// Body for `create_credit_note`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct CreditNotePayload {
    /// Credit note document type.
    pub(crate) document: DocumentRef,
    /// Issue date, `YYYY-MM-DD`.
    pub(crate) date: String,
    /// ID of the invoice being credited.
    pub(crate) invoice: String,
    /// Reason code for the electronic credit note (`1`-`5`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) reason: Option<String>,
    /// Customer, when not crediting a specific invoice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) customer: Option<ThirdPartyRef>,
    /// Credited lines.
    pub(crate) items: Vec<DocumentItem>,
    /// Payment lines.
    pub(crate) payments: Vec<PaymentLine>,
    /// Observations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) observations: Option<String>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

// ── Vouchers ────────────────────────────────────────────────────────

/// Kind of cash receipt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub(crate) enum VoucherType {
    /// Payment of outstanding invoices.
    DebtPayment,
    /// Advance payment from a customer.
    AdvancePayment,
    /// Free-form accounting detail.
    Detailed,
}

/// Body for `create_voucher`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct VoucherPayload {
    /// Cash receipt document type.
    pub(crate) document: DocumentRef,
    /// Receipt date, `YYYY-MM-DD`.
    pub(crate) date: String,
    /// Receipt kind.
    #[serde(rename = "type")]
    pub(crate) kind: VoucherType,
    /// Paying customer.
    pub(crate) customer: ThirdPartyRef,
    /// Receipt lines (invoices paid or accounting detail).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) items: Option<Vec<Value>>,
    /// Payment method and amount.
    pub(crate) payment: PaymentLine,
    /// Observations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) observations: Option<String>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

// ── Purchases ───────────────────────────────────────────────────────

/// Supplier invoice reference on a purchase.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct ProviderInvoice {
    /// Supplier invoice prefix.
    pub(crate) prefix: String,
    /// Supplier invoice number.
    pub(crate) number: String,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Body for `create_purchase`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct PurchasePayload {
    /// Purchase document type.
    pub(crate) document: DocumentRef,
    /// Purchase date, `YYYY-MM-DD`.
    pub(crate) date: String,
    /// Supplier.
    pub(crate) supplier: ThirdPartyRef,
    /// Supplier's own invoice number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) provider_invoice: Option<ProviderInvoice>,
    /// Cost center ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) cost_center: Option<i64>,
    /// Purchase lines; `type` may be `Product`, `FixedAsset` or `Account`.
    pub(crate) items: Vec<Value>,
    /// Payment lines.
    pub(crate) payments: Vec<PaymentLine>,
    /// Observations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) observations: Option<String>,
    /// Foreign currency, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) currency: Option<CurrencyRef>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Partial body for `update_purchase`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[allow(
    clippy::option_option,
    reason = "absent and explicit null are different patches"
)]
pub(crate) struct PurchasePatch {
    /// Purchase date.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) date: Option<Option<String>>,
    /// Supplier.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) supplier: Option<Option<ThirdPartyRef>>,
    /// Supplier's own invoice number.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) provider_invoice: Option<Option<ProviderInvoice>>,
    /// Purchase lines.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) items: Option<Option<Vec<Value>>>,
    /// Payment lines.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) payments: Option<Option<Vec<PaymentLine>>>,
    /// Observations.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) observations: Option<Option<String>>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

// ── Journals ────────────────────────────────────────────────────────

/// Debit or credit side of a journal line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub(crate) enum Movement {
    /// Debit.
    Debit,
    /// Credit.
    Credit,
}

/// Ledger account of a journal line.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct JournalAccount {
    /// Account code from the chart of accounts.
    pub(crate) code: String,
    /// Debit or credit.
    pub(crate) movement: Movement,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// One journal line. Balancing is checked upstream.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct JournalItem {
    /// Ledger account and side.
    pub(crate) account: JournalAccount,
    /// Third party of the line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) customer: Option<ThirdPartyRef>,
    /// Line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    /// Amount.
    pub(crate) value: Number,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Body for `create_journal`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct JournalPayload {
    /// Journal document type.
    pub(crate) document: DocumentRef,
    /// Entry date, `YYYY-MM-DD`.
    pub(crate) date: String,
    /// Journal lines.
    pub(crate) items: Vec<JournalItem>,
    /// Observations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) observations: Option<String>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

// ── Payment receipts ────────────────────────────────────────────────

/// Body for `create_payment_receipt`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct PaymentReceiptPayload {
    /// Payment receipt document type.
    pub(crate) document: DocumentRef,
    /// Receipt date, `YYYY-MM-DD`.
    pub(crate) date: String,
    /// Receipt kind, e.g. `DebtPayment`, `AdvancePayment`, `Detailed`.
    #[serde(rename = "type")]
    pub(crate) kind: VoucherType,
    /// Supplier being paid.
    pub(crate) supplier: ThirdPartyRef,
    /// Receipt lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) items: Option<Vec<Value>>,
    /// Payment method and amount.
    pub(crate) payment: PaymentLine,
    /// Observations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) observations: Option<String>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Partial body for `update_payment_receipt`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[allow(
    clippy::option_option,
    reason = "absent and explicit null are different patches"
)]
pub(crate) struct PaymentReceiptPatch {
    /// Receipt date.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) date: Option<Option<String>>,
    /// Supplier.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) supplier: Option<Option<ThirdPartyRef>>,
    /// Receipt lines.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) items: Option<Option<Vec<Value>>>,
    /// Payment method and amount.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) payment: Option<Option<PaymentLine>>,
    /// Observations.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) observations: Option<Option<String>>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

// ── Quotations ──────────────────────────────────────────────────────

/// Body for `create_quotation`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub(crate) struct QuotationPayload {
    /// Quotation document type.
    pub(crate) document: DocumentRef,
    /// Quotation date, `YYYY-MM-DD`.
    pub(crate) date: String,
    /// Prospective customer.
    pub(crate) customer: ThirdPartyRef,
    /// Seller user ID.
    pub(crate) seller: i64,
    /// Quoted lines.
    pub(crate) items: Vec<DocumentItem>,
    /// Observations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) observations: Option<String>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

/// Partial body for `update_quotation`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[allow(
    clippy::option_option,
    reason = "absent and explicit null are different patches"
)]
pub(crate) struct QuotationPatch {
    /// Quotation date.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) date: Option<Option<String>>,
    /// Prospective customer.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) customer: Option<Option<ThirdPartyRef>>,
    /// Seller user ID.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) seller: Option<Option<i64>>,
    /// Quoted lines.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) items: Option<Option<Vec<DocumentItem>>>,
    /// Observations.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) observations: Option<Option<String>>,
    /// Any other upstream field, forwarded untouched.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::missing_docs_in_private_items,
    reason = "test code uses expect and indexing for readability"
)]
mod tests {
    use serde_json::json;

    use super::{CustomerPayload, InvoicePayload, ProductPatch, ProductPayload, VoucherPayload};

    #[test]
    fn minimal_product_serializes_only_given_fields() {
        let input = json!({"code": "P1", "name": "Widget", "account_group": 10});
        let payload: ProductPayload =
            serde_json::from_value(input.clone()).expect("should deserialize");
        assert_eq!(serde_json::to_value(&payload).expect("serialize"), input);
    }

    #[test]
    fn unknown_product_fields_are_kept() {
        let input = json!({
            "code": "P1",
            "name": "Widget",
            "account_group": 10,
            "type": "Service",
            "additional_fields": {"barcode": "7701234"}
        });
        let payload: ProductPayload =
            serde_json::from_value(input.clone()).expect("should deserialize");
        assert!(payload.extra.contains_key("additional_fields"));
        assert_eq!(serde_json::to_value(&payload).expect("serialize"), input);
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let patch = ProductPatch::default();
        assert_eq!(serde_json::to_value(&patch).expect("serialize"), json!({}));
    }

    #[test]
    fn customer_payload_requires_identification() {
        let result = serde_json::from_value::<CustomerPayload>(json!({
            "person_type": "Company",
            "id_type": "31",
            "name": ["Acme Corp"]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn voucher_type_is_renamed() {
        let payload: VoucherPayload = serde_json::from_value(json!({
            "document": {"id": 5086},
            "date": "2024-03-01",
            "type": "AdvancePayment",
            "customer": {"identification": "900123456"},
            "payment": {"id": 5636, "value": 1000.0}
        }))
        .expect("should deserialize");
        let body = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(body["type"], "AdvancePayment");
        assert!(body.get("items").is_none());
    }

    #[test]
    fn invoice_round_trips_nested_unknown_fields_and_integers() {
        let input = json!({
            "document": {"id": 24446},
            "date": "2024-03-01",
            "customer": {
                "identification": "900123456",
                "branch_office": 0,
                "person_type": "Company"
            },
            "seller": 629,
            "items": [{
                "code": "P1",
                "quantity": 1,
                "price": 1000,
                "discount": 12.5,
                "taxed_price": 1190,
                "taxes": [{"id": 13156, "percentage": 19}]
            }],
            "payments": [{
                "id": 5636,
                "value": 1190,
                "due_date": "2024-03-31",
                "reference": "TX-1"
            }],
            "currency": {"code": "USD", "exchange_rate": 3912.55, "source": "TRM"},
            "stamp": {"send": true, "channel": "dian"},
            "retentions": [{"id": 18735}]
        });
        let payload: InvoicePayload =
            serde_json::from_value(input.clone()).expect("should deserialize");
        assert_eq!(serde_json::to_value(&payload).expect("serialize"), input);
    }

    #[test]
    fn patch_forwards_explicit_null() {
        let input = json!({"description": null, "active": false});
        let patch: ProductPatch =
            serde_json::from_value(input.clone()).expect("should deserialize");
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.active, Some(Some(false)));
        assert!(patch.name.is_none());
        assert_eq!(serde_json::to_value(&patch).expect("serialize"), input);
    }
}
