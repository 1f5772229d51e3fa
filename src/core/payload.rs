use crate::core::pricing::Quote;
use crate::domain::model::{
    Offering, OrderPayload, Participant, Price, ServiceSchema, SupplierOrg, TransactionDetails,
};

pub const DEFAULT_SELLER_ID: &str = "seller.chargemod";
pub const DEFAULT_SELLER_NAME: &str = "Supplier Org";

/// Verbatim merge of the three records.
pub fn build_order_payload(
    org: &SupplierOrg,
    service: &ServiceSchema,
    tx: &TransactionDetails,
) -> OrderPayload {
    OrderPayload {
        organisation_details: org.clone(),
        service_schema: service.clone(),
        transaction_details: tx.clone(),
    }
}

/// Preview for a selected offering: the service carries the offering's unit
/// price and the payment carries the quoted total.
pub fn payload_for_offering(
    org: &SupplierOrg,
    service: &ServiceSchema,
    tx: &TransactionDetails,
    offering: &Offering,
    quote: &Quote,
) -> OrderPayload {
    let mut payload = build_order_payload(org, service, tx);
    payload.service_schema.price = Price::inr(offering.price_per_kwh);
    payload.transaction_details.payment.amount = quote.total;
    payload
}

/// What actually goes out on publish: the preview plus the seller side of
/// the transaction filled from the organisation.
pub fn publish_payload(
    org: &SupplierOrg,
    service: &ServiceSchema,
    tx: &TransactionDetails,
    offering: &Offering,
    quote: &Quote,
) -> OrderPayload {
    let mut payload = payload_for_offering(org, service, tx, offering, quote);
    payload.transaction_details.seller = seller_from_org(org);
    payload
}

pub fn seller_from_org(org: &SupplierOrg) -> Participant {
    Participant {
        participant_id: non_empty_or(&org.short_name, DEFAULT_SELLER_ID),
        organisation_name: non_empty_or(&org.organisation_name, DEFAULT_SELLER_NAME),
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
