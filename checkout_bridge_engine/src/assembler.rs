use crate::{
    normalizer::NormalizedFields,
    order_types::{Commission, NormalizedOrder},
};

/// Composes the normalized fields and the (optional) commission split into the order document.
///
/// The order always carries exactly one product, and tracking parameters without a value are dropped.
pub fn assemble(fields: NormalizedFields, commission: Option<Commission>, platform: &str) -> NormalizedOrder {
    let NormalizedFields { order_id, status, created_at, approved_date, payment_method, customer, product, tracking } =
        fields;
    NormalizedOrder {
        order_id,
        platform: platform.to_string(),
        payment_method,
        status,
        created_at,
        approved_date,
        customer,
        products: vec![product],
        tracking_parameters: tracking.without_blanks(),
        commission,
    }
}
