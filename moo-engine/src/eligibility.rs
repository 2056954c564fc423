//! The gate deciding whether an offer may be considered for a client at all.

use moo_core::models::{Client, Offer};

/// Whether `offer` may be extended to `client` under `effective_budget`.
///
/// All of the following must hold:
/// 1. the client's age lies within the offer's inclusive age bounds,
/// 2. the offer targets everyone or the client's gender,
/// 3. the offer's price does not exceed the effective budget,
/// 4. the client has no category preference, or the offer's category is one of them.
///
/// The effective budget is the client's own budget in single-offer mode and
/// the shared campaign budget in campaign mode.
///
/// The offer's declared minimum income and minimum prior purchases are not
/// checked here.
pub fn eligible(offer: &Offer, client: &Client, effective_budget: f64) -> bool {
    (offer.min_age..=offer.max_age).contains(&client.age)
        && offer.target_gender.admits(&client.gender)
        && offer.price <= effective_budget
        && (client.preferred_category.is_empty()
            || client.preferred_category.contains(&offer.category))
}
