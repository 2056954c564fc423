use super::{Category, ClientId, OfferId};

/// One selected (client, offer) pair in a campaign result.
///
/// Within a single result, a client id appears at most once and the prices sum
/// to no more than the campaign budget.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    /// The client receiving the offer
    pub client_id: ClientId,
    /// The offer extended to the client
    pub offer_id: OfferId,
    /// The offer's name, carried for display
    pub offer_name: String,
    /// The offer's price, counted against the campaign budget
    pub price: f64,
    /// The offer's category
    pub category: Category,
    /// The model-estimated acceptance probability
    pub propensity: f64,
    /// The blended score the optimizer maximized
    pub combined_score: f64,
}
