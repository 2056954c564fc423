use super::{Category, Gender, OfferId};

/// A marketing offer from the catalog.
///
/// Offers are loaded once and treated as immutable for the lifetime of a
/// [`Catalog`](super::Catalog).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offer {
    /// The offer's identifier, unique within a catalog
    #[cfg_attr(feature = "serde", serde(alias = "offer_id"))]
    pub id: OfferId,
    /// A human-readable name
    #[cfg_attr(feature = "serde", serde(alias = "offer_name"))]
    pub name: String,
    /// The monetary cost of extending the offer
    pub price: f64,
    /// The product category
    pub category: Category,
    /// Which clients the offer is aimed at
    pub target_gender: TargetGender,
    /// Inclusive lower age bound
    pub min_age: u32,
    /// Inclusive upper age bound
    pub max_age: u32,
    /// Expected profit if the offer is accepted
    pub estimated_profit: f64,
    /// The brand behind the offer
    #[cfg_attr(feature = "serde", serde(default))]
    pub brand: String,
    /// Declared minimum income. Not enforced by eligibility.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_income_required: f64,
    /// Declared minimum prior purchases. Not enforced by eligibility.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_previous_purchases_required: u32,
}

/// The audience an offer targets by gender
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum TargetGender {
    /// Every client qualifies
    All,
    /// Only clients with this gender qualify
    Only(Gender),
}

impl TargetGender {
    const ALL: &'static str = "All";

    /// Whether a client with the given gender is in the audience
    pub fn admits(&self, gender: &Gender) -> bool {
        match self {
            Self::All => true,
            Self::Only(target) => target == gender,
        }
    }
}

impl From<String> for TargetGender {
    fn from(value: String) -> Self {
        if value == Self::ALL {
            Self::All
        } else {
            Self::Only(value.into())
        }
    }
}

impl From<&str> for TargetGender {
    fn from(value: &str) -> Self {
        value.to_owned().into()
    }
}

impl From<TargetGender> for String {
    fn from(value: TargetGender) -> Self {
        match value {
            TargetGender::All => TargetGender::ALL.to_owned(),
            TargetGender::Only(gender) => gender.as_str().to_owned(),
        }
    }
}
