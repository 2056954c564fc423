use super::{Map, Offer, OfferId};
use thiserror::Error;

/// An immutable collection of offers.
///
/// The catalog is built once per session and is read-only thereafter. Offers
/// are kept in ascending id order, which is the order every optimization sees
/// them in. The maximum estimated profit is computed once, at construction,
/// since every score normalizes against it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    offers: Map<OfferId, Offer>,
    max_profit: Option<f64>,
}

impl Catalog {
    /// Build a catalog from already-validated offer records
    pub fn new<I: IntoIterator<Item = Offer>>(offers: I) -> Result<Self, CatalogError> {
        let mut map = Map::<OfferId, Offer>::default();
        for offer in offers {
            if map.contains_key(&offer.id) {
                return Err(CatalogError::DuplicateOffer(offer.id));
            }
            map.insert(offer.id, offer);
        }
        map.sort_unstable_keys();

        let max_profit = map
            .values()
            .map(|offer| offer.estimated_profit)
            .reduce(f64::max);

        Ok(Self {
            offers: map,
            max_profit,
        })
    }

    /// The largest estimated profit of any offer, or None if the catalog is empty
    pub fn max_profit(&self) -> Option<f64> {
        self.max_profit
    }

    /// Look up an offer by id
    pub fn get(&self, id: OfferId) -> Option<&Offer> {
        self.offers.get(&id)
    }

    /// Iterate over the offers in ascending id order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Offer> {
        self.offers.values()
    }

    /// The number of offers
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Whether the catalog holds no offers
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

/// The ways in which a set of offers cannot form a catalog
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Two offers share an id
    #[error("duplicate offer id {0}")]
    DuplicateOffer(OfferId),
}
