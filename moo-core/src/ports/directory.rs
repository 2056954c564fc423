use crate::models::{Catalog, CatalogError, Client, Offer};

/// A supplier of fully materialized offer records.
///
/// Malformed source rows are the supplier's problem; by the time offers reach
/// the engine they are assumed valid.
pub trait OfferSource {
    /// Error type for load failures
    type Error: std::error::Error + From<CatalogError>;

    /// Load every offer
    fn load_offers(&self) -> Result<Vec<Offer>, Self::Error>;

    /// Load every offer into an immutable catalog
    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        Ok(Catalog::new(self.load_offers()?)?)
    }
}

/// A supplier of fully materialized client records.
pub trait ClientDirectory {
    /// Error type for load failures
    type Error: std::error::Error;

    /// Load every client
    fn load_clients(&self) -> Result<Vec<Client>, Self::Error>;
}
