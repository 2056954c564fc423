use moo_core::models::{Catalog, CatalogError, Client, Offer, OfferId, TargetGender};
use rstest::*;

#[fixture]
fn offers() -> Vec<Offer> {
    serde_json::from_str(
        r#"[
            {
                "offer_id": 3, "offer_name": "Product 3", "price": 1500.0,
                "category": "Fashion", "target_gender": "All", "min_age": 18,
                "max_age": 60, "estimated_profit": 400.0, "brand": "Prada",
                "min_income_required": 60000, "min_previous_purchases_required": 4
            },
            {
                "id": 1, "name": "Product 1", "price": 500.0,
                "category": "Fashion", "target_gender": "F", "min_age": 18,
                "max_age": 60, "estimated_profit": 100.0
            }
        ]"#,
    )
    .unwrap()
}

#[rstest]
fn source_rows_deserialize(offers: Vec<Offer>) {
    assert_eq!(offers[0].id, OfferId(3));
    assert_eq!(offers[0].name, "Product 3");
    assert_eq!(offers[0].min_previous_purchases_required, 4);
    assert_eq!(offers[1].target_gender, TargetGender::Only("F".into()));
    assert_eq!(offers[1].brand, "");
    assert_eq!(offers[1].min_income_required, 0.0);
}

#[rstest]
fn catalog_orders_by_id_and_tracks_max_profit(offers: Vec<Offer>) {
    let catalog = Catalog::new(offers).unwrap();
    assert_eq!(
        catalog.iter().map(|offer| offer.id).collect::<Vec<_>>(),
        vec![OfferId(1), OfferId(3)]
    );
    assert_eq!(catalog.max_profit(), Some(400.0));
    assert_eq!(catalog.get(OfferId(3)).map(|o| o.price), Some(1500.0));
}

#[rstest]
fn catalog_rejects_duplicates(offers: Vec<Offer>) {
    let mut doubled = offers.clone();
    doubled.push(offers[1].clone());
    assert_eq!(
        Catalog::new(doubled).unwrap_err(),
        CatalogError::DuplicateOffer(OfferId(1))
    );
}

#[test]
fn empty_catalog_has_no_max_profit() {
    let catalog = Catalog::new(Vec::new()).unwrap();
    assert!(catalog.is_empty());
    assert_eq!(catalog.max_profit(), None);
}

#[rstest]
#[case::joined(r#""Sports, Books""#, 2)]
#[case::list(r#"["Sports", "Books", "Sports"]"#, 2)]
#[case::null("null", 0)]
#[case::blank(r#""""#, 0)]
fn client_preferences(#[case] preference: &str, #[case] expected: usize) {
    let json = format!(
        r#"{{"client_id": 4, "age": 30, "gender": "F", "income": 50000,
            "previous_purchases": 3, "preferred_category": {preference}, "budget": 1000}}"#
    );
    let client: Client = serde_json::from_str(&json).unwrap();
    assert_eq!(client.preferred_category.len(), expected);
}

#[test]
fn client_preference_may_be_absent() {
    let client: Client = serde_json::from_str(
        r#"{"id": 4, "age": 30, "gender": "F", "income": 50000, "previous_purchases": 3}"#,
    )
    .unwrap();
    assert!(client.preferred_category.is_empty());
    assert_eq!(client.budget, 0.0);
}
