#![allow(dead_code)]

use moo_core::{
    models::{CategorySet, Client, FeatureVector, Offer, TargetGender},
    ports::ScoringModel,
};
use std::convert::Infallible;
use thiserror::Error;

/// A model computing the propensity from the features with a plain function
pub struct FnModel(pub fn(&FeatureVector) -> f64);

impl ScoringModel for FnModel {
    type Error = Infallible;

    fn predict_propensity(&self, features: &FeatureVector) -> Result<f64, Self::Error> {
        Ok((self.0)(features))
    }
}

/// A model that cannot score anything
pub struct Broken;

#[derive(Debug, Error)]
#[error("model is unavailable")]
pub struct Unavailable;

impl ScoringModel for Broken {
    type Error = Unavailable;

    fn predict_propensity(&self, _: &FeatureVector) -> Result<f64, Self::Error> {
        Err(Unavailable)
    }
}

pub fn client(id: u64, age: u32, gender: &str, budget: f64) -> Client {
    Client {
        id: id.into(),
        age,
        gender: gender.into(),
        income: 50_000.0,
        previous_purchases: 3,
        preferred_category: CategorySet::default(),
        budget,
    }
}

pub fn offer(id: u64, price: f64, category: &str, estimated_profit: f64) -> Offer {
    Offer {
        id: id.into(),
        name: format!("Offer {id}"),
        price,
        category: category.into(),
        target_gender: TargetGender::All,
        min_age: 18,
        max_age: 60,
        estimated_profit,
        brand: String::new(),
        min_income_required: 0.0,
        min_previous_purchases_required: 0,
    }
}
