use super::{Client, Offer};

/// The number of features a scoring model consumes
pub const FEATURE_COUNT: usize = 10;

/// Feature names, in the order of [`FeatureVector::to_array`]
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "income",
    "previous_purchases",
    "price",
    "days_since_purchase",
    "age_group",
    "income_bracket",
    "loyal_client",
    "quantity",
    "cross_sell_count",
];

const LOYALTY_THRESHOLD: u32 = 10;

/// The model input for one (client, offer) pair.
///
/// Features that only exist for past transactions (recency, quantity,
/// cross-sells) are zero, because a prospective offer has no history yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    /// Client age
    pub age: f64,
    /// Client income
    pub income: f64,
    /// Client purchase count
    pub previous_purchases: f64,
    /// Offer price
    pub price: f64,
    /// Days since the purchase; zero for a prospective offer
    pub days_since_purchase: f64,
    /// Age bucket, see [`age_group`]
    pub age_group: f64,
    /// Income bucket, see [`income_bracket`]
    pub income_bracket: f64,
    /// 1 for clients with at least ten purchases, else 0
    pub loyal_client: f64,
    /// Units purchased; zero for a prospective offer
    pub quantity: f64,
    /// Cross-sold items; zero for a prospective offer
    pub cross_sell_count: f64,
}

impl FeatureVector {
    /// Build the cold-context features for offering `offer` to `client`
    pub fn cold(client: &Client, offer: &Offer) -> Self {
        Self {
            age: client.age as f64,
            income: client.income,
            previous_purchases: client.previous_purchases as f64,
            price: offer.price,
            days_since_purchase: 0.0,
            age_group: age_group(client.age) as f64,
            income_bracket: income_bracket(client.income) as f64,
            loyal_client: if client.previous_purchases >= LOYALTY_THRESHOLD {
                1.0
            } else {
                0.0
            },
            quantity: 0.0,
            cross_sell_count: 0.0,
        }
    }

    /// The features as a dense array, ordered as [`FEATURE_NAMES`]
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age,
            self.income,
            self.previous_purchases,
            self.price,
            self.days_since_purchase,
            self.age_group,
            self.income_bracket,
            self.loyal_client,
            self.quantity,
            self.cross_sell_count,
        ]
    }
}

/// 0 under 30, 1 under 50, otherwise 2
pub fn age_group(age: u32) -> u8 {
    if age < 30 {
        0
    } else if age < 50 {
        1
    } else {
        2
    }
}

/// 0 under 40k, 1 under 80k, otherwise 2
pub fn income_bracket(income: f64) -> u8 {
    if income < 40_000.0 {
        0
    } else if income < 80_000.0 {
        1
    } else {
        2
    }
}
