use super::{Category, ClientId, Gender};

/// A client for whom offers are selected.
///
/// Clients are transient: constructed per request and never mutated by the
/// engine. The meaning of `budget` depends on the mode. Single-offer selection
/// uses it as the client's own price ceiling, while campaign optimization
/// ignores it in favor of the shared campaign budget.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Client {
    /// The client's identifier, unique within a population
    #[cfg_attr(feature = "serde", serde(alias = "client_id"))]
    pub id: ClientId,
    /// Age in whole years
    pub age: u32,
    /// The client's gender label
    pub gender: Gender,
    /// Annual income
    pub income: f64,
    /// The number of purchases the client has made so far
    pub previous_purchases: u32,
    /// Categories the client restricts offers to; empty means no restriction
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferred_category: CategorySet,
    /// The client's own monetary ceiling
    #[cfg_attr(feature = "serde", serde(default))]
    pub budget: f64,
}

/// An ordered, de-duplicated set of category labels.
///
/// Source rows store preferences as a single comma-separated string, so the
/// set deserializes from either a list of labels or such a string. Blank
/// entries are dropped, which makes `""` and `null` both mean "no preference".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Option<RawCategories>", into = "Vec<Category>")
)]
pub struct CategorySet(Vec<Category>);

impl CategorySet {
    /// Parse a comma-separated list of labels
    pub fn parse(joined: &str) -> Self {
        joined.split(',').map(str::to_owned).collect()
    }

    /// Whether the set imposes no restriction
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the label is a member of the set
    pub fn contains(&self, category: &Category) -> bool {
        self.0.binary_search(category).is_ok()
    }

    /// Iterate over the labels in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.0.iter()
    }

    /// The number of distinct labels
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<String> for CategorySet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        iter.into_iter()
            .filter_map(|label| {
                let trimmed = label.trim();
                (!trimmed.is_empty()).then(|| Category::from(trimmed))
            })
            .collect()
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut labels = iter.into_iter().collect::<Vec<_>>();
        labels.sort_unstable();
        labels.dedup();
        Self(labels)
    }
}

impl From<CategorySet> for Vec<Category> {
    fn from(value: CategorySet) -> Self {
        value.0
    }
}

/// The accepted input shapes for a category preference
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
pub enum RawCategories {
    /// A list of labels
    List(Vec<String>),
    /// A single comma-separated string of labels
    Joined(String),
}

#[cfg(feature = "serde")]
impl From<Option<RawCategories>> for CategorySet {
    fn from(value: Option<RawCategories>) -> Self {
        match value {
            None => Self::default(),
            Some(RawCategories::List(labels)) => labels.into_iter().collect(),
            Some(RawCategories::Joined(joined)) => Self::parse(&joined),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_joined() {
        let set = CategorySet::parse("Sports, Fashion,,  Books ");
        assert_eq!(set.len(), 3);
        assert!(set.contains(&"Fashion".into()));
        assert!(set.contains(&"Books".into()));
        assert!(!set.contains(&"Home".into()));
    }

    #[test]
    fn test_blank_is_empty() {
        assert!(CategorySet::parse("").is_empty());
        assert!(CategorySet::parse(" , ").is_empty());
    }

    #[test]
    fn test_dedup() {
        let set: CategorySet = ["Toys", "Home", "Toys"]
            .into_iter()
            .map(Category::from)
            .collect();
        assert_eq!(
            set.iter().map(Category::as_str).collect::<Vec<_>>(),
            vec!["Home", "Toys"]
        );
    }
}
