use crate::model::{Brand, Model};

/// Items that carry a free-text category the type filter can match against.
pub trait Categorized {
    fn category(&self) -> Option<&str> {
        None
    }
}

impl Categorized for Model {
    fn category(&self) -> Option<&str> {
        Some(&self.kind)
    }
}

impl Categorized for Brand {}

pub struct TypeOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const TYPE_OPTIONS: &[TypeOption] = &[
    TypeOption {
        value: "",
        label: "All Types",
    },
    TypeOption {
        value: "electric",
        label: "Electric",
    },
    TypeOption {
        value: "acoustic",
        label: "Acoustic",
    },
    TypeOption {
        value: "bass",
        label: "Bass",
    },
    TypeOption {
        value: "classical",
        label: "Classical",
    },
];

/// Client-side category filter.
///
/// Matching is case-insensitive substring containment, so a compound label
/// like "Acoustic-Electric" passes both the "acoustic" and "electric" filters.
/// An empty selection, or "all", lets everything through.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypeFilter {
    needle: String,
}

impl TypeFilter {
    pub fn new(selection: &str) -> Self {
        let needle = selection.trim().to_lowercase();
        if needle == "all" {
            Self::all()
        } else {
            Self { needle }
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_all(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn value(&self) -> &str {
        &self.needle
    }

    pub fn label(&self) -> &str {
        TYPE_OPTIONS
            .iter()
            .find(|option| option.value == self.needle)
            .map_or(self.needle.as_str(), |option| option.label)
    }

    pub fn matches<T: Categorized>(&self, item: &T) -> bool {
        if self.is_all() {
            return true;
        }
        item.category()
            .is_some_and(|category| category.to_lowercase().contains(&self.needle))
    }

    pub fn apply<'a, T: Categorized>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn model(id: usize, kind: &str) -> Model {
        Model {
            id: id.to_string(),
            name: format!("Model {id}"),
            kind: kind.to_string(),
            price: None,
            image: None,
            description: None,
            specs: None,
            musicians: Vec::new(),
        }
    }

    #[test]
    fn compound_types_match_either_part() {
        let hybrid = model(1, "Acoustic-Electric");
        assert!(TypeFilter::new("electric").matches(&hybrid));
        assert!(TypeFilter::new("Acoustic").matches(&hybrid));
        assert!(!TypeFilter::new("bass").matches(&hybrid));
    }

    #[test]
    fn empty_and_all_select_everything() {
        let models = vec![model(1, "Electric"), model(2, ""), model(3, "Bass")];
        assert_eq!(TypeFilter::new("").apply(&models).len(), 3);
        assert_eq!(TypeFilter::new("All").apply(&models).len(), 3);
    }

    #[test]
    fn brands_have_no_category() {
        let brand = Brand {
            id: "1".into(),
            name: "Fender".into(),
            image: None,
        };
        assert!(TypeFilter::all().matches(&brand));
        assert!(!TypeFilter::new("electric").matches(&brand));
    }

    #[test]
    fn labels_come_from_the_option_list() {
        assert_eq!(TypeFilter::new("bass").label(), "Bass");
        assert_eq!(TypeFilter::all().label(), "All Types");
        assert_eq!(TypeFilter::new("baritone").label(), "baritone");
    }

    proptest! {
        #[test]
        fn filtering_is_idempotent(
            kinds in prop::collection::vec("(Electric|Acoustic|Bass|Classical|Acoustic-Electric|Electric/Bass)?", 0..40),
            selection in "(electric|acoustic|bass|classical|ELECTRIC|)",
        ) {
            let models: Vec<Model> = kinds.iter().enumerate().map(|(i, k)| model(i, k)).collect();
            let filter = TypeFilter::new(&selection);
            let once: Vec<Model> = filter.apply(&models).into_iter().cloned().collect();
            let twice: Vec<Model> = filter.apply(&once).into_iter().cloned().collect();
            prop_assert_eq!(once, twice);
        }
    }
}
