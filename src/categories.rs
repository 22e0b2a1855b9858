use std::sync::OnceLock;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::StevioError;

const CATEGORIES_TOML: &str = include_str!("../assets/categories.toml");

/// Config value meaning "pick a category at random each round".
pub const RANDOM: &str = "random";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub words: Vec<String>,
}

impl Category {
    /// Name with the first letter capitalized, for headers.
    pub fn title(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[derive(Deserialize)]
struct CategoryTable {
    category: Vec<Category>,
}

pub fn load() -> Result<Vec<Category>, StevioError> {
    let table: CategoryTable = toml::from_str(CATEGORIES_TOML)?;
    Ok(table.category)
}

pub fn all() -> &'static [Category] {
    static CATEGORIES: OnceLock<Vec<Category>> = OnceLock::new();
    CATEGORIES.get_or_init(|| {
        load().unwrap_or_else(|err| {
            log::error!("{err}");
            Vec::new()
        })
    })
}

pub fn names() -> Vec<String> {
    all().iter().map(|c| c.name.clone()).collect()
}

pub fn find(name: &str) -> Result<&'static Category, StevioError> {
    all()
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| StevioError::UnknownCategory {
            name: name.to_string(),
            available: names(),
        })
}

/// Uniform pick over every category.
pub fn random_category<R: Rng + ?Sized>(rng: &mut R) -> Option<&'static Category> {
    all().choose(rng)
}

/// Resolves a configured category: a known name, or [`RANDOM`].
pub fn resolve<R: Rng + ?Sized>(
    name: &str,
    rng: &mut R,
) -> Result<&'static Category, StevioError> {
    if name.eq_ignore_ascii_case(RANDOM) {
        random_category(rng).ok_or_else(|| StevioError::UnknownCategory {
            name: name.to_string(),
            available: Vec::new(),
        })
    } else {
        find(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::HashSet;

    #[test]
    fn embedded_table_parses() {
        let categories = load().unwrap();
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["classic", "nature", "vintage", "coffee"]);
        assert!(categories.iter().all(|c| c.words.len() == 15));
    }

    #[test]
    fn words_are_already_normalized() {
        for category in all() {
            for word in &category.words {
                assert!(word.chars().all(|c| c.is_ascii_uppercase()), "{word}");
            }
        }
    }

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(find("Coffee").unwrap().name, "coffee");
        assert!(matches!(
            find("sports"),
            Err(StevioError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn random_category_reaches_every_category() {
        let mut rng = SmallRng::seed_from_u64(5);
        let seen: HashSet<&str> = (0..200)
            .filter_map(|_| random_category(&mut rng))
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(seen.len(), all().len());
    }

    #[test]
    fn resolve_handles_random_and_names() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(resolve(RANDOM, &mut rng).is_ok());
        assert!(resolve("RANDOM", &mut rng).is_ok());
        assert_eq!(resolve("nature", &mut rng).unwrap().name, "nature");
        assert!(resolve("nope", &mut rng).is_err());
    }

    #[test]
    fn title_capitalizes() {
        let category = Category {
            name: "vintage".to_string(),
            words: Vec::new(),
        };
        assert_eq!(category.title(), "Vintage");
    }
}
