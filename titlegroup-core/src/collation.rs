//! Locale-aware title ordering.
//!
//! Root-locale collation at tertiary strength, the same ordering
//! `localeCompare` gives: punctuation and symbols in collation order, then
//! digits compared one character at a time, then letters with accents and
//! case deciding only ties. Expansions such as `ß` (as `ss`) and `æ` (as
//! `ae`) sort next to their base letters.

use crate::error::{GroupingError, Result};
use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;

pub struct TitleCollator {
    collator: Collator,
}

impl TitleCollator {
    pub fn new() -> Result<Self> {
        let collator = Collator::try_new(&Default::default(), CollatorOptions::new())
            .map_err(|err| GroupingError::Collation(format!("{err:?}")))?;
        Ok(Self { collator })
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }

    /// Stable sort; titles that collate equal keep their input order
    pub fn sort_titles(&self, titles: &mut [&str]) {
        titles.sort_by(|a, b| self.collator.compare(a, b));
    }
}

/// One-off comparison with a fresh root collator
pub fn compare(a: &str, b: &str) -> Result<Ordering> {
    Ok(TitleCollator::new()?.compare(a, b))
}

/// One-off sort with a fresh root collator
pub fn sort_titles(titles: &mut [&str]) -> Result<()> {
    TitleCollator::new()?.sort_titles(titles);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(input: &[&'static str]) -> Vec<&'static str> {
        let mut titles = input.to_vec();
        sort_titles(&mut titles).unwrap();
        titles
    }

    fn cmp(a: &str, b: &str) -> Ordering {
        compare(a, b).unwrap()
    }

    #[test]
    fn letters_ignore_case_at_first_level() {
        assert_eq!(sorted(&["banana", "Apple", "cherry"]), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn lowercase_sorts_before_uppercase_on_tie() {
        assert_eq!(cmp("apple", "Apple"), Ordering::Less);
        assert_eq!(cmp("Apple", "apple"), Ordering::Greater);
    }

    #[test]
    fn digits_compare_character_by_character() {
        assert_eq!(
            sorted(&["Red Shoes Size 9", "Red Shoes Size 10", "Blue Hat"]),
            vec!["Blue Hat", "Red Shoes Size 10", "Red Shoes Size 9"]
        );
    }

    #[test]
    fn digits_sort_before_letters_and_punctuation_before_digits() {
        assert_eq!(sorted(&["b", "2", "-"]), vec!["-", "2", "b"]);
    }

    #[test]
    fn punctuation_follows_collation_order_not_code_points() {
        assert_eq!(
            sorted(&["H&M Tee", "H-M Tee", "H M Tee"]),
            vec!["H M Tee", "H-M Tee", "H&M Tee"]
        );
        assert_eq!(sorted(&["Men's Tee", "Men-s Tee"]), vec!["Men-s Tee", "Men's Tee"]);
        assert_eq!(sorted(&["Tee #1", "Tee (New)"]), vec!["Tee (New)", "Tee #1"]);
    }

    #[test]
    fn expansions_sort_beside_their_base_letters() {
        assert_eq!(
            sorted(&["Tee z", "Tee ß", "Tee ss", "Tee st"]),
            vec!["Tee ss", "Tee ß", "Tee st", "Tee z"]
        );
        assert_eq!(
            sorted(&["Tee b", "Tee æ", "Tee ae", "Tee af"]),
            vec!["Tee ae", "Tee æ", "Tee af", "Tee b"]
        );
        assert_eq!(sorted(&["Tee z", "Tee ø", "Tee p", "Tee o"]), vec!["Tee o", "Tee ø", "Tee p", "Tee z"]);
    }

    #[test]
    fn greek_follows_latin() {
        assert_eq!(sorted(&["Tee Ω", "Tee z"]), vec!["Tee z", "Tee Ω"]);
    }

    #[test]
    fn accents_only_break_ties() {
        assert_eq!(sorted(&["cote", "côte", "cotes"]), vec!["cote", "côte", "cotes"]);
        assert_eq!(cmp("éclair", "ecole"), Ordering::Less);
    }

    #[test]
    fn shorter_prefix_sorts_first() {
        assert_eq!(sorted(&["cats", "cat", "dog"]), vec!["cat", "cats", "dog"]);
    }

    #[test]
    fn whitespace_sorts_before_letters() {
        assert_eq!(cmp("Red Shoes", "RedShoes"), Ordering::Less);
    }

    #[test]
    fn equal_titles_keep_input_order() {
        assert_eq!(cmp("Blue Hat", "Blue Hat"), Ordering::Equal);
        let mut titles = vec!["b", "a", "b"];
        TitleCollator::new().unwrap().sort_titles(&mut titles);
        assert_eq!(titles, vec!["a", "b", "b"]);
    }
}
