//! Two-pass category/law reconciliation
//!
//! The extraction model returns sections in arbitrary order, so a law may
//! reference a category that appears before or after it in the reply. Pass 1
//! therefore collects every category first; pass 2 resolves each law against
//! the completed category index.

use crate::types::section::{CategoryIndex, LawRecord, RawSection};

/// Link law-depth sections to their parent categories.
///
/// Pass 1 records every single-segment section number into a `CategoryIndex`
/// (last write wins on duplicates). Pass 2 resolves each section with two or
/// more segments to its top-level category, defaulting the category title to
/// `""` when the category was never declared. Sections with the `"unknown"`
/// sentinel or zero segments carry no retrievable meaning and are dropped.
pub fn reconcile(sections: &[RawSection]) -> Vec<LawRecord> {
    let categories = CategoryIndex::from_sections(sections);

    sections
        .iter()
        .filter(|section| section.is_law())
        .map(|section| {
            let category = section.top_level().to_string();
            let category_title = categories.title_for(&category).to_string();
            let law_path = format!("{} > {}", category_title, section.section_number);
            LawRecord {
                section_number: section.section_number.clone(),
                title: section.title.clone(),
                content: section.content.clone(),
                category,
                category_title,
                law_path,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(number: &str, title: &str, content: &str) -> RawSection {
        RawSection {
            section_number: number.to_string(),
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn category_and_law_produce_one_linked_record() {
        let sections = vec![
            section("1", "Peace", "Top-level category."),
            section("1.1", "Dispute Resolution", "The law requires..."),
        ];
        let laws = reconcile(&sections);
        assert_eq!(laws.len(), 1);
        assert_eq!(laws[0].section_number, "1.1");
        assert_eq!(laws[0].category, "1");
        assert_eq!(laws[0].category_title, "Peace");
        assert_eq!(laws[0].law_path, "Peace > 1.1");
    }

    #[test]
    fn categories_are_never_emitted_as_laws() {
        let sections = vec![
            section("1", "Peace", "c"),
            section("2", "Crown", "c"),
            section("2.4", "Succession", "c"),
        ];
        let laws = reconcile(&sections);
        assert_eq!(laws.len(), 1);
        assert!(laws.iter().all(|law| law.section_number != "1"));
        assert!(laws.iter().all(|law| law.section_number != "2"));
    }

    #[test]
    fn law_before_its_category_still_resolves() {
        // Model output order cannot be assumed
        let sections = vec![
            section("3.2", "Theft", "Stealing from a sept..."),
            section("3", "Faith", "c"),
        ];
        let laws = reconcile(&sections);
        assert_eq!(laws[0].category_title, "Faith");
        assert_eq!(laws[0].law_path, "Faith > 3.2");
    }

    #[test]
    fn undeclared_category_defaults_to_empty_title() {
        let laws = reconcile(&[section("9.1", "Orphan Law", "c")]);
        assert_eq!(laws[0].category_title, "");
        assert_eq!(laws[0].law_path, " > 9.1");
    }

    #[test]
    fn unknown_and_empty_numbers_are_dropped() {
        let sections = vec![
            section("unknown", "Broken", "c"),
            section("", "Empty", "c"),
            section("1.1", "Kept", "c"),
        ];
        let laws = reconcile(&sections);
        assert_eq!(laws.len(), 1);
        assert_eq!(laws[0].title, "Kept");
    }

    #[test]
    fn deep_numbers_collapse_to_top_level_category() {
        let sections = vec![
            section("1", "Peace", "c"),
            section("1.1.1", "Sub-sub law", "c"),
        ];
        let laws = reconcile(&sections);
        assert_eq!(laws[0].category, "1");
        assert_eq!(laws[0].law_path, "Peace > 1.1.1");
    }
}
