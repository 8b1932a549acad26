//! Project field validation.
//!
//! Runs before any persistence so a rejected payload performs zero writes.
//! The validated view is a borrowed snapshot of the fields a create or a
//! merged update would store, decoupled from the database row types.

use crate::error::CoreError;

/// Borrowed view of the fields to validate.
pub struct ProjectFacts<'a> {
    pub title: &'a str,
    pub category: &'a str,
    pub location: &'a str,
    pub year: &'a str,
    pub area: &'a str,
    pub description: &'a str,
    pub tags: &'a [String],
    pub published: bool,
    pub has_after_image: bool,
}

/// Validate the required fields of a project.
///
/// All descriptive text fields must be non-blank, `tags` must contain at
/// least one non-blank entry, and a published project must carry an after
/// image. Returns a single [`CoreError::Validation`] naming every offending
/// field so the admin form can highlight them in one round trip.
pub fn validate_project(facts: &ProjectFacts) -> Result<(), CoreError> {
    let mut offending: Vec<&str> = Vec::new();

    for (name, value) in [
        ("title", facts.title),
        ("category", facts.category),
        ("location", facts.location),
        ("year", facts.year),
        ("area", facts.area),
        ("description", facts.description),
    ] {
        if value.trim().is_empty() {
            offending.push(name);
        }
    }

    if facts.tags.iter().all(|tag| tag.trim().is_empty()) {
        offending.push("tags");
    }

    if facts.published && !facts.has_after_image {
        offending.push("after_image");
    }

    if offending.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "missing or invalid fields: {}",
            offending.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_facts(tags: &[String]) -> ProjectFacts<'_> {
        ProjectFacts {
            title: "Loft conversion",
            category: "residential",
            location: "Rotterdam",
            year: "2024",
            area: "120 m2",
            description: "Full refit of a warehouse loft.",
            tags,
            published: false,
            has_after_image: false,
        }
    }

    #[test]
    fn accepts_complete_draft() {
        let tags = vec!["interior".to_string()];
        assert!(validate_project(&valid_facts(&tags)).is_ok());
    }

    #[test]
    fn accepts_published_with_after_image() {
        let tags = vec!["interior".to_string()];
        let mut facts = valid_facts(&tags);
        facts.published = true;
        facts.has_after_image = true;
        assert!(validate_project(&facts).is_ok());
    }

    #[test]
    fn rejects_published_without_after_image() {
        let tags = vec!["interior".to_string()];
        let mut facts = valid_facts(&tags);
        facts.published = true;
        let err = validate_project(&facts).unwrap_err();
        assert!(err.to_string().contains("after_image"));
    }

    #[test]
    fn draft_without_after_image_is_fine() {
        let tags = vec!["interior".to_string()];
        assert!(validate_project(&valid_facts(&tags)).is_ok());
    }

    #[test]
    fn rejects_blank_title() {
        let tags = vec!["interior".to_string()];
        let mut facts = valid_facts(&tags);
        facts.title = "   ";
        let err = validate_project(&facts).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn rejects_empty_tags() {
        let tags: Vec<String> = Vec::new();
        let err = validate_project(&valid_facts(&tags)).unwrap_err();
        assert!(err.to_string().contains("tags"));
    }

    #[test]
    fn rejects_tags_of_only_whitespace() {
        let tags = vec!["  ".to_string(), String::new()];
        assert!(validate_project(&valid_facts(&tags)).is_err());
    }

    #[test]
    fn reports_every_offending_field_at_once() {
        let tags: Vec<String> = Vec::new();
        let mut facts = valid_facts(&tags);
        facts.title = "";
        facts.year = "";
        facts.published = true;
        let message = validate_project(&facts).unwrap_err().to_string();
        for field in ["title", "year", "tags", "after_image"] {
            assert!(message.contains(field), "missing {field} in: {message}");
        }
    }
}
