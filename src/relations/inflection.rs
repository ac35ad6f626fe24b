//! Name inflection for table-derived identifiers.
//!
//! Number inflection is a small fixed rule set so generated names never
//! depend on locale or dictionary data. Case conversion is delegated to the
//! `inflector` crate.

use inflector::Inflector;

/// Irregular nouns as (singular, plural).
static IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("ox", "oxen"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
];

/// Stem endings whose plural takes "es". Any other "-es" word only lost an "s"
/// (`profiles`, `courses`, `sizes`).
static SIBILANT_STEMS: &[&str] = &["ss", "us", "x", "ch", "sh"];

/// Singularize a word.
///
/// # Examples
/// ```ignore
/// assert_eq!(singularize("users"), "user");
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("people"), "person");
/// ```
pub fn singularize(word: &str) -> String {
    let lower = word.to_lowercase();
    if let Some((singular, _)) = IRREGULAR_PLURALS.iter().find(|(_, p)| *p == lower) {
        return singular.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        format!("{stem}y")
    } else if let Some(stem) = word
        .strip_suffix("es")
        .filter(|stem| SIBILANT_STEMS.iter().any(|s| stem.ends_with(s)))
    {
        stem.to_string()
    } else if let Some(stem) = word.strip_suffix('s') {
        stem.to_string()
    } else {
        word.to_string()
    }
}

/// Pluralize a word.
///
/// # Examples
/// ```ignore
/// assert_eq!(pluralize("post"), "posts");
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("box"), "boxes");
/// ```
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_lowercase();
    if let Some((_, plural)) = IRREGULAR_PLURALS.iter().find(|(s, _)| *s == lower) {
        return plural.to_string();
    }

    if let Some(stem) = word.strip_suffix('y') {
        format!("{stem}ies")
    } else if ["s", "x", "ch", "sh"].iter().any(|s| word.ends_with(s)) {
        format!("{word}es")
    } else {
        format!("{word}s")
    }
}

/// Accessor name for a table: singular, camel case (`user_profiles` → `userProfile`).
pub fn method_name(table: &str) -> String {
    singularize(table).to_camel_case()
}

/// Entity name for a table: singular, Pascal case (`user_profiles` → `UserProfile`).
pub fn entity_name(table: &str) -> String {
    singularize(table).to_pascal_case()
}
