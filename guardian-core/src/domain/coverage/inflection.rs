// guardian-core/src/domain/coverage/inflection.rs
//
// Parent table inference for foreign keys (user_id -> users).
//
// Limitation: English pluralization is only approximated. Irregular forms
// come from a small lookup table, everything else goes through suffix rules
// and finally "append s". The result is a best-effort placeholder that the
// user must verify before running `dbt test`.

const KEY_WORDS: [&str; 5] = ["id", "pk", "sk", "key", "uuid"];

const NON_ENTITY_WORDS: [&str; 13] = [
    "external",
    "source",
    "parent",
    "foreign",
    "primary",
    "surrogate",
    "natural",
    "row",
    "unique",
    "legacy",
    "original",
    "global",
    "local",
];

const IRREGULAR_PLURALS: [(&str, &str); 18] = [
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
    ("criterion", "criteria"),
    ("analysis", "analyses"),
    ("datum", "data"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("shelf", "shelves"),
];

const UNCOUNTABLE: [&str; 9] = [
    "data",
    "metadata",
    "information",
    "equipment",
    "news",
    "series",
    "species",
    "feedback",
    "staff",
];

/// Guess the parent table a foreign key column points to.
///
/// Returns `None` when the column is not an `<entity>_id` column, or when the
/// prefix is a key-like word (`pk_id`) or a qualifier that names no entity
/// (`external_id`, `parent_id`).
pub fn infer_parent_table(column_name: &str) -> Option<String> {
    let lower = column_name.to_lowercase();
    let prefix = lower.strip_suffix("_id")?;
    if prefix.is_empty() || KEY_WORDS.contains(&prefix) || NON_ENTITY_WORDS.contains(&prefix) {
        return None;
    }

    // billing_address_id -> billing_addresses
    let (head, entity) = match prefix.rsplit_once('_') {
        Some((head, entity)) => (Some(head), entity),
        None => (None, prefix),
    };
    if entity.is_empty() || KEY_WORDS.contains(&entity) {
        return None;
    }

    let plural = pluralize(entity);
    Some(match head {
        Some(head) => format!("{}_{}", head, plural),
        None => plural,
    })
}

pub fn pluralize(word: &str) -> String {
    if let Some((_, plural)) = IRREGULAR_PLURALS.iter().find(|(singular, _)| *singular == word) {
        return plural.to_string();
    }
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }

    if ["ss", "x", "z", "ch", "sh", "us"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return format!("{}es", word);
    }
    // Trailing single 's': assume the word is already plural (users_id)
    if word.ends_with('s') {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix('y')
        && stem
            .chars()
            .last()
            .is_some_and(|c| !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
    {
        return format!("{}ies", stem);
    }

    format!("{}s", word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_common_foreign_keys() {
        assert_eq!(infer_parent_table("user_id").as_deref(), Some("users"));
        assert_eq!(
            infer_parent_table("customer_id").as_deref(),
            Some("customers")
        );
        assert_eq!(infer_parent_table("order_id").as_deref(), Some("orders"));
        assert_eq!(
            infer_parent_table("product_id").as_deref(),
            Some("products")
        );
        assert_eq!(infer_parent_table("USER_ID").as_deref(), Some("users"));
    }

    #[test]
    fn test_infer_rejects_non_foreign_keys() {
        assert_eq!(infer_parent_table("id"), None);
        assert_eq!(infer_parent_table("email"), None);
        assert_eq!(infer_parent_table("status"), None);
        assert_eq!(infer_parent_table("_id"), None);
        assert_eq!(infer_parent_table("pk_id"), None);
        assert_eq!(infer_parent_table("external_id"), None);
        assert_eq!(infer_parent_table("parent_id"), None);
    }

    #[test]
    fn test_infer_compound_prefix() {
        assert_eq!(
            infer_parent_table("billing_address_id").as_deref(),
            Some("billing_addresses")
        );
        assert_eq!(
            infer_parent_table("product_category_id").as_deref(),
            Some("product_categories")
        );
        assert_eq!(infer_parent_table("order_key_id"), None);
    }

    #[test]
    fn test_pluralize_rules() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("child"), "children");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("branch"), "branches");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("users"), "users");
        assert_eq!(pluralize("metadata"), "metadata");
        assert_eq!(pluralize("store"), "stores");
    }
}
