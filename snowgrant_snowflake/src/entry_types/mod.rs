mod grant_of;

pub use grant_of::GrantOf;

use serde::{Deserialize, Deserializer};

/// Strip one leading and one trailing double quote, if present.
///
/// Snowflake sometimes hands back identifiers still wrapped in their
/// quoting.
pub fn strip_quotes(name: &str) -> String {
    let name = name.strip_prefix('"').unwrap_or(name);
    name.strip_suffix('"').unwrap_or(name).to_owned()
}

/// Deserialize a nullable cell, treating `null` as an empty string.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a nullable identifier and strip its quotes.
pub(crate) fn strip_quotes_and_deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    null_as_empty(deserializer).map(|name| strip_quotes(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_name_is_unwrapped() {
        assert_eq!(strip_quotes(r#""alice""#), "alice");
    }

    #[test]
    fn bare_name_is_unchanged() {
        assert_eq!(strip_quotes("alice"), "alice");
    }

    #[test]
    fn only_one_quote_is_stripped_per_side() {
        assert_eq!(strip_quotes(r#"""odd"""#), r#""odd""#);
        assert_eq!(strip_quotes(r#""half"#), "half");
        assert_eq!(strip_quotes(""), "");
    }
}
