//! Free-text transaction messages.
//!
//! Messages follow one fixed grammar:
//!
//! ```text
//! <kind> <amount> <description> [#category]
//! ```
//!
//! - `kind` is `expense` or `income` (also `gasto` / `ganho`), any case.
//! - `amount` is digits with an optional `.` or `,` decimal part.
//! - `description` runs up to the `#` marker and is trimmed; it may be empty.
//! - `category` is one or more word characters after `#`.
//!
//! Anything after a successful match is ignored. Anything that does not match
//! yields `None`: the parser never guesses.

use std::sync::LazyLock;

use regex::Regex;

use crate::TransactionKind;

static MESSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(expense|income|gasto|ganho)\s+(\d+(?:[.,]\d+)?)\s+([^#]*)(?:#(\w+))?")
        .expect("invalid message regex")
});

/// Structured content of a message, before anything is persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedIntent {
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    pub category: Option<String>,
}

fn kind_from_tag(tag: &str) -> Option<TransactionKind> {
    match tag.to_lowercase().as_str() {
        "expense" | "gasto" => Some(TransactionKind::Expense),
        "income" | "ganho" => Some(TransactionKind::Income),
        _ => None,
    }
}

/// Parses a message into a [`ParsedIntent`].
///
/// Returns `None` when the message does not follow the grammar.
pub fn parse(text: &str) -> Option<ParsedIntent> {
    let captures = MESSAGE.captures(text.trim())?;

    let kind = kind_from_tag(captures.get(1)?.as_str())?;
    let amount: f64 = captures.get(2)?.as_str().replace(',', ".").parse().ok()?;
    if !amount.is_finite() {
        return None;
    }
    let description = captures
        .get(3)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    let category = captures.get(4).map(|m| m.as_str().to_string());

    Some(ParsedIntent {
        kind,
        amount,
        description,
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_with_category() {
        let parsed = parse("expense 50 lunch #food").unwrap();
        assert_eq!(
            parsed,
            ParsedIntent {
                kind: TransactionKind::Expense,
                amount: 50.0,
                description: "lunch".to_string(),
                category: Some("food".to_string()),
            }
        );
    }

    #[test]
    fn income_with_comma_decimal() {
        let parsed = parse("income 120,50 freelance").unwrap();
        assert_eq!(parsed.kind, TransactionKind::Income);
        assert_eq!(parsed.amount, 120.5);
        assert_eq!(parsed.description, "freelance");
        assert_eq!(parsed.category, None);
    }

    #[test]
    fn dot_decimal() {
        let parsed = parse("expense 9.99 book").unwrap();
        assert_eq!(parsed.amount, 9.99);
    }

    #[test]
    fn kind_is_case_insensitive() {
        let parsed = parse("EXPENSE 10 coffee").unwrap();
        assert_eq!(parsed.kind, TransactionKind::Expense);
        let parsed = parse("Income 10 gift").unwrap();
        assert_eq!(parsed.kind, TransactionKind::Income);
    }

    #[test]
    fn source_keywords_are_accepted() {
        let parsed = parse("gasto 50 almoco #lanche").unwrap();
        assert_eq!(parsed.kind, TransactionKind::Expense);
        assert_eq!(parsed.description, "almoco");
        assert_eq!(parsed.category.as_deref(), Some("lanche"));
        let parsed = parse("GANHO 1000 salario").unwrap();
        assert_eq!(parsed.kind, TransactionKind::Income);
    }

    #[test]
    fn category_keeps_case() {
        let parsed = parse("expense 5 snack #Food").unwrap();
        assert_eq!(parsed.category.as_deref(), Some("Food"));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let parsed = parse("   expense   12   taxi home   #travel  ").unwrap();
        assert_eq!(parsed.amount, 12.0);
        assert_eq!(parsed.description, "taxi home");
        assert_eq!(parsed.category.as_deref(), Some("travel"));
    }

    #[test]
    fn description_may_be_empty_before_category() {
        let parsed = parse("expense 5 #food").unwrap();
        assert_eq!(parsed.description, "");
        assert_eq!(parsed.category.as_deref(), Some("food"));
    }

    #[test]
    fn trailing_content_after_category_is_ignored() {
        let parsed = parse("expense 5 lunch #food and more #drinks").unwrap();
        assert_eq!(parsed.description, "lunch");
        assert_eq!(parsed.category.as_deref(), Some("food"));
    }

    #[test]
    fn hash_without_word_means_no_category() {
        let parsed = parse("expense 5 lunch # food").unwrap();
        assert_eq!(parsed.description, "lunch");
        assert_eq!(parsed.category, None);
    }

    #[test]
    fn zero_amount_is_accepted() {
        let parsed = parse("expense 0 nothing").unwrap();
        assert_eq!(parsed.amount, 0.0);
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert_eq!(parse("expense -5 refund"), None);
    }

    #[test]
    fn malformed_amounts_are_rejected() {
        assert_eq!(parse("expense abc lunch"), None);
        assert_eq!(parse("expense 1e5 lunch"), None);
        assert_eq!(parse("expense 1,000.50 rent"), None);
        assert_eq!(parse("expense 50. lunch"), None);
        assert_eq!(parse("expense .5 lunch"), None);
    }

    #[test]
    fn unknown_or_missing_kind_is_rejected() {
        assert_eq!(parse("refund 5 amazon"), None);
        assert_eq!(parse("50 lunch"), None);
        assert_eq!(parse("expenses 50 lunch"), None);
        assert_eq!(parse("my expense 50 lunch"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn missing_amount_or_separator_is_rejected() {
        assert_eq!(parse("expense lunch"), None);
        assert_eq!(parse("expense50 lunch"), None);
        assert_eq!(parse("expense 50"), None);
    }

    #[test]
    fn overflowing_amount_is_rejected() {
        let huge = format!("expense {} lunch", "9".repeat(400));
        assert_eq!(parse(&huge), None);
    }
}
