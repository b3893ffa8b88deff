//! Account display formatting
//!
//! Formats the chart of accounts for terminal output in tree and detail views.

use crate::config::Settings;
use crate::forest::AccountForest;
use crate::services::ledger::AccountSummary;

/// Format the whole chart as an indented tree with aligned balances
pub fn format_account_tree(forest: &AccountForest, settings: &Settings) -> String {
    if forest.is_empty() {
        return "No accounts found.".to_string();
    }

    let rows: Vec<(String, String)> = forest
        .accounts()
        .map(|(level, record)| {
            (
                format!("{}{} {}", "  ".repeat(level), record.number, record.label),
                record.balance.format_with_symbol(&settings.currency_symbol),
            )
        })
        .collect();

    let name_width = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(7)
        .max(7);
    let balance_width = rows
        .iter()
        .map(|(_, balance)| balance.chars().count())
        .max()
        .unwrap_or(7)
        .max(7);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>balance_width$}\n",
        "Account",
        "Balance",
        name_width = name_width,
        balance_width = balance_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->balance_width$}\n",
        "",
        "",
        name_width = name_width,
        balance_width = balance_width,
    ));

    for (name, balance) in rows {
        output.push_str(&format!(
            "{:<name_width$}  {:>balance_width$}\n",
            name,
            balance,
            name_width = name_width,
            balance_width = balance_width,
        ));
    }

    output
}

/// Format a single account's details
pub fn format_account_details(summary: &AccountSummary, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account:   {}\n", summary.number));
    output.push_str(&format!("Label:     {}\n", summary.label));
    output.push_str(&format!(
        "Balance:   {}\n",
        summary.balance.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!("Level:     {}\n", summary.level));
    output.push_str(&format!("Postings:  {}\n", summary.posting_count));

    if summary.children.is_empty() {
        output.push_str("Children:  (none)\n");
    } else {
        let children: Vec<String> = summary.children.iter().map(|c| c.to_string()).collect();
        output.push_str(&format!("Children:  {}\n", children.join(", ")));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountNumber, AccountRecord, Money};

    #[test]
    fn test_empty_tree() {
        let forest = AccountForest::new();
        assert_eq!(
            format_account_tree(&forest, &Settings::default()),
            "No accounts found."
        );
    }

    #[test]
    fn test_tree_alignment() {
        let mut forest = AccountForest::new();
        forest
            .add_account(AccountRecord::new(1u64, "Assets", Money::from_cents(12345)), None)
            .unwrap();
        forest
            .add_account(
                AccountRecord::new(11u64, "Cash", Money::from_cents(-500)),
                Some(AccountNumber::new(1)),
            )
            .unwrap();

        let output = format_account_tree(&forest, &Settings::default());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Account    Balance");
        assert_eq!(lines[2], "1 Assets   $123.45");
        assert_eq!(lines[3], "  11 Cash   -$5.00");
    }

    #[test]
    fn test_details() {
        let summary = AccountSummary {
            number: AccountNumber::new(1100),
            label: "Cash".into(),
            balance: Money::from_cents(2000),
            level: 1,
            children: vec![AccountNumber::new(1110), AccountNumber::new(1120)],
            posting_count: 3,
        };
        let output = format_account_details(&summary, &Settings::default());
        assert!(output.contains("Balance:   $20.00"));
        assert!(output.contains("Children:  1110, 1120"));
    }
}
