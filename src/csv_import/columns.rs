//! Maps variant bank-export column names to the semantic fields the importer
//! needs.

use csv::StringRecord;

/// Date header synonyms, in priority order.
const DATE_HEADERS: &[&str] = &["posting date", "transaction date", "date"];
/// Description header synonyms, in priority order.
const DESCRIPTION_HEADERS: &[&str] = &["description", "original description", "details"];
const MONEY_IN_HEADER: &str = "money in";
const MONEY_OUT_HEADER: &str = "money out";
const BALANCE_HEADER: &str = "balance";
const CATEGORY_HEADER: &str = "category";

/// The positions of the semantic columns within a CSV statement.
///
/// Built once per import from the header row and immutable afterwards. The
/// importer validates that `date` and at least one money column are present
/// before any row is processed.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    /// The column holding the transaction date.
    pub(crate) date: Option<usize>,
    /// The column holding the transaction description.
    pub(crate) description: Option<usize>,
    /// The column holding incoming amounts.
    pub(crate) money_in: Option<usize>,
    /// The column holding outgoing amounts.
    pub(crate) money_out: Option<usize>,
    /// The column holding the running account balance.
    pub(crate) balance: Option<usize>,
    /// The column holding a category label.
    pub(crate) category: Option<usize>,
}

/// Detect which columns hold each semantic field.
///
/// Header names are matched exactly, case-insensitively, with surrounding
/// whitespace trimmed. Synonyms are tried in priority order and the first
/// matching header wins. There is no fuzzy or partial matching.
pub(crate) fn detect_columns(headers: &StringRecord) -> ColumnMap {
    let lowered: Vec<String> = headers
        .iter()
        .map(|header| header.trim().to_lowercase())
        .collect();

    let find = |name: &str| lowered.iter().position(|header| header == name);
    let find_first = |names: &[&str]| names.iter().find_map(|name| find(name));

    ColumnMap {
        date: find_first(DATE_HEADERS),
        description: find_first(DESCRIPTION_HEADERS),
        money_in: find(MONEY_IN_HEADER),
        money_out: find(MONEY_OUT_HEADER),
        balance: find(BALANCE_HEADER),
        category: find(CATEGORY_HEADER),
    }
}

#[cfg(test)]
mod detect_columns_tests {
    use csv::StringRecord;

    use super::{ColumnMap, detect_columns};

    fn headers(names: &[&str]) -> StringRecord {
        StringRecord::from(names.to_vec())
    }

    #[test]
    fn detects_all_fields() {
        let record = headers(&[
            "Posting Date",
            "Description",
            "Money In",
            "Money Out",
            "Balance",
            "Category",
        ]);

        let want = ColumnMap {
            date: Some(0),
            description: Some(1),
            money_in: Some(2),
            money_out: Some(3),
            balance: Some(4),
            category: Some(5),
        };

        assert_eq!(detect_columns(&record), want);
    }

    #[test]
    fn matching_is_case_insensitive_and_trims_whitespace() {
        let record = headers(&[" Posting Date ", "MONEY IN", "money out"]);

        let got = detect_columns(&record);

        assert_eq!(got.date, Some(0));
        assert_eq!(got.money_in, Some(1));
        assert_eq!(got.money_out, Some(2));
    }

    #[test]
    fn date_synonyms_follow_priority_order() {
        // "posting date" outranks "date" even when "date" appears first.
        let record = headers(&["Date", "Posting Date", "Money In", "Money Out"]);

        assert_eq!(detect_columns(&record).date, Some(1));
    }

    #[test]
    fn falls_back_to_lower_priority_synonyms() {
        let record = headers(&["Transaction Date", "Details", "Money In", "Money Out"]);

        let got = detect_columns(&record);

        assert_eq!(got.date, Some(0));
        assert_eq!(got.description, Some(1));
    }

    #[test]
    fn does_not_match_partial_header_names() {
        let record = headers(&["Date of Transaction", "Money In Total"]);

        let got = detect_columns(&record);

        assert_eq!(got.date, None);
        assert_eq!(got.money_in, None);
    }

    #[test]
    fn missing_optional_columns_stay_unmapped() {
        let record = headers(&["Date", "Money In", "Money Out"]);

        let got = detect_columns(&record);

        assert_eq!(got.description, None);
        assert_eq!(got.balance, None);
        assert_eq!(got.category, None);
    }
}
