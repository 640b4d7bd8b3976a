//! Query engine: filtering, sorting, and aggregation over a snapshot.
//!
//! Every operation here is a total, side-effect-free function over its
//! input sequence. Nothing is mutated in place; each call produces a new
//! sequence, so views can be layered without touching the snapshot.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entry::{Category, LedgerEntry};
use crate::error::TallyError;

/// Composable predicate set for filtering entries.
///
/// Active predicates are combined by conjunction; `None` means "match
/// any". The date range is inclusive on both ends, and a range with only
/// one bound is unbounded on the missing side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// Case-insensitive substring match against the description
    pub search: Option<String>,

    /// Category equality
    pub category: Option<Category>,

    /// Settlement state (`Some(true)` = settled only)
    pub settled: Option<bool>,

    /// Earliest expense date, inclusive
    pub from: Option<NaiveDate>,

    /// Latest expense date, inclusive
    pub to: Option<NaiveDate>,
}

impl EntryFilter {
    /// Whether a single entry satisfies every active predicate.
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        if let Some(ref needle) = self.search {
            let haystack = entry.description.to_lowercase();
            if !haystack.contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if entry.category != category {
                return false;
            }
        }
        if let Some(settled) = self.settled {
            if entry.settled != settled {
                return false;
            }
        }
        if let Some(from) = self.from {
            if entry.expense_date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if entry.expense_date > to {
                return false;
            }
        }
        true
    }
}

/// Filter a sequence of entries, preserving input order.
pub fn filter_entries(entries: &[LedgerEntry], filter: &EntryFilter) -> Vec<LedgerEntry> {
    entries
        .iter()
        .filter(|entry| filter.matches(entry))
        .cloned()
        .collect()
}

/// Sort key for entry views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Date,
    Amount,
    Category,
}

impl FromStr for SortKey {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "amount" => Ok(SortKey::Amount),
            "category" => Ok(SortKey::Category),
            other => Err(TallyError::Validation(format!(
                "unknown sort key: {} (use date, amount, category)",
                other
            ))),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// Produce a new sequence ordered by the given key and direction.
///
/// The sort is stable: entries with equal keys keep their relative input
/// (snapshot) order in either direction. Category order is lexicographic
/// on the display label.
pub fn sort_entries(
    entries: &[LedgerEntry],
    key: SortKey,
    direction: SortDirection,
) -> Vec<LedgerEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Date => a.expense_date.cmp(&b.expense_date),
            SortKey::Amount => a.amount_cents.cmp(&b.amount_cents),
            SortKey::Category => a.category.label().cmp(b.category.label()),
        };
        // Reversing the comparator keeps ties Equal, so stability holds
        // in both directions.
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}

/// Total spend for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total_cents: i64,
}

/// Sum `amount_cents` per category across the input sequence.
///
/// Only categories present in the input appear; an empty input yields an
/// empty list. Ordered by descending total, ties broken by the category's
/// fixed declaration order.
pub fn aggregate_by_category(entries: &[LedgerEntry]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<Category, i64> = HashMap::new();
    for entry in entries {
        *totals.entry(entry.category).or_insert(0) += entry.amount_cents;
    }

    let mut result: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total_cents)| CategoryTotal {
            category,
            total_cents,
        })
        .collect();
    result.sort_by_key(|t| (std::cmp::Reverse(t.total_cents), t.category.ordinal()));
    result
}

/// Zero-padded `YYYY-MM` grouping key; lexicographic order on the key is
/// chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth(pub String);

impl YearMonth {
    fn from_date(date: &NaiveDate) -> Self {
        YearMonth(date.format("%Y-%m").to_string())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Total spend for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTotal {
    pub year_month: YearMonth,
    pub total_cents: i64,
}

/// Sum `amount_cents` per expense-date month across the input sequence,
/// ordered ascending chronologically. Empty input yields an empty list.
pub fn aggregate_by_month(entries: &[LedgerEntry]) -> Vec<MonthTotal> {
    let mut totals: HashMap<YearMonth, i64> = HashMap::new();
    for entry in entries {
        *totals
            .entry(YearMonth::from_date(&entry.expense_date))
            .or_insert(0) += entry.amount_cents;
    }

    let mut result: Vec<MonthTotal> = totals
        .into_iter()
        .map(|(year_month, total_cents)| MonthTotal {
            year_month,
            total_cents,
        })
        .collect();
    result.sort_by(|a, b| a.year_month.cmp(&b.year_month));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use crate::entry::NewEntry;
    use crate::party::Party;
    use crate::split::Split;

    fn entry(description: &str, cents: i64, date: (i32, u32, u32), category: Category) -> LedgerEntry {
        NewEntry::new(
            Party::A,
            Party::A,
            description,
            cents,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            category,
            Split::Even,
        )
        .into_entry(
            Uuid::new_v4(),
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn sample() -> Vec<LedgerEntry> {
        vec![
            entry("Weekly groceries", 8200, (2024, 6, 3), Category::Food),
            entry("Electric bill", 6100, (2024, 5, 28), Category::GasElectric),
            entry("Pizza night", 3400, (2024, 6, 7), Category::Food),
            entry("Router upgrade", 6100, (2024, 4, 12), Category::WiFi),
        ]
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let entries = sample();
        let filtered = filter_entries(&entries, &EntryFilter::default());
        assert_eq!(filtered, entries);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let entries = sample();
        let filter = EntryFilter {
            search: Some("GROCER".to_string()),
            ..EntryFilter::default()
        };
        let filtered = filter_entries(&entries, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].description, "Weekly groceries");
    }

    #[test]
    fn test_category_and_date_range_conjunction() {
        let entries = sample();
        let filter = EntryFilter {
            category: Some(Category::Food),
            from: Some(NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()),
            ..EntryFilter::default()
        };
        let filtered = filter_entries(&entries, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].description, "Pizza night");
    }

    #[test]
    fn test_date_bounds_inclusive() {
        let entries = sample();
        let filter = EntryFilter {
            from: Some(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()),
            to: Some(NaiveDate::from_ymd_opt(2024, 6, 7).unwrap()),
            ..EntryFilter::default()
        };
        assert_eq!(filter_entries(&entries, &filter).len(), 2);
    }

    #[test]
    fn test_sequential_filters_compose() {
        let entries = sample();
        let by_category = EntryFilter {
            category: Some(Category::Food),
            ..EntryFilter::default()
        };
        let by_search = EntryFilter {
            search: Some("pizza".to_string()),
            ..EntryFilter::default()
        };
        let combined = EntryFilter {
            category: Some(Category::Food),
            search: Some("pizza".to_string()),
            ..EntryFilter::default()
        };

        let chained = filter_entries(&filter_entries(&entries, &by_category), &by_search);
        assert_eq!(chained, filter_entries(&entries, &combined));
    }

    #[test]
    fn test_sort_by_date_ascending() {
        let sorted = sort_entries(&sample(), SortKey::Date, SortDirection::Ascending);
        let dates: Vec<_> = sorted.iter().map(|e| e.expense_date).collect();
        let mut expected = dates.clone();
        expected.sort();
        assert_eq!(dates, expected);
    }

    #[test]
    fn test_sort_is_stable_on_amount_ties() {
        let entries = sample();
        // Two entries share amount 6100; input order must survive the sort.
        let sorted = sort_entries(&entries, SortKey::Amount, SortDirection::Descending);
        let tied: Vec<_> = sorted
            .iter()
            .filter(|e| e.amount_cents == 6100)
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(tied, vec!["Electric bill", "Router upgrade"]);

        let sorted_asc = sort_entries(&entries, SortKey::Amount, SortDirection::Ascending);
        let tied_asc: Vec<_> = sorted_asc
            .iter()
            .filter(|e| e.amount_cents == 6100)
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(tied_asc, vec!["Electric bill", "Router upgrade"]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let entries = sample();
        let before = entries.clone();
        let _ = sort_entries(&entries, SortKey::Category, SortDirection::Ascending);
        assert_eq!(entries, before);
    }

    #[test]
    fn test_aggregate_by_category_totals_and_order() {
        let totals = aggregate_by_category(&sample());
        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].category, Category::Food);
        assert_eq!(totals[0].total_cents, 11600);
        // 6100 tie: GasElectric declares before WiFi
        assert_eq!(totals[1].category, Category::GasElectric);
        assert_eq!(totals[2].category, Category::WiFi);
    }

    #[test]
    fn test_aggregate_by_category_round_trip() {
        let entries = sample();
        let sum: i64 = entries.iter().map(|e| e.amount_cents).sum();
        let total: i64 = aggregate_by_category(&entries)
            .iter()
            .map(|t| t.total_cents)
            .sum();
        assert_eq!(total, sum);
    }

    #[test]
    fn test_aggregate_by_month_chronological() {
        let totals = aggregate_by_month(&sample());
        let keys: Vec<_> = totals.iter().map(|t| t.year_month.to_string()).collect();
        assert_eq!(keys, vec!["2024-04", "2024-05", "2024-06"]);
        assert_eq!(totals[2].total_cents, 8200 + 3400);
    }

    #[test]
    fn test_aggregations_on_empty_input() {
        assert!(aggregate_by_category(&[]).is_empty());
        assert!(aggregate_by_month(&[]).is_empty());
    }
}
