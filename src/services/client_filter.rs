//! In-memory mirror of the listing filters, for clients that fetch one page
//! of records and filter it locally instead of querying the store again.
//!
//! Predicates agree with the SQL built by [`crate::services::cards::where_clause`].

use std::collections::BTreeSet;

use crate::models::card::CardEvent;
use crate::services::cards::{CardFilters, FilterOptions};

/// Whether `record` satisfies every active filter.
pub fn matches(filters: &CardFilters, record: &CardEvent) -> bool {
    if let Some(ref kind) = filters.cartao {
        if record.cartao != *kind {
            return false;
        }
    }
    if let Some(ref club) = filters.clube {
        if !contains_ignore_case(&record.clube, club) {
            return false;
        }
    }
    if let Some(ref position) = filters.posicao {
        if record.posicao != *position {
            return false;
        }
    }
    if let Some(ref player) = filters.atleta {
        if !contains_ignore_case(&record.atleta, player) {
            return false;
        }
    }
    if filters.minuto_min.is_some() || filters.minuto_max.is_some() {
        let Some(minute) = record.minute() else {
            return false;
        };
        if filters.minuto_min.is_some_and(|min| minute < min)
            || filters.minuto_max.is_some_and(|max| minute > max)
        {
            return false;
        }
    }
    if let Some(round) = filters.rodata {
        if record.rodata != round {
            return false;
        }
    }
    true
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Records satisfying `filters`, in their original order.
pub fn apply<'a>(records: &'a [CardEvent], filters: &CardFilters) -> Vec<&'a CardEvent> {
    records.iter().filter(|r| matches(filters, r)).collect()
}

/// Distinct, sorted filter values present in `records`.
pub fn filter_options(records: &[CardEvent]) -> FilterOptions {
    let mut cartao = BTreeSet::new();
    let mut clube = BTreeSet::new();
    let mut posicao = BTreeSet::new();
    let mut rodata = BTreeSet::new();

    for record in records {
        cartao.insert(record.cartao.clone());
        clube.insert(record.clube.clone());
        posicao.insert(record.posicao.clone());
        rodata.insert(record.rodata);
    }

    FilterOptions {
        cartao: cartao.into_iter().collect(),
        clube: clube.into_iter().collect(),
        posicao: posicao.into_iter().collect(),
        rodata: rodata.into_iter().collect(),
    }
}

/// Client-side table state: the fetched records, their option lists, and the
/// subset visible under the current filters.
#[derive(Debug, Clone)]
pub struct ClientTable {
    records: Vec<CardEvent>,
    options: FilterOptions,
    filters: CardFilters,
    visible: Vec<usize>,
}

impl ClientTable {
    pub fn new(records: Vec<CardEvent>) -> Self {
        let options = filter_options(&records);
        let visible = (0..records.len()).collect();
        Self {
            records,
            options,
            filters: CardFilters::default(),
            visible,
        }
    }

    /// Replace the active filters and recompute the visible subset.
    pub fn set_filters(&mut self, filters: CardFilters) {
        self.visible = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| matches(&filters, record))
            .map(|(i, _)| i)
            .collect();
        self.filters = filters;
    }

    pub fn filters(&self) -> &CardFilters {
        &self.filters
    }

    /// Option lists, derived once from the full fetched set.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn visible(&self) -> impl Iterator<Item = &CardEvent> {
        self.visible.iter().map(|&i| &self.records[i])
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }
}
