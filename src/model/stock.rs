//! Recipe stock pool
//!
//! The pool keeps its entries in load order; an entry's position is its
//! recipe index and is the tie-break key during top-k selection. Alongside
//! the entries it maintains one index set per category plus the combined set,
//! so the allocation core can address a category without masking.

use serde::{Deserialize, Serialize};

use super::Category;

/// A single recipe and its remaining stock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub recipe_id: String,
    pub stock_count: u32,
    pub category: Category,
}

/// Which part of the pool an allocation may draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolScope {
    /// Only recipes of one category
    Category(Category),
    /// Every recipe regardless of category
    Combined,
}

impl std::fmt::Display for PoolScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolScope::Category(category) => write!(f, "{category}"),
            PoolScope::Combined => f.write_str("combined"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockPool {
    entries: Vec<StockEntry>,
    vegetarian: Vec<usize>,
    gourmet: Vec<usize>,
    combined: Vec<usize>,
}

impl StockPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from entries, keeping their order as recipe indices
    pub fn from_entries(entries: impl IntoIterator<Item = StockEntry>) -> Self {
        let mut pool = Self::new();
        for entry in entries {
            pool.push(entry.recipe_id, entry.stock_count, entry.category);
        }
        pool
    }

    /// Append a recipe and return its recipe index
    pub fn push(
        &mut self,
        recipe_id: impl Into<String>,
        stock_count: u32,
        category: Category,
    ) -> usize {
        let index = self.entries.len();
        self.entries.push(StockEntry {
            recipe_id: recipe_id.into(),
            stock_count,
            category,
        });
        match category {
            Category::Vegetarian => self.vegetarian.push(index),
            Category::Gourmet => self.gourmet.push(index),
        }
        self.combined.push(index);
        index
    }

    /// Builder-style variant of [`StockPool::push`]
    pub fn with_recipe(
        mut self,
        recipe_id: impl Into<String>,
        stock_count: u32,
        category: Category,
    ) -> Self {
        self.push(recipe_id, stock_count, category);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[StockEntry] {
        &self.entries
    }

    pub fn get(&self, recipe_index: usize) -> Option<&StockEntry> {
        self.entries.get(recipe_index)
    }

    /// Look up a recipe's remaining stock by identifier
    pub fn stock_of(&self, recipe_id: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.recipe_id == recipe_id)
            .map(|entry| entry.stock_count)
    }

    /// Recipe indices that belong to `scope`, in recipe-index order
    pub fn indices(&self, scope: PoolScope) -> &[usize] {
        match scope {
            PoolScope::Category(Category::Vegetarian) => &self.vegetarian,
            PoolScope::Category(Category::Gourmet) => &self.gourmet,
            PoolScope::Combined => &self.combined,
        }
    }

    /// Current stock counts in recipe-index order
    pub fn counts(&self) -> Vec<u32> {
        self.entries.iter().map(|entry| entry.stock_count).collect()
    }

    /// Total units left within `scope`
    pub fn total(&self, scope: PoolScope) -> u64 {
        self.indices(scope)
            .iter()
            .map(|&index| u64::from(self.entries[index].stock_count))
            .sum()
    }

    /// Borrow the entries mutably together with the index set for `scope`
    pub fn view_mut(&mut self, scope: PoolScope) -> StockView<'_> {
        let members = match scope {
            PoolScope::Category(Category::Vegetarian) => &self.vegetarian,
            PoolScope::Category(Category::Gourmet) => &self.gourmet,
            PoolScope::Combined => &self.combined,
        };
        StockView {
            entries: &mut self.entries,
            members,
        }
    }
}

/// A mutable window onto the subset of the pool selected by a [`PoolScope`]
///
/// Only entries listed in `members` are read or written through the view.
#[derive(Debug)]
pub struct StockView<'a> {
    entries: &'a mut [StockEntry],
    members: &'a [usize],
}

impl StockView<'_> {
    /// Number of distinct recipes visible through the view
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[usize] {
        self.members
    }

    pub fn count(&self, recipe_index: usize) -> u32 {
        self.entries[recipe_index].stock_count
    }

    /// Take `amount` units from a member recipe; the caller has checked the count
    pub(crate) fn take(&mut self, recipe_index: usize, amount: u32) {
        debug_assert!(self.members.contains(&recipe_index));
        let entry = &mut self.entries[recipe_index];
        debug_assert!(entry.stock_count >= amount);
        entry.stock_count -= amount;
    }

    /// Member counts in recipe-index order
    pub fn counts(&self) -> Vec<u32> {
        self.members
            .iter()
            .map(|&index| self.entries[index].stock_count)
            .collect()
    }

    /// Put back member counts previously taken with [`StockView::counts`]
    pub(crate) fn restore(&mut self, counts: &[u32]) {
        debug_assert_eq!(counts.len(), self.members.len());
        for (&index, &count) in self.members.iter().zip(counts) {
            self.entries[index].stock_count = count;
        }
    }
}
