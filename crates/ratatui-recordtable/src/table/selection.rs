//! Selection derivation and toggle semantics.
//!
//! The selection itself is owned by the caller. Everything here is a pure function of
//! `(rows, disabled predicate, selected ids)`; toggles compute the *requested* next selection
//! and leave it to the caller to apply it.

use super::identity::IdField;
use super::identity::RowIdFn;
use super::identity::RowIdentityResolver;
use super::memo::ByPtr;
use super::memo::Memo;
use super::row::Row;
use super::row::RowId;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Marks rows whose checkbox is disabled and which select-all skips.
pub type RowPredicate = Arc<dyn Fn(&Row) -> bool + Send + Sync>;

/// The caller-owned set of selected row ids.
///
/// May contain ids that are not on the current page (or not loaded at all); those are carried
/// through every toggle untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<RowId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &RowId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowId> {
        self.ids.iter()
    }

    pub fn to_vec(&self) -> Vec<RowId> {
        self.ids.iter().cloned().collect()
    }

    /// A copy of this set with `id` added.
    pub fn with(&self, id: RowId) -> Self {
        let mut ids = self.ids.clone();
        ids.insert(id);
        Self { ids }
    }

    /// A copy of this set with `id` removed.
    pub fn without(&self, id: &RowId) -> Self {
        let mut ids = self.ids.clone();
        ids.remove(id);
        Self { ids }
    }
}

impl FromIterator<RowId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = RowId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Visual state of the select-all control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CheckState {
    Unchecked,
    Checked,
    Indeterminate,
}

/// A requested selection: the new id set plus the rows it covers.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionChange {
    pub ids: Vec<RowId>,
    pub rows: Vec<Row>,
}

/// Derived selection counts over the selectable rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionSummary {
    selectable_ids: Vec<RowId>,
    selected_count: usize,
}

impl SelectionSummary {
    /// Scans `rows` once. Row `i` falls back to position `base_index + i` for its id.
    pub fn derive(
        rows: &[Row],
        base_index: usize,
        resolver: &RowIdentityResolver,
        disabled: Option<&RowPredicate>,
        selected: &SelectionSet,
    ) -> Self {
        let mut selectable_ids = Vec::with_capacity(rows.len());
        let mut selected_count = 0usize;
        for (i, row) in rows.iter().enumerate() {
            if disabled.is_some_and(|is_disabled| is_disabled(row)) {
                continue;
            }
            let id = resolver.resolve(row, Some(base_index + i));
            if selected.contains(&id) {
                selected_count += 1;
            }
            selectable_ids.push(id);
        }
        Self {
            selectable_ids,
            selected_count,
        }
    }

    pub fn selectable_ids(&self) -> &[RowId] {
        &self.selectable_ids
    }

    pub fn selectable_count(&self) -> usize {
        self.selectable_ids.len()
    }

    pub fn selected_count(&self) -> usize {
        self.selected_count
    }

    pub fn is_all_selected(&self) -> bool {
        !self.selectable_ids.is_empty() && self.selected_count == self.selectable_ids.len()
    }

    pub fn is_indeterminate(&self) -> bool {
        self.selected_count > 0 && self.selected_count < self.selectable_ids.len()
    }

    pub fn check_state(&self) -> CheckState {
        if self.is_all_selected() {
            CheckState::Checked
        } else if self.is_indeterminate() {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }
}

pub fn is_row_selected(
    resolver: &RowIdentityResolver,
    row: &Row,
    index: usize,
    selected: &SelectionSet,
) -> bool {
    selected.contains(&resolver.resolve(row, Some(index)))
}

/// Row toggle: ON adds the id, OFF removes it. Every other id is kept.
pub fn toggle_row(selected: &SelectionSet, id: RowId, on: bool) -> SelectionSet {
    if on {
        selected.with(id)
    } else {
        selected.without(&id)
    }
}

/// Select-all: ON replaces the selection with exactly the selectable ids, OFF clears it.
pub fn toggle_all(summary: &SelectionSummary, on: bool) -> SelectionSet {
    if on {
        summary.selectable_ids.iter().cloned().collect()
    } else {
        SelectionSet::new()
    }
}

/// Pairs `next` with the rows of `rows` whose ids it contains.
pub fn selection_change(
    rows: &[Row],
    base_index: usize,
    resolver: &RowIdentityResolver,
    next: &SelectionSet,
) -> SelectionChange {
    let rows = rows
        .iter()
        .enumerate()
        .filter(|(i, row)| next.contains(&resolver.resolve(row, Some(base_index + i))))
        .map(|(_, row)| row.clone())
        .collect();
    SelectionChange {
        ids: next.to_vec(),
        rows,
    }
}

/// Inputs of one selection derivation.
pub struct SelectionInput<'a> {
    pub rows: &'a Arc<[Row]>,
    pub base_index: usize,
    pub resolver: &'a RowIdentityResolver,
    pub disabled: Option<&'a RowPredicate>,
    pub selected: &'a Arc<SelectionSet>,
}

#[derive(PartialEq)]
struct SelectionKey {
    rows: ByPtr<[Row]>,
    base_index: usize,
    disabled: Option<ByPtr<dyn Fn(&Row) -> bool + Send + Sync>>,
    selected: ByPtr<SelectionSet>,
    accessor: Option<ByPtr<dyn Fn(&Row) -> RowId + Send + Sync>>,
    id_fields: ByPtr<[IdField]>,
}

impl SelectionKey {
    fn of(input: &SelectionInput<'_>) -> Self {
        Self {
            rows: ByPtr::from(input.rows),
            base_index: input.base_index,
            disabled: input.disabled.map(ByPtr::from),
            selected: ByPtr::from(input.selected),
            accessor: input.resolver.accessor().map(|a: &RowIdFn| ByPtr::from(a)),
            id_fields: ByPtr::from(input.resolver.fields()),
        }
    }
}

/// Memoized [`SelectionSummary`] derivation.
///
/// Re-rendering with the same `Arc`s reuses the previous summary instead of rescanning every
/// row.
#[derive(Default)]
pub struct SelectionModel {
    memo: Memo<SelectionKey, SelectionSummary>,
}

impl SelectionModel {
    pub fn summary(&mut self, input: SelectionInput<'_>) -> &SelectionSummary {
        let key = SelectionKey::of(&input);
        self.memo.get_or_compute(key, || {
            SelectionSummary::derive(
                input.rows,
                input.base_index,
                input.resolver,
                input.disabled,
                input.selected,
            )
        })
    }

    /// Number of full derivations performed so far.
    pub fn derivations(&self) -> u64 {
        self.memo.computes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::row::row_from_value;
    use serde_json::json;

    fn rows(n: i64) -> Vec<Row> {
        (1..=n)
            .map(|i| row_from_value(json!({"id": i, "name": format!("r{i}")})))
            .collect()
    }

    fn ids(v: &[i64]) -> SelectionSet {
        v.iter().map(|i| RowId::Number(*i)).collect()
    }

    fn disabled_ids(v: &'static [i64]) -> RowPredicate {
        Arc::new(move |row: &Row| {
            row.get("id")
                .and_then(|v| v.as_i64())
                .is_some_and(|id| v.contains(&id))
        })
    }

    #[test]
    fn empty_selection_is_unchecked() {
        let r = rows(3);
        let s = SelectionSummary::derive(&r, 0, &RowIdentityResolver::default(), None, &ids(&[]));
        assert_eq!(s.check_state(), CheckState::Unchecked);
        assert!(!s.is_all_selected());
        assert!(!s.is_indeterminate());
    }

    #[test]
    fn one_of_many_is_indeterminate() {
        let r = rows(4);
        let s = SelectionSummary::derive(&r, 0, &RowIdentityResolver::default(), None, &ids(&[2]));
        assert!(s.is_indeterminate());
        assert!(!s.is_all_selected());
        assert_eq!(s.check_state(), CheckState::Indeterminate);
    }

    #[test]
    fn select_all_then_derive_is_all_selected() {
        let r = rows(5);
        let resolver = RowIdentityResolver::default();
        let disabled = disabled_ids(&[3]);
        let before = SelectionSummary::derive(&r, 0, &resolver, Some(&disabled), &ids(&[9]));
        let all = toggle_all(&before, true);
        let after = SelectionSummary::derive(&r, 0, &resolver, Some(&disabled), &all);
        assert!(after.is_all_selected());
        assert_eq!(after.selected_count(), after.selectable_count());
        assert_eq!(after.selectable_count(), 4);
        assert!(!all.contains(&RowId::Number(3)));
        assert!(!all.contains(&RowId::Number(9)));

        let none = toggle_all(&after, false);
        let cleared = SelectionSummary::derive(&r, 0, &resolver, Some(&disabled), &none);
        assert_eq!(cleared.selected_count(), 0);
    }

    #[test]
    fn all_disabled_is_never_all_selected() {
        let r = rows(2);
        let disabled: RowPredicate = Arc::new(|_| true);
        let s = SelectionSummary::derive(
            &r,
            0,
            &RowIdentityResolver::default(),
            Some(&disabled),
            &ids(&[1, 2]),
        );
        assert_eq!(s.selectable_count(), 0);
        assert!(!s.is_all_selected());
        assert_eq!(s.check_state(), CheckState::Unchecked);
    }

    #[test]
    fn row_toggle_keeps_ids_from_other_pages() {
        let current = ids(&[100, 200]);
        let on = toggle_row(&current, RowId::Number(1), true);
        assert_eq!(on, ids(&[1, 100, 200]));
        let off = toggle_row(&on, RowId::Number(100), false);
        assert_eq!(off, ids(&[1, 200]));
    }

    #[test]
    fn change_carries_matching_rows() {
        let r = rows(3);
        let resolver = RowIdentityResolver::default();
        let change = selection_change(&r, 0, &resolver, &ids(&[2, 42]));
        assert_eq!(change.ids, vec![RowId::Number(2), RowId::Number(42)]);
        assert_eq!(change.rows, vec![r[1].clone()]);
    }

    #[test]
    fn positional_ids_use_base_index() {
        let r = vec![row_from_value(json!({"name": "a"})), row_from_value(json!({"name": "b"}))];
        let resolver = RowIdentityResolver::default();
        let s = SelectionSummary::derive(&r, 10, &resolver, None, &ids(&[11]));
        assert_eq!(s.selectable_ids(), &[RowId::Number(10), RowId::Number(11)]);
        assert_eq!(s.selected_count(), 1);
        assert!(is_row_selected(&resolver, &r[1], 11, &ids(&[11])));
    }

    #[test]
    fn model_memoizes_on_identity() {
        let r: Arc<[Row]> = rows(3).into();
        let resolver = RowIdentityResolver::default();
        let selected = Arc::new(ids(&[1]));
        let mut model = SelectionModel::default();

        let input = || SelectionInput {
            rows: &r,
            base_index: 0,
            resolver: &resolver,
            disabled: None,
            selected: &selected,
        };
        assert_eq!(model.summary(input()).selected_count(), 1);
        assert_eq!(model.summary(input()).selected_count(), 1);
        assert_eq!(model.derivations(), 1);

        let other = Arc::new(ids(&[1, 2]));
        let count = model
            .summary(SelectionInput {
                rows: &r,
                base_index: 0,
                resolver: &resolver,
                disabled: None,
                selected: &other,
            })
            .selected_count();
        assert_eq!(count, 2);
        assert_eq!(model.derivations(), 2);
    }
}
