//! The view computation behind every list screen.

use tracing::debug;

use crate::domain::common::record::Record;
use crate::domain::table::column::Column;
use crate::domain::table::pagination::{slice_page, ExternalPage, PageSummary, Paginator};
use crate::domain::table::search::{filter_records, SearchState};
use crate::domain::table::sort::{sort_records, SortState};
use crate::errors::Result;

/// Text a screen shows instead of an empty table.
pub const EMPTY_MESSAGE: &str = "No data available";

/// One computed page: the records on it, their rendered cells (row-major,
/// one entry per column), and the pagination summary.
#[derive(Debug, Clone)]
pub struct TableView {
    pub rows: Vec<Record>,
    pub cells: Vec<Vec<String>>,
    pub summary: PageSummary,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Pure composition: filter, then sort, then paginate, in that order, for an
/// internal paginator. An external paginator passes `records` through as the
/// rows and echoes the caller's metadata; see [`Paginator`] for why sorting
/// and searching are skipped there. Same inputs always give the same view.
pub fn compute_view(
    records: &[Record],
    columns: &[Column],
    sort: &SortState,
    search: &SearchState,
    paginator: &Paginator,
) -> TableView {
    if paginator.is_external() {
        let rows = records.to_vec();
        let summary = paginator.summarize(rows.len(), rows.len());
        return TableView {
            cells: render_rows(columns, &rows),
            rows,
            summary,
        };
    }

    let mut working = filter_records(records, &search.query, &search.keys);
    if let SortState::Active { key, direction } = sort {
        sort_records(&mut working, key, *direction);
    }

    let total_items = working.len();
    let rows: Vec<Record> =
        slice_page(&working, paginator.current_page(), paginator.page_size()).to_vec();
    let summary = paginator.summarize(total_items, rows.len());

    TableView {
        cells: render_rows(columns, &rows),
        rows,
        summary,
    }
}

fn render_rows(columns: &[Column], rows: &[Record]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|record| columns.iter().map(|column| column.cell(record)).collect())
        .collect()
}

/// Owns the mutable state around the pure view computation, the way a list
/// screen does: sort toggles, the search box, and the pager. The records
/// themselves stay with the caller and are passed per computation.
#[derive(Debug, Clone)]
pub struct TableState {
    columns: Vec<Column>,
    sort: SortState,
    search: SearchState,
    paginator: Paginator,
}

impl TableState {
    pub fn internal(columns: Vec<Column>, search_keys: Vec<String>, page_size: usize) -> Result<Self> {
        Ok(Self {
            columns,
            sort: SortState::default(),
            search: SearchState::new(search_keys),
            paginator: Paginator::internal(page_size)?,
        })
    }

    pub fn external(columns: Vec<Column>, meta: ExternalPage) -> Self {
        Self {
            columns,
            sort: SortState::default(),
            search: SearchState::default(),
            paginator: Paginator::external(meta),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn query(&self) -> &str {
        &self.search.query
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Header click. Unknown and non-sortable columns are no-ops.
    pub fn toggle_sort(&mut self, key: &str) {
        let sortable = self.columns.iter().any(|c| c.key == key && c.sortable);
        if !sortable {
            return;
        }
        self.sort = self.sort.cycle(key);
        debug!(key, state = ?self.sort, "sort cycled");
    }

    /// Search box input. Internal pagers restart from page 1 so new matches
    /// are visible immediately.
    pub fn set_query(&mut self, query: &str) {
        self.search.query = query.to_string();
        self.paginator.reset_to_first_page();
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        self.paginator.set_page_size(page_size)
    }

    /// Clamped page change. In internal mode the bound comes from the
    /// currently filtered count of `records`; in external mode from the
    /// backend metadata. Returns the page actually selected.
    pub fn go_to_page(&mut self, requested: usize, records: &[Record]) -> usize {
        let total_items = if self.paginator.is_external() {
            0
        } else {
            filter_records(records, &self.search.query, &self.search.keys).len()
        };
        self.paginator.go_to_page(requested, total_items)
    }

    /// Replace the backend paging metadata after an external fetch.
    pub fn set_external_meta(&mut self, meta: ExternalPage) {
        if self.paginator.is_external() {
            self.paginator = Paginator::external(meta);
        }
    }

    pub fn view(&self, records: &[Record]) -> TableView {
        compute_view(records, &self.columns, &self.sort, &self.search, &self.paginator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::time::format_timestamp;
    use serde_json::{json, Value};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => Record(map),
            _ => panic!("fixture must be an object"),
        }
    }

    fn link_rows() -> Vec<Record> {
        vec![
            record(json!({ "alias": "promo", "clicks": 120, "createdAt": "2024-01-03" })),
            record(json!({ "alias": "launch", "clicks": 45, "createdAt": "2024-01-01" })),
            record(json!({ "alias": "Spring-Sale", "clicks": 300, "createdAt": "2024-01-02" })),
            record(json!({ "alias": "beta", "clicks": 45, "createdAt": "2024-01-04" })),
        ]
    }

    fn link_columns() -> Vec<Column> {
        vec![
            Column::new("alias", "Alias").sortable(),
            Column::new("clicks", "Clicks").sortable(),
            Column::new("createdAt", "Created"),
        ]
    }

    fn aliases(view: &TableView) -> Vec<String> {
        view.rows
            .iter()
            .map(|r| r.get("alias").and_then(|v| v.as_str()).unwrap_or("-").to_string())
            .collect()
    }

    #[test]
    fn internal_mode_filters_sorts_then_paginates() {
        let mut state = TableState::internal(link_columns(), vec!["alias".to_string()], 2).unwrap();
        state.set_query("a");
        state.toggle_sort("clicks");

        // "promo" has no "a"; the rest sort ascending by clicks,
        // ties keeping input order: launch, beta, Spring-Sale.
        let view = state.view(&link_rows());
        assert_eq!(aliases(&view), vec!["launch", "beta"]);
        assert_eq!(view.summary.total_items, 3);
        assert_eq!(view.summary.total_pages, 2);

        state.go_to_page(2, &link_rows());
        let second = state.view(&link_rows());
        assert_eq!(aliases(&second), vec!["Spring-Sale"]);
        assert_eq!(second.summary.window_start, 3);
        assert_eq!(second.summary.window_end, 3);
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let mut state = TableState::internal(link_columns(), vec![], 3).unwrap();
        state.go_to_page(2, &link_rows());
        let view = state.view(&link_rows());
        assert_eq!(view.rows.len(), 1);
        assert!(view.rows.len() <= 3);
    }

    #[test]
    fn external_mode_passes_rows_through_untouched() {
        let meta = ExternalPage {
            current_page: 2,
            total_pages: 8,
            total_items: 74,
            items_per_page: 10,
        };
        let mut state = TableState::external(link_columns(), meta);

        // Sort and query changes must not reorder or drop backend rows.
        state.toggle_sort("clicks");
        state.set_query("zzz");

        let rows = link_rows();
        let view = state.view(&rows);
        assert_eq!(aliases(&view), vec!["promo", "launch", "Spring-Sale", "beta"]);
        assert_eq!(view.summary.total_items, 74);
        assert_eq!(view.summary.total_pages, 8);
        assert_eq!(view.summary.current_page, 2);

        // The sort indicator state still advances for backend-driven sorting.
        assert_eq!(state.sort().key(), Some("clicks"));
    }

    #[test]
    fn external_refetch_replaces_the_backend_metadata() {
        let meta = ExternalPage {
            current_page: 1,
            total_pages: 8,
            total_items: 74,
            items_per_page: 10,
        };
        let mut state = TableState::external(link_columns(), meta);
        state.set_external_meta(ExternalPage {
            current_page: 3,
            total_pages: 9,
            total_items: 82,
            items_per_page: 10,
        });

        let view = state.view(&link_rows());
        assert_eq!(view.summary.current_page, 3);
        assert_eq!(view.summary.total_items, 82);
        assert_eq!(view.summary.total_pages, 9);

        // Internal tables have no backend metadata to replace.
        let mut internal = TableState::internal(link_columns(), vec![], 10).unwrap();
        internal.set_external_meta(meta);
        assert!(!internal.paginator().is_external());
    }

    #[test]
    fn non_sortable_and_unknown_columns_are_no_ops() {
        let mut state = TableState::internal(link_columns(), vec![], 10).unwrap();
        state.toggle_sort("createdAt");
        assert_eq!(state.sort(), &SortState::Unsorted);
        state.toggle_sort("nope");
        assert_eq!(state.sort(), &SortState::Unsorted);
    }

    #[test]
    fn search_change_resets_internal_page() {
        let mut state = TableState::internal(link_columns(), vec!["alias".to_string()], 2).unwrap();
        state.go_to_page(2, &link_rows());
        assert_eq!(state.paginator().current_page(), 2);
        state.set_query("promo");
        assert_eq!(state.paginator().current_page(), 1);
    }

    #[test]
    fn cells_follow_columns_with_placeholder_default() {
        let columns = vec![
            Column::new("alias", "Alias"),
            Column::new("missing", "Missing"),
            Column::new("clicks", "Clicks").with_render(|r| {
                format!("{}x", r.get("clicks").and_then(|v| v.as_u64()).unwrap_or(0))
            }),
            Column::new("createdAt", "Created").with_render(|r| {
                format_timestamp(r.get("createdAt").and_then(|v| v.as_str()).unwrap_or(""))
            }),
        ];
        let state = TableState::internal(columns, vec![], 10).unwrap();
        let view = state.view(&link_rows()[..1]);
        assert_eq!(
            view.cells[0],
            vec!["promo", "—", "120x", "2024-01-03 00:00:00"]
        );
    }

    #[test]
    fn identical_inputs_give_identical_views() {
        let state = TableState::internal(link_columns(), vec!["alias".to_string()], 2).unwrap();
        let rows = link_rows();
        let first = state.view(&rows);
        let second = state.view(&rows);
        assert_eq!(first.rows, second.rows);
        assert_eq!(first.summary, second.summary);
    }

    #[test]
    fn empty_input_yields_an_empty_view() {
        let state = TableState::internal(link_columns(), vec![], 10).unwrap();
        let view = state.view(&[]);
        assert!(view.is_empty());
        assert_eq!(view.summary.total_pages, 0);
        assert_eq!(view.summary.window_start, 0);
        // Screens swap in the placeholder text for a view like this.
        assert_eq!(EMPTY_MESSAGE, "No data available");
    }
}
