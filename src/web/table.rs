//! Generic table rendering for list pages.
//!
//! A [`TableSpec`] describes the columns once; pages feed it rows and get a
//! [`TableView`] that the shared `partials/table.html` template renders.
//! Two mutually exclusive modes exist:
//!
//! - **Client mode** ([`TableSpec::client`]): the full result set is in
//!   memory. Free-text search matches case-insensitively across all
//!   stringified field values and pagination slices the filtered rows into
//!   fixed-size pages.
//! - **Server mode** ([`TableSpec::server`]): the backend paginated; rows
//!   are rendered as-is and page links rewrite only the `page` query
//!   parameter of the current URL. Navigation is disabled at the
//!   boundaries.
//!
//! Search in server mode is an explicit opt-in: pass a [`ServerSearch`]
//! descriptor and the rendered form round-trips the `search` parameter to
//! the same page, where the handler forwards it to the backend. Without the
//! descriptor no search input is rendered - there is no silent mode where a
//! search box exists but does nothing.

use serde::Serialize;
use serde_json::Value;

use crate::domain::page::PageMeta;

/// Default client-mode page size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// How a column extracts its cell value from a row.
pub enum Accessor<T> {
    /// Look up a serialized field by name. Unknown fields render empty.
    Field(&'static str),
    /// Compute the value from the row.
    Derived(fn(&T) -> String),
}

/// One column of a table.
pub struct Column<T> {
    header: &'static str,
    accessor: Accessor<T>,
    /// Raw-HTML override; the template injects it unescaped. Only ever
    /// built from fixed markup plus escaped dynamic parts.
    render: Option<fn(&T) -> String>,
}

impl<T> Column<T> {
    pub fn field(header: &'static str, name: &'static str) -> Self {
        Self {
            header,
            accessor: Accessor::Field(name),
            render: None,
        }
    }

    pub fn derived(header: &'static str, f: fn(&T) -> String) -> Self {
        Self {
            header,
            accessor: Accessor::Derived(f),
            render: None,
        }
    }

    /// Attaches a custom cell renderer producing trusted HTML.
    pub fn rendered(mut self, f: fn(&T) -> String) -> Self {
        self.render = Some(f);
        self
    }
}

/// A trailing per-row control.
#[derive(Debug, Clone, PartialEq)]
pub struct RowAction {
    pub label: &'static str,
    pub href: String,
    /// Rendered as a one-button form instead of a link.
    pub post: bool,
}

impl RowAction {
    pub fn link(label: &'static str, href: impl Into<String>) -> Self {
        Self {
            label,
            href: href.into(),
            post: false,
        }
    }

    pub fn post(label: &'static str, href: impl Into<String>) -> Self {
        Self {
            label,
            href: href.into(),
            post: true,
        }
    }
}

/// Column layout plus optional row actions; built once per page handler.
pub struct TableSpec<T> {
    columns: Vec<Column<T>>,
    actions: Option<fn(&T) -> Vec<RowAction>>,
    empty_message: &'static str,
}

/// Client-mode query state, usually lifted straight from URL parameters.
#[derive(Debug, Clone, Default)]
pub struct ClientQuery {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Opt-in server-mode search; `term` prefills the input.
#[derive(Debug, Clone, Default)]
pub struct ServerSearch {
    pub term: Option<String>,
}

/// The current page's path and query, used to build navigation links that
/// change one parameter and keep the rest.
#[derive(Debug, Clone)]
pub struct PageUrl {
    path: String,
    params: Vec<(String, String)>,
}

impl PageUrl {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    /// Adds the parameter only when a value is present.
    pub fn with_opt<V: ToString>(self, key: &str, value: &Option<V>) -> Self {
        match value {
            Some(v) => self.with_param(key, v.to_string()),
            None => self,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The URL with the `page` parameter set to `page` and every other
    /// parameter preserved in order.
    pub fn with_page(&self, page: u32) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        let mut replaced = false;

        for (key, value) in &self.params {
            if key == "page" {
                query.append_pair("page", &page.to_string());
                replaced = true;
            } else {
                query.append_pair(key, value);
            }
        }
        if !replaced {
            query.append_pair("page", &page.to_string());
        }

        format!("{}?{}", self.path, query.finish())
    }

    /// Parameters a search form must carry as hidden inputs so submitting
    /// it does not drop active filters. `page` resets and `search` is the
    /// input itself, so both are excluded.
    pub fn retained(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .filter(|(key, _)| key != "page" && key != "search")
            .cloned()
            .collect()
    }
}

/// A rendered cell. `raw` cells came from a custom renderer and are
/// injected without escaping.
#[derive(Debug, Clone)]
pub struct CellView {
    pub text: String,
    pub raw: bool,
}

#[derive(Debug, Clone)]
pub struct RowView {
    pub cells: Vec<CellView>,
    pub actions: Vec<RowAction>,
}

#[derive(Debug, Clone)]
pub struct PagerView {
    pub page: u32,
    pub total_pages: u32,
    pub summary: String,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SearchView {
    pub action: String,
    pub term: String,
    pub hidden: Vec<(String, String)>,
}

/// Everything `partials/table.html` needs.
pub struct TableView {
    pub headers: Vec<&'static str>,
    pub rows: Vec<RowView>,
    /// Column span of the placeholder row (headers plus the actions column).
    pub span: usize,
    pub has_actions: bool,
    pub pager: Option<PagerView>,
    pub search: Option<SearchView>,
    pub empty_message: &'static str,
}

impl<T: Serialize> TableSpec<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            actions: None,
            empty_message: "No data found",
        }
    }

    pub fn with_actions(mut self, actions: fn(&T) -> Vec<RowAction>) -> Self {
        self.actions = Some(actions);
        self
    }

    pub fn empty_message(mut self, message: &'static str) -> Self {
        self.empty_message = message;
        self
    }

    /// Renders a small fixed set without search or pagination (overview
    /// widgets, embedded lists).
    pub fn fixed(&self, rows: &[T]) -> TableView {
        let visible: Vec<&T> = rows.iter().collect();
        self.view(&visible, None, None)
    }

    /// Builds the view for an in-memory result set: filter, then slice.
    ///
    /// The search term matches case-insensitively against every stringified
    /// field value of the serialized row; an empty term keeps the set
    /// unchanged. Out-of-range pages clamp to the valid range.
    pub fn client(&self, rows: &[T], query: &ClientQuery, url: &PageUrl) -> TableView {
        let term = query
            .search
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_lowercase();

        let kept: Vec<&T> = if term.is_empty() {
            rows.iter().collect()
        } else {
            rows.iter()
                .filter(|row| {
                    let value = serde_json::to_value(row).unwrap_or(Value::Null);
                    value_matches(&value, &term)
                })
                .collect()
        };

        let total = kept.len();
        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1) as usize;
        let total_pages = total.div_ceil(page_size) as u32;
        let page = query.page.unwrap_or(1).clamp(1, total_pages.max(1));

        let start = (page as usize - 1) * page_size;
        let end = (start + page_size).min(total);
        let visible = if start < total { &kept[start..end] } else { &kept[0..0] };

        let pager = (total_pages > 1).then(|| PagerView {
            page,
            total_pages,
            summary: format!("Page {page} of {total_pages} ({total} total)"),
            prev_href: (page > 1).then(|| url.with_page(page - 1)),
            next_href: (page < total_pages).then(|| url.with_page(page + 1)),
        });

        let search = Some(SearchView {
            action: url.path().to_string(),
            term: query.search.clone().unwrap_or_default(),
            hidden: url.retained(),
        });

        self.view(visible, pager, search)
    }

    /// Builds the view for a backend-paginated result set.
    ///
    /// Rows are rendered exactly as given - server mode never filters or
    /// reorders. Navigation links rewrite only the `page` parameter and are
    /// absent at the boundaries, making next/previous a no-op there.
    pub fn server(
        &self,
        rows: &[T],
        meta: &PageMeta,
        url: &PageUrl,
        search: Option<ServerSearch>,
    ) -> TableView {
        let visible: Vec<&T> = rows.iter().collect();

        let pager = (meta.total_pages > 1).then(|| PagerView {
            page: meta.page,
            total_pages: meta.total_pages,
            summary: format!(
                "Page {} of {} ({} total)",
                meta.page, meta.total_pages, meta.total
            ),
            prev_href: meta.has_prev.then(|| url.with_page(meta.page.saturating_sub(1).max(1))),
            next_href: meta.has_next.then(|| url.with_page(meta.page + 1)),
        });

        let search = search.map(|s| SearchView {
            action: url.path().to_string(),
            term: s.term.unwrap_or_default(),
            hidden: url.retained(),
        });

        self.view(&visible, pager, search)
    }

    fn view(&self, rows: &[&T], pager: Option<PagerView>, search: Option<SearchView>) -> TableView {
        let has_actions = self.actions.is_some();

        let rows: Vec<RowView> = rows
            .iter()
            .map(|row| {
                let value = serde_json::to_value(row).unwrap_or(Value::Null);

                let cells = self
                    .columns
                    .iter()
                    .map(|column| match column.render {
                        Some(render) => CellView {
                            text: render(row),
                            raw: true,
                        },
                        None => CellView {
                            text: match column.accessor {
                                Accessor::Field(name) => value
                                    .get(name)
                                    .map(scalar_to_string)
                                    .unwrap_or_default(),
                                Accessor::Derived(f) => f(row),
                            },
                            raw: false,
                        },
                    })
                    .collect();

                let actions = self.actions.map(|f| f(row)).unwrap_or_default();

                RowView { cells, actions }
            })
            .collect();

        TableView {
            headers: self.columns.iter().map(|c| c.header).collect(),
            span: self.columns.len() + usize::from(has_actions),
            has_actions,
            rows,
            pager,
            search,
            empty_message: self.empty_message,
        }
    }
}

/// Display form of a serialized field value.
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(scalar_to_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => String::new(),
    }
}

/// Case-insensitive substring match across every leaf value.
fn value_matches(value: &Value, term_lower: &str) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => s.to_lowercase().contains(term_lower),
        Value::Number(n) => n.to_string().contains(term_lower),
        Value::Bool(b) => b.to_string().contains(term_lower),
        Value::Array(items) => items.iter().any(|item| value_matches(item, term_lower)),
        Value::Object(map) => map.values().any(|item| value_matches(item, term_lower)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestRow {
        name: String,
        city: String,
        age: u32,
    }

    fn rows(n: usize) -> Vec<TestRow> {
        (1..=n)
            .map(|i| TestRow {
                name: format!("Person {i:02}"),
                city: if i % 2 == 0 { "Lisbon" } else { "Porto" }.to_string(),
                age: 20 + i as u32,
            })
            .collect()
    }

    fn spec() -> TableSpec<TestRow> {
        TableSpec::new(vec![
            Column::field("Name", "name"),
            Column::field("City", "city"),
            Column::derived("Age", |row: &TestRow| row.age.to_string()),
        ])
    }

    fn url() -> PageUrl {
        PageUrl::new("/dashboard/members")
    }

    fn first_cells(view: &TableView) -> Vec<String> {
        view.rows.iter().map(|r| r.cells[0].text.clone()).collect()
    }

    #[test]
    fn test_scenario_25_rows_page_size_10() {
        let data = rows(25);
        let query = ClientQuery {
            page_size: Some(10),
            ..Default::default()
        };

        let page1 = spec().client(&data, &query, &url());
        assert_eq!(first_cells(&page1)[0], "Person 01");
        assert_eq!(first_cells(&page1)[9], "Person 10");
        assert_eq!(page1.pager.as_ref().unwrap().total_pages, 3);

        let page3 = spec().client(
            &data,
            &ClientQuery {
                page: Some(3),
                page_size: Some(10),
                ..Default::default()
            },
            &url(),
        );
        assert_eq!(page3.rows.len(), 5);
        assert_eq!(first_cells(&page3)[0], "Person 21");
        assert_eq!(first_cells(&page3)[4], "Person 25");
    }

    #[test]
    fn test_pages_partition_the_data_in_order() {
        let data = rows(23);
        let page_size = 7;
        let total_pages = (data.len() as u32).div_ceil(page_size);
        assert_eq!(total_pages, 4);

        let mut seen = Vec::new();
        for page in 1..=total_pages {
            let view = spec().client(
                &data,
                &ClientQuery {
                    page: Some(page),
                    page_size: Some(page_size),
                    ..Default::default()
                },
                &url(),
            );
            seen.extend(first_cells(&view));
        }

        let expected: Vec<String> = data.iter().map(|r| r.name.clone()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_search_is_case_insensitive_subset() {
        let data = rows(25);
        let view = spec().client(
            &data,
            &ClientQuery {
                search: Some("LISBON".to_string()),
                page_size: Some(100),
                ..Default::default()
            },
            &url(),
        );

        // Every even-numbered person lives in Lisbon.
        assert_eq!(view.rows.len(), 12);
        for row in &view.rows {
            assert_eq!(row.cells[1].text, "Lisbon");
        }
    }

    #[test]
    fn test_empty_search_is_identity() {
        let data = rows(5);
        let view = spec().client(
            &data,
            &ClientQuery {
                search: Some("   ".to_string()),
                page_size: Some(100),
                ..Default::default()
            },
            &url(),
        );
        assert_eq!(first_cells(&view), data.iter().map(|r| r.name.clone()).collect::<Vec<_>>());
    }

    #[test]
    fn test_search_matches_numeric_fields() {
        let data = rows(25);
        let view = spec().client(
            &data,
            &ClientQuery {
                search: Some("45".to_string()),
                page_size: Some(100),
                ..Default::default()
            },
            &url(),
        );
        // age 45 = person 25
        assert_eq!(first_cells(&view), vec!["Person 25".to_string()]);
    }

    #[test]
    fn test_empty_data_renders_placeholder_regardless_of_search() {
        let data: Vec<TestRow> = Vec::new();

        for search in [None, Some("anything".to_string())] {
            let view = spec().client(
                &data,
                &ClientQuery {
                    search,
                    ..Default::default()
                },
                &url(),
            );
            assert!(view.rows.is_empty());
            assert!(view.pager.is_none());
            assert_eq!(view.span, 3);
            assert_eq!(view.empty_message, "No data found");
        }
    }

    #[test]
    fn test_out_of_range_pages_clamp() {
        let data = rows(15);

        let past_end = spec().client(
            &data,
            &ClientQuery {
                page: Some(99),
                page_size: Some(10),
                ..Default::default()
            },
            &url(),
        );
        assert_eq!(past_end.rows.len(), 5);
        assert_eq!(past_end.pager.as_ref().unwrap().page, 2);

        let zero = spec().client(
            &data,
            &ClientQuery {
                page: Some(0),
                page_size: Some(10),
                ..Default::default()
            },
            &url(),
        );
        assert_eq!(zero.pager.as_ref().unwrap().page, 1);
    }

    #[test]
    fn test_server_mode_renders_rows_untouched() {
        let data = rows(10);
        let meta = PageMeta {
            page: 2,
            limit: 10,
            total: 25,
            total_pages: 3,
            has_next: true,
            has_prev: true,
        };

        let view = spec().server(&data, &meta, &url().with_param("search", "ann"), None);

        assert_eq!(view.rows.len(), 10);
        assert_eq!(
            first_cells(&view),
            data.iter().map(|r| r.name.clone()).collect::<Vec<_>>()
        );

        let pager = view.pager.unwrap();
        assert_eq!(
            pager.prev_href.as_deref(),
            Some("/dashboard/members?search=ann&page=1")
        );
        assert_eq!(
            pager.next_href.as_deref(),
            Some("/dashboard/members?search=ann&page=3")
        );
    }

    #[test]
    fn test_server_mode_boundaries_disable_navigation() {
        let data = rows(5);
        let meta = PageMeta {
            page: 1,
            limit: 10,
            total: 25,
            total_pages: 3,
            has_next: true,
            has_prev: false,
        };

        let first = spec().server(&data, &meta, &url(), None);
        let pager = first.pager.unwrap();
        assert!(pager.prev_href.is_none());
        assert!(pager.next_href.is_some());

        let meta = PageMeta {
            page: 3,
            has_next: false,
            has_prev: true,
            ..meta
        };
        let last = spec().server(&data, &meta, &url(), None);
        let pager = last.pager.unwrap();
        assert!(pager.prev_href.is_some());
        assert!(pager.next_href.is_none());
    }

    #[test]
    fn test_server_search_is_explicit_opt_in() {
        let data = rows(3);
        let meta = PageMeta::single_page(3);

        let without = spec().server(&data, &meta, &url(), None);
        assert!(without.search.is_none());

        let with = spec().server(
            &data,
            &meta,
            &url(),
            Some(ServerSearch {
                term: Some("ann".to_string()),
            }),
        );
        let search = with.search.unwrap();
        assert_eq!(search.term, "ann");
        assert_eq!(search.action, "/dashboard/members");
    }

    #[test]
    fn test_page_url_rewrites_only_page() {
        let url = PageUrl::new("/dashboard/members")
            .with_param("search", "ann")
            .with_param("status", "active")
            .with_param("page", "2");

        assert_eq!(
            url.with_page(3),
            "/dashboard/members?search=ann&status=active&page=3"
        );

        let without_page = PageUrl::new("/dashboard/members").with_param("search", "a b");
        assert_eq!(without_page.with_page(2), "/dashboard/members?search=a+b&page=2");
    }

    #[test]
    fn test_page_url_retained_excludes_page_and_search() {
        let url = PageUrl::new("/p")
            .with_param("search", "ann")
            .with_param("status", "active")
            .with_param("page", "2");
        assert_eq!(
            url.retained(),
            vec![("status".to_string(), "active".to_string())]
        );
    }

    #[test]
    fn test_custom_renderer_marks_cell_raw() {
        let data = rows(1);
        let spec = TableSpec::new(vec![
            Column::field("Name", "name"),
            Column::derived("City", |r: &TestRow| r.city.clone())
                .rendered(|r| format!("<span class=\"badge\">{}</span>", r.city)),
        ])
        .with_actions(|r| vec![RowAction::link("View", format!("/rows/{}", r.age))]);

        let view = spec.client(&data, &ClientQuery::default(), &url());
        assert!(view.has_actions);
        assert_eq!(view.span, 3);

        let row = &view.rows[0];
        assert!(!row.cells[0].raw);
        assert!(row.cells[1].raw);
        assert!(row.cells[1].text.starts_with("<span"));
        assert_eq!(row.actions, vec![RowAction::link("View", "/rows/21")]);
    }
}
