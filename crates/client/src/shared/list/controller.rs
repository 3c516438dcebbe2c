//! Состояние списка: страница, фильтры, сортировка, выбор строк.
//!
//! Shared by the products, price-history and API-log views. A fetch is a
//! two-step affair (`begin_fetch` / `complete_fetch`) so a UI holding the
//! controller behind a lock does not keep it locked across the network
//! call; `fetch` does both steps in one go.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use contracts::shared::list::pagination::{page_window, shown_range};
use contracts::shared::list::sort::sort_records;
use contracts::shared::list::{
    ListFilter, ListRecord, ListingQuery, Paginated, SortSpec, Sortable, DEFAULT_PER_PAGE,
    MAX_PER_PAGE,
};

use crate::shared::api_utils::ApiError;
use crate::shared::notify::{Notification, Notifier};
use crate::system::session::Session;

type FieldOf<S> = <<S as ListSource>::Record as Sortable>::Field;
type IdOf<S> = <<S as ListSource>::Record as ListRecord>::Id;

/// Backend endpoint behind one list view
#[async_trait]
pub trait ListSource: Send + Sync {
    type Record: ListRecord + Clone + Send + Sync;
    type Filter: ListFilter + Send + Sync;

    /// Used in notifications and logs
    const TITLE: &'static str;

    async fn fetch(
        &self,
        query: &ListingQuery<Self::Filter>,
    ) -> Result<Paginated<Self::Record>, ApiError>;

    /// `None` keeps the order the backend returned
    fn default_sort() -> Option<SortSpec<<Self::Record as Sortable>::Field>> {
        None
    }

    fn default_per_page() -> u32 {
        DEFAULT_PER_PAGE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket<F> {
    pub seq: u64,
    pub query: ListingQuery<F>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded { count: usize },
    /// A newer fetch was issued meanwhile; this response was dropped
    Stale,
    /// Previous page kept, user notified
    Failed(String),
    /// Token missing or rejected; session cleared
    LoginRequired,
}

pub struct ListingController<S: ListSource> {
    source: S,
    session: Session,
    notifier: Arc<dyn Notifier>,

    page: u32,
    per_page: u32,
    filter: S::Filter,
    sort: Option<SortSpec<FieldOf<S>>>,

    items: Vec<S::Record>,
    total: u64,
    pages: u32,
    selection: HashSet<IdOf<S>>,
    loading: bool,

    last_issued: u64,
}

impl<S: ListSource> ListingController<S> {
    pub fn new(source: S, session: Session, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            source,
            session,
            notifier,
            page: 1,
            per_page: S::default_per_page(),
            filter: S::Filter::default(),
            sort: S::default_sort(),
            items: Vec::new(),
            total: 0,
            pages: 0,
            selection: HashSet::new(),
            loading: false,
            last_issued: 0,
        }
    }

    // ------------------------------------------------------------------
    // Request shaping
    // ------------------------------------------------------------------

    /// Replace the filter. Always goes back to page 1 so a narrower filter
    /// never lands past the last page.
    pub fn set_filter(&mut self, filter: S::Filter) {
        self.filter = filter.normalized();
        self.page = 1;
    }

    pub fn update_filter(&mut self, change: impl FnOnce(&mut S::Filter)) {
        let mut filter = self.filter.clone();
        change(&mut filter);
        self.set_filter(filter);
    }

    pub fn reset_filter(&mut self) {
        self.set_filter(S::Filter::default());
    }

    pub fn set_per_page(&mut self, per_page: u32) {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self.page = 1;
    }

    /// Clamped to the known page count once a page has been loaded
    pub fn set_page(&mut self, page: u32) {
        let last = self.pages.max(1);
        self.page = page.clamp(1, last);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    pub fn query(&self) -> ListingQuery<S::Filter> {
        ListingQuery::new(self.page, self.per_page, self.filter.clone())
    }

    // ------------------------------------------------------------------
    // Fetching
    // ------------------------------------------------------------------

    /// Tag a new request. Any response for an older ticket will be dropped.
    pub fn begin_fetch(&mut self) -> FetchTicket<S::Filter> {
        self.last_issued += 1;
        self.loading = true;
        FetchTicket {
            seq: self.last_issued,
            query: self.query(),
        }
    }

    pub fn complete_fetch(
        &mut self,
        seq: u64,
        result: Result<Paginated<S::Record>, ApiError>,
    ) -> FetchOutcome {
        if seq < self.last_issued {
            tracing::debug!(
                "{}: dropping response #{} (latest is #{})",
                S::TITLE,
                seq,
                self.last_issued
            );
            return FetchOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(page) => {
                self.items = page.items;
                self.total = page.total;
                self.pages = page.pages;
                self.selection.clear();
                self.apply_sort();
                FetchOutcome::Loaded {
                    count: self.items.len(),
                }
            }
            Err(ApiError::Unauthorized(detail)) => {
                tracing::warn!("{}: token rejected ({}), login required", S::TITLE, detail);
                self.session.clear();
                self.notifier.notify(Notification::error(
                    "Session expired",
                    "Please log in again",
                ));
                FetchOutcome::LoginRequired
            }
            Err(e) => {
                tracing::error!("{}: fetch failed: {}", S::TITLE, e);
                let message = e.to_string();
                self.notifier.notify(Notification::error(
                    format!("Could not load {}", S::TITLE),
                    message.clone(),
                ));
                FetchOutcome::Failed(message)
            }
        }
    }

    pub async fn fetch(&mut self) -> FetchOutcome {
        if !self.session.is_authenticated() {
            return FetchOutcome::LoginRequired;
        }
        let ticket = self.begin_fetch();
        let result = self.source.fetch(&ticket.query).await;
        self.complete_fetch(ticket.seq, result)
    }

    // ------------------------------------------------------------------
    // Client-side sort of the loaded page
    // ------------------------------------------------------------------

    pub fn toggle_sort(&mut self, field: FieldOf<S>) {
        match self.sort.as_mut() {
            Some(spec) => spec.toggle(field),
            None => self.sort = Some(SortSpec::new(field)),
        }
        self.apply_sort();
    }

    pub fn sort_indicator(&self, field: FieldOf<S>) -> &'static str {
        match &self.sort {
            Some(spec) => spec.indicator(field),
            None => " ⇅",
        }
    }

    fn apply_sort(&mut self) {
        if let Some(spec) = &self.sort {
            sort_records(&mut self.items, spec);
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn toggle_select(&mut self, id: IdOf<S>) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    /// All loaded rows selected -> clear, otherwise select all loaded rows
    pub fn toggle_select_all(&mut self) {
        let all_selected = !self.items.is_empty()
            && self
                .items
                .iter()
                .all(|item| self.selection.contains(&item.record_id()));
        if all_selected {
            self.selection.clear();
        } else {
            self.selection = self.items.iter().map(ListRecord::record_id).collect();
        }
    }

    pub fn is_selected(&self, id: &IdOf<S>) -> bool {
        self.selection.contains(id)
    }

    /// Selected ids in display order
    pub fn selected_ids(&self) -> Vec<IdOf<S>> {
        self.items
            .iter()
            .map(ListRecord::record_id)
            .filter(|id| self.selection.contains(id))
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    // ------------------------------------------------------------------
    // Local edits and accessors
    // ------------------------------------------------------------------

    /// Patch one loaded row in place (e.g. after a successful toggle)
    pub fn update_item(&mut self, id: &IdOf<S>, change: impl FnOnce(&mut S::Record)) -> bool {
        match self.items.iter_mut().find(|item| item.record_id() == *id) {
            Some(item) => {
                change(item);
                true
            }
            None => false,
        }
    }

    pub fn find(&self, id: &IdOf<S>) -> Option<&S::Record> {
        self.items.iter().find(|item| item.record_id() == *id)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub fn items(&self) -> &[S::Record] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn filter(&self) -> &S::Filter {
        &self.filter
    }

    pub fn sort(&self) -> Option<&SortSpec<FieldOf<S>>> {
        self.sort.as_ref()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// "Showing X to Y of Z"
    pub fn shown_range(&self) -> Option<(u64, u64)> {
        shown_range(self.page, self.per_page, self.total)
    }

    pub fn page_buttons(&self, width: u32) -> Vec<u32> {
        page_window(self.page, self.pages, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::notify::{NotificationLevel, NotificationQueue};
    use contracts::shared::list::SortKey;
    use serde::Serialize;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        name: Option<String>,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum RowField {
        Name,
        Id,
    }

    impl Sortable for Row {
        type Field = RowField;

        fn sort_key(&self, field: RowField) -> SortKey<'_> {
            match field {
                RowField::Name => self.name.as_deref().into(),
                RowField::Id => SortKey::Number(f64::from(self.id)),
            }
        }
    }

    impl ListRecord for Row {
        type Id = u32;

        fn record_id(&self) -> u32 {
            self.id
        }
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    struct RowFilter {
        #[serde(skip_serializing_if = "Option::is_none")]
        active: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        has_stock: Option<bool>,
    }

    impl ListFilter for RowFilter {}

    /// Replays canned results and records the queries it was asked for
    #[derive(Default)]
    struct ScriptedSource {
        queries: Mutex<Vec<String>>,
        results: Mutex<Vec<Result<Paginated<Row>, ApiError>>>,
    }

    #[async_trait]
    impl ListSource for ScriptedSource {
        type Record = Row;
        type Filter = RowFilter;

        const TITLE: &'static str = "rows";

        async fn fetch(&self, query: &ListingQuery<RowFilter>) -> Result<Paginated<Row>, ApiError> {
            self.queries
                .lock()
                .unwrap()
                .push(query.to_query_string().unwrap());
            self.results.lock().unwrap().remove(0)
        }

        fn default_sort() -> Option<SortSpec<RowField>> {
            Some(SortSpec::new(RowField::Name))
        }
    }

    fn row(id: u32, name: Option<&str>) -> Row {
        Row {
            id,
            name: name.map(str::to_string),
        }
    }

    fn page_of(items: Vec<Row>, page: u32, pages: u32) -> Paginated<Row> {
        Paginated {
            total: u64::from(pages) * 10,
            items,
            page,
            pages,
        }
    }

    fn controller(
        results: Vec<Result<Paginated<Row>, ApiError>>,
    ) -> (ListingController<ScriptedSource>, Arc<NotificationQueue>, Session) {
        let source = ScriptedSource {
            queries: Mutex::new(Vec::new()),
            results: Mutex::new(results),
        };
        let session = Session::in_memory();
        session.login("token".into(), None);
        let notifications = Arc::new(NotificationQueue::default());
        let ctl = ListingController::new(source, session.clone(), notifications.clone());
        (ctl, notifications, session)
    }

    fn names(ctl: &ListingController<ScriptedSource>) -> Vec<Option<String>> {
        ctl.items().iter().map(|r| r.name.clone()).collect()
    }

    #[tokio::test]
    async fn test_filter_change_resets_page_before_fetch() {
        let first = page_of(vec![row(1, Some("a"))], 1, 5);
        let second = page_of(vec![row(2, Some("b"))], 1, 2);
        let (mut ctl, _, _) = controller(vec![Ok(first), Ok(second)]);

        ctl.update_filter(|f| f.active = Some(true));
        ctl.fetch().await;
        ctl.set_page(3);
        assert_eq!(ctl.page(), 3);

        ctl.update_filter(|f| f.has_stock = Some(true));
        assert_eq!(ctl.page(), 1);
        ctl.fetch().await;

        let queries = ctl.source().queries.lock().unwrap().clone();
        assert_eq!(
            queries,
            vec![
                "page=1&per_page=10&active=true",
                "page=1&per_page=10&active=true&has_stock=true",
            ]
        );
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let (mut ctl, _, _) = controller(vec![]);
        ctl.pages = 10;
        ctl.set_page(4);
        ctl.set_per_page(50);
        assert_eq!(ctl.page(), 1);
        assert_eq!(ctl.per_page(), 50);

        ctl.set_per_page(1000);
        assert_eq!(ctl.per_page(), MAX_PER_PAGE);
    }

    #[test]
    fn test_set_page_clamps_to_known_pages() {
        let (mut ctl, _, _) = controller(vec![]);
        ctl.set_page(0);
        assert_eq!(ctl.page(), 1);

        ctl.pages = 4;
        ctl.set_page(9);
        assert_eq!(ctl.page(), 4);
        ctl.next_page();
        assert_eq!(ctl.page(), 4);
        ctl.prev_page();
        assert_eq!(ctl.page(), 3);
    }

    #[tokio::test]
    async fn test_loaded_page_is_sorted_with_missing_last() {
        let items = vec![row(1, Some("b")), row(2, None), row(3, Some("a"))];
        let (mut ctl, _, _) = controller(vec![Ok(page_of(items, 1, 1))]);

        assert_eq!(ctl.fetch().await, FetchOutcome::Loaded { count: 3 });
        assert_eq!(names(&ctl), vec![Some("a".into()), Some("b".into()), None]);

        ctl.toggle_sort(RowField::Name);
        assert_eq!(names(&ctl), vec![Some("b".into()), Some("a".into()), None]);
        assert_eq!(ctl.sort_indicator(RowField::Name), " ▼");

        ctl.toggle_sort(RowField::Id);
        let ids: Vec<u32> = ctl.items().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_selection_survives_sort_but_not_refetch() {
        let items = vec![row(1, Some("b")), row(2, Some("c")), row(3, Some("a"))];
        let (mut ctl, _, _) = controller(vec![
            Ok(page_of(items.clone(), 1, 1)),
            Ok(page_of(items, 1, 1)),
        ]);
        ctl.fetch().await;

        ctl.toggle_select(2);
        ctl.toggle_select(3);
        ctl.toggle_sort(RowField::Name);
        assert!(ctl.is_selected(&2));
        assert!(ctl.is_selected(&3));
        assert_eq!(ctl.selected_ids(), vec![2, 3]);

        ctl.toggle_select(3);
        assert_eq!(ctl.selected_count(), 1);

        ctl.fetch().await;
        assert_eq!(ctl.selected_count(), 0);
    }

    #[tokio::test]
    async fn test_select_all_toggles() {
        let items = vec![row(1, Some("a")), row(2, Some("b"))];
        let (mut ctl, _, _) = controller(vec![Ok(page_of(items, 1, 1))]);
        ctl.fetch().await;

        ctl.toggle_select_all();
        assert_eq!(ctl.selected_count(), 2);
        ctl.toggle_select_all();
        assert_eq!(ctl.selected_count(), 0);
    }

    #[tokio::test]
    async fn test_select_all_ignores_ids_not_on_page() {
        let items = vec![row(1, Some("a")), row(2, Some("b"))];
        let (mut ctl, _, _) = controller(vec![Ok(page_of(items, 1, 1))]);
        ctl.fetch().await;

        ctl.toggle_select(1);
        ctl.toggle_select(99);
        assert_eq!(ctl.selected_count(), 2);

        ctl.toggle_select_all();
        assert!(ctl.is_selected(&1));
        assert!(ctl.is_selected(&2));
        assert_eq!(ctl.selected_ids(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_page() {
        let items = vec![row(1, Some("a"))];
        let (mut ctl, notifications, _) =
            controller(vec![Ok(page_of(items, 1, 3)), Err(ApiError::Timeout)]);
        ctl.fetch().await;
        ctl.toggle_select(1);

        let outcome = ctl.fetch().await;
        assert_eq!(outcome, FetchOutcome::Failed("API request timed out".into()));
        assert_eq!(ctl.items().len(), 1);
        assert_eq!(ctl.pages(), 3);
        assert!(!ctl.is_loading());

        let shown = notifications.drain();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].level, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        let (mut ctl, _, session) =
            controller(vec![Err(ApiError::Unauthorized("expired".into()))]);

        assert_eq!(ctl.fetch().await, FetchOutcome::LoginRequired);
        assert!(!session.is_authenticated());
        // no token: nothing is sent at all
        assert_eq!(ctl.fetch().await, FetchOutcome::LoginRequired);
        assert_eq!(ctl.source().queries.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_out_of_order_response_is_dropped() {
        let (mut ctl, _, _) = controller(vec![]);

        ctl.set_page(1);
        let older = ctl.begin_fetch();
        ctl.pages = 5;
        ctl.set_page(2);
        let newer = ctl.begin_fetch();
        assert!(newer.seq > older.seq);
        assert_eq!(newer.query.page, 2);

        let outcome = ctl.complete_fetch(newer.seq, Ok(page_of(vec![row(20, Some("new"))], 2, 5)));
        assert_eq!(outcome, FetchOutcome::Loaded { count: 1 });

        let outcome = ctl.complete_fetch(older.seq, Ok(page_of(vec![row(10, Some("old"))], 1, 5)));
        assert_eq!(outcome, FetchOutcome::Stale);
        assert_eq!(ctl.items()[0].id, 20);
    }

    #[test]
    fn test_update_item_in_place() {
        let (mut ctl, _, _) = controller(vec![]);
        ctl.complete_fetch(0, Ok(page_of(vec![row(1, Some("a"))], 1, 1)));
        assert!(ctl.update_item(&1, |r| r.name = Some("z".into())));
        assert!(!ctl.update_item(&99, |_| {}));
        assert_eq!(ctl.find(&1).unwrap().name.as_deref(), Some("z"));
    }
}
