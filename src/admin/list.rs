// src/admin/list.rs
use std::cmp::Ordering;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::client::AdminClient;
use super::types::{FieldFilter, ListQuery, Page, Resource, SortOrder};
use crate::utils::error::Result;

/// The list/filter/sort/paginate state every console page shares. Changing
/// the search, a filter, the sort or the page size resets to page 1 before
/// the next fetch; paging forward/backward follows the backend-supplied
/// `has_next`/`has_previous` facts from the last applied page.
pub struct ListController<T> {
    resource: Resource,
    query: ListQuery,
    items: Vec<T>,
    total_count: usize,
    total_pages: usize,
    has_next: bool,
    has_previous: bool,
}

impl<T: Serialize> ListController<T> {
    pub fn new(resource: Resource, page_size: usize) -> Self {
        Self {
            resource,
            query: ListQuery::new(page_size),
            items: Vec::new(),
            total_count: 0,
            total_pages: 0,
            has_next: false,
            has_previous: false,
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        self.query.search = if search.trim().is_empty() { None } else { Some(search) };
        self.query.page = 1;
    }

    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.query.filters.iter_mut().find(|f| f.field == field) {
            Some(filter) => filter.value = value,
            None => self.query.filters.push(FieldFilter { field, value }),
        }
        self.query.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.query.filters.clear();
        self.query.page = 1;
    }

    pub fn set_sort(&mut self, field: impl Into<String>, order: SortOrder) {
        self.query.sort_field = Some(field.into());
        self.query.sort_order = order;
        self.query.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.query.page_size = page_size;
        self.query.page = 1;
    }

    pub fn next_page(&mut self) -> bool {
        if self.has_next {
            self.query.page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if self.has_previous && self.query.page > 1 {
            self.query.page -= 1;
            true
        } else {
            false
        }
    }

    /// The query actually sent to the backend. Client-side-sorted resources
    /// never send sort parameters.
    pub fn request_query(&self) -> ListQuery {
        let mut query = self.query.clone();
        if self.resource.sorts_client_side() {
            query.sort_field = None;
        }
        query
    }

    /// Take a fetched page over as the current view. For client-side-sorted
    /// resources the requested order is applied to this page only; it does
    /// not hold across pages.
    pub fn apply(&mut self, page: Page<T>) {
        self.items = page.items;
        self.total_count = page.total_count;
        self.total_pages = page.total_pages;
        self.has_next = page.has_next;
        self.has_previous = page.has_previous;

        if self.resource.sorts_client_side() {
            self.sort_items_locally();
        }
    }

    fn sort_items_locally(&mut self) {
        let Some(field) = self.query.sort_field.clone() else {
            return;
        };

        let mut keyed: Vec<(Value, T)> = self
            .items
            .drain(..)
            .map(|item| {
                let key = serde_json::to_value(&item)
                    .ok()
                    .and_then(|value| value.get(&field).cloned())
                    .unwrap_or(Value::Null);
                (key, item)
            })
            .collect();
        keyed.sort_by(|a, b| compare_values(&a.0, &b.0));
        if self.query.sort_order == SortOrder::Desc {
            keyed.reverse();
        }
        self.items = keyed.into_iter().map(|(_, item)| item).collect();
    }
}

impl<T: Serialize + DeserializeOwned> ListController<T> {
    /// Fetch the current page from the backend and take it over.
    pub async fn refresh(&mut self, client: &AdminClient) -> Result<()> {
        let page = client.list(self.resource, &self.request_query()).await?;
        self.apply(page);
        Ok(())
    }

    /// Delete one record, then re-fetch the current page rather than splicing
    /// locally; the page contents can shift as rows move up.
    pub async fn delete_and_refresh(&mut self, client: &AdminClient, id: &str) -> Result<()> {
        client.delete(self.resource, id).await?;
        self.refresh(client).await
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::types::OccupationProfession;
    use uuid::Uuid;

    fn page<T>(items: Vec<T>, page_no: usize) -> Page<T> {
        Page {
            items,
            page: page_no,
            page_size: 10,
            total_count: 50,
            total_pages: 5,
            has_next: page_no < 5,
            has_previous: page_no > 1,
        }
    }

    fn controller_on_page_3() -> ListController<OccupationProfession> {
        let mut controller = ListController::new(Resource::OccupationsProfessions, 10);
        controller.apply(page(vec![], 1));
        assert!(controller.next_page());
        controller.apply(page(vec![], 2));
        assert!(controller.next_page());
        assert_eq!(controller.query().page, 3);
        controller
    }

    fn taxonomy(occupation: &str) -> OccupationProfession {
        OccupationProfession {
            id: Uuid::new_v4(),
            occupation: occupation.to_string(),
            profession: "General".to_string(),
            risk_category: None,
        }
    }

    #[test]
    fn test_search_change_resets_to_page_1() {
        let mut controller = controller_on_page_3();
        controller.set_search("engineer");
        assert_eq!(controller.query().page, 1);
    }

    #[test]
    fn test_filter_change_resets_to_page_1() {
        let mut controller = controller_on_page_3();
        controller.set_filter("risk_category", "high");
        assert_eq!(controller.query().page, 1);
    }

    #[test]
    fn test_sort_change_resets_to_page_1() {
        let mut controller = controller_on_page_3();
        controller.set_sort("occupation", SortOrder::Desc);
        assert_eq!(controller.query().page, 1);
    }

    #[test]
    fn test_page_size_change_resets_to_page_1() {
        let mut controller = controller_on_page_3();
        controller.set_page_size(50);
        assert_eq!(controller.query().page, 1);
    }

    #[test]
    fn test_paging_follows_backend_facts() {
        let mut controller: ListController<OccupationProfession> =
            ListController::new(Resource::OccupationsProfessions, 10);
        // Nothing applied yet, so there is nowhere to go.
        assert!(!controller.next_page());
        assert!(!controller.previous_page());

        controller.apply(page(vec![], 5));
        assert!(!controller.next_page());
    }

    #[test]
    fn test_taxonomy_listing_suppresses_backend_sort() {
        let mut controller: ListController<OccupationProfession> =
            ListController::new(Resource::OccupationsProfessions, 10);
        controller.set_sort("occupation", SortOrder::Asc);
        assert!(controller.request_query().sort_field.is_none());

        let mut users: ListController<crate::admin::types::User> =
            ListController::new(Resource::Users, 10);
        users.set_sort("full_name", SortOrder::Asc);
        assert_eq!(users.request_query().sort_field.as_deref(), Some("full_name"));
    }

    #[test]
    fn test_taxonomy_page_is_sorted_locally() {
        let mut controller: ListController<OccupationProfession> =
            ListController::new(Resource::OccupationsProfessions, 10);
        controller.set_sort("occupation", SortOrder::Asc);
        controller.apply(page(
            vec![taxonomy("Trader"), taxonomy("architect"), taxonomy("Nurse")],
            1,
        ));

        let order: Vec<&str> = controller
            .items()
            .iter()
            .map(|t| t.occupation.as_str())
            .collect();
        assert_eq!(order, vec!["architect", "Nurse", "Trader"]);
    }

    #[test]
    fn test_descending_local_sort() {
        let mut controller: ListController<OccupationProfession> =
            ListController::new(Resource::OccupationsProfessions, 10);
        controller.set_sort("occupation", SortOrder::Desc);
        controller.apply(page(vec![taxonomy("Nurse"), taxonomy("Trader")], 1));

        let order: Vec<&str> = controller
            .items()
            .iter()
            .map(|t| t.occupation.as_str())
            .collect();
        assert_eq!(order, vec!["Trader", "Nurse"]);
    }

    #[test]
    fn test_blank_search_clears_the_term() {
        let mut controller = controller_on_page_3();
        controller.set_search("  ");
        assert!(controller.query().search.is_none());
        assert_eq!(controller.query().page, 1);
    }
}
