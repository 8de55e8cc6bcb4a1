//! View state for the order list and a single order's details.
//!
//! State is only replaced after every request of an action succeeded, so a
//! failed action leaves what the user saw before untouched.

use crate::{
    api::{orders, projects, ApiClient},
    error::{AppError, Result},
    models::{placeholder_timeline, ConstructionStage, Order, ProjectTemplate},
    services::{forms::OrderForm, session::Session, status::active_stage_index},
};

pub const DEFAULT_PAGE_SIZE: u32 = 9;

/// 1-based pagination as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Pagination {
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBoard {
    pub orders: Vec<Order>,
    pub pagination: Pagination,
}

impl OrderBoard {
    pub fn new(page_size: u32) -> Self {
        Self {
            orders: Vec::new(),
            pagination: Pagination {
                current: 1,
                page_size,
                total: 0,
            },
        }
    }

    /// Load the 1-based `page`. Requires a signed-in session.
    pub async fn load(&mut self, client: &ApiClient, session: &Session, page: u32) -> Result<()> {
        if !session.is_authenticated() {
            return Err(AppError::Unauthenticated);
        }

        let size = self.pagination.page_size;
        let response = orders::list_orders(client, session, page.saturating_sub(1), size).await?;

        let mut loaded = response.content;
        loaded.sort_by_key(|order| order.id);

        self.orders = loaded;
        self.pagination = Pagination {
            current: response.current_page + 1,
            page_size: size,
            total: response.total_elements,
        };
        tracing::debug!(
            page = self.pagination.current,
            total = self.pagination.total,
            "Orders loaded"
        );
        Ok(())
    }

    /// Validate and submit `form`, then reload the current page.
    ///
    /// A failed reload keeps the previous page; the order itself was created.
    pub async fn submit_order(
        &mut self,
        client: &ApiClient,
        session: &Session,
        form: &OrderForm,
    ) -> Result<Order> {
        let new_order = form.validate()?;
        let created = orders::create_order(client, session, &new_order).await?;

        let current = self.pagination.current;
        if let Err(e) = self.load(client, session, current).await {
            tracing::warn!(error = %e, "Failed to refresh orders after submission");
        }

        Ok(created)
    }
}

impl Default for OrderBoard {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Everything shown on an order's details page.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: Order,
    pub project: Option<ProjectTemplate>,
    pub stages: Vec<ConstructionStage>,
    pub selected_stage: usize,
}

impl OrderDetails {
    /// Fetch the order and, when it references one, its project template.
    pub async fn load(client: &ApiClient, session: &Session, order_id: i64) -> Result<Self> {
        let order = orders::get_order(client, session, order_id).await?;

        let project = match order.project_template_id {
            Some(project_id) => Some(projects::get_project(client, session, project_id).await?),
            None => None,
        };

        let stages = placeholder_timeline();
        let selected_stage = active_stage_index(&stages);

        Ok(Self {
            order,
            project,
            stages,
            selected_stage,
        })
    }

    /// Switch the stage overview to `index`; out-of-range indexes are ignored.
    pub fn select_stage(&mut self, index: usize) -> bool {
        if index < self.stages.len() {
            self.selected_stage = index;
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<&ConstructionStage> {
        self.stages.get(self.selected_stage)
    }

    pub fn project_name(&self) -> &str {
        self.project
            .as_ref()
            .map(|p| p.name.as_str())
            .or(self.order.project_template_name.as_deref())
            .unwrap_or("")
    }
}
