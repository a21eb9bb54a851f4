//! Admin order list with inline status editing.

use happyshop_core::action::{FetchOrders, UpdateOrder};
use happyshop_core::domain::{Address, Order, OrderStatus, OrderStatusUpdate, StatusPalette};
use happyshop_core::prelude::*;
use serde_json::Value;

use crate::error::SubmitError;
use crate::form_state::FormState;

fn react(outcome: Terminal<'_>) -> Vec<Effect> {
    match outcome {
        Terminal::Fulfilled(_) => vec![Effect::Notify(Toast::success("Status updated"))],
        Terminal::Rejected(err) => {
            tracing::warn!(error = %err, "Order status update rejected");
            vec![Effect::Notify(Toast::error("Error updating order status"))]
        }
    }
}

/// One table row as the page renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub index: usize,
    pub id: String,
    pub item_count: usize,
    pub total: f64,
    /// First address on the order, where it was shipped.
    pub address: Option<Address>,
    pub payment_mode: Option<String>,
    /// Order date as shown in the table, e.g. `Sat Mar 09 2024`.
    pub placed_on: Option<String>,
    pub status: OrderStatus,
    pub palette: StatusPalette,
    pub editing: bool,
}

impl OrderRow {
    fn new(index: usize, order: &Order, editing: bool) -> Self {
        Self {
            index,
            id: order.id.clone(),
            item_count: order.lines.len(),
            total: order.total,
            address: order.address.first().cloned(),
            payment_mode: order.payment_mode.clone(),
            placed_on: order
                .created_at
                .map(|at| at.format("%a %b %d %Y").to_string()),
            status: order.status.clone(),
            palette: order.status.palette(),
            editing,
        }
    }
}

pub struct AdminOrdersPage {
    ctx: AppContext,
    form: FormState,
    edit_index: Option<usize>,
    binder: ReactionBinder,
    _loader: ReactionBinder,
}

impl AdminOrdersPage {
    /// Mount and start loading the order list.
    pub fn mount(ctx: &AppContext) -> (Self, BoxFuture<'static, RequestStatus>) {
        let binder = ReactionBinder::bind(
            ctx.store.clone(),
            ctx.shell.clone(),
            ActionKind::UpdateOrder,
            react,
        );
        let loader = ReactionBinder::bind(
            ctx.store.clone(),
            ctx.shell.clone(),
            ActionKind::FetchOrders,
            |_: Terminal<'_>| Vec::new(),
        );
        let loading = ctx.dispatcher.dispatch(FetchOrders, ());
        let schema =
            FormSchema::new().field("status", vec![Rule::required("Status is required")]);

        let page = Self {
            ctx: ctx.clone(),
            form: FormState::new(schema),
            edit_index: None,
            binder,
            _loader: loader,
        };
        (page, loading)
    }

    pub fn rows(&self) -> Vec<OrderRow> {
        self.ctx.store.read(|state| {
            state
                .entities()
                .orders()
                .iter()
                .enumerate()
                .map(|(index, order)| OrderRow::new(index, order, self.edit_index == Some(index)))
                .collect()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.ctx.store.read(|s| s.entities().orders().is_empty())
    }

    pub fn edit_index(&self) -> Option<usize> {
        self.edit_index
    }

    /// Open the status picker on row `index`, seeded with its current status.
    pub fn begin_edit(&mut self, index: usize) -> bool {
        let current = self
            .ctx
            .store
            .read(|s| s.entities().orders().get(index).map(|o| o.status.clone()));
        let Some(status) = current else {
            return false;
        };
        self.edit_index = Some(index);
        self.form.reset();
        self.form.set("status", status.label());
        true
    }

    pub fn cancel_edit(&mut self) {
        self.edit_index = None;
        self.form.reset();
    }

    pub fn choose(&mut self, status: &OrderStatus) {
        self.form.set("status", status.label());
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn is_loading(&self) -> bool {
        self.binder.snapshot().is_pending()
    }

    /// Send the chosen status for the row being edited and close the picker.
    pub fn submit(&mut self) -> Result<BoxFuture<'static, RequestStatus>, SubmitError> {
        let index = self.edit_index.ok_or(SubmitError::NoSelection)?;
        let id = self
            .ctx
            .store
            .read(|s| s.entities().orders().get(index).map(|o| o.id.clone()))
            .ok_or(SubmitError::NoSelection)?;
        let update: OrderStatusUpdate = self.form.decode(&[("_id", Value::String(id))])?;

        self.edit_index = None;
        Ok(self.ctx.dispatcher.dispatch(UpdateOrder, update))
    }

    pub fn render(&mut self) -> Vec<Effect> {
        let effects = self.binder.observe();
        self.form.apply(&effects);
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use happyshop_core::testing::{RecordingShell, ScriptedApi};
    use std::sync::Arc;

    async fn mounted(api: Arc<ScriptedApi>) -> (AdminOrdersPage, AppContext, Arc<RecordingShell>) {
        let recorder = Arc::new(RecordingShell::default());
        let ctx = AppContext::new(api, recorder.shell());
        let (page, loading) = AdminOrdersPage::mount(&ctx);
        assert_eq!(loading.await, RequestStatus::Fulfilled);
        (page, ctx, recorder)
    }

    #[tokio::test]
    async fn test_rows_carry_shipping_details_and_status_palette() {
        let api = Arc::new(ScriptedApi::new());
        api.seed_full_order(
            serde_json::from_value(serde_json::json!({
                "_id": "o1",
                "item": [],
                "status": "Pending",
                "total": 98.5,
                "address": [{
                    "street": "12 Elm St",
                    "city": "Springfield",
                    "state": "IL",
                    "postalCode": "62701"
                }],
                "paymentMode": "CARD",
                "createdAt": "2024-03-09T10:00:00.000Z"
            }))
            .unwrap(),
        );
        api.seed_order("o2", "Lost in transit");
        let (mut page, _ctx, _) = mounted(api).await;

        assert!(page.begin_edit(1));
        let rows = page.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].palette.background, "#dfc9f7");
        assert!(!rows[0].editing);
        let address = rows[0].address.as_ref().unwrap();
        assert_eq!(address.city, "Springfield");
        assert_eq!(address.postal_code, "62701");
        assert_eq!(rows[0].payment_mode.as_deref(), Some("CARD"));
        assert_eq!(rows[0].placed_on.as_deref(), Some("Sat Mar 09 2024"));
        assert_eq!(rows[1].address, None);
        assert_eq!(rows[1].placed_on, None);
        assert_eq!(rows[1].status, OrderStatus::Other("Lost in transit".into()));
        assert_eq!(rows[1].palette.foreground, "#cc6d72");
        assert!(rows[1].editing);
        assert_eq!(page.form().draft().get("status"), Some("Lost in transit"));
    }

    #[tokio::test]
    async fn test_status_change_is_sent_and_committed() {
        let api = Arc::new(ScriptedApi::new());
        api.seed_order("o1", "Pending");
        let (mut page, ctx, recorder) = mounted(api.clone()).await;

        assert!(page.begin_edit(0));
        page.choose(&OrderStatus::OutForDelivery);
        let pending = page.submit().unwrap();
        assert_eq!(page.edit_index(), None);
        assert!(page.is_loading());
        assert_eq!(pending.await, RequestStatus::Fulfilled);
        page.render();

        assert_eq!(ctx.store.orders()[0].status, OrderStatus::OutForDelivery);
        assert_eq!(recorder.toasts(), vec![Toast::success("Status updated")]);
        assert_eq!(api.calls(ActionKind::UpdateOrder), 1);
    }

    #[tokio::test]
    async fn test_failed_update_and_missing_selection() {
        let api = Arc::new(ScriptedApi::new());
        api.seed_order("o1", "Pending");
        api.fail_next(ActionKind::UpdateOrder, "forbidden");
        let (mut page, _ctx, recorder) = mounted(api).await;

        assert!(matches!(page.submit(), Err(SubmitError::NoSelection)));
        assert!(!page.begin_edit(7));

        page.begin_edit(0);
        assert_eq!(page.submit().unwrap().await, RequestStatus::Rejected);
        page.render();
        page.render();
        assert_eq!(recorder.toasts(), vec![Toast::error("Error updating order status")]);
    }

    #[tokio::test]
    async fn test_empty_order_list() {
        let (page, _ctx, _) = mounted(Arc::new(ScriptedApi::new())).await;
        assert!(page.is_empty());
        assert!(page.rows().is_empty());
    }
}
