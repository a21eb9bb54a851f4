//! Admin page for editing an existing product.
//!
//! Mounting fetches the product; the form is pre-filled the first time it
//! arrives. Leaving the page clears the selected product.

use happyshop_core::action::{FetchProduct, UpdateProduct};
use happyshop_core::domain::ProductPatch;
use happyshop_core::prelude::*;
use serde_json::Value;

use crate::error::SubmitError;
use crate::form_state::FormState;
use crate::product_form;

fn react(outcome: Terminal<'_>) -> Vec<Effect> {
    match outcome {
        Terminal::Fulfilled(_) => vec![
            Effect::Notify(Toast::success("Product Updated")),
            Effect::Navigate(Route::AdminDashboard),
        ],
        Terminal::Rejected(err) => {
            tracing::warn!(error = %err, "Product update rejected");
            vec![Effect::Notify(Toast::error(
                "Error updating product, please try again later",
            ))]
        }
    }
}

pub struct ProductUpdatePage {
    ctx: AppContext,
    product_id: String,
    form: FormState,
    prefilled: bool,
    binder: ReactionBinder,
    _loader: ReactionBinder,
}

impl ProductUpdatePage {
    /// Mount for `product_id`; the returned future drives the initial fetch.
    pub fn mount(
        ctx: &AppContext,
        product_id: impl Into<String>,
    ) -> (Self, BoxFuture<'static, RequestStatus>) {
        let product_id = product_id.into();
        let binder = ReactionBinder::bind(
            ctx.store.clone(),
            ctx.shell.clone(),
            ActionKind::UpdateProduct,
            react,
        )
        .on_teardown(|store| store.clear_selected_product());
        let loader = ReactionBinder::bind(
            ctx.store.clone(),
            ctx.shell.clone(),
            ActionKind::FetchProduct,
            |_: Terminal<'_>| Vec::new(),
        );
        let loading = ctx.dispatcher.dispatch(FetchProduct, product_id.clone());

        let page = Self {
            ctx: ctx.clone(),
            product_id,
            form: FormState::new(product_form::schema()),
            prefilled: false,
            binder,
            _loader: loader,
        };
        (page, loading)
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Whether the product has arrived and the form can be shown.
    pub fn is_ready(&self) -> bool {
        self.ctx
            .store
            .read(|s| s.entities().selected_product().is_some())
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn is_loading(&self) -> bool {
        self.binder.snapshot().is_pending()
    }

    pub fn submit(&mut self) -> Result<BoxFuture<'static, RequestStatus>, SubmitError> {
        if !self.is_ready() {
            return Err(SubmitError::NotLoaded);
        }
        let patch: ProductPatch = self
            .form
            .decode(&[("_id", Value::String(self.product_id.clone()))])?;
        Ok(self.ctx.dispatcher.dispatch(UpdateProduct, patch))
    }

    pub fn render(&mut self) -> Vec<Effect> {
        if !self.prefilled {
            if let Some(product) = self.ctx.store.selected_product() {
                for (field, value) in product_form::draft_from(&product).iter() {
                    if self.form.draft().get(field).is_none() {
                        self.form.set(field, value);
                    }
                }
                self.prefilled = true;
            }
        }
        let effects = self.binder.observe();
        self.form.apply(&effects);
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use happyshop_core::domain::{Product, Taxon};
    use happyshop_core::testing::{RecordingShell, ScriptedApi};
    use std::sync::Arc;

    fn product() -> Product {
        Product {
            id: "p1".into(),
            title: "Chair".into(),
            description: "Oak".into(),
            price: 49.5,
            discount_percentage: 10.0,
            stock_quantity: 3,
            brand: Taxon {
                id: "b1".into(),
                name: "Acme".into(),
            },
            category: Taxon {
                id: "c1".into(),
                name: "Furniture".into(),
            },
            thumbnail: "t.png".into(),
            images: vec!["a.png".into(), "b.png".into(), "c.png".into(), "d.png".into()],
        }
    }

    #[tokio::test]
    async fn test_prefill_then_update_sends_id_and_returns_to_dashboard() {
        let api = Arc::new(ScriptedApi::new());
        api.seed_product(product());
        let recorder = Arc::new(RecordingShell::default());
        let ctx = AppContext::new(api.clone(), recorder.shell());

        let (mut page, loading) = ProductUpdatePage::mount(&ctx, "p1");
        assert!(!page.is_ready());
        assert!(matches!(page.submit(), Err(SubmitError::NotLoaded)));

        assert_eq!(loading.await, RequestStatus::Fulfilled);
        page.render();
        assert_eq!(page.form().draft().get("title"), Some("Chair"));

        page.set("title", "Armchair");
        assert_eq!(page.submit().unwrap().await, RequestStatus::Fulfilled);
        page.render();

        assert_eq!(api.product("p1").unwrap().title, "Armchair");
        assert_eq!(recorder.toasts(), vec![Toast::success("Product Updated")]);
        assert_eq!(recorder.routes(), vec![Route::AdminDashboard]);
    }

    #[tokio::test]
    async fn test_leaving_clears_selection_and_statuses() {
        let api = Arc::new(ScriptedApi::new());
        api.seed_product(product());
        api.fail_next(ActionKind::UpdateProduct, "validation failed");
        let recorder = Arc::new(RecordingShell::default());
        let ctx = AppContext::new(api, recorder.shell());

        {
            let (mut page, loading) = ProductUpdatePage::mount(&ctx, "p1");
            loading.await;
            page.render();
            assert_eq!(page.submit().unwrap().await, RequestStatus::Rejected);
            page.render();
        }

        assert_eq!(
            recorder.toasts(),
            vec![Toast::error("Error updating product, please try again later")]
        );
        assert!(ctx.store.selected_product().is_none());
        assert_eq!(ctx.store.status(ActionKind::UpdateProduct).status, RequestStatus::Idle);
        assert_eq!(ctx.store.status(ActionKind::FetchProduct).status, RequestStatus::Idle);
    }

    #[tokio::test]
    async fn test_fetch_landing_after_leave_is_ignored() {
        let api = Arc::new(ScriptedApi::new());
        api.seed_product(product());
        let ctx = AppContext::new(api, Shell::default());

        let (page, loading) = ProductUpdatePage::mount(&ctx, "p1");
        drop(page);
        loading.await;

        assert!(ctx.store.selected_product().is_none());
    }
}
