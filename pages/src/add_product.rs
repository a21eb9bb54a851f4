//! Admin page for creating a product.

use happyshop_core::action::AddProduct;
use happyshop_core::domain::ProductInput;
use happyshop_core::prelude::*;

use crate::error::SubmitError;
use crate::form_state::FormState;
use crate::product_form;

fn react(outcome: Terminal<'_>) -> Vec<Effect> {
    match outcome {
        Terminal::Fulfilled(_) => vec![
            Effect::ResetForm,
            Effect::Notify(Toast::success("New product added")),
            Effect::Navigate(Route::AdminDashboard),
        ],
        Terminal::Rejected(err) => {
            tracing::warn!(error = %err, "Product creation rejected");
            vec![Effect::Notify(Toast::error(
                "Error adding product, please try again later",
            ))]
        }
    }
}

pub struct AddProductPage {
    ctx: AppContext,
    form: FormState,
    binder: ReactionBinder,
}

impl AddProductPage {
    pub fn mount(ctx: &AppContext) -> Self {
        let binder = ReactionBinder::bind(
            ctx.store.clone(),
            ctx.shell.clone(),
            ActionKind::AddProduct,
            react,
        );
        Self {
            ctx: ctx.clone(),
            form: FormState::new(product_form::schema()),
            binder,
        }
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
        let input: ProductInput = self.form.decode(&[])?;
        Ok(self.ctx.dispatcher.dispatch(AddProduct, input))
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

    fn fill(page: &mut AddProductPage) {
        for (field, value) in [
            ("title", "Chair"),
            ("brand", "b1"),
            ("category", "c1"),
            ("description", "Oak chair"),
            ("price", "49.5"),
            ("discountPercentage", "10"),
            ("stockQuantity", "3"),
            ("thumbnail", "t.png"),
            ("image0", "a.png"),
            ("image1", "b.png"),
            ("image2", "c.png"),
            ("image3", "d.png"),
        ] {
            page.set(field, value);
        }
    }

    #[tokio::test]
    async fn test_created_product_resets_and_returns_to_dashboard() {
        let api = Arc::new(ScriptedApi::new());
        let recorder = Arc::new(RecordingShell::default());
        let ctx = AppContext::new(api.clone(), recorder.shell());
        let mut page = AddProductPage::mount(&ctx);
        fill(&mut page);

        assert_eq!(page.submit().unwrap().await, RequestStatus::Fulfilled);
        page.render();

        assert!(page.form().draft().is_empty());
        assert_eq!(recorder.toasts(), vec![Toast::success("New product added")]);
        assert_eq!(recorder.routes(), vec![Route::AdminDashboard]);
        let created = ctx.store.products();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].images.len(), 4);
    }

    #[tokio::test]
    async fn test_rejection_toasts_once_and_next_visit_starts_idle() {
        let api = Arc::new(ScriptedApi::new());
        api.fail_next(ActionKind::AddProduct, "duplicate title");
        let recorder = Arc::new(RecordingShell::default());
        let ctx = AppContext::new(api, recorder.shell());

        {
            let mut page = AddProductPage::mount(&ctx);
            fill(&mut page);
            assert_eq!(page.submit().unwrap().await, RequestStatus::Rejected);
            page.render();
            page.render();
            assert_eq!(page.form().draft().get("title"), Some("Chair"));
        }

        let toasts = recorder.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "Error adding product, please try again later");
        assert!(recorder.routes().is_empty());

        let mut page = AddProductPage::mount(&ctx);
        assert!(page.render().is_empty());
        assert_eq!(ctx.store.status(ActionKind::AddProduct).status, RequestStatus::Idle);
        assert!(ctx.store.status(ActionKind::AddProduct).error.is_none());
    }

    #[test]
    fn test_non_numeric_price_blocks_dispatch() {
        let api = Arc::new(ScriptedApi::new());
        let ctx = AppContext::new(api.clone(), Shell::default());
        let mut page = AddProductPage::mount(&ctx);
        fill(&mut page);
        page.set("price", "cheap");

        assert!(page.submit().is_err());
        assert_eq!(page.form().error("price"), Some("Must be a number"));
        assert_eq!(api.calls(ActionKind::AddProduct), 0);
    }

    #[test]
    fn test_fractional_stock_is_a_field_error() {
        let api = Arc::new(ScriptedApi::new());
        let ctx = AppContext::new(api.clone(), Shell::default());
        let mut page = AddProductPage::mount(&ctx);
        fill(&mut page);
        page.set("stockQuantity", "3.5");

        let err = page.submit().err().unwrap();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert_eq!(page.form().error("stockQuantity"), Some("Must be a whole number"));
        assert_eq!(page.form().errors().len(), 1);
        assert_eq!(api.calls(ActionKind::AddProduct), 0);
        assert_eq!(ctx.store.status(ActionKind::AddProduct).status, RequestStatus::Idle);
    }
}
