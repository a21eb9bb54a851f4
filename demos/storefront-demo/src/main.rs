//! Walks an admin through the storefront pages.
//!
//! Runs against an in-memory backend by default. Pass `--live` to use the
//! HTTP backend configured by `HAPPYSHOP_API_BASE_URL`.

use anyhow::Result;
use happyshop_core::prelude::*;
use happyshop_core::testing::ScriptedApi;
use happyshop_core::{ClientConfig, StorefrontApi, telemetry};
use happyshop_http::HttpApi;
use happyshop_pages::{
    AddProductPage, AdminOrdersPage, LoginPage, ProductUpdatePage, SubmitError, navbar,
};
use std::sync::Arc;

fn scripted_backend() -> Arc<ScriptedApi> {
    let api = ScriptedApi::new();
    api.set_login_profile(true, true);
    api.seed_order("o-1001", "Pending");
    api.seed_order("o-1002", "Dispatched");
    api.fail_next(ActionKind::AddProduct, "duplicate title");
    Arc::new(api)
}

fn fill_product(page: &mut AddProductPage) {
    for (field, value) in [
        ("title", "Walnut desk"),
        ("brand", "b-1"),
        ("category", "c-1"),
        ("description", "Solid walnut, 140cm"),
        ("price", "349.90"),
        ("discountPercentage", "5"),
        ("stockQuantity", "12"),
        ("thumbnail", "https://cdn.example/desk.png"),
        ("image0", "https://cdn.example/desk-0.png"),
        ("image1", "https://cdn.example/desk-1.png"),
        ("image2", "https://cdn.example/desk-2.png"),
        ("image3", "https://cdn.example/desk-3.png"),
    ] {
        page.set(field, value);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    telemetry::init_stdout_tracing();

    let api: Arc<dyn StorefrontApi> = if std::env::args().any(|a| a == "--live") {
        let config = ClientConfig::from_env()?;
        Arc::new(HttpApi::new(config)?)
    } else {
        scripted_backend()
    };
    let ctx = AppContext::new(api, Shell::default());

    // 1. Sign in
    {
        let mut login = LoginPage::mount(&ctx);
        login.set("email", "admin@happyshop.test");
        login.set("password", "");
        if let Err(SubmitError::Invalid(errors)) = login.submit() {
            for (field, message) in errors.iter() {
                tracing::info!(field, error = message, "Field error");
            }
        }
        login.set("password", "Sup3rSecret");
        let status = login.submit()?.await;
        tracing::info!(%status, "Login settled");
        login.render();
    }

    let bar = navbar::view(&ctx.store, false);
    tracing::info!(menu = ?bar.menu.iter().map(|e| e.label).collect::<Vec<_>>(), "Navbar");

    // 2. Add a product: the first attempt is rejected, the retry succeeds
    for attempt in 1..=2 {
        let mut page = AddProductPage::mount(&ctx);
        fill_product(&mut page);
        let status = page.submit()?.await;
        tracing::info!(attempt, %status, "Add product settled");
        page.render();
    }

    // 3. Dashboard: the order list and the editor for the new product load together
    let created = ctx.store.products().pop().map(|p| p.id);
    let (mut orders, orders_loading) = AdminOrdersPage::mount(&ctx);
    match created {
        Some(id) => {
            let (mut editor, product_loading) = ProductUpdatePage::mount(&ctx, id);
            let (orders_status, product_status) =
                futures_util::future::join(orders_loading, product_loading).await;
            tracing::info!(%orders_status, %product_status, "Dashboard loaded");

            editor.render();
            editor.set("stockQuantity", "11");
            let status = editor.submit()?.await;
            tracing::info!(product = editor.product_id(), %status, "Stock updated");
            editor.render();
        }
        None => {
            let status = orders_loading.await;
            tracing::info!(%status, "Orders loaded");
        }
    }
    tracing::info!(count = orders.rows().len(), "Orders on the board");

    if orders.begin_edit(0) {
        orders.choose(&happyshop_core::domain::OrderStatus::Dispatched);
        orders.submit()?.await;
        orders.render();
    }
    for row in orders.rows() {
        tracing::info!(
            order = %row.id,
            status = %row.status,
            payment = row.payment_mode.as_deref().unwrap_or("-"),
            background = row.palette.background,
            "Order"
        );
    }

    Ok(())
}
