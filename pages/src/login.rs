//! Sign-in page.

use happyshop_core::action::Login;
use happyshop_core::domain::Credentials;
use happyshop_core::prelude::*;

use crate::error::SubmitError;
use crate::form_state::FormState;
use crate::session::SessionRedirect;

fn schema() -> FormSchema {
    FormSchema::new()
        .field("email", rules_for(FieldSemantics::Email))
        .field("password", rules_for(FieldSemantics::LoginPassword))
}

fn react(outcome: Terminal<'_>) -> Vec<Effect> {
    match outcome {
        Terminal::Fulfilled(entities) => match entities.session() {
            Some(user) if user.is_verified => vec![
                Effect::Notify(Toast::success("Login successful")),
                Effect::ResetForm,
            ],
            _ => Vec::new(),
        },
        Terminal::Rejected(err) => vec![Effect::Notify(Toast::error(err.message()))],
    }
}

pub struct LoginPage {
    ctx: AppContext,
    form: FormState,
    binder: ReactionBinder,
    redirect: SessionRedirect,
}

impl LoginPage {
    pub fn mount(ctx: &AppContext) -> Self {
        let binder =
            ReactionBinder::bind(ctx.store.clone(), ctx.shell.clone(), ActionKind::Login, react);
        Self {
            ctx: ctx.clone(),
            form: FormState::new(schema()),
            binder,
            redirect: SessionRedirect::new(),
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
        let credentials: Credentials = self.form.decode(&[])?;
        Ok(self.ctx.dispatcher.dispatch(Login, credentials))
    }

    /// One render pass: react to the login status, then follow the session.
    pub fn render(&mut self) -> Vec<Effect> {
        let mut effects = self.binder.observe();
        if let Some(route) = self.redirect.check(&self.ctx.store, &self.ctx.shell) {
            effects.push(Effect::Navigate(route));
        }
        self.form.apply(&effects);
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use happyshop_core::shell::ToastLevel;
    use happyshop_core::testing::{RecordingShell, ScriptedApi};
    use std::sync::Arc;

    fn context(api: Arc<ScriptedApi>) -> (AppContext, Arc<RecordingShell>) {
        let recorder = Arc::new(RecordingShell::default());
        (AppContext::new(api, recorder.shell()), recorder)
    }

    #[test]
    fn test_empty_password_blocks_dispatch() {
        let api = Arc::new(ScriptedApi::new());
        let (ctx, _) = context(api.clone());
        let mut page = LoginPage::mount(&ctx);
        page.set("email", "a@b.co");
        page.set("password", "");

        let err = page.submit().err().unwrap();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert_eq!(page.form().error("password"), Some("Password is required"));
        assert_eq!(ctx.store.status(ActionKind::Login).status, RequestStatus::Idle);
        assert_eq!(api.calls(ActionKind::Login), 0);
    }

    #[tokio::test]
    async fn test_verified_login_toasts_resets_and_goes_home() {
        let api = Arc::new(ScriptedApi::new());
        let (ctx, recorder) = context(api);
        let mut page = LoginPage::mount(&ctx);
        page.set("email", "ada@shop.test");
        page.set("password", "whatever");

        let pending = page.submit().unwrap();
        assert!(page.is_loading());
        assert_eq!(pending.await, RequestStatus::Fulfilled);

        let effects = page.render();
        assert!(effects.contains(&Effect::ResetForm));
        assert!(page.form().draft().is_empty());
        assert_eq!(recorder.toasts(), vec![Toast::success("Login successful")]);
        assert_eq!(recorder.routes(), vec![Route::Home]);
    }

    #[tokio::test]
    async fn test_unverified_login_goes_to_verification() {
        let api = Arc::new(ScriptedApi::new());
        api.set_login_profile(false, false);
        let (ctx, recorder) = context(api);
        let mut page = LoginPage::mount(&ctx);
        page.set("email", "ada@shop.test");
        page.set("password", "whatever");

        page.submit().unwrap().await;
        page.render();

        assert!(recorder.toasts().is_empty());
        assert_eq!(recorder.routes(), vec![Route::VerifyOtp]);
    }

    #[tokio::test]
    async fn test_rejected_login_shows_backend_message() {
        let api = Arc::new(ScriptedApi::new());
        api.fail_next(ActionKind::Login, "Invalid Credentials");
        let (ctx, recorder) = context(api);
        let mut page = LoginPage::mount(&ctx);
        page.set("email", "ada@shop.test");
        page.set("password", "nope");

        assert_eq!(page.submit().unwrap().await, RequestStatus::Rejected);
        page.render();
        page.render();

        let toasts = recorder.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].level, ToastLevel::Error);
        assert_eq!(toasts[0].message, "Invalid Credentials");
        assert_eq!(page.form().draft().get("email"), Some("ada@shop.test"));
    }
}
