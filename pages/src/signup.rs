//! Account creation page.

use happyshop_core::action::Signup;
use happyshop_core::domain::NewAccount;
use happyshop_core::prelude::*;

use crate::error::SubmitError;
use crate::form_state::FormState;
use crate::session::SessionRedirect;

pub const WELCOME_MESSAGE: &str = "Welcome! Verify your email to start shopping.";

fn schema() -> FormSchema {
    FormSchema::new()
        .field("name", rules_for(FieldSemantics::Username))
        .field("email", rules_for(FieldSemantics::Email))
        .field("password", rules_for(FieldSemantics::NewPassword))
        .field("confirmPassword", rules_for(FieldSemantics::ConfirmPassword))
        .strip("confirmPassword")
}

fn react(outcome: Terminal<'_>) -> Vec<Effect> {
    match outcome {
        Terminal::Fulfilled(_) => vec![
            Effect::Notify(Toast::success(WELCOME_MESSAGE)),
            Effect::ResetForm,
        ],
        Terminal::Rejected(err) => vec![Effect::Notify(Toast::error(err.message()))],
    }
}

pub struct SignupPage {
    ctx: AppContext,
    form: FormState,
    binder: ReactionBinder,
    redirect: SessionRedirect,
}

impl SignupPage {
    pub fn mount(ctx: &AppContext) -> Self {
        let binder =
            ReactionBinder::bind(ctx.store.clone(), ctx.shell.clone(), ActionKind::Signup, react);
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
        let account: NewAccount = self.form.decode(&[])?;
        Ok(self.ctx.dispatcher.dispatch(Signup, account))
    }

    pub fn render(&mut self) -> Vec<Effect> {
        let mut effects = self.binder.observe();
        if let Some(route) = self.redirect.check(&self.ctx.store, &self.ctx.shell) {
            effects.push(Effect::Navigate(route));
        }
        self.form.apply(&effects);
        effects
    }
}
