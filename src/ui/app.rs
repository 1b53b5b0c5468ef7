use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::{load_preferences, AppConfig, Preferences};
use crate::models::User;
use crate::sync::end_session;

use super::assistant::AssistantPage;
use super::auth::AuthScreen;
use super::budgets::BudgetsPage;
use super::dashboard::DashboardPage;
use super::hooks::{use_interest, Services};
use super::reports::ReportsPage;
use super::settings::SettingsPage;
use super::shell::{Layout, Page};
use super::transactions::TransactionsPage;

#[derive(Clone, PartialEq)]
pub enum AuthStatus {
    Checking,
    Authenticated(User),
    Unauthenticated,
}

#[function_component(App)]
pub fn app() -> Html {
    let services = use_memo(|_| Services::new(AppConfig::from_build_env()), ());
    let active_page = use_state(|| Page::Dashboard);
    let auth_status = use_state(|| AuthStatus::Checking);
    let preferences = use_state(load_preferences);
    let interest = use_interest();
    // Shown on the sign-in screen, e.g. when the server rejected a logout.
    let notice = use_state(|| None::<String>);

    let on_select = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| active_page.set(page))
    };

    {
        let auth_status = auth_status.clone();
        let auth = services.auth(&interest);
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match auth.current_user().await {
                        Ok(user) => {
                            tracing::info!(user_id = user.id, "session restored");
                            auth_status.set(AuthStatus::Authenticated(user));
                        }
                        Err(err) if err.is_cancelled() => {}
                        Err(_) => auth_status.set(AuthStatus::Unauthenticated),
                    }
                });
                || ()
            },
            (),
        );
    }

    let on_logout = {
        let auth_status = auth_status.clone();
        let notice = notice.clone();
        let services = services.clone();
        let auth = services.auth(&interest);
        Callback::from(move |_| {
            let auth_status = auth_status.clone();
            let notice = notice.clone();
            let auth = auth.clone();
            let store = services.store.clone();
            spawn_local(async move {
                let failure = end_session(&auth, &store).await.err();
                notice.set(
                    failure.map(|err| format!("Logged out locally, but the server reported: {}", err)),
                );
                auth_status.set(AuthStatus::Unauthenticated);
            });
        })
    };

    let user = match &*auth_status {
        AuthStatus::Checking => {
            return html! {
                <div class="min-h-screen flex items-center justify-center bg-background text-muted-foreground">
                    {"Checking session..."}
                </div>
            };
        }
        AuthStatus::Unauthenticated => {
            let on_authenticated = {
                let auth_status = auth_status.clone();
                let notice = notice.clone();
                Callback::from(move |user: User| {
                    notice.set(None);
                    auth_status.set(AuthStatus::Authenticated(user));
                })
            };
            return html! {
                <ContextProvider<Services> context={(*services).clone()}>
                    <AuthScreen {on_authenticated} notice={(*notice).clone()} />
                </ContextProvider<Services>>
            };
        }
        AuthStatus::Authenticated(user) => user.clone(),
    };

    let content = match *active_page {
        Page::Dashboard => html! { <DashboardPage /> },
        Page::Transactions => html! { <TransactionsPage /> },
        Page::Budgets => html! { <BudgetsPage /> },
        Page::Reports => html! { <ReportsPage /> },
        Page::Assistant => html! { <AssistantPage /> },
        Page::Settings => html! { <SettingsPage /> },
    };

    html! {
        <ContextProvider<Services> context={(*services).clone()}>
            <ContextProvider<UseStateHandle<AuthStatus>> context={auth_status.clone()}>
                <ContextProvider<UseStateHandle<Preferences>> context={preferences}>
                    <Layout active_page={*active_page} user_name={user.full_name} {on_select} {on_logout}>
                        { content }
                    </Layout>
                </ContextProvider<UseStateHandle<Preferences>>>
            </ContextProvider<UseStateHandle<AuthStatus>>>
        </ContextProvider<Services>>
    }
}

/// Currency symbol from the preferences context, falling back to the default.
#[hook]
pub fn use_currency_symbol() -> String {
    use_context::<UseStateHandle<Preferences>>()
        .map(|prefs| prefs.currency_symbol.clone())
        .unwrap_or_else(|| Preferences::default().currency_symbol)
}
