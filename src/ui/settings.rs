use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::{save_preferences, Preferences};
use crate::error::ApiError;
use crate::forms::validate_password_change;
use crate::models::{NotificationKind, NotificationUpdate, SettingsUpdate};

use super::app::AuthStatus;
use super::hooks::{use_interest, use_services};
use super::shell::{bind_input, bind_select, page_shell};

const CURRENCIES: [(&str, &str); 6] = [
    ("USD", "USD ($)"),
    ("EUR", "EUR (€)"),
    ("GBP", "GBP (£)"),
    ("JPY", "JPY (¥)"),
    ("PHP", "PHP (₱)"),
    ("INR", "INR (₹)"),
];

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let services = use_services();
    let interest = use_interest();
    let session = use_context::<UseStateHandle<AuthStatus>>();
    let preferences = use_context::<UseStateHandle<Preferences>>();

    let user = session.as_ref().and_then(|s| match &**s {
        AuthStatus::Authenticated(user) => Some(user.clone()),
        _ => None,
    });

    let full_name = use_state(|| user.as_ref().map(|u| u.full_name.clone()).unwrap_or_default());
    let email = use_state(|| user.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let currency = use_state(|| {
        preferences
            .as_ref()
            .map(|p| p.currency_code.clone())
            .unwrap_or_else(|| Preferences::default().currency_code)
    });
    let notifications = use_state(|| user.as_ref().map(|u| u.notifications.clone()).unwrap_or_default());

    let current_password = use_state(String::new);
    let new_password = use_state(String::new);
    let confirm_password = use_state(String::new);

    let status = use_state(|| None::<Result<String, String>>);
    let saving = use_state(|| false);

    let on_save = {
        let auth = services.auth(&interest);
        let session = session.clone();
        let preferences = preferences.clone();
        let full_name = full_name.clone();
        let email = email.clone();
        let currency = currency.clone();
        let notifications = notifications.clone();
        let current_password = current_password.clone();
        let new_password = new_password.clone();
        let confirm_password = confirm_password.clone();
        let status = status.clone();
        let saving = saving.clone();
        Callback::from(move |_| {
            let update = SettingsUpdate {
                full_name: Some(full_name.trim().to_string()).filter(|s| !s.is_empty()),
                email: Some(email.trim().to_string()).filter(|s| !s.is_empty()),
                currency: Some((*currency).clone()),
                notifications: Some(NotificationUpdate::from(&*notifications)),
                ..Default::default()
            };
            let password_change =
                match validate_password_change(&current_password, &new_password, &confirm_password) {
                    Ok(change) => change,
                    Err(invalid) => {
                        status.set(Some(Err(invalid.to_string())));
                        return;
                    }
                };

            let next_prefs = Preferences::for_currency(&currency);
            save_preferences(&next_prefs);
            if let Some(preferences) = preferences.as_ref() {
                preferences.set(next_prefs);
            }

            let auth = auth.clone();
            let session = session.clone();
            let status = status.clone();
            let saving = saving.clone();
            let current_password = current_password.clone();
            let new_password = new_password.clone();
            let confirm_password = confirm_password.clone();
            saving.set(true);
            spawn_local(async move {
                let outcome = async {
                    let user = auth.update_settings(&update).await?;
                    if let Some(change) = &password_change {
                        auth.update_password(&change.current, &change.new).await?;
                    }
                    Ok::<_, ApiError>(user)
                }
                .await;
                match outcome {
                    Ok(user) => {
                        tracing::info!("settings saved");
                        // Without a user in the reply the session keeps its current profile.
                        if let (Some(session), Some(user)) = (session.as_ref(), user) {
                            session.set(AuthStatus::Authenticated(user));
                        }
                        current_password.set(String::new());
                        new_password.set(String::new());
                        confirm_password.set(String::new());
                        status.set(Some(Ok("Settings saved.".to_string())));
                    }
                    Err(ApiError::Cancelled) => return,
                    Err(err) => status.set(Some(Err(err.to_string()))),
                }
                saving.set(false);
            });
        })
    };

    let toggle = |label: &'static str, hint: &'static str, kind: NotificationKind| {
        let notifications = notifications.clone();
        let checked = notifications.is_on(kind);
        let onclick = Callback::from(move |_| notifications.set(notifications.toggled(kind)));
        html! {
            <div class="flex items-start gap-3 pb-4 border-b border-border">
                <div class="flex-1 pt-1">
                    <p class="font-medium text-foreground">{ label }</p>
                    <p class="text-sm text-muted-foreground">{ hint }</p>
                </div>
                <input type="checkbox" {checked} {onclick} />
            </div>
        }
    };

    let field_class = "w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary";

    page_shell(
        "Settings",
        html! {
            <button onclick={on_save} disabled={*saving} class="bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90">
                { if *saving { "Saving..." } else { "Save Changes" } }
            </button>
        },
        html! {
            <>
                { match &*status {
                    Some(Ok(msg)) => html! { <p class="text-sm text-green-600">{ msg.clone() }</p> },
                    Some(Err(msg)) => html! { <p class="text-sm text-red-500">{ msg.clone() }</p> },
                    None => html! {},
                } }
                <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                    <div class="bg-card rounded-lg p-6 border border-border space-y-4">
                        <h2 class="text-xl font-bold text-foreground">{"Profile"}</h2>
                        <div>
                            <label class="block text-sm font-medium text-foreground mb-2">{"Full Name"}</label>
                            <input class={field_class} value={(*full_name).clone()} oninput={bind_input(&full_name)} />
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-foreground mb-2">{"Email"}</label>
                            <input type="email" class={field_class} value={(*email).clone()} oninput={bind_input(&email)} />
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-foreground mb-2">{"Currency"}</label>
                            <select onchange={bind_select(&currency)} class={field_class}>
                                { for CURRENCIES.iter().map(|(code, label)| html! {
                                    <option value={*code} selected={*currency == *code}>{ *label }</option>
                                }) }
                            </select>
                        </div>
                    </div>

                    <div class="bg-card rounded-lg p-6 border border-border space-y-4">
                        <h2 class="text-xl font-bold text-foreground">{"Notifications"}</h2>
                        { toggle("Budget Alerts", "Get notified when expenses exceed your plan", NotificationKind::BudgetAlerts) }
                        { toggle("Monthly Reports", "Receive a summary of your spending monthly", NotificationKind::MonthlyReports) }
                        { toggle("Transaction Updates", "Get notified about new transactions", NotificationKind::TransactionUpdates) }
                        { toggle("Security Alerts", "Get notified about sign-ins and password changes", NotificationKind::SecurityAlerts) }
                    </div>

                    <div class="bg-card rounded-lg p-6 border border-border space-y-4">
                        <h2 class="text-xl font-bold text-foreground">{"Change Password"}</h2>
                        <input type="password" placeholder="Current password" class={field_class} value={(*current_password).clone()} oninput={bind_input(&current_password)} />
                        <input type="password" placeholder="New password" class={field_class} value={(*new_password).clone()} oninput={bind_input(&new_password)} />
                        <input type="password" placeholder="Confirm new password" class={field_class} value={(*confirm_password).clone()} oninput={bind_input(&confirm_password)} />
                    </div>
                </div>
            </>
        },
    )
}
