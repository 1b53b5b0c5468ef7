use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::error::ApiError;
use crate::forms::{validate_login, validate_registration};
use crate::models::{Credentials, Registration, User};

use super::hooks::{use_interest, use_services};
use super::shell::{bind_input, error_banner};

enum AuthRequest {
    Login(Credentials),
    Register(Registration),
}

#[derive(Properties, PartialEq)]
pub struct AuthScreenProps {
    pub on_authenticated: Callback<User>,
    #[prop_or_default]
    pub notice: Option<String>,
}

#[function_component(AuthScreen)]
pub fn auth_screen(props: &AuthScreenProps) -> Html {
    let services = use_services();
    let interest = use_interest();

    let is_login = use_state(|| true);
    let full_name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let is_login = is_login.clone();
        let full_name = full_name.clone();
        let email = email.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let on_authenticated = props.on_authenticated.clone();
        let auth = services.auth(&interest);

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let request = if *is_login {
                validate_login(&email, &password).map(AuthRequest::Login)
            } else {
                validate_registration(&full_name, &email, &password, &confirm_password)
                    .map(AuthRequest::Register)
            };
            let request = match request {
                Ok(r) => r,
                Err(invalid) => {
                    error.set(Some(invalid.to_string()));
                    return;
                }
            };

            loading.set(true);
            error.set(None);

            let auth = auth.clone();
            let error = error.clone();
            let loading = loading.clone();
            let on_authenticated = on_authenticated.clone();
            spawn_local(async move {
                let result = match &request {
                    AuthRequest::Login(credentials) => auth.login(credentials).await,
                    AuthRequest::Register(registration) => auth.register(registration).await,
                };
                match result {
                    Ok(user) => {
                        tracing::info!(user_id = user.id, "signed in");
                        on_authenticated.emit(user);
                    }
                    Err(ApiError::Cancelled) => return,
                    Err(err) => error.set(Some(err.to_string())),
                }
                loading.set(false);
            });
        })
    };

    let toggle_mode = {
        let is_login = is_login.clone();
        let error = error.clone();
        Callback::from(move |_| {
            is_login.set(!*is_login);
            error.set(None);
        })
    };

    let field_class = "w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary";

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{ if *is_login { "Welcome back" } else { "Create account" } }</h1>
                    <p class="text-sm text-muted-foreground mt-2">
                        { if *is_login { "Sign in to continue." } else { "Start managing your finances." } }
                    </p>
                </div>

                if let Some(msg) = &props.notice {
                    { error_banner(msg, None) }
                }

                <form class="space-y-4" onsubmit={on_submit}>
                    if !*is_login {
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Full Name"}</label>
                            <input class={field_class} value={(*full_name).clone()} oninput={bind_input(&full_name)} />
                        </div>
                    }
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Email"}</label>
                        <input type="email" class={field_class} value={(*email).clone()} oninput={bind_input(&email)} />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Password"}</label>
                        <input type="password" class={field_class} value={(*password).clone()} oninput={bind_input(&password)} />
                    </div>
                    if !*is_login {
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Confirm Password"}</label>
                            <input type="password" class={field_class} value={(*confirm_password).clone()} oninput={bind_input(&confirm_password)} />
                        </div>
                    }

                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90"
                        disabled={*loading}
                    >
                        { if *loading { "Please wait..." } else if *is_login { "Login" } else { "Sign up" } }
                    </button>
                </form>

                <div class="mt-6 text-center text-sm text-muted-foreground">
                    { if *is_login { "No account?" } else { "Already have an account?" } }
                    <button class="ml-2 text-primary font-semibold" onclick={toggle_mode}>
                        { if *is_login { "Sign up" } else { "Login" } }
                    </button>
                </div>
            </div>
        </div>
    }
}
