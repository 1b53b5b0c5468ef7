use yew::prelude::*;

use crate::api::{AssistantApi, AuthApi, BudgetsApi, DashboardApi, TransactionsApi};
use crate::cancel::Interest;
use crate::config::AppConfig;
use crate::http::ApiClient;
use crate::store::CategoryStore;

/// What the views share: one API client and one category store, injected via context.
#[derive(Clone, PartialEq)]
pub struct Services {
    pub client: ApiClient,
    pub store: CategoryStore,
}

impl Services {
    pub fn new(config: AppConfig) -> Self {
        Self {
            client: ApiClient::browser(config),
            store: CategoryStore::new(),
        }
    }

    fn scoped(&self, interest: &Interest) -> ApiClient {
        self.client.with_interest(interest)
    }

    pub fn auth(&self, interest: &Interest) -> AuthApi {
        AuthApi::new(self.scoped(interest))
    }

    pub fn transactions(&self, interest: &Interest) -> TransactionsApi {
        TransactionsApi::new(self.scoped(interest))
    }

    pub fn budgets(&self, interest: &Interest) -> BudgetsApi {
        BudgetsApi::new(self.scoped(interest))
    }

    pub fn dashboard(&self, interest: &Interest) -> DashboardApi {
        DashboardApi::new(self.scoped(interest))
    }

    pub fn assistant(&self, interest: &Interest) -> AssistantApi {
        AssistantApi::new(self.scoped(interest))
    }
}

#[hook]
pub fn use_services() -> Services {
    use_context::<Services>().unwrap_or_else(|| {
        tracing::warn!("no Services in context, using a detached instance");
        Services::new(AppConfig::from_build_env())
    })
}

/// Interest that lives as long as the calling component is mounted.
#[hook]
pub fn use_interest() -> Interest {
    let interest = use_memo(|_| Interest::new(), ());
    {
        let interest = (*interest).clone();
        use_effect_with_deps(move |_| move || interest.withdraw(), ());
    }
    (*interest).clone()
}

/// The shared store, re-rendering the caller after every store mutation until unmount.
#[hook]
pub fn use_category_store() -> CategoryStore {
    let store = use_services().store;
    let trigger = use_force_update();
    use_effect_with_deps(
        move |store: &CategoryStore| {
            let subscription = store.subscribe(move || trigger.force_update());
            move || subscription.unsubscribe()
        },
        store.clone(),
    );
    store
}
