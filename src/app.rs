use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, Notice, SessionInfo};
use crate::components::navbar::Navbar;
use crate::components::toast::{ToastContext, ToastHost};
use crate::pages::datasets::{DatasetDetailPage, DatasetsPage};
use crate::pages::documentation::DocumentationPage;
use crate::pages::home::HomePage;
use crate::pages::landing::LandingPage;
use crate::pages::login::LoginPage;
use crate::pages::prediction::PredictionPage;
use crate::pages::prediction_detail::PredictionDetailPage;
use crate::pages::settings::SettingsPage;
use crate::pages::signup::SignupPage;

/// Who is logged in, mirrored from the backend session.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub session: RwSignal<Option<SessionInfo>>,
}

impl SessionContext {
    pub fn is_authenticated(&self) -> bool {
        self.session.with(Option::is_some)
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

#[component]
pub fn App() -> impl IntoView {
    let session = RwSignal::new(None::<SessionInfo>);
    provide_context(SessionContext { session });

    let toasts = ToastContext::new();
    provide_context(toasts);

    // Restore the session and subscribe to backend events on mount
    Effect::new(move |_| {
        spawn_local(async move {
            if let Ok(info) = commands::current_session().await {
                session.set(info);
            }

            let listened = commands::listen(commands::SESSION_EVENT, move |info: Option<SessionInfo>| {
                session.set(info);
            })
            .await;
            if let Err(e) = listened {
                toasts.error(format!("Failed to watch session: {}", e));
            }

            let listened = commands::listen(commands::NOTICE_EVENT, move |notice: Notice| {
                toasts.push(notice.level, notice.message);
            })
            .await;
            if let Err(e) = listened {
                toasts.error(format!("Failed to watch notices: {}", e));
            }
        });
    });

    view! {
        <Router>
            <div class="app-layout">
                <Navbar />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=LandingPage />
                        <Route path=path!("/login") view=LoginPage />
                        <Route path=path!("/signup") view=SignupPage />
                        <Route path=path!("/home") view=HomePage />
                        <Route path=path!("/prediction") view=PredictionPage />
                        <Route path=path!("/prediction/:dataset/:id") view=PredictionDetailPage />
                        <Route path=path!("/datasets") view=DatasetsPage />
                        <Route path=path!("/datasets/:name") view=DatasetDetailPage />
                        <Route path=path!("/docs") view=DocumentationPage />
                        <Route path=path!("/settings") view=SettingsPage />
                    </Routes>
                </main>
                <ToastHost />
            </div>
        </Router>
    }
}

/// Renders `children` only with a session; otherwise sends the user to login.
#[component]
pub fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let ctx = use_session();
    view! {
        <Show
            when=move || ctx.is_authenticated()
            fallback=|| view! { <Redirect path="/login" /> }
        >
            {children()}
        </Show>
    }
}
