use crate::api::use_backend;
use crate::auth::login;
use crate::components::icons::Warehouse;
use crate::components::notice::ErrorAlert;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lomalinda_shared::error::ApiError;

const INVALID_CREDENTIALS: &str = "Usuario o contraseña incorrectos";

#[component]
pub fn LoginPage() -> impl IntoView {
    let backend = use_backend();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if username.get().trim().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Ingrese usuario y contraseña.".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let result = match backend.client() {
                Ok(client) => {
                    login(
                        backend.auth,
                        &client,
                        &username.get_untracked(),
                        &password.get_untracked(),
                    )
                    .await
                }
                Err(e) => Err(e),
            };

            // 成功后路由服务监听到认证状态变化，自动跳转
            if let Err(e) = result {
                let msg = match e {
                    ApiError::InvalidCredentials(_) => INVALID_CREDENTIALS.to_string(),
                    other => other.user_message("No se pudo conectar con el servidor."),
                };
                set_error_msg.set(Some(msg));
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Warehouse attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Ingresar al sistema"</h1>
                        <p class="text-base-content/70">"ERP LomaLinda"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorAlert message=error_msg />

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Usuario"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                autocomplete="username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Contraseña"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Ingresando..." }.into_any()
                                } else {
                                    "Entrar".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
