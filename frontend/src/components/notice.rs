//! 页面提示：成功消息以 toast 显示并自动消失，错误消息常驻页面顶部
use leptos::prelude::*;

/// toast 显示时长
const TOAST_DURATION_SECS: u64 = 4;

/// 成功提示 toast
#[component]
pub fn SuccessToast(message: RwSignal<Option<String>>) -> impl IntoView {
    // 显示一段时间后清除
    Effect::new(move |_| {
        if message.get().is_some() {
            set_timeout(
                move || message.set(None),
                std::time::Duration::from_secs(TOAST_DURATION_SECS),
            );
        }
    });

    view! {
        <Show when=move || message.with(Option::is_some)>
            <div class="toast toast-top toast-end z-50">
                <div class="alert alert-success shadow-lg">
                    <span>{move || message.get().unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}

/// 错误提示条
#[component]
pub fn ErrorAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div role="alert" class="alert alert-error text-sm py-2">
                <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-6 w-6" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

/// 加载中占位
#[component]
pub fn Loading(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="flex items-center gap-2 py-8 justify-center text-base-content/60">
            <span class="loading loading-spinner loading-md"></span>
            <span>{label}</span>
        </div>
    }
}
