use file_browser::FileBrowserApp;
use leptos::*;
use leptos_meta::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="File Manager" />
        <Meta name="description" content="Browse, edit, and search files through the webview host." />

        <main class="site-root">
            <FileManagerEntry />
        </main>
    }
}

#[component]
pub fn FileManagerEntry() -> impl IntoView {
    leptos::logging::log!(
        "file manager host strategy: {}",
        platform_host_web::host_strategy_name()
    );

    view! { <FileBrowserApp host_services=platform_host_web::host_services() /> }
}
