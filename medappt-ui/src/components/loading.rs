//! Loading Component

use leptos::*;

/// Full-page loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Skeleton loader for list rows
#[component]
pub fn ListSkeleton(#[prop(default = 3)] count: usize) -> impl IntoView {
    view! {
        <div class="space-y-3 animate-pulse">
            {(0..count).map(|_| view! {
                <div class="bg-gray-200 rounded h-12" />
            }).collect_view()}
        </div>
    }
}
