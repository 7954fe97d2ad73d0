//! Profile Page
//!
//! Contact details of the current user, saved to the linked doctor or
//! patient row.

use leptos::*;
use medappt::forms::{ProfileForm, ValidationErrors};
use medappt::model::{Profile as UserProfile, Role};

use crate::api;
use crate::components::{field_error, Loading, TextField};
use crate::state::use_global;

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Administrador",
        Role::Doctor => "Médico",
        Role::Patient => "Paciente",
    }
}

#[component]
pub fn Profile() -> impl IntoView {
    let state = use_global();
    let user = create_rw_signal(state.user_id.get_untracked());

    view! {
        <div class="max-w-xl space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Perfil"</h1>
                <p class="text-gray-500 mt-1">"Seus dados de contato"</p>
            </div>

            <div class="bg-white rounded-xl p-6 shadow-sm flex items-end space-x-3">
                <div class="flex-1">
                    <label class="block text-sm text-gray-600 mb-1">"Usuário"</label>
                    <input
                        prop:value=move || user.get()
                        on:input=move |ev| user.set(event_target_value(&ev))
                        class="w-full bg-white rounded-lg px-4 py-2 border border-gray-300"
                    />
                </div>
                <button
                    on:click=move |_| state.set_user(user.get().trim())
                    class="px-4 py-2 bg-gray-100 hover:bg-gray-200 rounded-lg font-medium"
                >
                    "Trocar"
                </button>
            </div>

            <div class="bg-white rounded-xl p-6 shadow-sm">
                <ProfileEditor />
            </div>
        </div>
    }
}

/// Loads the current user's profile and edits it in place.
///
/// Reloads whenever the current user changes.
#[component]
pub fn ProfileEditor() -> impl IntoView {
    let state = use_global();
    let profile = create_rw_signal(None::<UserProfile>);
    let form = create_rw_signal(ProfileForm::default());
    let errors = create_rw_signal(ValidationErrors::new());
    let saving = create_rw_signal(false);

    let load_state = state.clone();
    create_effect(move |_| {
        let user_id = load_state.user_id.get();
        let state = load_state.clone();
        spawn_local(async move {
            match api::fetch_profile(&user_id).await {
                Ok(p) => {
                    form.set(ProfileForm {
                        name: p.name.clone(),
                        email: p.email.clone(),
                        phone: p.phone.clone(),
                        bio: p.bio.clone(),
                    });
                    profile.set(Some(p));
                }
                Err(e) => {
                    profile.set(None);
                    state.show_error(&format!("Erro ao carregar perfil: {}", e));
                }
            }
        });
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let current = form.get();
        if let Err(e) = current.validate() {
            errors.set(e);
            return;
        }
        errors.set(ValidationErrors::new());
        saving.set(true);

        let state = state.clone();
        spawn_local(async move {
            let user_id = state.user_id.get_untracked();
            match api::update_profile(&user_id, &current).await {
                Ok(saved) => {
                    profile.set(Some(saved));
                    state.show_success("Perfil atualizado");
                }
                Err(e) => state.show_error(&e),
            }
            saving.set(false);
        });
    };

    view! {
        {move || match profile.get() {
            None => view! { <Loading /> }.into_view(),
            Some(p) => {
                let is_doctor = p.role == Role::Doctor;
                let on_submit = on_submit.clone();
                view! {
                    <div class="flex items-center space-x-3 mb-6">
                        <div class="w-12 h-12 rounded-full bg-primary-100 text-primary-700 flex items-center justify-center text-lg font-semibold">
                            {p.name.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default()}
                        </div>
                        <div>
                            <p class="font-semibold">{p.name.clone()}</p>
                            <p class="text-sm text-gray-500">{role_label(p.role)}</p>
                        </div>
                    </div>

                    <form on:submit=on_submit class="space-y-4">
                        <TextField
                            label="Nome"
                            value=Signal::derive(move || form.with(|f| f.name.clone()))
                            on_input=move |v: String| form.update(|f| f.name = v)
                            error=field_error(errors, "name")
                        />
                        <TextField
                            label="Email"
                            input_type="email"
                            value=Signal::derive(move || form.with(|f| f.email.clone()))
                            on_input=move |v: String| form.update(|f| f.email = v)
                            error=field_error(errors, "email")
                        />
                        <TextField
                            label="Telefone"
                            value=Signal::derive(move || form.with(|f| f.phone.clone().unwrap_or_default()))
                            on_input=move |v: String| form.update(|f| f.phone = Some(v))
                            error=field_error(errors, "phone")
                        />
                        {is_doctor.then(|| view! {
                            <TextField
                                label="Bio"
                                value=Signal::derive(move || form.with(|f| f.bio.clone().unwrap_or_default()))
                                on_input=move |v: String| form.update(|f| f.bio = Some(v))
                                error=field_error(errors, "bio")
                            />
                        })}
                        <button
                            type="submit"
                            disabled=move || saving.get()
                            class="w-full px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-400 text-white rounded-lg font-medium"
                        >
                            {move || if saving.get() { "Salvando..." } else { "Salvar" }}
                        </button>
                    </form>
                }.into_view()
            }
        }}
    }
}
