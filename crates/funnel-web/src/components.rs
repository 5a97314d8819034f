//! UI Components

use std::time::Duration;

use funnel_core::{Bonus, FlowVariant, FormField, LeadTransport, LeadWizard, Sector, Step};
use leptos::ev::SubmitEvent;
use leptos::leptos_dom::helpers::{set_interval_with_handle, IntervalHandle};
use leptos::prelude::*;

use crate::api::{self, RelayClient};

/// Inline message under an input
#[component]
fn FieldError(wizard: RwSignal<LeadWizard>, field: FormField) -> impl IntoView {
    move || {
        wizard.with(|w| {
            w.error(field)
                .map(|message| view! { <p class="field-error">{message.to_string()}</p> })
        })
    }
}

/// Labelled text input bound to one wizard field
#[component]
fn TextField(
    wizard: RwSignal<LeadWizard>,
    field: FormField,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(default = "")] placeholder: &'static str,
) -> impl IntoView {
    let value = move || {
        wizard.with(|w| match field {
            FormField::CompanyName => w.form().company_name.clone(),
            FormField::FullName => w.form().full_name.clone(),
            FormField::Email => w.form().email.clone(),
            FormField::SocialLink => w.form().social_link.clone(),
            _ => String::new(),
        })
    };

    view! {
        <div class="field">
            <label for=field.as_str()>{field.label()}</label>
            <input
                id=field.as_str()
                name=field.as_str()
                type=input_type
                placeholder=placeholder
                prop:value=value
                on:input=move |ev| wizard.update(|w| w.set_field(field, &event_target_value(&ev)))
            />
            <FieldError wizard=wizard field=field />
        </div>
    }
}

/// Contact details: name, email, phone, optional context
#[component]
fn StepOne(wizard: RwSignal<LeadWizard>) -> impl IntoView {
    view! {
        <div class="step step-one">
            <p class="step-label">"Step 1 of 2 — Your details"</p>
            <h2>"Prepare my system"</h2>

            <TextField
                wizard=wizard
                field=FormField::CompanyName
                placeholder="Needed to activate your account"
            />
            <TextField wizard=wizard field=FormField::FullName />
            <TextField
                wizard=wizard
                field=FormField::Email
                input_type="email"
                placeholder="you@company.com"
            />

            <div class="field">
                <label for="phone">{FormField::Phone.label()}</label>
                <div class="phone-input">
                    <span class="prefix">{funnel_core::COUNTRY_CODE}</span>
                    <input
                        id="phone"
                        name="phone"
                        type="tel"
                        inputmode="numeric"
                        placeholder="333 123 4567"
                        prop:value=move || wizard.with(LeadWizard::formatted_phone)
                        on:input=move |ev| {
                            wizard.update(|w| w.set_field(FormField::Phone, &event_target_value(&ev)));
                        }
                    />
                </div>
                <FieldError wizard=wizard field=FormField::Phone />
            </div>

            <div class="field">
                <label for="sector">{FormField::Sector.label()}</label>
                <select
                    id="sector"
                    on:change=move |ev| wizard.update(|w| w.select_sector(event_target_value(&ev).parse().ok()))
                >
                    <option value="" selected=move || wizard.with(|w| w.form().sector.is_none())>
                        "Choose your sector"
                    </option>
                    {Sector::ALL
                        .into_iter()
                        .map(|sector| {
                            view! {
                                <option
                                    value=sector.as_str()
                                    selected=move || wizard.with(|w| w.form().sector == Some(sector))
                                >
                                    {sector.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <TextField
                wizard=wizard
                field=FormField::SocialLink
                placeholder="https://"
            />

            <button
                type="button"
                class="btn btn-primary"
                on:click=move |_| {
                    wizard.update(|w| {
                        w.advance();
                    });
                }
            >
                "👉 Continue – Prepare my system"
            </button>
        </div>
    }
}

/// Offer recap, bonus pick and the final submit
#[component]
fn StepTwo(wizard: RwSignal<LeadWizard>) -> impl IntoView {
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let Some(submission) = wizard.try_update(LeadWizard::begin_submit).flatten() else {
            return;
        };

        leptos::task::spawn_local(async move {
            let reply = RelayClient::new().send(&submission).await;
            wizard.update(|w| {
                w.finish_submit(reply);
            });

            if let Some(url) = wizard.with_untracked(|w| w.purchase_url().map(str::to_string)) {
                api::redirect(&url);
            }
        });
    };

    view! {
        <div class="step step-two">
            <p class="step-label">"🟢 Step 2 of 2 — Final activation"</p>
            <h2>"🎯 The offer"</h2>

            <ul class="offer">
                <li>"Real one-to-one coaching, not just a community"</li>
                <li>"HighLevel sub-account already configured"</li>
                <li>"You only pay for the software you would have bought anyway"</li>
                <li>"No lock-in. Cancel whenever you want"</li>
            </ul>

            <form on:submit=on_submit novalidate=true>
                {move || {
                    wizard.with(|w| {
                        w.error(FormField::General)
                            .map(|message| {
                                view! {
                                    <div class="alert" role="alert">
                                        <strong>"Error: "</strong>
                                        {message.to_string()}
                                    </div>
                                }
                            })
                    })
                }}

                <div class="bonus">
                    <p>
                        <strong>"⏳ Pick your personal bonus now"</strong>
                        " – expires in "
                        <span class="countdown">{move || wizard.with(|w| w.countdown().display())}</span>
                    </p>
                    {Bonus::ALL
                        .into_iter()
                        .map(|bonus| {
                            view! {
                                <label class="bonus-option">
                                    <input
                                        type="radio"
                                        name="bonus"
                                        value=bonus.as_str()
                                        prop:checked=move || wizard.with(|w| w.bonus() == Some(bonus))
                                        on:change=move |_| wizard.update(|w| w.select_bonus(bonus))
                                    />
                                    {bonus.label()}
                                </label>
                            }
                        })
                        .collect_view()}
                </div>

                <Show when=move || wizard.with(LeadWizard::is_submitting)>
                    <p class="activation">"Activating your trial…"</p>
                </Show>

                <button
                    type="submit"
                    class="btn btn-primary"
                    disabled=move || !wizard.with(LeadWizard::can_submit)
                >
                    {move || {
                        if wizard.with(LeadWizard::is_submitting) {
                            "Activating…"
                        } else {
                            "🚀 Activate now for €0 → 10 days + bonus included"
                        }
                    }}
                </button>
                <p class="fine-print">"🔒 This bonus will not be available after this session."</p>
            </form>
        </div>
    }
}

/// Two-step lead dialog
///
/// The countdown ticker only exists while the wizard is on step 2 and is
/// cleared when the step changes or the dialog is unmounted.
#[component]
pub fn LeadDialog(open: ReadSignal<bool>, set_open: WriteSignal<bool>) -> impl IntoView {
    let wizard = RwSignal::new(LeadWizard::new(FlowVariant::Bonus));
    let step = Memo::new(move |_| wizard.with(LeadWizard::step));
    let ticker = StoredValue::new(None::<IntervalHandle>);

    let stop_ticker = move || {
        if let Some(handle) = ticker.get_value() {
            handle.clear();
            ticker.set_value(None);
        }
    };

    Effect::new(move |_| {
        let on_step_two = step.get() == Step::Two;
        stop_ticker();

        if on_step_two {
            match set_interval_with_handle(move || wizard.update(LeadWizard::tick), Duration::from_secs(1)) {
                Ok(handle) => ticker.set_value(Some(handle)),
                Err(e) => leptos::logging::warn!("countdown unavailable: {e:?}"),
            }
        }
    });

    on_cleanup(stop_ticker);

    let close = move |_: leptos::ev::MouseEvent| {
        wizard.update(LeadWizard::close);
        if !wizard.with_untracked(|w| w.state().is_locked()) {
            set_open.set(false);
        }
    };

    view! {
        <Show when=move || open.get()>
            <div class="dialog-overlay" on:click=close></div>
            <div class="dialog" role="dialog" aria-modal="true">
                <button type="button" class="dialog-close" aria-label="Close" on:click=close>
                    "×"
                </button>
                <Show when=move || step.get() == Step::One fallback=move || view! { <StepTwo wizard=wizard /> }>
                    <StepOne wizard=wizard />
                </Show>
            </div>
        </Show>
    }
}
