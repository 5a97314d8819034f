//! Landing Page

use leptos::prelude::*;

use crate::components::LeadDialog;

/// One row of the comparison table: ours / HighLevel alone / typical course
struct Comparison {
    feature: &'static str,
    starter: &'static str,
    highlevel: &'static str,
    course: &'static str,
}

const COMPARISON: [Comparison; 6] = [
    Comparison { feature: "Real results", starter: "First client in 12 days on average", highlevel: "✗", course: "✓" },
    Comparison { feature: "Coaching to your first client", starter: "✓", highlevel: "✗", course: "✗" },
    Comparison { feature: "Weekly calls (sales, offer, leads)", starter: "✓", highlevel: "✗", course: "✓" },
    Comparison { feature: "Scripts, ads, AI tools: 300+ resources", starter: "✓", highlevel: "✗", course: "✗" },
    Comparison { feature: "3 HighLevel accounts", starter: "✓", highlevel: "✓", course: "✗" },
    Comparison { feature: "Price", starter: "€97/month", highlevel: "€97/month", course: "€2000" },
];

const FOR_YOU_IF: [&str; 4] = [
    "You are following the free course but want to act",
    "You need a working system, not more videos",
    "You want to start looking for clients right away",
    "You want to test our ecosystem before becoming a Licensee",
];

const FAQ: [(&str, &str); 4] = [
    (
        "Can I cancel if it is not for me?",
        "Of course. You are in full control. If you do not want to continue within the 10 days, no strings attached.",
    ),
    (
        "Can I really use it to find clients?",
        "Yes. It is built to be operational from day one. It is not a test environment, it is real.",
    ),
    (
        "What happens after the 10 days?",
        "If you like it, you continue and become a real Licensee. If not, you simply stop.",
    ),
    (
        "Is the sub-account like regular GHL?",
        "Yes, but it is ready to go. Nothing to set up: everything is configured as an agency.",
    ),
];

#[component]
pub fn LandingPage() -> impl IntoView {
    let (dialog_open, set_dialog_open) = signal(false);
    let open_dialog = move |_: leptos::ev::MouseEvent| set_dialog_open.set(true);

    view! {
        <div class="landing">
            <header class="hero">
                <p class="social-proof">"⭐⭐⭐⭐⭐ 100+ successful students"</p>
                <h1>"You clicked to activate HighLevel. With Madani, you get much more."</h1>
                <p class="tagline">
                    "Imagine paying only for the software and also getting a full course, coaching and weekly calls."
                </p>
                <button class="btn btn-primary" on:click=open_dialog>
                    "Start free with Madani Starter"
                </button>
                <p class="note">"On average Madani Starter members land their first client in 12 days."</p>
            </header>

            <section class="comparison">
                <h2>"You would have bought the software anyway. With Madani, everything else is free."</h2>
                <table>
                    <thead>
                        <tr>
                            <th></th>
                            <th>"Madani Starter"</th>
                            <th>"HighLevel Starter"</th>
                            <th>"Typical online course"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {COMPARISON
                            .iter()
                            .map(|row| {
                                view! {
                                    <tr>
                                        <td>{row.feature}</td>
                                        <td class="highlight">{row.starter}</td>
                                        <td>{row.highlevel}</td>
                                        <td>{row.course}</td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
                <button class="btn btn-primary" on:click=open_dialog>
                    "10 days free · cancel anytime"
                </button>
            </section>

            <section class="for-you">
                <p>"This trial is for you if:"</p>
                <ul>{FOR_YOU_IF.iter().map(|item| view! { <li>"✓ " {*item}</li> }).collect_view()}</ul>
            </section>

            <section class="faq">
                <h2>"FAQ"</h2>
                {FAQ
                    .iter()
                    .map(|(question, answer)| {
                        view! {
                            <details>
                                <summary>{*question}</summary>
                                <p>{*answer}</p>
                            </details>
                        }
                    })
                    .collect_view()}
            </section>

            <section class="final-cta">
                <h2>"Don't wait until you're an expert."</h2>
                <p>"What happens if you activate it today? Maybe in 10 days you have your first client. Maybe not."</p>
                <p class="highlight">"But at least you didn't just sit and watch a course."</p>
                <p class="trial">"🎯 Starter Trial: 10 days free → then €97/month → sub-account active immediately"</p>
                <button class="btn btn-primary" on:click=open_dialog>
                    "Activate my trial"
                </button>
            </section>

            <LeadDialog open=dialog_open set_open=set_dialog_open />
        </div>
    }
}
