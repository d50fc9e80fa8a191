//! Policy test panel: build a request, evaluate it, show the decision trace.

use iam::AbacPolicy;
use iam::evaluate::{Decision, PolicyTestResult, TraceOutcome};
use leptos::prelude::*;

use super::form::FieldError;
use crate::state::auth::AuthState;
use crate::state::policy_test::PolicyTestState;

fn decision_class(decision: Decision) -> &'static str {
    match decision {
        Decision::Allow => "decision decision--allow",
        Decision::Deny => "decision decision--deny",
        Decision::NotApplicable => "decision decision--none",
    }
}

fn trace_text(outcome: &TraceOutcome) -> String {
    match outcome {
        TraceOutcome::Inactive => "inactive".to_owned(),
        TraceOutcome::ResourceMismatch => "resource does not match".to_owned(),
        TraceOutcome::ActionMismatch => "action does not match".to_owned(),
        TraceOutcome::ConditionFailed { index } => format!("condition {} failed", index + 1),
        TraceOutcome::Matched => "matched".to_owned(),
    }
}

#[component]
pub fn PolicyTestPanel(#[prop(into)] policies: Signal<Vec<AbacPolicy>>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let state = RwSignal::new(PolicyTestState::default());
    let error = move |field: &'static str| Signal::derive(move || state.with(|s| s.errors.get(field).map(str::to_owned)));

    let on_run = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut request = None;
        state.update(|s| request = s.start());
        let Some(request) = request else {
            return;
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::test_policy(&request).await;
            if let Err(e) = &result {
                crate::util::auth::note_failure(auth, e);
            }
            let policies = policies.get_untracked();
            state.update(|s| s.finish(&request, result, &policies));
        });

        #[cfg(not(feature = "hydrate"))]
        {
            let policies = policies.get_untracked();
            state.update(|s| s.finish(&request, Err(crate::net::error::ApiError::Unavailable), &policies));
            let _ = auth;
        }
    };

    view! {
        <section class="panel policy-test">
            <h2>"Test a request"</h2>
            <form class="policy-test__form" on:submit=on_run>
                <label class="dialog__label">
                    "Subject attributes (JSON)"
                    <textarea
                        class="dialog__input dialog__input--code"
                        rows="3"
                        prop:value=move || state.with(|s| s.form.subject.clone())
                        on:input=move |ev| state.update(|s| s.form.subject = event_target_value(&ev))
                    ></textarea>
                    <FieldError error=error("subject")/>
                </label>
                <label class="dialog__label">
                    "Resource (path or JSON)"
                    <input
                        class="dialog__input dialog__input--code"
                        prop:value=move || state.with(|s| s.form.resource.clone())
                        on:input=move |ev| state.update(|s| s.form.resource = event_target_value(&ev))
                    />
                    <FieldError error=error("resource")/>
                </label>
                <label class="dialog__label">
                    "Action"
                    <input
                        class="dialog__input"
                        prop:value=move || state.with(|s| s.form.action.clone())
                        on:input=move |ev| state.update(|s| s.form.action = event_target_value(&ev))
                    />
                    <FieldError error=error("action")/>
                </label>
                <label class="dialog__label">
                    "Environment (JSON)"
                    <textarea
                        class="dialog__input dialog__input--code"
                        rows="2"
                        prop:value=move || state.with(|s| s.form.environment.clone())
                        on:input=move |ev| state.update(|s| s.form.environment = event_target_value(&ev))
                    ></textarea>
                    <FieldError error=error("environment")/>
                </label>
                <button type="submit" class="btn btn--primary" disabled=move || state.with(|s| s.running)>
                    {move || if state.with(|s| s.running) { "Evaluating..." } else { "Evaluate" }}
                </button>
            </form>
            <FieldError error=Signal::derive(move || state.with(|s| s.error.clone()))/>
            {move || state.with(|s| s.result.clone().map(|r| view! { <TestResult result=r local=s.local/> }))}
        </section>
    }
}

#[component]
fn TestResult(result: PolicyTestResult, local: bool) -> impl IntoView {
    let PolicyTestResult {
        decision,
        determining_policy,
        matched,
        evaluated,
        reason,
        trace,
        ..
    } = result;
    let has_matches = !matched.is_empty();

    view! {
        <div class="policy-test__result">
            <p class=decision_class(decision)>{decision.label()}</p>
            <p class="policy-test__reason">{reason}</p>
            <p class="policy-test__meta">
                {format!("{evaluated} active policies evaluated")}
                {determining_policy.map(|id| format!(", decided by {id}"))}
                {local.then_some(" (evaluated in the browser)")}
            </p>
            <Show when=move || has_matches>
                <h3>"Applicable policies"</h3>
            </Show>
            <ul class="policy-test__matches">
                {matched
                    .into_iter()
                    .map(|m| {
                        view! {
                            <li>
                                <strong>{m.policy_name}</strong>
                                {format!(" {} at priority {}", m.effect.label(), m.priority)}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <details class="policy-test__trace">
                <summary>"Evaluation trace"</summary>
                <ul>
                    {trace
                        .into_iter()
                        .map(|t| view! { <li>{format!("{}: {}", t.policy_id, trace_text(&t.outcome))}</li> })
                        .collect_view()}
                </ul>
            </details>
        </div>
    }
}
