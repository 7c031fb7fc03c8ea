use crate::record::{ScenarioResult, StepPayload, StepRecord, Termination};
use std::time::Duration;

pub fn format_result(result: &ScenarioResult) -> String {
    let mut output = format!(
        "Scenario: {}\nStarted: {}",
        result.scenario_name(),
        result.started_at().format("%Y-%m-%d %H:%M:%S UTC")
    );

    if result.steps().is_empty() {
        output.push_str("\n\nNo steps were run.");
    } else {
        output.push_str("\n\nSteps:");
        for (index, step) in result.steps().iter().enumerate() {
            output.push_str(&format!("\n{}", format_step(index, step)));
        }
    }

    output.push_str(&format!(
        "\n\n{} succeeded, {} failed, total {}",
        result.success_count(),
        result.failure_count(),
        format_duration(result.total_duration())
    ));

    if let Termination::Halted { step, action } = result.termination() {
        output.push_str(&format!(
            "\nHalted at step {} ({}): remaining steps were not run.",
            step + 1,
            action
        ));
    }

    output
}

pub fn format_step(index: usize, step: &StepRecord) -> String {
    let mark = if step.success() { "✓" } else { "✗" };
    let mut line = format!(
        "{:>2}. {} {} ({})",
        index + 1,
        mark,
        step.action,
        format_duration(step.duration)
    );

    if let Some(detail) = step.payload.as_ref().and_then(payload_detail) {
        line.push_str(&format!(" - {}", detail));
    }
    if let Some(error) = step.error() {
        line.push_str(&format!("\n      error: {}", error));
    }
    line
}

fn payload_detail(payload: &StepPayload) -> Option<String> {
    match payload {
        StepPayload::Navigation { url, .. } => Some(url.clone()),
        StepPayload::Destination {
            destination,
            suggestion_used,
        } => Some(if *suggestion_used {
            format!("\"{}\" via suggestion", destination)
        } else {
            format!("\"{}\"", destination)
        }),
        StepPayload::Dates {
            check_in,
            check_out,
            ..
        } => Some(format!("{} → {}", check_in, check_out)),
        StepPayload::Guests { guests, rooms, .. } => {
            Some(format!("{} guests, {} rooms", guests, rooms))
        }
        StepPayload::ResultsAnalysis { hotels_count, .. } => {
            Some(format!("{} hotels", hotels_count))
        }
        StepPayload::FilteredResults {
            filtered_hotels_count,
            active_filters_count,
            ..
        } => Some(format!(
            "{} hotels, {} active filters",
            filtered_hotels_count, active_filters_count
        )),
        StepPayload::PaymentAnalysis {
            payment_methods_count,
            ..
        } => Some(format!("{} payment methods", payment_methods_count)),
        _ => None,
    }
}

fn format_duration(d: Duration) -> String {
    if d < Duration::from_secs(1) {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}
