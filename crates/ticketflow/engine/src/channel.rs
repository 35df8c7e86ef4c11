//! Resume-value normalization
//!
//! Operators answer suspensions by hand, so the channel must tolerate
//! malformed input. Normalization always degrades to "nothing validated" or
//! a false outcome; it never fails the run.

use std::collections::BTreeSet;

use ticketflow_types::{ResumeValue, Ticket, TicketId, ToolCallOutcome};

/// Normalize a resume value into the set of validated tickets.
///
/// Rules, in order:
/// - a structured record is used directly: its `validated_tickets` entries
///   are accepted as tickets (minimal `{"id": n}` records included; entries
///   that fail to parse are skipped);
/// - a string is first parsed as JSON; on parse failure the literal `all`
///   validates every pending ticket and a comma-separated id list validates
///   exactly the pending tickets whose id is listed (unknown ids ignored);
/// - an empty or absent value validates everything when `auto_approve` is
///   set, nothing otherwise;
/// - anything else validates nothing.
pub fn normalize_validation(
    resume: &ResumeValue,
    pending: &[Ticket],
    auto_approve: bool,
) -> Vec<Ticket> {
    match resume {
        ResumeValue::Record(value) => tickets_from_record(value),
        ResumeValue::Text(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return auto_approved(pending, auto_approve);
            }
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) {
                return tickets_from_record(&value);
            }
            if raw.eq_ignore_ascii_case("all") {
                return pending.to_vec();
            }
            let ids = parse_id_list(raw);
            pending
                .iter()
                .filter(|t| ids.contains(&t.id))
                .cloned()
                .collect()
        }
        ResumeValue::Empty => auto_approved(pending, auto_approve),
    }
}

fn auto_approved(pending: &[Ticket], auto_approve: bool) -> Vec<Ticket> {
    if auto_approve {
        tracing::info!(
            count = pending.len(),
            "auto-approval enabled; validating every pending ticket"
        );
        pending.to_vec()
    } else {
        Vec::new()
    }
}

/// Extract tickets from a `{"validated_tickets": [...]}` record. Any other
/// shape yields an empty result.
fn tickets_from_record(value: &serde_json::Value) -> Vec<Ticket> {
    let Some(entries) = value.get("validated_tickets").and_then(|v| v.as_array()) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value::<Ticket>(entry.clone()) {
            Ok(ticket) => Some(ticket),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unparseable validated-ticket entry");
                None
            }
        })
        .collect()
}

/// Parse `"3, 5,6"` into a set of ids, skipping anything non-numeric
fn parse_id_list(raw: &str) -> BTreeSet<TicketId> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<u64>().ok())
        .map(TicketId::new)
        .collect()
}

/// Normalize a resume value into a tool-call outcome.
///
/// The strings `ok`, `true` and `success` count as success outright
/// (`"true"` is also valid JSON, so the literals are checked first). Other
/// strings are parsed as JSON; a record's `ok` field or a bare boolean
/// decides success. Everything else, including an absent value, is a false
/// outcome.
pub fn normalize_outcome(resume: &ResumeValue) -> ToolCallOutcome {
    match resume {
        ResumeValue::Record(value) => outcome_from_record(value),
        ResumeValue::Text(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return ToolCallOutcome::failed("no resume payload");
            }
            if matches!(
                raw.to_ascii_lowercase().as_str(),
                "ok" | "true" | "success"
            ) {
                return ToolCallOutcome::ok(raw);
            }
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) {
                return outcome_from_record(&value);
            }
            ToolCallOutcome::failed(raw)
        }
        ResumeValue::Empty => ToolCallOutcome::failed("no resume payload"),
    }
}

fn outcome_from_record(value: &serde_json::Value) -> ToolCallOutcome {
    let ok = match value {
        serde_json::Value::Bool(b) => *b,
        other => other.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
    };
    let info = value
        .get("info")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    ToolCallOutcome { ok, info }
}
