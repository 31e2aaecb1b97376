use crate::flowlog::document::{LogEnvelope, RawDocument};
use crate::flowlog::record::FlowRecord;
use crate::flowlog::tuple::{parse_tuple, CommonFields, TupleIssue};
use tracing::warn;

/// Result of flattening one document: the normalized records plus
/// diagnostics for everything that was skipped along the way.
#[derive(Debug, Default)]
pub struct FlattenOutput {
    pub records: Vec<FlowRecord>,
    pub issues: Vec<ParseIssue>,
}

/// A per-record problem. These never abort the document; they are collected
/// for observability while processing continues.
#[derive(Debug)]
pub enum ParseIssue {
    NoRecordsArray,
    UnrecognizedEnvelope { index: usize, reason: String },
    MalformedTuple { tuple: String, issue: TupleIssue },
}

/// Walk the nested document structure and emit a flat record sequence.
///
/// Envelopes of unrecognized shape and malformed tuples are skipped with a
/// diagnostic. A document with no `records` array flattens to nothing.
pub fn flatten(doc: &RawDocument) -> FlattenOutput {
    let mut out = FlattenOutput::default();

    let Some(records) = &doc.records else {
        warn!("No 'records' array found in document");
        out.issues.push(ParseIssue::NoRecordsArray);
        return out;
    };

    for (index, value) in records.iter().enumerate() {
        match serde_json::from_value::<LogEnvelope>(value.clone()) {
            Ok(envelope) => flatten_envelope(&envelope, &mut out),
            Err(e) => {
                warn!(record = index, error = %e, "Skipping log record of unrecognized shape");
                out.issues.push(ParseIssue::UnrecognizedEnvelope {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    out
}

fn flatten_envelope(envelope: &LogEnvelope, out: &mut FlattenOutput) {
    let props = &envelope.properties;
    let version = props.version.clone().unwrap_or_default();

    for rule_block in &props.flows {
        for inner in &rule_block.flows {
            let common = CommonFields {
                flow_version: version.clone(),
                resource_id: envelope.resource_id.clone(),
                category: envelope.category.clone(),
                rule: rule_block.rule.clone(),
                mac: inner.mac.clone(),
                record_time: envelope.time.clone(),
            };
            parse_tuples(&inner.flow_tuples, &common, out);
        }
    }

    // Alternate schema shape: no rule blocks, tuples directly under
    // properties. Treated as one implicit rule block with no rule and no mac.
    if props.flows.is_empty() {
        if let Some(tuples) = &props.flow_tuples {
            let common = CommonFields {
                flow_version: version,
                resource_id: envelope.resource_id.clone(),
                category: envelope.category.clone(),
                rule: None,
                mac: None,
                record_time: envelope.time.clone(),
            };
            parse_tuples(tuples, &common, out);
        }
    }
}

fn parse_tuples(tuples: &[String], common: &CommonFields, out: &mut FlattenOutput) {
    for raw in tuples {
        match parse_tuple(raw, common) {
            Ok(record) => out.records.push(record),
            Err(issue) => {
                warn!(tuple = %raw, %issue, "Skipping malformed flow tuple");
                out.issues.push(ParseIssue::MalformedTuple {
                    tuple: raw.clone(),
                    issue,
                });
            }
        }
    }
}
