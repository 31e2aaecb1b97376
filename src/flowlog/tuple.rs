use crate::flowlog::document::FlowVersion;
use crate::flowlog::record::FlowRecord;
use crate::flowlog::timestamp;
use thiserror::Error;

/// Minimum segment count for a conforming flow tuple:
/// time, srcIp, destIp, srcPort, destPort, protocol, direction, decision.
pub const MIN_TUPLE_FIELDS: usize = 8;

#[derive(Debug, Error)]
pub enum TupleIssue {
    #[error("flow tuple has {parts} fields, expected at least 8")]
    TooShort { parts: usize },
}

/// Context inherited from the enclosing envelope, rule block and inner flow.
#[derive(Debug, Clone)]
pub struct CommonFields {
    pub flow_version: FlowVersion,
    pub resource_id: Option<String>,
    pub category: Option<String>,
    pub rule: Option<String>,
    pub mac: Option<String>,
    pub record_time: Option<String>,
}

/// Decode one comma-delimited flow tuple into a FlowRecord.
///
/// Segments are trimmed; unmapped protocol/direction/decision codes pass
/// through verbatim; segments beyond the eighth become `extraFields`.
pub fn parse_tuple(raw: &str, common: &CommonFields) -> Result<FlowRecord, TupleIssue> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() < MIN_TUPLE_FIELDS {
        return Err(TupleIssue::TooShort { parts: parts.len() });
    }

    let extra_fields = if parts.len() > MIN_TUPLE_FIELDS {
        Some(
            parts[MIN_TUPLE_FIELDS..]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    } else {
        None
    };

    Ok(FlowRecord {
        flow_version: common.flow_version.clone(),
        resource_id: common.resource_id.clone(),
        category: common.category.clone(),
        rule: common.rule.clone(),
        mac: common.mac.clone(),
        record_time: common.record_time.clone(),
        time: timestamp::normalize(parts[0]),
        src_ip: parts[1].to_string(),
        dest_ip: parts[2].to_string(),
        src_port: parts[3].to_string(),
        dest_port: parts[4].to_string(),
        protocol: protocol_name(parts[5]),
        direction: direction_name(parts[6]),
        decision: decision_name(parts[7]),
        extra_fields,
    })
}

fn protocol_name(code: &str) -> String {
    match code {
        "T" => "TCP",
        "U" => "UDP",
        "I" => "ICMP",
        other => other,
    }
    .to_string()
}

fn direction_name(code: &str) -> String {
    match code {
        "I" => "Inbound",
        "O" => "Outbound",
        "U" => "Unknown",
        other => other,
    }
    .to_string()
}

fn decision_name(code: &str) -> String {
    match code {
        "A" => "Allow",
        "D" => "Deny",
        other => other,
    }
    .to_string()
}
