use crate::flowlog::document::FlowVersion;
use serde::{Deserialize, Serialize};

/// One flattened, normalized flow record. Field declaration order is the
/// serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowRecord {
    pub flow_version: FlowVersion,
    pub resource_id: Option<String>,
    pub category: Option<String>,
    pub rule: Option<String>,
    pub mac: Option<String>,
    pub record_time: Option<String>,
    /// Normalized tuple timestamp; null when the raw value was unparseable.
    pub time: Option<String>,
    pub src_ip: String,
    pub dest_ip: String,
    pub src_port: String,
    pub dest_port: String,
    pub protocol: String,
    pub direction: String,
    pub decision: String,
    /// Raw tuple segments beyond the eight recognized positions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_fields: Option<Vec<String>>,
}

impl FlowRecord {
    /// Render this record as one broker message payload. Compact JSON,
    /// non-ASCII characters preserved.
    pub fn to_message(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record() -> FlowRecord {
        FlowRecord {
            flow_version: FlowVersion::Text("v2".to_string()),
            resource_id: Some("/sub/s1/rg/net".to_string()),
            category: Some("NetworkSecurityGroupFlowEvent".to_string()),
            rule: Some("AllowHttps".to_string()),
            mac: None,
            record_time: Some("2023-11-14T22:00:00Z".to_string()),
            time: Some("2023-11-14T22:13:20+00:00".to_string()),
            src_ip: "10.0.0.1".to_string(),
            dest_ip: "10.0.0.2".to_string(),
            src_port: "443".to_string(),
            dest_port: "80".to_string(),
            protocol: "TCP".to_string(),
            direction: "Inbound".to_string(),
            decision: "Allow".to_string(),
            extra_fields: None,
        }
    }

    #[test]
    fn test_serialized_key_names_and_order() {
        let message = make_record().to_message().unwrap();
        assert!(message.starts_with(r#"{"flowVersion":"#));
        let positions: Vec<usize> = ["flowVersion", "resourceId", "recordTime", "srcIp", "destIp", "decision"]
            .iter()
            .map(|key| message.find(&format!("\"{key}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_extra_fields_omitted_when_absent() {
        let message = make_record().to_message().unwrap();
        assert!(!message.contains("extraFields"));

        let mut record = make_record();
        record.extra_fields = Some(vec!["12".to_string(), "34".to_string()]);
        let message = record.to_message().unwrap();
        assert!(message.contains(r#""extraFields":["12","34"]"#));
    }

    #[test]
    fn test_nullable_fields_serialize_as_null() {
        let message = make_record().to_message().unwrap();
        assert!(message.contains(r#""mac":null"#));
    }

    #[test]
    fn test_non_ascii_preserved() {
        let mut record = make_record();
        record.category = Some("réseau".to_string());
        let message = record.to_message().unwrap();
        assert!(message.contains("réseau"));
        assert!(!message.contains("\\u"));
    }

    #[test]
    fn test_round_trip() {
        let record = make_record();
        let message = record.to_message().unwrap();
        let parsed: FlowRecord = serde_json::from_str(&message).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_numeric_version_round_trip() {
        let mut record = make_record();
        record.flow_version = FlowVersion::Number(serde_json::Number::from(2));
        let message = record.to_message().unwrap();
        assert!(message.starts_with(r#"{"flowVersion":2,"#));
        let parsed: FlowRecord = serde_json::from_str(&message).unwrap();
        assert_eq!(parsed, record);
    }
}
