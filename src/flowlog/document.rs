use serde::{Deserialize, Serialize};

/// Top-level flow-log document.
///
/// `records` is kept as raw JSON values so that one envelope of unrecognized
/// shape can be skipped with a diagnostic instead of failing the whole
/// document. Absence of the array entirely is a valid empty state.
#[derive(Debug, Deserialize)]
pub struct RawDocument {
    pub records: Option<Vec<serde_json::Value>>,
}

/// One log envelope inside `records`.
#[derive(Debug, Deserialize)]
pub struct LogEnvelope {
    #[serde(rename = "resourceId")]
    pub resource_id: Option<String>,
    pub category: Option<String>,
    pub time: Option<String>,
    #[serde(default)]
    pub properties: Properties,
}

/// Envelope properties, covering both supported schema shapes: a nested
/// `flows` array of rule blocks, or `flowTuples` directly.
#[derive(Debug, Default, Deserialize)]
pub struct Properties {
    #[serde(rename = "Version", alias = "version", alias = "V")]
    pub version: Option<FlowVersion>,
    #[serde(default)]
    pub flows: Vec<RuleBlock>,
    #[serde(rename = "flowTuples")]
    pub flow_tuples: Option<Vec<String>>,
}

/// Groups flow tuples under a rule name.
#[derive(Debug, Deserialize)]
pub struct RuleBlock {
    #[serde(alias = "ruleName")]
    pub rule: Option<String>,
    #[serde(default)]
    pub flows: Vec<InnerFlow>,
}

#[derive(Debug, Deserialize)]
pub struct InnerFlow {
    pub mac: Option<String>,
    #[serde(rename = "flowTuples", default)]
    pub flow_tuples: Vec<String>,
}

/// Schema version tag. Documents write it as a number or a string; it is
/// carried through to the output with its JSON type intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlowVersion {
    Number(serde_json::Number),
    Text(String),
}

impl Default for FlowVersion {
    fn default() -> Self {
        FlowVersion::Text("v2".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_key_spellings() {
        for key in ["Version", "version", "V"] {
            let json = format!(r#"{{"{key}": "v3"}}"#);
            let props: Properties = serde_json::from_str(&json).unwrap();
            assert_eq!(props.version, Some(FlowVersion::Text("v3".to_string())));
        }
    }

    #[test]
    fn test_numeric_version_keeps_json_type() {
        let props: Properties = serde_json::from_str(r#"{"Version": 2}"#).unwrap();
        assert_eq!(
            props.version,
            Some(FlowVersion::Number(serde_json::Number::from(2)))
        );
    }

    #[test]
    fn test_version_defaults_to_v2() {
        assert_eq!(FlowVersion::default(), FlowVersion::Text("v2".to_string()));
    }

    #[test]
    fn test_rule_name_spellings() {
        let block: RuleBlock = serde_json::from_str(r#"{"rule": "R1"}"#).unwrap();
        assert_eq!(block.rule.as_deref(), Some("R1"));

        let block: RuleBlock = serde_json::from_str(r#"{"ruleName": "R2"}"#).unwrap();
        assert_eq!(block.rule.as_deref(), Some("R2"));
    }

    #[test]
    fn test_document_without_records_array() {
        let doc: RawDocument = serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert!(doc.records.is_none());
    }

    #[test]
    fn test_envelope_without_properties() {
        let env: LogEnvelope = serde_json::from_str(r#"{"resourceId": "r1"}"#).unwrap();
        assert_eq!(env.resource_id.as_deref(), Some("r1"));
        assert!(env.properties.version.is_none());
        assert!(env.properties.flows.is_empty());
        assert!(env.properties.flow_tuples.is_none());
    }
}
