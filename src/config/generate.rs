/// Starter settings for `flowrelay config init`.
pub fn generate_starter_settings() -> String {
    r#"# flowrelay settings
#
# The broker endpoint and topic are required. The same values can instead be
# supplied through the BROKER_ENDPOINT / BROKER_TOPIC / MAX_EVENTS_PER_BATCH
# environment variables.

# Broker namespace address.
broker_endpoint: my-namespace.servicebus.example.net

# Topic that receives the flattened flow records.
topic: nw-flowlogs

# Soft ceiling on messages per batch, layered atop the broker's byte limit.
max_events_per_batch: 500
"#
    .to_string()
}
