/// Plain-text liveness probe.
pub async fn liveness() -> &'static str {
    "server is up and running"
}
