//! Target URL construction

/// Build `http://{address}:{port}{path}`.
///
/// Nothing is validated or normalized: an empty path stays empty and a
/// nonsensical port produces a URL the client will refuse, which then
/// surfaces as a transport failure.
pub fn build_target_url(address: &str, port: i64, path: &str) -> String {
    format!("http://{}:{}{}", address, port, path)
}
