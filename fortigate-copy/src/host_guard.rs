use anyhow::{bail, Result};

/// Refuse to copy an appliance onto itself.
pub fn ensure_distinct_hosts(source: &str, destination: &str) -> Result<()> {
    if normalize(source) == normalize(destination) {
        bail!("refusing to copy {source} onto itself: source and destination are the same appliance");
    }
    Ok(())
}

fn normalize(host: &str) -> String {
    host.trim()
        .trim_start_matches("https://")
        .trim_end_matches('/')
        .to_ascii_lowercase()
}
