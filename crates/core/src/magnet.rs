//! Torrent descriptor (magnet URI) building and launching.

use thiserror::Error;
use tokio::process::Command;
use tracing::info;

use crate::detail::DetailRecord;

/// Build the magnet URI of an item: info hash, display name and one `tr`
/// parameter per tracker, in page order.
pub fn magnet_uri(record: &DetailRecord) -> String {
    let mut uri = format!(
        "magnet:?xt=urn:btih:{}&dn={}",
        record.torrent.hash,
        urlencoding::encode(&record.title)
    );
    for tracker in &record.torrent.trackers {
        uri.push_str("&tr=");
        uri.push_str(&urlencoding::encode(tracker));
    }
    uri
}

/// Errors from handing a magnet URI to an external program.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("No launcher command configured")]
    NotConfigured,

    #[error("Failed to start {command}: {message}")]
    Spawn { command: String, message: String },

    #[error("{command} exited with {status}")]
    ExitStatus { command: String, status: String },
}

/// Runs an external program (e.g. a torrent client) with a magnet URI.
#[derive(Debug, Clone)]
pub struct MagnetLauncher {
    command: Option<String>,
}

impl MagnetLauncher {
    pub fn new(command: Option<String>) -> Self {
        Self {
            command: command.filter(|c| !c.trim().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.command.is_some()
    }

    /// Run the configured program with `magnet` as its only argument.
    pub async fn launch(&self, magnet: &str) -> Result<(), LaunchError> {
        let command = self.command.as_deref().ok_or(LaunchError::NotConfigured)?;
        info!("Launching magnet link with [{}]", command);

        let status = Command::new(command)
            .arg(magnet)
            .status()
            .await
            .map_err(|e| LaunchError::Spawn {
                command: command.to_string(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(LaunchError::ExitStatus {
                command: command.to_string(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::TorrentInfo;

    fn record(title: &str, hash: &str, trackers: &[&str]) -> DetailRecord {
        DetailRecord {
            title: title.to_string(),
            torrent: TorrentInfo {
                hash: hash.to_string(),
                size: String::new(),
                trackers: trackers.iter().map(|t| t.to_string()).collect(),
            },
            ..DetailRecord::default()
        }
    }

    #[test]
    fn test_magnet_uri_encodes_title_and_trackers() {
        let uri = magnet_uri(&record(
            "Dune: Book 1",
            "abc123",
            &["udp://tracker.one:1337/announce", "http://two.example/ann?x=1"],
        ));
        assert_eq!(
            uri,
            "magnet:?xt=urn:btih:abc123&dn=Dune%3A%20Book%201\
             &tr=udp%3A%2F%2Ftracker.one%3A1337%2Fannounce\
             &tr=http%3A%2F%2Ftwo.example%2Fann%3Fx%3D1"
        );
    }

    #[test]
    fn test_magnet_uri_without_trackers() {
        assert_eq!(
            magnet_uri(&record("Dune", "abc123", &[])),
            "magnet:?xt=urn:btih:abc123&dn=Dune"
        );
    }

    #[test]
    fn test_one_tr_per_tracker() {
        let uri = magnet_uri(&record("Dune", "h", &["a", "b", "c"]));
        assert_eq!(uri.matches("&tr=").count(), 3);
    }

    #[tokio::test]
    async fn test_launch_without_command() {
        let launcher = MagnetLauncher::new(None);
        assert!(!launcher.is_configured());
        assert!(matches!(
            launcher.launch("magnet:?xt=urn:btih:abc").await,
            Err(LaunchError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_launch_missing_program() {
        let launcher = MagnetLauncher::new(Some("definitely-not-an-installed-program".into()));
        assert!(matches!(
            launcher.launch("magnet:?xt=urn:btih:abc").await,
            Err(LaunchError::Spawn { .. })
        ));
    }
}
