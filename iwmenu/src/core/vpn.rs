//! WireGuard tunnel management.
//!
//! Tunnels are driven through `wg show` and `wg-quick up|down`. Their state is
//! never cached: every mutating action re-queries the live interface list
//! first, and bringing a tunnel up always tears down whatever is active so at
//! most one tunnel is up afterwards.

use log::{debug, info, warn};
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use crate::Result;
use crate::api::models::{CommandOutput, ConnectionError, TunnelInterface};
use crate::types::constants::tools;
use crate::util::command::{CommandRunner, args};

const INTERFACE_PREFIX: &str = "interface:";

/// Enumerates, tears down and brings up WireGuard interfaces.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use iwmenu::{SystemCommandRunner, VpnManager};
///
/// # async fn example() -> iwmenu::Result<()> {
/// let vpn = VpnManager::new(Arc::new(SystemCommandRunner))
///     .elevate(vec!["sudo".into(), "-A".into()]);
/// vpn.connect("de-01").await?;
/// assert!(vpn.active_interfaces().await?.len() <= 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct VpnManager {
    runner: Arc<dyn CommandRunner>,
    status_tool: String,
    control_tool: String,
    elevate: Vec<String>,
}

impl VpnManager {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            status_tool: tools::TUNNEL_STATUS.to_string(),
            control_tool: tools::TUNNEL_CONTROL.to_string(),
            elevate: Vec::new(),
        }
    }

    /// Overrides the status tool (default `wg`).
    pub fn status_tool(mut self, program: impl Into<String>) -> Self {
        self.status_tool = program.into();
        self
    }

    /// Overrides the up/down tool (default `wg-quick`).
    pub fn control_tool(mut self, program: impl Into<String>) -> Self {
        self.control_tool = program.into();
        self
    }

    /// Command prefix for privileged invocations, e.g. `["sudo", "-A"]`.
    pub fn elevate(mut self, prefix: Vec<String>) -> Self {
        self.elevate = prefix;
        self
    }

    /// Lists the interfaces reported by `<status-tool> show`.
    ///
    /// A non-zero exit (no permission, module not loaded) yields an empty
    /// list rather than an error.
    pub async fn active_interfaces(&self) -> Result<Vec<TunnelInterface>> {
        let output = self.invoke(&self.status_tool, &["show"]).await?;
        if !output.success() {
            warn!(
                "{} show failed: {}",
                self.status_tool,
                output.stderr.trim()
            );
            return Ok(Vec::new());
        }

        let interfaces = parse_interfaces(&output.stdout);
        debug!("Active tunnels: {interfaces:?}");
        Ok(interfaces)
    }

    /// Brings down every active interface.
    ///
    /// Individual failures are logged and skipped.
    pub async fn disconnect_all(&self) -> Result<()> {
        for iface in self.active_interfaces().await? {
            match self.down(&iface.name).await {
                Ok(()) => info!("Brought down {}", iface.name),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => warn!("Failed to bring down {}: {e}", iface.name),
            }
        }
        Ok(())
    }

    /// Tears down all active tunnels, then brings up `name`.
    ///
    /// The teardown happens even when `name` is already the only active
    /// tunnel. If any interface survives the teardown, `name` is not brought
    /// up and a `ConnectionError::Command` names the survivors.
    pub async fn connect(&self, name: &str) -> Result<()> {
        self.disconnect_all().await?;

        let remaining = self.active_interfaces().await?;
        if !remaining.is_empty() {
            let names: Vec<&str> = remaining.iter().map(|i| i.name.as_str()).collect();
            warn!("Not bringing up {name}: still active {names:?}");
            return Err(ConnectionError::Command {
                command: format!("{} up {name}", self.control_tool),
                status: None,
                stderr: format!("tunnels still active: {}", names.join(", ")),
            });
        }

        self.invoke(&self.control_tool, &["up", name])
            .await?
            .check(format!("{} up {name}", self.control_tool))?;
        info!("Tunnel {name} is up");
        Ok(())
    }

    async fn down(&self, name: &str) -> Result<()> {
        self.invoke(&self.control_tool, &["down", name])
            .await?
            .check(format!("{} down {name}", self.control_tool))?;
        Ok(())
    }

    async fn invoke(&self, tool: &str, tool_args: &[&str]) -> Result<CommandOutput> {
        let (program, argv) = match self.elevate.split_first() {
            Some((program, prefix)) => {
                let mut argv = prefix.to_vec();
                argv.push(tool.to_string());
                argv.extend(args(tool_args.iter().copied()));
                (program.as_str(), argv)
            }
            None => (tool, args(tool_args.iter().copied())),
        };
        self.runner.run(program, &argv, None).await
    }
}

/// Reads the tunnel candidate list, one name per line.
///
/// # Errors
///
/// Returns `ConnectionError::NoVpnCandidates` if the file does not exist.
pub async fn candidates(path: &Path) -> Result<Vec<String>> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConnectionError::NoVpnCandidates(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn parse_interfaces(show: &str) -> Vec<TunnelInterface> {
    show.lines()
        .filter_map(|line| line.trim_start().strip_prefix(INTERFACE_PREFIX))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| TunnelInterface {
            name: name.to_string(),
            active: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    const SHOW: &str = "interface: de-01\n  public key: abc=\n  listening port: 51820\n\npeer: xyz=\n  endpoint: 1.2.3.4:51820\n";

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<Vec<String>>>,
        show_status: i32,
        show_stdout: String,
    }

    #[async_trait]
    impl CommandRunner for Recorder {
        async fn run(
            &self,
            program: &str,
            args: &[String],
            _stdin: Option<&str>,
        ) -> Result<CommandOutput> {
            let mut call = vec![program.to_string()];
            call.extend(args.iter().cloned());
            let is_show = call.iter().any(|a| a == "show");
            self.calls.lock().unwrap().push(call);
            Ok(if is_show {
                CommandOutput {
                    status: Some(self.show_status),
                    stdout: self.show_stdout.clone(),
                    stderr: String::new(),
                }
            } else {
                CommandOutput {
                    status: Some(0),
                    ..Default::default()
                }
            })
        }
    }

    #[test]
    fn parses_interface_lines() {
        let ifaces = parse_interfaces(SHOW);
        assert_eq!(
            ifaces,
            vec![TunnelInterface {
                name: "de-01".into(),
                active: true
            }]
        );
    }

    #[test]
    fn no_interfaces_in_empty_output() {
        assert!(parse_interfaces("").is_empty());
    }

    #[tokio::test]
    async fn failed_show_is_empty_list() {
        let runner = Arc::new(Recorder {
            show_status: 1,
            ..Default::default()
        });
        let vpn = VpnManager::new(runner);
        assert!(vpn.active_interfaces().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn elevation_prefix_wraps_tool() {
        let runner = Arc::new(Recorder::default());
        let vpn = VpnManager::new(runner.clone()).elevate(vec!["sudo".into(), "-A".into()]);
        vpn.connect("de-01").await.unwrap();
        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls[0], vec!["sudo", "-A", "wg", "show"]);
        assert_eq!(calls[1], vec!["sudo", "-A", "wg", "show"]);
        assert_eq!(calls[2], vec!["sudo", "-A", "wg-quick", "up", "de-01"]);
    }

    #[tokio::test]
    async fn connect_stops_when_a_tunnel_survives_teardown() {
        // `show` keeps reporting de-01 even after `down` succeeds.
        let runner = Arc::new(Recorder {
            show_stdout: SHOW.into(),
            ..Default::default()
        });
        let vpn = VpnManager::new(runner.clone());

        let err = vpn.connect("nl-02").await.unwrap_err();

        assert!(matches!(err, ConnectionError::Command { .. }));
        assert!(err.to_string().contains("de-01"));
        let calls = runner.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                vec!["wg", "show"],
                vec!["wg-quick", "down", "de-01"],
                vec!["wg", "show"],
            ]
        );
    }

    #[tokio::test]
    async fn missing_candidate_list_is_fatal() {
        let path = Path::new("/nonexistent/iwmenu/connections.list");
        let err = candidates(path).await.unwrap_err();
        assert!(matches!(err, ConnectionError::NoVpnCandidates(_)));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn candidate_lines_are_trimmed() {
        let path = std::env::temp_dir().join(format!("iwmenu-candidates-{}", std::process::id()));
        tokio::fs::write(&path, "de-01\n\n  nl-02 \n").await.unwrap();
        let names = candidates(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();
        assert_eq!(names, vec!["de-01", "nl-02"]);
    }
}
