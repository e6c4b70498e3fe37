use async_trait::async_trait;
use iwmenu::{CommandOutput, CommandRunner, ConnectionError, Result, TunnelInterface, VpnManager};
use std::sync::{Arc, Mutex};

/// In-memory `wg` / `wg-quick` pair.
#[derive(Default)]
struct FakeWireGuard {
    up: Mutex<Vec<String>>,
    log: Mutex<Vec<String>>,
    broken: Vec<&'static str>,
    stuck: Vec<&'static str>,
}

impl FakeWireGuard {
    fn with_active(names: &[&str]) -> Self {
        Self {
            up: Mutex::new(names.iter().map(|n| n.to_string()).collect()),
            ..Default::default()
        }
    }

    fn ok(stdout: String) -> CommandOutput {
        CommandOutput {
            status: Some(0),
            stdout,
            stderr: String::new(),
        }
    }
}

#[async_trait]
impl CommandRunner for FakeWireGuard {
    async fn run(&self, program: &str, args: &[String], _stdin: Option<&str>) -> Result<CommandOutput> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{program} {}", args.join(" ")));

        let mut up = self.up.lock().unwrap();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        Ok(match (program, args.as_slice()) {
            ("wg", ["show"]) => Self::ok(
                up.iter()
                    .map(|name| format!("interface: {name}\n  listening port: 51820\n\n"))
                    .collect(),
            ),
            ("wg-quick", ["down", name]) if self.stuck.iter().any(|s| s == name) => CommandOutput {
                status: Some(1),
                stdout: String::new(),
                stderr: "RTNETLINK answers: Operation not permitted\n".into(),
            },
            ("wg-quick", ["down", name]) => {
                up.retain(|n| n != name);
                Self::ok(String::new())
            }
            ("wg-quick", ["up", name]) if self.broken.iter().any(|b| b == name) => CommandOutput {
                status: Some(1),
                stdout: String::new(),
                stderr: format!("wg-quick: `/etc/wireguard/{name}.conf' does not exist\n"),
            },
            ("wg-quick", ["up", name]) => {
                up.push(name.to_string());
                Self::ok(String::new())
            }
            _ => CommandOutput {
                status: Some(127),
                ..Default::default()
            },
        })
    }
}

fn active(name: &str) -> TunnelInterface {
    TunnelInterface {
        name: name.into(),
        active: true,
    }
}

#[tokio::test]
async fn connect_leaves_exactly_the_requested_tunnel() {
    let wg = Arc::new(FakeWireGuard::with_active(&["de-01", "nl-02"]));
    let vpn = VpnManager::new(wg.clone());

    vpn.connect("fr-03").await.unwrap();

    assert_eq!(vpn.active_interfaces().await.unwrap(), vec![active("fr-03")]);
}

#[tokio::test]
async fn reconnecting_the_active_tunnel_still_cycles_it() {
    let wg = Arc::new(FakeWireGuard::with_active(&["de-01"]));
    let vpn = VpnManager::new(wg.clone());

    vpn.connect("de-01").await.unwrap();

    assert_eq!(vpn.active_interfaces().await.unwrap(), vec![active("de-01")]);
    let log = wg.log.lock().unwrap();
    assert_eq!(
        log[..4],
        ["wg show", "wg-quick down de-01", "wg show", "wg-quick up de-01"]
    );
}

#[tokio::test]
async fn failed_bring_up_leaves_nothing_active() {
    let wg = Arc::new(FakeWireGuard {
        broken: vec!["fr-03"],
        ..FakeWireGuard::with_active(&["de-01"])
    });
    let vpn = VpnManager::new(wg.clone());

    let err = vpn.connect("fr-03").await.unwrap_err();

    assert!(matches!(err, ConnectionError::Command { .. }));
    assert!(err.to_string().contains("does not exist"));
    assert!(!err.is_fatal());
    assert!(vpn.active_interfaces().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_teardown_blocks_bring_up() {
    let wg = Arc::new(FakeWireGuard {
        stuck: vec!["de-01"],
        ..FakeWireGuard::with_active(&["de-01"])
    });
    let vpn = VpnManager::new(wg.clone());

    let err = vpn.connect("nl-02").await.unwrap_err();

    assert!(matches!(err, ConnectionError::Command { .. }));
    assert!(!err.is_fatal());
    assert_eq!(vpn.active_interfaces().await.unwrap(), vec![active("de-01")]);
    assert!(!wg.log.lock().unwrap().iter().any(|c| c == "wg-quick up nl-02"));
}

#[tokio::test]
async fn disconnect_all_brings_everything_down() {
    let wg = Arc::new(FakeWireGuard::with_active(&["de-01", "nl-02"]));
    let vpn = VpnManager::new(wg.clone());

    vpn.disconnect_all().await.unwrap();

    assert!(vpn.active_interfaces().await.unwrap().is_empty());
}

#[tokio::test]
async fn at_most_one_tunnel_after_any_connect_sequence() {
    let wg = Arc::new(FakeWireGuard::default());
    let vpn = VpnManager::new(wg.clone());

    for name in ["de-01", "nl-02", "nl-02", "se-04"] {
        vpn.connect(name).await.unwrap();
        assert_eq!(vpn.active_interfaces().await.unwrap(), vec![active(name)]);
    }
}
