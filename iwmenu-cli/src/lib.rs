pub mod config;
pub mod file_lock;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use iwmenu::{
    CommandPicker, CommandPrompt, CommandRunner, ConnectionController, IwdBackend, MainAction,
    MenuChoice, MenuConfig, NetworkCatalog, NetworkControl, Notifier, SelectionMenu,
    SessionState, SystemCommandRunner, VpnManager, WifiSession, vpn_candidates,
};

use crate::config::load_config;
use crate::file_lock::{AppLock, acquire_app_lock};

#[derive(Parser, Debug)]
#[command(name = "iwmenu")]
#[command(version, about = "Wi-Fi and WireGuard menu for iwd")]
struct Args {
    /// Wireless interface to use when iwd does not report one
    #[arg(short, long)]
    interface: Option<String>,

    /// Configuration file (default: $XDG_CONFIG_HOME/iwmenu/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the Wi-Fi menu
    Wifi {
        #[command(subcommand)]
        action: Option<WifiAction>,
    },
    /// Open the VPN menu
    Vpn {
        #[command(subcommand)]
        action: Option<VpnAction>,
    },
}

#[derive(Subcommand, Debug)]
enum WifiAction {
    /// Disconnect the station
    Disconnect,
}

#[derive(Subcommand, Debug)]
enum VpnAction {
    /// Bring up a tunnel, tearing down any active one
    Up { name: String },
    /// Bring down every active tunnel
    Down,
}

pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(interface) = &args.interface {
        config.interface = interface.clone();
    }

    let _lock = match acquire_app_lock().map_err(anyhow::Error::msg)? {
        AppLock::Acquired(file) => file,
        AppLock::AlreadyRunning => {
            println!("iwmenu is already running");
            return Ok(());
        }
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let app = App::new(config);
    runtime.block_on(async {
        tokio::select! {
            result = app.dispatch(args.command) => result,
            _ = tokio::signal::ctrl_c() => {
                app.interrupt();
                Ok(())
            }
        }
    })
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Shared collaborators for one invocation.
struct App {
    config: MenuConfig,
    runner: Arc<dyn CommandRunner>,
    menu: SelectionMenu,
    cancel: CancellationToken,
}

impl App {
    fn new(config: MenuConfig) -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(SystemCommandRunner);
        let picker = CommandPicker::new(runner.clone())
            .program(config.picker.program.clone())
            .config(config.picker.config.clone())
            .extra_args(config.picker.args.clone());
        let menu = SelectionMenu::new(Arc::new(picker)).padding(config.picker.padding);
        Self {
            config,
            runner,
            menu,
            cancel: CancellationToken::new(),
        }
    }

    /// Cuts short any scan wait still in flight.
    fn interrupt(&self) {
        debug!("Interrupted");
        self.cancel.cancel();
    }

    async fn dispatch(&self, command: Option<Command>) -> anyhow::Result<()> {
        match command {
            None => self.main_menu().await,
            Some(Command::Wifi { action: None }) => self.wifi().await.map(|_| ()),
            Some(Command::Wifi {
                action: Some(WifiAction::Disconnect),
            }) => {
                let iwd = self.backend().await?;
                let device = iwd.locate().await?;
                report(iwd.disconnect(&device).await)
            }
            Some(Command::Vpn { action: None }) => self.vpn().await.map(|_| ()),
            Some(Command::Vpn {
                action: Some(VpnAction::Up { name }),
            }) => report(self.tunnels().connect(&name).await),
            Some(Command::Vpn {
                action: Some(VpnAction::Down),
            }) => report(self.tunnels().disconnect_all().await),
        }
    }

    /// `WiFi` / `VPN` / `Cancel`, re-shown when a sub-menu is backed out of.
    async fn main_menu(&self) -> anyhow::Result<()> {
        loop {
            let Some(action) = recover(self.menu.present_main().await)? else {
                return Ok(());
            };
            let done = match action {
                MainAction::Wifi => self.wifi().await?,
                MainAction::Vpn => self.vpn().await?,
                MainAction::Exit => true,
            };
            if done {
                return Ok(());
            }
        }
    }

    /// Runs a Wi-Fi session. Returns `true` once the menu should close.
    async fn wifi(&self) -> anyhow::Result<bool> {
        let iwd: Arc<dyn NetworkControl> = Arc::new(self.backend().await?);
        let catalog = NetworkCatalog::open(iwd.clone(), self.config.scan.wait()).await?;
        let prompt = CommandPrompt::new(self.runner.clone())
            .command(self.config.prompt.command.clone());
        let controller = ConnectionController::new(iwd, Arc::new(prompt));

        let mut session = WifiSession::new(catalog, self.menu.clone(), controller);
        if self.config.notifications {
            session = session.with_notifier(Notifier::new(self.runner.clone()));
        }

        match session.run().await {
            Ok(SessionState::Connected) => Ok(true),
            Ok(_) => Ok(false),
            Err(e) => report(Err(e)).map(|()| true),
        }
    }

    /// Runs the tunnel menu. Returns `true` once the menu should close.
    async fn vpn(&self) -> anyhow::Result<bool> {
        let Some(names) = recover(vpn_candidates(&self.config.vpn.candidates).await)? else {
            return Ok(true);
        };
        let Some(choice) = recover(self.menu.present_vpn(&names).await)? else {
            return Ok(true);
        };
        match choice {
            MenuChoice::VpnName(name) => {
                report(self.tunnels().connect(&name).await)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn backend(&self) -> anyhow::Result<IwdBackend> {
        let iwd = IwdBackend::new()
            .await
            .context("Failed to connect to the system bus")?;
        Ok(iwd
            .station_ctl(self.config.station_ctl.clone())
            .fallback_interface(self.config.interface.clone())
            .cancel_on(self.cancel.clone()))
    }

    fn tunnels(&self) -> VpnManager {
        let vpn = &self.config.vpn;
        VpnManager::new(self.runner.clone())
            .status_tool(vpn.status_tool.clone())
            .control_tool(vpn.control_tool.clone())
            .elevate(vpn.elevate.clone())
    }
}

/// Prints recoverable failures and keeps exit status 0; fatal ones propagate.
fn report(result: iwmenu::Result<()>) -> anyhow::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_fatal() => Err(e.into()),
        Err(e) => {
            info!("Recoverable failure: {e}");
            eprintln!("{e}");
            Ok(())
        }
    }
}

/// Like `report`, but keeps the value; a recoverable failure yields `None`.
fn recover<T>(result: iwmenu::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) => report(Err(e)).map(|()| None),
    }
}
