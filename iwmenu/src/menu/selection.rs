use log::debug;
use std::sync::Arc;

use crate::Result;
use crate::api::models::{MainAction, MenuChoice, NetworkEntry, Sentinel};
use crate::menu::picker::Picker;
use crate::types::constants::menu;

/// Renders menus through a [`Picker`] and maps the reply back to a choice.
///
/// Width is the longest option in characters plus padding; the line count
/// equals the number of options.
#[derive(Clone)]
pub struct SelectionMenu {
    picker: Arc<dyn Picker>,
    padding: usize,
}

impl SelectionMenu {
    pub fn new(picker: Arc<dyn Picker>) -> Self {
        Self {
            picker,
            padding: menu::WIDTH_PADDING,
        }
    }

    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Shows one line per network followed by `Scan` and `Back`.
    ///
    /// Anything that is neither a sentinel nor an exact display line maps to
    /// [`MenuChoice::None`].
    pub async fn present(&self, entries: &[NetworkEntry]) -> Result<MenuChoice> {
        let lines: Vec<String> = entries.iter().map(NetworkEntry::display_line).collect();
        let mut options = lines.clone();
        options.push(Sentinel::Scan.label().to_string());
        options.push(Sentinel::Back.label().to_string());

        let reply = self.pick(&options).await?;
        let choice = match reply.as_str() {
            "" => MenuChoice::None,
            menu::SCAN => MenuChoice::Sentinel(Sentinel::Scan),
            menu::BACK => MenuChoice::Sentinel(Sentinel::Back),
            text => lines
                .iter()
                .position(|line| line == text)
                .map(|i| MenuChoice::Selected(entries[i].clone()))
                .unwrap_or(MenuChoice::None),
        };
        Ok(choice)
    }

    /// Top-level menu: `WiFi`, `VPN`, `Cancel`.
    pub async fn present_main(&self) -> Result<MainAction> {
        let options = [menu::WIFI, menu::VPN, menu::CANCEL].map(String::from);
        let action = match self.pick(&options).await?.as_str() {
            menu::WIFI => MainAction::Wifi,
            menu::VPN => MainAction::Vpn,
            _ => MainAction::Exit,
        };
        Ok(action)
    }

    /// Lists tunnel names followed by `Back`.
    pub async fn present_vpn(&self, names: &[String]) -> Result<MenuChoice> {
        let mut options = names.to_vec();
        options.push(Sentinel::Back.label().to_string());

        let reply = self.pick(&options).await?;
        let choice = match reply.as_str() {
            "" => MenuChoice::None,
            menu::BACK => MenuChoice::Sentinel(Sentinel::Back),
            text if names.iter().any(|name| name == text) => MenuChoice::VpnName(text.to_string()),
            _ => MenuChoice::None,
        };
        Ok(choice)
    }

    async fn pick(&self, options: &[String]) -> Result<String> {
        let (width, lines) = layout(options, self.padding);
        let reply = self.picker.pick(options, width, lines).await?;
        debug!("Picked {reply:?} from {lines} option(s)");
        Ok(reply)
    }
}

fn layout(options: &[String], padding: usize) -> (usize, usize) {
    let longest = options
        .iter()
        .map(|option| option.chars().count())
        .max()
        .unwrap_or(0);
    (longest + padding, options.len())
}
