use clap::{Command, CommandFactory, Parser};

use crate::payload::{ContentKind, Fields, WifiSecurity};
use crate::session::Session;
use crate::tool::{Output, Tool};
use crate::tools::design::{DesignArgs, OutputArgs};

#[derive(Parser, Debug)]
#[command(name = "wifi", about = "QR code that joins a Wi-Fi network")]
pub struct WifiTool {
    /// Network name
    #[arg(long)]
    ssid: String,

    /// Network password; ignored for open networks
    #[arg(long, default_value = "")]
    password: String,

    /// Authentication scheme of the network
    #[arg(long, value_enum, default_value = "wpa")]
    security: WifiSecurity,

    #[command(flatten)]
    design: DesignArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl Tool for WifiTool {
    fn cli() -> Command {
        WifiTool::command()
    }

    fn execute(&self) -> anyhow::Result<Option<Output>> {
        let mut session = Session::new();
        self.design.apply(&mut session)?;

        let fields = Fields {
            wifi_ssid: self.ssid.clone(),
            wifi_password: self.password.clone(),
            wifi_security: self.security,
            ..Fields::default()
        };
        session.update_payload(ContentKind::Wifi, &fields);

        self.output.finish(&mut session)
    }
}
