use clap::{Command, CommandFactory, Parser};

use crate::payload::{ContentKind, Fields};
use crate::session::Session;
use crate::tool::{Output, Tool};
use crate::tools::design::{DesignArgs, OutputArgs};

#[derive(Parser, Debug)]
#[command(name = "whatsapp", about = "QR code that starts a WhatsApp chat")]
pub struct WhatsAppTool {
    /// Phone number in international format, digits only
    number: String,

    /// Prefilled message
    #[arg(long, default_value = "")]
    message: String,

    #[command(flatten)]
    design: DesignArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl Tool for WhatsAppTool {
    fn cli() -> Command {
        WhatsAppTool::command()
    }

    fn execute(&self) -> anyhow::Result<Option<Output>> {
        let mut session = Session::new();
        self.design.apply(&mut session)?;

        let fields = Fields {
            wa_number: self.number.clone(),
            wa_message: self.message.clone(),
            ..Fields::default()
        };
        session.update_payload(ContentKind::Whatsapp, &fields);

        self.output.finish(&mut session)
    }
}
