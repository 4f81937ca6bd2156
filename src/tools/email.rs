use clap::{Command, CommandFactory, Parser};

use crate::payload::{ContentKind, Fields};
use crate::session::Session;
use crate::tool::{Output, Tool};
use crate::tools::design::{DesignArgs, OutputArgs};

#[derive(Parser, Debug)]
#[command(name = "email", about = "QR code that drafts an email")]
pub struct EmailTool {
    /// Recipient address
    #[arg(long, default_value = "")]
    to: String,

    /// Subject line
    #[arg(long, default_value = "")]
    subject: String,

    /// Message body
    #[arg(long, default_value = "")]
    body: String,

    #[command(flatten)]
    design: DesignArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl Tool for EmailTool {
    fn cli() -> Command {
        EmailTool::command()
    }

    fn execute(&self) -> anyhow::Result<Option<Output>> {
        let mut session = Session::new();
        self.design.apply(&mut session)?;

        let fields = Fields {
            email_to: self.to.clone(),
            email_subject: self.subject.clone(),
            email_body: self.body.clone(),
            ..Fields::default()
        };
        session.update_payload(ContentKind::Email, &fields);

        self.output.finish(&mut session)
    }
}
