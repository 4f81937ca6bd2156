use clap::{Command, CommandFactory, Parser};

use crate::payload::{ContentKind, Fields};
use crate::session::Session;
use crate::tool::{Output, Tool};
use crate::tools::design::{DesignArgs, OutputArgs};

#[derive(Parser, Debug)]
#[command(name = "link", about = "QR code that opens a link")]
pub struct LinkTool {
    /// The URL to encode; a placeholder link is used when omitted
    url: Option<String>,

    #[command(flatten)]
    design: DesignArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl Tool for LinkTool {
    fn cli() -> Command {
        LinkTool::command()
    }

    fn execute(&self) -> anyhow::Result<Option<Output>> {
        let mut session = Session::new();
        self.design.apply(&mut session)?;

        let fields = Fields {
            url: self.url.clone().unwrap_or_default(),
            ..Fields::default()
        };
        session.update_payload(ContentKind::Link, &fields);

        self.output.finish(&mut session)
    }
}
