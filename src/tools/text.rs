use std::io::{self, Read};

use anyhow::Context;
use clap::{Command, CommandFactory, Parser};

use crate::payload::{ContentKind, Fields};
use crate::session::Session;
use crate::tool::{Output, Tool};
use crate::tools::design::{DesignArgs, OutputArgs};

#[derive(Parser, Debug)]
#[command(name = "text", about = "QR code that shows a piece of text")]
pub struct TextTool {
    /// The text to encode (use "-" for stdin); defaults to "Text"
    text: Option<String>,

    #[command(flatten)]
    design: DesignArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl Tool for TextTool {
    fn cli() -> Command {
        TextTool::command()
    }

    fn execute(&self) -> anyhow::Result<Option<Output>> {
        let text = match self.text.as_deref() {
            Some("-") => {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Could not read text from stdin")?;
                buffer
            }
            Some(text) => text.to_string(),
            None => String::new(),
        };

        let mut session = Session::new();
        self.design.apply(&mut session)?;

        let fields = Fields {
            text,
            ..Fields::default()
        };
        session.update_payload(ContentKind::Text, &fields);

        self.output.finish(&mut session)
    }
}
