use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Command, CommandFactory, Parser};

use crate::payload::ContentKind;
use crate::session::Session;
use crate::tool::{Output, Tool};
use crate::tools::design::{DesignArgs, OutputArgs};
use crate::upload;

#[derive(Parser, Debug)]
#[command(
    name = "file",
    about = "Host a PDF or image on a public file host and encode its link"
)]
pub struct FileTool {
    /// The file to upload
    file: PathBuf,

    #[command(flatten)]
    design: DesignArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl Tool for FileTool {
    fn cli() -> Command {
        FileTool::command()
    }

    fn execute(&self) -> anyhow::Result<Option<Output>> {
        let kind = match self.file.extension().and_then(|ext| ext.to_str()) {
            Some("pdf") => ContentKind::Pdf,
            _ => ContentKind::Img,
        };
        tracing::debug!(kind = ?kind, "hosting file");

        let bytes = fs::read(&self.file).context("Could not read file")?;
        let name = self
            .file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();

        let link = tokio::runtime::Runtime::new()
            .context("Could not create tokio runtime")?
            .block_on(upload::upload(&name, bytes))
            .context("Could not upload file")?;
        tracing::info!(%link, "file hosted");

        let mut session = Session::new();
        self.design.apply(&mut session)?;
        session.set_payload(link);

        self.output.finish(&mut session)
    }
}
