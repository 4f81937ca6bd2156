// Represents a subcommand of qrforge.
pub trait Tool {
    // The contribution of this tool to the qrforge CLI. The clap::Command
    // returned here will be set up as a subcommand on the qrforge binary.
    fn cli() -> clap::Command;

    // Run the tool. All the context that the tool requires should be
    // collected using the cli above.
    fn execute(&self) -> anyhow::Result<Option<Output>>;
}

#[derive(Debug)]
pub enum Output {
    Bytes(Vec<u8>),
    Text(String),
    JsonValue(serde_json::Value),
}
