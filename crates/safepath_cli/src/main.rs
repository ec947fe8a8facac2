use anyhow::Result;

mod cli;
mod ui;

fn main() -> Result<()> {
    cli::run()
}
