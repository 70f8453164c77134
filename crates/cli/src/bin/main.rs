use anyhow::Result;
use clap::Parser;
use handoff::{App, Command};

fn main() -> Result<()> {
    let app = App::parse();
    app.init_tracing();

    match app.command {
        Command::Check(check) => check.run()?,
        Command::Codec(codec) => codec.run()?,
    }

    Ok(())
}
