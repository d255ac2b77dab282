use clap::Parser;

mod cmd;
mod config;
mod core;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    cmd::NetIncomeCommand::parse().exec()
}
