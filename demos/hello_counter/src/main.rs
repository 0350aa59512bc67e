use hello_counter::RootView;
use kaomoji_platform::{TerminalConfig, run_terminal_app};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = TerminalConfig::from_env();
    log::info!("starting hello_counter ({}x{})", config.width, config.height);
    run_terminal_app(RootView, config)?;
    Ok(())
}
