use stallion_companion::app::App;
use stallion_companion::config::CompanionConfig;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    color_eyre::install()?;

    let config = CompanionConfig::load();
    let terminal = ratatui::init();
    let result = App::new(config)?.run(terminal).await;
    ratatui::restore();
    result
}
