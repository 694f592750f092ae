use budget_tracker::{
    cli::{run_cli, CliError},
    config::ConfigManager,
    init,
};

fn main() {
    init();

    let result = ConfigManager::new()
        .resolve()
        .map_err(CliError::from)
        .and_then(|config| run_cli(&config));

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
