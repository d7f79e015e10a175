use clap::Parser;
use log::info;

use content_hub::{
    App, AutoConfirm, Cli, Commands, Config, ConfirmationGate, ContentStore, DataStore,
    GroupCommands, LogNotifier, Notifier, TermGate, TermNotifier,
};

fn initialize_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();
}

fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    let config = match Config::resolve(cli.data_dir.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    info!("using data directory: {}", config.data_dir.display());

    // --force means the confirmation was given up front on the command line.
    let forced = matches!(cli.command, Commands::Delete { force: true, .. })
        || matches!(
            cli.command,
            Commands::Group {
                command: GroupCommands::Delete { force: true, .. }
            }
        );
    let gate: Box<dyn ConfirmationGate> = if forced {
        Box::new(AutoConfirm)
    } else {
        Box::new(TermGate)
    };

    // Styled notifications go to the terminal; piped output gets them
    // through the log instead.
    let notifier: Box<dyn Notifier> = if console::user_attended() {
        Box::new(TermNotifier)
    } else {
        Box::new(LogNotifier)
    };

    let store = ContentStore::open(DataStore::new(&config), notifier, gate);
    let mut app = App::new(store, config);

    if let Err(e) = app.run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
