use anyhow::Result;
use clap::Parser;
use profilecmd::api::{HttpProfileApi, TokenSource};
use profilecmd::cli::ui::warning;
use profilecmd::cli::{
    run_add, run_config, run_delete, run_edit, run_list, run_login, run_logout, run_menu, run_show,
    run_whoami, Cli, Commands,
};
use profilecmd::config::AppConfig;
use profilecmd::db::Database;
use profilecmd::logging;
use profilecmd::manager::ProfileManager;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let db = Database::open()?;
    let config = AppConfig::load(&db)?;

    // A bad stored backend URL must not block `config` from fixing it
    match cli.command {
        Some(Commands::Logout) => run_logout(&db),
        Some(Commands::Whoami) => run_whoami(&db),
        Some(Commands::Config(args)) => run_config(&db, args.backend_url.as_deref(), args.timeout),
        Some(Commands::Login(args)) => {
            let api = HttpProfileApi::from_config(&config, &db)?;
            run_login(&db, &api, args.email, args.password)
        }
        command => {
            let api = HttpProfileApi::from_config(&config, &db)?;
            let manager = ProfileManager::with_user(api, db.current_user()?);
            run_profile_command(manager, command)
        }
    }
}

fn run_profile_command<S: TokenSource>(
    mut manager: ProfileManager<HttpProfileApi<S>>,
    command: Option<Commands>,
) -> Result<()> {
    let Some(command) = command else {
        // No subcommand provided - show interactive menu
        return run_menu(&mut manager);
    };
    if let Commands::List = command {
        return run_list(&mut manager);
    }

    // The initial list fetch only matters to the list views
    if let Some(message) = manager.error() {
        warning(message);
    }
    manager.dismiss_error();

    match command {
        Commands::Show(args) => run_show(&mut manager, &args.id),
        Commands::Add(args) => run_add(&mut manager, args.name, args.logo, args.file),
        Commands::Edit(args) => run_edit(&mut manager, &args.id, args.file),
        Commands::Delete(args) => run_delete(&mut manager, &args.id, args.yes),
        _ => Ok(()),
    }
}
