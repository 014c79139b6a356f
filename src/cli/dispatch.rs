use crate::cli::args::{Cli, Commands};
use crate::logger;
use crate::model::descriptor::{ExecutionResult, TableDescriptor};
use crate::model::Config;
use crate::reconciler::{self, ConnectOptions};
use log::{debug, error, info};

/// Environment variable consulted when no --password flag is given.
pub const PASSWORD_ENV: &str = "SINKDDL_PASSWORD";

pub fn handle(cli: Cli) {
    // Load configuration
    let config = match Config::load(cli.config.as_deref(), cli.env.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    logger::setup_logger(cli.verbose, &config.logging);
    debug!("Loaded configuration: {:?}", config);

    let options = ConnectOptions {
        login_timeout_secs: config.database.login_timeout_secs,
    };

    match cli.command {
        Commands::CreateDb {
            url,
            user,
            password,
            db,
        } => {
            info!("Running CREATE-DB command");
            let url = resolve_url(url, &config);
            let user = resolve_user(user, &config);
            let password = resolve_password(password);

            if let Err(e) = reconciler::run_create_db(&url, &user, &password, &db, &options) {
                error!("Create-db command failed: {}", e);
                std::process::exit(1);
            }
        }

        Commands::CreateTable {
            url,
            user,
            password,
            schema,
            dry_run,
        } => {
            info!("Running CREATE-TABLE command");
            let url = resolve_url(url, &config);
            let user = resolve_user(user, &config);
            let password = resolve_password(password);
            let table = load_descriptor(&schema);
            let dry_run = dry_run || config.behavior.default_dry_run;

            if let Err(e) =
                reconciler::run_create_table(&url, &user, &password, &table, dry_run, &options)
            {
                error!("Create-table command failed: {}", e);
                std::process::exit(1);
            }
        }

        Commands::AddColumns {
            url,
            user,
            password,
            schema,
            dry_run,
        } => {
            info!("Running ADD-COLUMNS command");
            let url = resolve_url(url, &config);
            let user = resolve_user(user, &config);
            let password = resolve_password(password);
            let table = load_descriptor(&schema);
            let dry_run = dry_run || config.behavior.default_dry_run;

            match reconciler::run_add_columns(&url, &user, &password, &table, dry_run, &options) {
                Ok(added) => info!("Reconciled columns, {} added", added.len()),
                Err(e) => {
                    error!("Add-columns command failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Columns {
            url,
            user,
            password,
            db,
            table,
        } => {
            info!("Running COLUMNS command");
            let url = resolve_url(url, &config);
            let user = resolve_user(user, &config);
            let password = resolve_password(password);

            match reconciler::run_describe(&url, &user, &password, &db, &table, &options) {
                Ok(columns) => {
                    let result = ExecutionResult::ok(columns);
                    match serde_json::to_string_pretty(&result) {
                        Ok(json) => println!("{}", json),
                        Err(e) => {
                            error!("Failed to serialize columns: {}", e);
                            std::process::exit(1);
                        }
                    }
                }
                Err(e) => {
                    error!("Columns command failed: {}", e);
                    // Machine-readable failure for callers parsing stdout
                    if let Ok(json) =
                        serde_json::to_string_pretty(&ExecutionResult::failure(e.to_string()))
                    {
                        println!("{}", json);
                    }
                    std::process::exit(1);
                }
            }
        }

        Commands::Tables {
            url,
            user,
            password,
            db,
        } => {
            info!("Running TABLES command");
            let url = resolve_url(url, &config);
            let user = resolve_user(user, &config);
            let password = resolve_password(password);

            match reconciler::run_list_tables(&url, &user, &password, &db, &options) {
                Ok(tables) => {
                    for table in tables {
                        println!("{}", table);
                    }
                }
                Err(e) => {
                    error!("Tables command failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output, env } => {
            info!("Running CONFIG command");
            debug!("Output path: {}", output);

            match Config::generate_default_config(&output) {
                Ok(()) => {
                    info!("Generated default configuration file: {}", output);
                    if let Some(env_name) = env {
                        let env_path = format!("config/{}.toml", env_name);
                        match std::fs::create_dir_all("config") {
                            Ok(()) => match Config::generate_default_config(&env_path) {
                                Ok(()) => {
                                    info!("Generated environment configuration file: {}", env_path)
                                }
                                Err(e) => error!("Failed to create environment config: {}", e),
                            },
                            Err(e) => error!("Failed to create config directory: {}", e),
                        }
                    }
                }
                Err(e) => {
                    error!("Failed to generate configuration file: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn resolve_url(flag: Option<String>, config: &Config) -> String {
    flag.or_else(|| config.database.url.clone())
        .unwrap_or_else(|| {
            error!("No connection URL provided via --url flag or config file");
            std::process::exit(1);
        })
}

fn resolve_user(flag: Option<String>, config: &Config) -> String {
    flag.or_else(|| config.database.username.clone())
        .unwrap_or_else(|| {
            error!("No username provided via --user flag or config file");
            std::process::exit(1);
        })
}

fn resolve_password(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var(PASSWORD_ENV).ok())
        .unwrap_or_else(|| {
            debug!("No password given, connecting with an empty password");
            String::new()
        })
}

fn load_descriptor(path: &str) -> TableDescriptor {
    match TableDescriptor::load_from_file(path) {
        Ok(table) => table,
        Err(e) => {
            error!("Failed to load table descriptor: {}", e);
            std::process::exit(1);
        }
    }
}
