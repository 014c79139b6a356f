use clap::{Parser, Subcommand};

/// CLI entry point for sinkddl
#[derive(Parser, Debug)]
#[command(
    name = "sinkddl",
    version,
    about = "ODBC schema reconciliation for analytics sinks"
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Environment (loads config/{env}.toml)
    #[arg(long, global = true)]
    pub env: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a database if it does not exist
    CreateDb {
        /// Connection URL, scheme://host:port[/database]
        #[arg(long)]
        url: Option<String>,

        /// Username for the connection
        #[arg(long)]
        user: Option<String>,

        /// Password (falls back to SINKDDL_PASSWORD)
        #[arg(long)]
        password: Option<String>,

        /// Database name to reconcile
        #[arg(long)]
        db: String,
    },

    /// Create a table from a descriptor file if it does not exist
    CreateTable {
        /// Connection URL, scheme://host:port[/database]
        #[arg(long)]
        url: Option<String>,

        /// Username for the connection
        #[arg(long)]
        user: Option<String>,

        /// Password (falls back to SINKDDL_PASSWORD)
        #[arg(long)]
        password: Option<String>,

        /// Path to a TOML table descriptor
        #[arg(long)]
        schema: String,

        /// Print synthesized DDL without executing
        #[arg(long)]
        dry_run: bool,
    },

    /// Append the descriptor columns missing from the live table
    AddColumns {
        /// Connection URL, scheme://host:port[/database]
        #[arg(long)]
        url: Option<String>,

        /// Username for the connection
        #[arg(long)]
        user: Option<String>,

        /// Password (falls back to SINKDDL_PASSWORD)
        #[arg(long)]
        password: Option<String>,

        /// Path to a TOML table descriptor
        #[arg(long)]
        schema: String,

        /// Print synthesized DDL without executing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the live columns of a table as JSON
    Columns {
        /// Connection URL, scheme://host:port[/database]
        #[arg(long)]
        url: Option<String>,

        /// Username for the connection
        #[arg(long)]
        user: Option<String>,

        /// Password (falls back to SINKDDL_PASSWORD)
        #[arg(long)]
        password: Option<String>,

        /// Database name
        #[arg(long)]
        db: String,

        /// Table name
        #[arg(long)]
        table: String,
    },

    /// List the tables of a database
    Tables {
        /// Connection URL, scheme://host:port[/database]
        #[arg(long)]
        url: Option<String>,

        /// Username for the connection
        #[arg(long)]
        user: Option<String>,

        /// Password (falls back to SINKDDL_PASSWORD)
        #[arg(long)]
        password: Option<String>,

        /// Database name
        #[arg(long)]
        db: String,
    },

    /// Generate configuration file
    Config {
        /// Output path for config file
        #[arg(long, default_value = "config.toml")]
        output: String,

        /// Create environment-specific config
        #[arg(long)]
        env: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_help() {
        let result = Cli::try_parse_from(["sinkddl", "--help"]);
        assert!(result.is_err()); // Help exits with error
    }

    #[test]
    fn test_cli_version() {
        let result = Cli::try_parse_from(["sinkddl", "--version"]);
        assert!(result.is_err()); // Version exits with error
    }

    #[test]
    fn test_create_db_command() {
        let cli = Cli::try_parse_from([
            "sinkddl",
            "create-db",
            "--url",
            "jdbc:mysql://db:3306/sales",
            "--user",
            "loader",
            "--db",
            "sales",
        ])
        .unwrap();

        match cli.command {
            Commands::CreateDb {
                url,
                user,
                password,
                db,
            } => {
                assert_eq!(url, Some("jdbc:mysql://db:3306/sales".to_string()));
                assert_eq!(user, Some("loader".to_string()));
                assert_eq!(password, None);
                assert_eq!(db, "sales");
            }
            _ => panic!("Expected CreateDb command"),
        }
    }

    #[test]
    fn test_create_db_requires_db() {
        let result = Cli::try_parse_from(["sinkddl", "create-db"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_table_defaults() {
        let cli = Cli::try_parse_from(["sinkddl", "create-table", "--schema", "orders.toml"]).unwrap();
        match cli.command {
            Commands::CreateTable {
                schema, dry_run, ..
            } => {
                assert_eq!(schema, "orders.toml");
                assert!(!dry_run);
            }
            _ => panic!("Expected CreateTable command"),
        }
    }

    #[test]
    fn test_add_columns_with_dry_run() {
        let cli = Cli::try_parse_from([
            "sinkddl",
            "add-columns",
            "--schema",
            "orders.toml",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::AddColumns {
                schema, dry_run, ..
            } => {
                assert_eq!(schema, "orders.toml");
                assert!(dry_run);
            }
            _ => panic!("Expected AddColumns command"),
        }
    }

    #[test]
    fn test_columns_command() {
        let cli = Cli::try_parse_from([
            "sinkddl", "columns", "--db", "sales", "--table", "orders",
        ])
        .unwrap();

        match cli.command {
            Commands::Columns { db, table, .. } => {
                assert_eq!(db, "sales");
                assert_eq!(table, "orders");
            }
            _ => panic!("Expected Columns command"),
        }
    }

    #[test]
    fn test_config_command_defaults() {
        let cli = Cli::try_parse_from(["sinkddl", "config"]).unwrap();
        match cli.command {
            Commands::Config { output, env } => {
                assert_eq!(output, "config.toml");
                assert_eq!(env, None);
            }
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "sinkddl",
            "--config",
            "custom-config.toml",
            "--env",
            "production",
            "--verbose",
            "tables",
            "--db",
            "sales",
        ])
        .unwrap();

        assert_eq!(cli.config, Some("custom-config.toml".to_string()));
        assert_eq!(cli.env, Some("production".to_string()));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Tables { .. }));
    }

    #[test]
    fn test_invalid_command() {
        let result = Cli::try_parse_from(["sinkddl", "invalid-command"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_required_subcommand() {
        let result = Cli::try_parse_from(["sinkddl"]);
        assert!(result.is_err());
    }
}
