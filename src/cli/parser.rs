use crate::core::calendar::WeekSelector;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rollbook
/// CLI application to manage attendance rosters with SQLite
#[derive(Parser)]
#[command(
    name = "rollbook",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple attendance roster CLI: programs, members, daily marks and statistics using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Operator scope for this invocation (defaults to the configured one)
    #[arg(global = true, long = "operator")]
    pub operator: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage programs (activity tracks)
    Program {
        #[command(subcommand)]
        action: ProgramAction,
    },

    /// Manage members
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },

    /// Toggle a member's attendance mark for a date
    Mark {
        /// Date of the mark (YYYY-MM-DD)
        date: String,

        /// Member id
        member: i64,

        /// Target status: present or absent (repeat to unset)
        status: String,
    },

    /// Show the daily attendance sheet
    Sheet {
        /// Date to show (YYYY-MM-DD, defaults to today)
        date: Option<String>,
    },

    /// Show attendance statistics for a month
    Stats {
        #[arg(long, help = "Year to report on (defaults to current)")]
        year: Option<i32>,

        #[arg(long, help = "Month to report on (defaults to current)")]
        month: Option<u32>,

        #[arg(
            long,
            default_value = "all",
            help = "Week slice: all, or 1-4 (week 4 runs to the end of the month)"
        )]
        week: WeekSelector,

        #[arg(long, help = "Restrict to a single program id")]
        program: Option<i64>,
    },

    /// Export the monthly attendance sheet
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(
            long,
            value_name = "FILE",
            help = "Output file (defaults to attendance_<year>_<month> in the current directory)"
        )]
        file: Option<String>,

        #[arg(long, help = "Year to export (defaults to current)")]
        year: Option<i32>,

        #[arg(long, help = "Month to export (defaults to current)")]
        month: Option<u32>,

        #[arg(long, help = "Restrict to a single program id")]
        program: Option<i64>,

        #[arg(long, short = 'f', help = "Overwrite the output file if it exists")]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },
}

#[derive(Subcommand)]
pub enum ProgramAction {
    /// Register a new program
    Add {
        /// Program name (unique per operator)
        name: String,
    },

    /// Delete a program, its members and their marks
    Del {
        /// Program id
        id: i64,

        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// List programs with member counts
    List,
}

#[derive(Subcommand)]
pub enum MemberAction {
    /// Register a new member
    Add {
        /// Member name
        name: String,

        #[arg(long, help = "Program id the member is enrolled in")]
        program: i64,

        #[arg(long, help = "Phone number (optional)")]
        phone: Option<String>,

        #[arg(
            long = "date",
            help = "Registration date (YYYY-MM-DD, defaults to today)"
        )]
        registered_on: Option<String>,
    },

    /// Edit a member (partial update)
    Edit {
        /// Member id
        id: i64,

        #[arg(long, help = "New name")]
        name: Option<String>,

        #[arg(long, help = "New phone number (empty clears it)")]
        phone: Option<String>,

        #[arg(long, help = "Move to another program id")]
        program: Option<i64>,
    },

    /// Delete a member and their marks
    Del {
        /// Member id
        id: i64,

        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// List members
    List {
        #[arg(long, help = "Restrict to a single program id")]
        program: Option<i64>,
    },
}
