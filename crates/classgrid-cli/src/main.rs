use std::sync::Arc;

use classgrid_cli::CliResult;
use classgrid_cli::coordinator::create_coordinator;
use classgrid_cli::seeder::{self, SEED_PASSWORD, SeedConfig};
use classgrid_config::{StoreBackend, StoreConfig};
use classgrid_core::cpf;
use classgrid_db::DocumentStore;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "classgrid-cli")]
#[command(about = "Classgrid CLI - Administrative tools for Classgrid", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new coordinator account
    CreateCoordinator {
        /// Full name of the coordinator
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// CPF, with or without punctuation
        #[arg(short = 'c', long)]
        cpf: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the store with subjects, rooms, fake teachers and their assignments
    Seed {
        /// Number of teachers to create
        #[arg(short = 't', long, default_value = "10")]
        teachers: usize,

        /// Number of booked slots per teacher
        #[arg(short = 'a', long, default_value = "8")]
        assignments: usize,
    },
    /// Remove seeded teachers, their assignments and unused seed registry entries
    ClearSeed,
    /// Check whether a CPF is well formed and has valid check digits
    CheckCpf {
        /// CPF to check
        value: String,
    },
    /// Print a CPF in DDD.DDD.DDD-DD form
    FormatCpf {
        /// CPF to format
        value: String,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::CheckCpf { value } => handle_check_cpf(&value),
        Commands::FormatCpf { value } => println!("{}", cpf::display(&value)),
        Commands::CreateCoordinator {
            name,
            email,
            cpf,
            password,
        } => {
            let store = open_store().await;
            handle_create_coordinator(store.as_ref(), name, email, cpf, password).await
        }
        Commands::Seed {
            teachers,
            assignments,
        } => {
            let store = open_store().await;
            handle_seed(store.as_ref(), teachers, assignments).await
        }
        Commands::ClearSeed => {
            let store = open_store().await;
            handle_clear_seed(store.as_ref()).await
        }
    }
}

/// Connects to the configured store. The in-memory backend is refused since
/// anything written to it would vanish when the command exits.
async fn open_store() -> Arc<dyn DocumentStore> {
    let config = StoreConfig::from_env();
    if config.backend == StoreBackend::Memory {
        eprintln!("❌ This command needs a persistent store. Set STORE_BACKEND=postgres and DATABASE_URL.");
        std::process::exit(1);
    }

    match classgrid_db::connect(&config).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ Failed to connect to the store: {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_check_cpf(value: &str) {
    let canonical = cpf::canonicalize(value);
    if !cpf::is_well_formed(value) {
        println!("❌ '{}' is not an 11-digit CPF", value);
        std::process::exit(1);
    }
    if cpf::is_valid(value) {
        println!("✅ {} is valid", cpf::display(&canonical));
    } else {
        println!("❌ {} has invalid check digits", cpf::display(&canonical));
        std::process::exit(1);
    }
}

fn prompt_text(label: &str) -> CliResult<String> {
    Ok(Input::<String>::new()
        .with_prompt(label)
        .interact_text()?)
}

fn prompt_password() -> CliResult<String> {
    Ok(Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords don't match")
        .interact()?)
}

async fn handle_create_coordinator(
    store: &dyn DocumentStore,
    name: Option<String>,
    email: Option<String>,
    cpf: Option<String>,
    password: Option<String>,
) {
    let result = async {
        let name = name.map_or_else(|| prompt_text("Full name"), Ok)?;
        let email = email.map_or_else(|| prompt_text("Email address"), Ok)?;
        let cpf = cpf.map_or_else(|| prompt_text("CPF"), Ok)?;
        let password = password.map_or_else(prompt_password, Ok)?;

        create_coordinator(store, &name, &email, &cpf, &password).await
    }
    .await;

    match result {
        Ok(user) => {
            println!("\n✅ Coordinator created successfully!");
            println!("   Name: {}", user.name);
            println!("   Email: {}", user.email);
            println!("   CPF: {}", user.cpf.formatted());
        }
        Err(e) => {
            eprintln!("\n❌ Error creating coordinator: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(store: &dyn DocumentStore, teachers: usize, assignments: usize) {
    let config = SeedConfig::new(teachers).with_assignments(assignments);

    match seeder::seed_all(store, config).await {
        Ok(summary) => {
            println!(
                "   {} teachers can log in with the password '{}'",
                summary.teachers, SEED_PASSWORD
            );
        }
        Err(e) => {
            eprintln!("\n❌ Error seeding store: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_clear_seed(store: &dyn DocumentStore) {
    if let Err(e) = seeder::clear_seed(store).await {
        eprintln!("\n❌ Error clearing seeded data: {}", e);
        std::process::exit(1);
    }
}
