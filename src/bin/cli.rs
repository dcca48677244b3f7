use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input, Password};
use dotenvy::dotenv;

use orderdesk::cli::{add_member, create_project, create_user, export_order};
use orderdesk::orderdesk_config::ExportConfig;
use orderdesk::orderdesk_db::{PgPool, init_db_pool};
use orderdesk::orderdesk_models::{CreateProjectDto, CreateUserDto};

#[derive(Parser)]
#[command(name = "orderdesk-cli")]
#[command(about = "OrderDesk CLI - Administrative tools for OrderDesk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    CreateUser {
        #[arg(short = 'u', long)]
        username: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        #[arg(short = 'f', long)]
        first_name: Option<String>,

        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Grant staff status
        #[arg(long)]
        staff: bool,
    },
    /// Create a project
    CreateProject {
        #[arg(short = 'n', long)]
        name: Option<String>,

        #[arg(short = 'c', long)]
        lookup_code: Option<String>,

        #[arg(short = 'd', long)]
        description: Option<String>,
    },
    /// Make a user a member of a project
    AddMember {
        username: String,
        /// Lookup code of the project
        project: String,
    },
    /// Write an order's CSV file to the export directory
    ExportOrder { id: i64 },
}

fn prompt(label: &str) -> String {
    Input::new()
        .with_prompt(label)
        .interact_text()
        .unwrap_or_else(|e| fail(&format!("Failed to read {}: {}", label.to_lowercase(), e)))
}

fn fail(message: &str) -> ! {
    eprintln!("\n❌ {}", message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let pool = init_db_pool()
        .await
        .unwrap_or_else(|e| fail(&format!("Failed to connect to database: {}", e)));

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateUser {
            username,
            email,
            first_name,
            last_name,
            password,
            staff,
        } => {
            handle_create_user(&pool, username, email, first_name, last_name, password, staff)
                .await
        }
        Commands::CreateProject {
            name,
            lookup_code,
            description,
        } => handle_create_project(&pool, name, lookup_code, description).await,
        Commands::AddMember { username, project } => {
            match add_member(&pool, &username, &project).await {
                Ok(()) => println!("\n✅ {} is now a member of {}", username, project),
                Err(e) => fail(&format!("Error adding member: {}", e.message())),
            }
        }
        Commands::ExportOrder { id } => {
            match export_order(&pool, &ExportConfig::from_env(), id).await {
                Ok(response) => println!(
                    "\n✅ Order {} exported to {}",
                    response.order_id, response.file_name
                ),
                Err(e) => fail(&format!("Error exporting order: {}", e.message())),
            }
        }
    }
}

async fn handle_create_user(
    pool: &PgPool,
    username: Option<String>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    password: Option<String>,
    staff: bool,
) {
    let username = username.unwrap_or_else(|| prompt("Username"));
    let email = email.unwrap_or_else(|| prompt("Email address"));
    let first_name = first_name.unwrap_or_else(|| prompt("First name"));
    let last_name = last_name.unwrap_or_else(|| prompt("Last name"));
    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail(&format!("Failed to read password: {}", e)))
    });
    let is_staff = staff
        || Confirm::new()
            .with_prompt("Grant staff status?")
            .default(false)
            .interact()
            .unwrap_or(false);

    let dto = CreateUserDto {
        username,
        email,
        first_name,
        last_name,
        password,
        is_staff,
    };

    match create_user(pool, dto).await {
        Ok(user) => {
            println!("\n✅ User created successfully!");
            println!("   Username: {}", user.username);
            println!("   Email: {}", user.email);
        }
        Err(e) => fail(&format!("Error creating user: {}", e.message())),
    }
}

async fn handle_create_project(
    pool: &PgPool,
    name: Option<String>,
    lookup_code: Option<String>,
    description: Option<String>,
) {
    let dto = CreateProjectDto {
        name: name.unwrap_or_else(|| prompt("Project name")),
        lookup_code: lookup_code.unwrap_or_else(|| prompt("Lookup code")),
        description,
    };

    match create_project(pool, dto).await {
        Ok(project) => {
            println!("\n✅ Project created successfully!");
            println!("   ID: {}", project.id);
            println!("   Lookup code: {}", project.lookup_code);
        }
        Err(e) => fail(&format!("Error creating project: {}", e.message())),
    }
}
