use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;

use flagpole_cli::{accounts, seeder};
use flagpole_cli::seeder::{SeedConfig, UsersPerOrganization};
use flagpole_config::{Role, RolesConfig};
use flagpole_models::OrganizationId;

#[derive(Parser)]
#[command(name = "flagpole-cli")]
#[command(about = "Flagpole CLI - Administrative tools for Flagpole", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum AccountRole {
    OrgAdmin,
    EndUser,
}

impl From<AccountRole> for Role {
    fn from(role: AccountRole) -> Self {
        match role {
            AccountRole::OrgAdmin => Role::OrgAdmin,
            AccountRole::EndUser => Role::EndUser,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create a new organization
    CreateOrganization {
        /// Organization name (prompted if not provided)
        #[arg(short = 'n', long)]
        name: Option<String>,
    },
    /// Create an organization admin or end user
    CreateUser {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        #[arg(short = 'r', long, value_enum, default_value = "org-admin")]
        role: AccountRole,

        /// Organization the account belongs to
        #[arg(short = 'o', long)]
        organization_id: i64,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake organizations, users and feature flags
    Seed {
        /// Number of organizations to create
        #[arg(short = 'o', long, default_value = "5")]
        organizations: usize,

        /// Number of organization admins per organization
        #[arg(long, default_value = "1")]
        admins: usize,

        /// Number of end users per organization
        #[arg(long, default_value = "10")]
        users: usize,

        /// Number of feature flags per organization
        #[arg(long, default_value = "5")]
        flags: usize,
    },
    /// Clear all seeded data (keeps data created through the API)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match flagpole_db::init_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::CreateOrganization { name } => handle_create_organization(&pool, name).await,
        Commands::CreateUser {
            email,
            role,
            organization_id,
            password,
        } => handle_create_user(&pool, email, role.into(), organization_id, password).await,
        Commands::Seed {
            organizations,
            admins,
            users,
            flags,
        } => {
            let config = SeedConfig::new(organizations)
                .with_users(UsersPerOrganization {
                    admins,
                    end_users: users,
                })
                .with_flags(flags);
            seeder::seed_all(&pool, &RolesConfig::from_env(), config).await
        }
        Commands::ClearSeed => seeder::clear_all(&pool).await,
    };

    if let Err(e) = result {
        eprintln!("\n❌ Error: {e:#}");
        std::process::exit(1);
    }
}

async fn handle_migrate(pool: &PgPool) -> anyhow::Result<()> {
    flagpole_db::run_migrations(pool).await?;
    println!("✅ Migrations applied");
    Ok(())
}

async fn handle_create_organization(pool: &PgPool, name: Option<String>) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::<String>::new().with_prompt("Organization name").interact_text()?,
    };

    let organization = accounts::create_organization(pool, &name).await?;
    println!("\n✅ Organization created successfully!");
    println!("   ID: {}", organization.id);
    println!("   Name: {}", organization.name);
    Ok(())
}

async fn handle_create_user(
    pool: &PgPool,
    email: Option<String>,
    role: Role,
    organization_id: i64,
    password: Option<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::<String>::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let roles = RolesConfig::from_env();
    let user = accounts::create_user(
        pool,
        &roles,
        role,
        &email,
        &password,
        OrganizationId::new(organization_id),
    )
    .await?;

    println!("\n✅ {} created successfully!", capitalize(&role.to_string()));
    println!("   ID: {}", user.id);
    println!("   Email: {}", user.email);
    println!("   Organization: {}", user.organization_id);
    Ok(())
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
