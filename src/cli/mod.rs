//! Command-line interface.
//!
//! Without a subcommand the binary starts the API server. Subcommands:
//! - `check-db --company <name>` - Verify the database opens and list the company's data

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::db::{self, DepartmentRepository, EmployeeRepository, SqliteStore};

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "company-services")]
#[command(author, version, about = "REST API for company departments, employees and timecards", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "COMPANY_SERVICES_CONFIG", default_value = "companyservices.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Subcommand to run (if none, starts the server)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the database and print a company's departments and employees
    CheckDb {
        /// Company name
        #[arg(long)]
        company: String,
    },
}

/// Open the configured database and print what it holds for `company`.
pub async fn check_db(config: &Config, company: &str) -> Result<()> {
    let data_dir = &config.server.data_dir;
    println!("Company:  {}", company);
    println!("Database: {}", data_dir.join("companydata.db").display());
    println!();

    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    let pool = db::init(data_dir, config.database.max_connections)
        .await
        .context("Failed to open the database")?;
    let store = SqliteStore::new(pool);

    let departments = store
        .get_all_departments(company)
        .await
        .context("Failed to list departments")?;
    println!("Departments: {}", departments.len());
    for dept in &departments {
        println!(
            "  - ID: {} | {} ({}) | {}",
            dept.dept_id, dept.dept_name, dept.dept_no, dept.location
        );
    }

    let employees = store
        .get_all_employees(company)
        .await
        .context("Failed to list employees")?;
    println!("Employees: {}", employees.len());
    for emp in &employees {
        println!(
            "  - ID: {} | {} ({}) | {}",
            emp.emp_id, emp.emp_name, emp.emp_no, emp.job
        );
    }

    store.pool().close().await;
    println!();
    println!("Database is working correctly.");
    Ok(())
}
