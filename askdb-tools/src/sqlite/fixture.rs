//! Sample database fixture
//!
//! Four tables (`customers`, `orders`, `products`, `employees`) with a handful of seed
//! rows. [`ensure_database`] is the startup entry point: it leaves an existing file
//! alone and otherwise builds the fixture in a temporary file next to the target,
//! then moves it into place without overwriting anything another process created
//! in the meantime.

use crate::tool_error::ToolError;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[cfg(unix)]
const FIXTURE_MODE: u32 = 0o644;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL,
    country TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id INTEGER NOT NULL,
    product TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    price REAL NOT NULL,
    FOREIGN KEY(customer_id) REFERENCES customers(id)
);

CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    price REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    job_title TEXT NOT NULL,
    salary REAL NOT NULL,
    address TEXT NOT NULL
);
"#;

const CUSTOMERS: [(&str, &str, &str); 3] = [
    ("Alice Johnson", "alice@example.com", "USA"),
    ("Bob Smith", "bob@example.com", "UK"),
    ("Charlie Lee", "charlie@example.com", "Canada"),
];

const PRODUCTS: [(&str, &str, f64); 3] = [
    ("Laptop", "Electronics", 1200.99),
    ("Headphones", "Electronics", 199.99),
    ("Coffee Machine", "Home Appliances", 89.99),
];

const EMPLOYEES: [(&str, &str, f64, &str); 3] = [
    (
        "Diana Prince",
        "HR Manager",
        85000.0,
        "123 Themyscira Ave, Washington DC",
    ),
    (
        "Clark Kent",
        "Software Engineer",
        95000.0,
        "344 Clinton St, Metropolis",
    ),
    ("Bruce Wayne", "CTO", 150000.0, "1007 Mountain Drive, Gotham"),
];

const ORDERS: [(i64, &str, i64, f64); 3] = [
    (1, "Laptop", 1, 1200.99),
    (2, "Headphones", 2, 399.98),
    (3, "Coffee Machine", 1, 89.99),
];

/// Create the four sample tables at `db_path` and insert the seed rows.
///
/// Runs in a single transaction. Calling it on a database that already holds the
/// seed rows fails on the unique customer email and leaves the data unchanged.
pub fn create_sample_database(db_path: &Path) -> Result<(), ToolError> {
    let mut conn = Connection::open(db_path)?;
    let tx = conn.transaction()?;

    tx.execute_batch(SCHEMA_SQL)?;

    {
        let mut stmt =
            tx.prepare("INSERT INTO customers (name, email, country) VALUES (?1, ?2, ?3)")?;
        for (name, email, country) in CUSTOMERS {
            stmt.execute(params![name, email, country])?;
        }

        let mut stmt =
            tx.prepare("INSERT INTO products (name, category, price) VALUES (?1, ?2, ?3)")?;
        for (name, category, price) in PRODUCTS {
            stmt.execute(params![name, category, price])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO employees (name, job_title, salary, address) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (name, job_title, salary, address) in EMPLOYEES {
            stmt.execute(params![name, job_title, salary, address])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO orders (customer_id, product, quantity, price) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (customer_id, product, quantity, price) in ORDERS {
            stmt.execute(params![customer_id, product, quantity, price])?;
        }
    }

    tx.commit()?;
    Ok(())
}

/// Make sure the sample database exists at `db_path`, creating it if needed.
///
/// An existing file is returned untouched. A missing file is built in a temporary
/// file and persisted without clobbering, so concurrent first starts end up with
/// exactly one fixture.
pub fn ensure_database(db_path: &Path) -> Result<PathBuf, ToolError> {
    if db_path.exists() {
        tracing::debug!(db_path = %db_path.display(), "Database already present");
        return Ok(db_path.to_path_buf());
    }

    let dir = match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let staging = NamedTempFile::new_in(&dir)?;
    create_sample_database(staging.path())
        .map_err(|e| ToolError::Setup(format!("Failed to seed sample database: {}", e)))?;
    // Temp files start out owner-only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staging
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(FIXTURE_MODE))?;
    }

    match staging.persist_noclobber(db_path) {
        Ok(_) => {
            tracing::info!(db_path = %db_path.display(), "Created sample database");
        }
        Err(e) if db_path.exists() => {
            tracing::info!(
                db_path = %db_path.display(),
                error = %e.error,
                "Sample database was created concurrently; keeping existing file"
            );
        }
        Err(e) => {
            return Err(ToolError::Setup(format!(
                "Failed to move sample database into place at {}: {}",
                db_path.display(),
                e.error
            )));
        }
    }

    if !db_path.exists() {
        return Err(ToolError::Setup(format!(
            "Sample database was not created at {}",
            db_path.display()
        )));
    }

    Ok(db_path.to_path_buf())
}
