//! Prints a bcrypt hash for provisioning a row in the `admins` table.
//!
//! ```text
//! hash_admin_password <password>
//! echo -n <password> | hash_admin_password
//! ```

use std::io::Read;

use anyhow::{Context, bail};

fn main() -> anyhow::Result<()> {
    let password = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading password from stdin")?;
            buf.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    if password.is_empty() {
        bail!("password must not be empty");
    }

    let hash = stax_gateway::auth::hash_password(&password).context("hashing password")?;
    println!("{hash}");
    Ok(())
}
