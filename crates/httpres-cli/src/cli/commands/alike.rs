//! `httpres alike <a> <b>` – compare two references without fetching.

use anyhow::Result;
use httpres_core::alike;

use super::reference_arg::load_reference;

pub fn run_alike(a: &str, b: &str) -> Result<()> {
    let a = load_reference(a)?;
    let b = load_reference(b)?;
    println!("{}", alike(&a, &b));
    Ok(())
}
