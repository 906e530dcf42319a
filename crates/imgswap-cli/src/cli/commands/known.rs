//! `imgswap known` – list the ledger of a media directory.

use anyhow::Result;
use imgswap_core::media::{Ledger, LEDGER_FILE};
use std::path::Path;

pub fn run_known(media_dir: &Path) -> Result<()> {
    let ledger = Ledger::load(&media_dir.join(LEDGER_FILE))?;
    if ledger.is_empty() {
        println!("No media recorded in {}.", media_dir.display());
        return Ok(());
    }
    for (url, outcome) in ledger.iter() {
        println!("{:<70} {}", outcome.unwrap_or("-"), url);
    }
    println!(
        "{} cached, {} unavailable",
        ledger.successes(),
        ledger.failures()
    );
    Ok(())
}
