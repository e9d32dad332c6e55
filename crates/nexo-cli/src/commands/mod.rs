pub mod config;
pub mod session;
pub mod stats;
pub mod task;
pub mod timer;

use nexo_core::LocalStore;

/// Wipe the local bundle, as the app does on logout.
pub fn logout() -> Result<(), Box<dyn std::error::Error>> {
    let store = LocalStore::open()?;
    store.clear()?;
    println!("{{\"type\": \"data_cleared\"}}");
    Ok(())
}
