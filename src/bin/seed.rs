use sharebite_api::{config::AppConfig, store::Store};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let store = Store::open(&config.data_dir)?;
    let seeded = store.initialize()?;

    if seeded {
        println!("Seed completed: demo accounts written to {}", config.data_dir);
    } else {
        println!("Store already has users, nothing to do");
    }
    Ok(())
}
