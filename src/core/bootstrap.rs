use crate::core::state::AppState;
use crate::store;

pub(crate) async fn seed_demo_data(state: &AppState) -> anyhow::Result<()> {
    if !state.settings().demo().seed_demo {
        return Ok(());
    }

    store::seed::load(state.store()).await?;
    tracing::info!("Demo dataset seeded");
    Ok(())
}
