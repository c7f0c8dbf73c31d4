use crate::AppState;
use gacha_domain::ImportStatus;

pub fn current_import_status(state: &AppState) -> ImportStatus {
    state.lock_import_status().clone()
}
