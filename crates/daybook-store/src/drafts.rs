use daybook_agenda::draft;
use daybook_core::DraftAgenda;

use crate::error::{Result, StoreError};
use crate::paths::DaybookPaths;
use crate::write_atomic;

/// Load `.daybook/draft.md`. A missing file is an empty draft.
pub fn load_draft(paths: &DaybookPaths) -> Result<DraftAgenda> {
    let path = &paths.draft_md;
    if !path.exists() {
        return Ok(DraftAgenda::default());
    }
    let content = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    Ok(draft::parse(&content))
}

/// Save the draft in canonical rendered form.
pub fn save_draft(paths: &DaybookPaths, agenda: &DraftAgenda) -> Result<()> {
    write_atomic(&paths.draft_md, draft::render(agenda).as_bytes())
}
