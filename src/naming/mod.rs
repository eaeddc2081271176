//! Display names from templates.
//!
//! Templates interpolate traits that were already resolved; naming never
//! draws anything beyond the template choice itself.

use crate::catalog::AttributeTable;
use crate::error::{EngineError, EngineResult};
use crate::stream::SlotCursor;

/// Fill `{key}` placeholders from `values`. A placeholder with no value
/// means the template is misconfigured.
pub fn render(template: &str, values: &[(&str, &str)]) -> EngineResult<String> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| {
            EngineError::Generation(format!("unclosed placeholder in name template {template:?}"))
        })?;
        let key = &after[..close];
        let value = values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .ok_or_else(|| {
                EngineError::Generation(format!(
                    "name template {template:?} uses unknown placeholder {{{key}}}"
                ))
            })?;
        out.push_str(value);
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Consume the naming slot and render the chosen template.
pub fn pick_name(
    templates: &AttributeTable,
    cursor: &mut SlotCursor<'_>,
    values: &[(&str, &str)],
) -> EngineResult<String> {
    let template = templates.pick(cursor)?;
    render(&template, values)
}
