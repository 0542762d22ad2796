use super::ResolveContext;
use super::path_expr::{Expansion, PathExpr};
use crate::config::ConselectConfig;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::reference::FileReference;
use indexmap::IndexSet;

/// Resolves entries in declaration order. Files keep the position of the
/// first entry that selected them; `!` entries drop earlier selections.
pub fn resolve(
    config: &ConselectConfig,
    ctx: &ResolveContext<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<FileReference>> {
    let mut selected: IndexSet<FileReference> = IndexSet::new();

    for entry in &config.entries {
        let expr = PathExpr::parse(&ctx.root, &entry.expr);

        if entry.exclude {
            let before = selected.len();
            selected.retain(|f| !expr.covers(f.path()));
            diagnostics.note(format!(
                "!{} removed {} file(s)",
                expr.raw(),
                before - selected.len()
            ));
            continue;
        }

        match expr.expand(ctx, &ctx.root)? {
            Expansion::Files(files) => {
                diagnostics.note(format!("{} matched {} file(s)", expr.raw(), files.len()));
                for file in files {
                    if !selected.insert(file.clone()) {
                        log::trace!("Already selected: {}", file.path().display());
                    }
                }
            }
            Expansion::Skipped(reason) => diagnostics.skip(expr.raw(), reason),
        }
    }

    log::debug!(
        "Selection resolved {} files from {} entries",
        selected.len(),
        config.entries.len()
    );
    Ok(selected.into_iter().collect())
}
