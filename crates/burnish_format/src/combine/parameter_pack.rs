//! Parameter-pack propagation.
//!
//! When `...` touches a template parameter or function parameter name, the
//! pack role is recorded on the ellipsis and the name, then propagated to
//! every later textual occurrence of that name inside the enclosing
//! construct, so expansion sites (`args...`) and forwarding casts read as
//! pack uses rather than plain identifiers.

use crate::chunk::{ChunkId, ChunkStore, Scope};
use crate::context::Context;
use crate::flags::Lang;
use crate::log_sev;
use crate::severity::Severity;
use crate::token::TokenKind;

/// Finds packs and propagates their role.
pub fn propagate_parameter_packs(ctx: &mut Context, sm: &mut ChunkStore) {
    if !ctx.lang.overlaps(Lang::CPP) {
        return;
    }
    let ids = sm.ids();

    for pc in ids {
        if !sm.is(pc, TokenKind::Ellipsis) {
            continue;
        }
        let prev = sm.prev_ncnnl(pc, Scope::All);
        let next = sm.next_ncnnl(pc, Scope::All);

        // `typename... Args` / `Args... rest` / `args...`
        let mut names: Vec<ChunkId> = Vec::new();

        if matches!(sm.kind(next), TokenKind::Word | TokenKind::Type) {
            names.push(next);
        }
        if matches!(sm.kind(prev), TokenKind::Word | TokenKind::Type) {
            names.push(prev);
        }
        if names.is_empty() {
            continue;
        }
        sm.set_parent(pc, TokenKind::ParameterPack);

        for name in names {
            sm.set_parent(name, TokenKind::ParameterPack);
            let pack_text = sm.text(name).to_string();
            log_sev!(
                Severity::ParameterPack,
                "parameter pack '{}' at line {}",
                pack_text,
                sm.orig_line(pc)
            );

            // Propagate through the rest of the enclosing top-level
            // construct (its closing brace ends the pack's scope).
            let mut cur = sm.next(pc);
            while cur.is_some() {
                if matches!(sm.kind(cur), TokenKind::Word | TokenKind::Type)
                    && sm.text(cur) == pack_text
                {
                    sm.set_parent(cur, TokenKind::ParameterPack);
                }
                if sm.kind(cur) == TokenKind::BraceClose && sm.level(cur) == 0 {
                    break;
                }
                cur = sm.next(cur);
            }
        }
    }
}
