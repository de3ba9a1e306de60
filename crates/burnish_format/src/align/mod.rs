//! The alignment engine.
//!
//! [`align_all`] orchestrates the configured passes in a fixed order,
//! ending with the quick re-commit of any group a later pass disturbed.
//! Each pass owns its option gates; a span of zero keeps a pass inert.

pub mod asm_colon;
pub mod assign;
pub mod braced_init_list;
pub mod eigen_comma_init;
pub mod func_params;
pub mod func_proto;
pub mod init_brace;
pub mod left_shift;
pub mod nl_cont;
pub mod oc;
pub mod preproc;
pub mod quick_align_again;
pub mod same_func_call_params;
pub mod stack;
pub mod tools;
pub mod trailing_comments;
pub mod typedefs;
pub mod var_def;

use crate::chunk::ChunkStore;
use crate::context::Context;
use crate::error::FormatError;
use crate::log_sev;
use crate::severity::Severity;

/// Runs every configured alignment pass.
pub fn align_all(ctx: &mut Context, sm: &mut ChunkStore) -> Result<(), FormatError> {
    log_sev!(Severity::AlignStack, "align_all starting");

    if ctx.opts.align_typedef_span > 0 {
        let span = ctx.opts.align_typedef_span;
        typedefs::align_typedefs(ctx, sm, span);
    }

    if ctx.opts.align_left_shift {
        left_shift::align_left_shift(ctx, sm);
    }

    if ctx.opts.align_eigen_comma_init {
        eigen_comma_init::align_eigen_comma_init(ctx, sm);
    }

    if ctx.opts.align_oc_msg_colon_span > 0 {
        oc::align_oc_msg_colons(ctx, sm);
    }

    if ctx.opts.align_var_def_span > 0
        || ctx.opts.align_var_struct_span > 0
        || ctx.opts.align_var_class_span > 0
    {
        var_def::align_variable_definitions(ctx, sm);
    }

    if ctx.opts.align_enum_equ_span > 0 || ctx.opts.align_assign_span > 0 {
        assign::align_assignments(ctx, sm);
    }

    if ctx.opts.align_braced_init_list_span > 0 || ctx.opts.align_braced_init_list_thresh > 0 {
        braced_init_list::align_braced_init_lists(ctx, sm);
    }

    if ctx.opts.align_struct_init_span > 0 {
        init_brace::align_struct_initializers(ctx, sm)?;
    }

    if ctx.opts.align_func_proto_span > 0 {
        let span = ctx.opts.align_func_proto_span;
        func_proto::align_func_proto(ctx, sm, span);
    }

    if ctx.opts.align_oc_msg_spec_span > 0 {
        let span = ctx.opts.align_oc_msg_spec_span;
        oc::align_oc_msg_spec(ctx, sm, span);
    }

    if ctx.opts.align_oc_decl_colon {
        oc::align_oc_decl_colons(ctx, sm);
    }

    if ctx.opts.align_asm_colon {
        asm_colon::align_asm_colons(ctx, sm);
    }

    if ctx.opts.align_func_params || ctx.opts.align_func_params_span > 0 {
        func_params::align_func_params(ctx, sm)?;
    }

    if ctx.opts.align_same_func_call_params {
        same_func_call_params::align_same_func_call_params(ctx, sm);
    }

    // Ambient column groups outside the code proper.
    if ctx.opts.align_pp_define_span > 0 {
        preproc::align_pp_defines(ctx, sm);
    }

    if ctx.opts.align_nl_cont {
        nl_cont::align_nl_cont(ctx, sm);
    }

    if ctx.opts.align_right_cmt_span > 0 || ctx.opts.align_right_cmt_at_col > 0 {
        trailing_comments::align_trailing_comments(ctx, sm);
    }

    // Anything knocked loose along the way snaps back.
    quick_align_again::quick_align_again(ctx, sm);
    Ok(())
}
