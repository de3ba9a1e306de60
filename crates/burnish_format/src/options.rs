//! The typed option set the pipeline consults.
//!
//! The external configuration layer owns parsing and persistence; the core
//! sees a flat, fully-typed [`Options`] value plus a by-name lookup that
//! mirrors the registry contract. Every field has a conservative default so
//! a zeroed configuration formats without surprises (spans of 0 disable the
//! corresponding alignment, `code_width` of 0 disables splitting).

use serde::{Deserialize, Serialize};

/// Add/remove decision for a whitespace or punctuation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Iarf {
    /// Leave the input alone.
    #[default]
    Ignore,
    /// Add if missing.
    Add,
    /// Remove if present.
    Remove,
    /// Exactly one.
    Force,
}

impl Iarf {
    pub fn is_add(self) -> bool {
        matches!(self, Iarf::Add | Iarf::Force)
    }

    pub fn is_remove(self) -> bool {
        matches!(self, Iarf::Remove)
    }
}

/// Where an operator sits when its expression is broken across lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPos {
    #[default]
    Ignore,
    /// Break only; stay where the input had it.
    Break,
    Force,
    /// Operator starts the continuation line.
    Lead,
    LeadBreak,
    LeadForce,
    /// Operator ends the broken line.
    Trail,
    TrailBreak,
    TrailForce,
    /// Keep the operator joined to both neighbors.
    Join,
}

impl TokenPos {
    /// Returns `true` for the lead-positioned variants.
    pub fn is_lead(self) -> bool {
        matches!(
            self,
            TokenPos::Lead | TokenPos::LeadBreak | TokenPos::LeadForce
        )
    }

    /// Returns `true` for the trail-positioned variants.
    pub fn is_trail(self) -> bool {
        matches!(
            self,
            TokenPos::Trail | TokenPos::TrailBreak | TokenPos::TrailForce
        )
    }
}

/// Output line-ending policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnd {
    Lf,
    Crlf,
    Cr,
    /// Match whatever the input used most.
    #[default]
    Auto,
}

/// Pointer/reference placement relative to an alignment anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarStyle {
    /// No special handling of leading `*`/`&`.
    #[default]
    Ignore,
    /// The anchor moves left of the stars; stars occupy aligned columns.
    Include,
    /// Stars hang left of the aligned identifier, eating the gap.
    Dangle,
}

/// One option value as seen through the by-name registry view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionValue {
    Bool(bool),
    Iarf(Iarf),
    Unsigned(usize),
    Signed(i32),
    LineEnd(LineEnd),
    Pos(TokenPos),
    StarStyle(StarStyle),
    Str(String),
}

/// The flat option set.
///
/// Field names match the registry names one-for-one; [`Options::lookup`]
/// is generated from the same list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    // Layout geometry
    pub indent_columns: usize,
    /// Continuation indent; negative values also re-rank split priorities.
    pub indent_continue: i32,
    pub indent_with_tabs: usize,
    pub input_tab_size: usize,
    pub output_tab_size: usize,
    pub indent_access_spec: i32,
    pub indent_namespace: bool,
    pub indent_label: i32,
    pub indent_col1_comment: bool,
    pub pp_indent: Iarf,
    pub pp_indent_at_level: bool,
    pub newlines: LineEnd,

    // Alignment
    pub align_on_tabstop: bool,
    pub align_number_right: bool,
    pub align_typedef_span: usize,
    pub align_typedef_gap: usize,
    pub align_typedef_star_style: StarStyle,
    pub align_typedef_amp_style: StarStyle,
    pub align_left_shift: bool,
    pub align_eigen_comma_init: bool,
    pub align_assign_span: usize,
    pub align_assign_thresh: usize,
    pub align_assign_decl_func: usize,
    pub align_assign_on_multi_var_defs: bool,
    pub align_enum_equ_span: usize,
    pub align_enum_equ_thresh: usize,
    pub align_var_def_span: usize,
    pub align_var_def_thresh: usize,
    pub align_var_def_gap: usize,
    pub align_var_def_star_style: StarStyle,
    pub align_var_def_amp_style: StarStyle,
    pub align_var_def_colon: bool,
    pub align_var_def_colon_gap: usize,
    pub align_var_def_inline: bool,
    pub align_var_struct_span: usize,
    pub align_var_struct_thresh: usize,
    pub align_var_struct_gap: usize,
    pub align_var_class_span: usize,
    pub align_var_class_thresh: usize,
    pub align_var_class_gap: usize,
    pub align_braced_init_list_span: usize,
    pub align_braced_init_list_thresh: usize,
    pub align_struct_init_span: usize,
    pub align_func_proto_span: usize,
    pub align_func_proto_gap: usize,
    pub align_mix_var_proto: bool,
    pub align_func_params: bool,
    pub align_func_params_span: usize,
    pub align_func_params_thresh: usize,
    pub align_func_params_gap: usize,
    pub align_same_func_call_params: bool,
    pub align_same_func_call_params_span: usize,
    pub align_same_func_call_params_thresh: usize,
    pub align_oc_msg_colon_span: usize,
    pub align_oc_msg_colon_first: bool,
    pub align_oc_msg_spec_span: usize,
    pub align_oc_decl_colon: bool,
    pub align_asm_colon: bool,
    pub align_right_cmt_span: usize,
    pub align_right_cmt_at_col: usize,
    pub align_right_cmt_gap: usize,
    pub align_right_cmt_same_level: bool,
    pub align_pp_define_span: usize,
    pub align_pp_define_gap: usize,
    pub align_nl_cont: bool,

    // Newlines and braces
    pub nl_max: usize,
    pub nl_end_of_file: Iarf,
    pub nl_end_of_file_min: usize,
    pub nl_if_brace: Iarf,
    pub nl_else_brace: Iarf,
    pub nl_brace_else: Iarf,
    pub nl_for_brace: Iarf,
    pub nl_while_brace: Iarf,
    pub nl_do_brace: Iarf,
    pub nl_brace_while: Iarf,
    pub nl_switch_brace: Iarf,
    pub nl_fdef_brace: Iarf,
    pub nl_class_brace: Iarf,
    pub nl_struct_brace: Iarf,
    pub nl_enum_brace: Iarf,
    pub nl_namespace_brace: Iarf,
    pub nl_after_func_body: usize,
    pub nl_func_leave_one_liners: bool,
    pub nl_if_leave_one_liners: bool,
    pub nl_enum_leave_one_liners: bool,
    pub nl_squeeze_paren_close: bool,

    // Width splitting
    pub code_width: usize,
    pub ls_code_width: bool,
    pub ls_func_split_full: bool,
    pub ls_for_split_full: bool,
    pub pos_arith: TokenPos,
    pub pos_assign: TokenPos,
    pub pos_compare: TokenPos,
    pub pos_conditional: TokenPos,
    pub pos_shift: TokenPos,
    pub pos_bool: TokenPos,

    // Modifications
    pub mod_infinite_loop: usize,
    pub mod_enum_last_comma: Iarf,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            indent_columns: 8,
            indent_continue: 0,
            indent_with_tabs: 0,
            input_tab_size: 8,
            output_tab_size: 8,
            indent_access_spec: 1,
            indent_namespace: false,
            indent_label: 1,
            indent_col1_comment: false,
            pp_indent: Iarf::Ignore,
            pp_indent_at_level: false,
            newlines: LineEnd::Auto,

            align_on_tabstop: false,
            align_number_right: false,
            align_typedef_span: 0,
            align_typedef_gap: 0,
            align_typedef_star_style: StarStyle::Ignore,
            align_typedef_amp_style: StarStyle::Ignore,
            align_left_shift: false,
            align_eigen_comma_init: false,
            align_assign_span: 0,
            align_assign_thresh: 0,
            align_assign_decl_func: 0,
            align_assign_on_multi_var_defs: false,
            align_enum_equ_span: 0,
            align_enum_equ_thresh: 0,
            align_var_def_span: 0,
            align_var_def_thresh: 0,
            align_var_def_gap: 0,
            align_var_def_star_style: StarStyle::Ignore,
            align_var_def_amp_style: StarStyle::Ignore,
            align_var_def_colon: false,
            align_var_def_colon_gap: 0,
            align_var_def_inline: false,
            align_var_struct_span: 0,
            align_var_struct_thresh: 0,
            align_var_struct_gap: 0,
            align_var_class_span: 0,
            align_var_class_thresh: 0,
            align_var_class_gap: 0,
            align_braced_init_list_span: 0,
            align_braced_init_list_thresh: 0,
            align_struct_init_span: 0,
            align_func_proto_span: 0,
            align_func_proto_gap: 0,
            align_mix_var_proto: false,
            align_func_params: false,
            align_func_params_span: 0,
            align_func_params_thresh: 0,
            align_func_params_gap: 0,
            align_same_func_call_params: false,
            align_same_func_call_params_span: 0,
            align_same_func_call_params_thresh: 0,
            align_oc_msg_colon_span: 0,
            align_oc_msg_colon_first: false,
            align_oc_msg_spec_span: 0,
            align_oc_decl_colon: false,
            align_asm_colon: false,
            align_right_cmt_span: 0,
            align_right_cmt_at_col: 0,
            align_right_cmt_gap: 0,
            align_right_cmt_same_level: false,
            align_pp_define_span: 0,
            align_pp_define_gap: 0,
            align_nl_cont: false,

            nl_max: 0,
            nl_end_of_file: Iarf::Ignore,
            nl_end_of_file_min: 0,
            nl_if_brace: Iarf::Ignore,
            nl_else_brace: Iarf::Ignore,
            nl_brace_else: Iarf::Ignore,
            nl_for_brace: Iarf::Ignore,
            nl_while_brace: Iarf::Ignore,
            nl_do_brace: Iarf::Ignore,
            nl_brace_while: Iarf::Ignore,
            nl_switch_brace: Iarf::Ignore,
            nl_fdef_brace: Iarf::Ignore,
            nl_class_brace: Iarf::Ignore,
            nl_struct_brace: Iarf::Ignore,
            nl_enum_brace: Iarf::Ignore,
            nl_namespace_brace: Iarf::Ignore,
            nl_after_func_body: 0,
            nl_func_leave_one_liners: false,
            nl_if_leave_one_liners: false,
            nl_enum_leave_one_liners: false,
            nl_squeeze_paren_close: false,

            code_width: 0,
            ls_code_width: false,
            ls_func_split_full: false,
            ls_for_split_full: false,
            pos_arith: TokenPos::Ignore,
            pos_assign: TokenPos::Ignore,
            pos_compare: TokenPos::Ignore,
            pos_conditional: TokenPos::Ignore,
            pos_shift: TokenPos::Ignore,
            pos_bool: TokenPos::Ignore,

            mod_infinite_loop: 0,
            mod_enum_last_comma: Iarf::Ignore,
        }
    }
}

impl Options {
    /// Registry-style lookup by option name.
    ///
    /// Returns `None` for names this core does not know.
    pub fn lookup(&self, name: &str) -> Option<OptionValue> {
        use OptionValue as V;
        let v = match name {
            "indent_columns" => V::Unsigned(self.indent_columns),
            "indent_continue" => V::Signed(self.indent_continue),
            "indent_with_tabs" => V::Unsigned(self.indent_with_tabs),
            "input_tab_size" => V::Unsigned(self.input_tab_size),
            "output_tab_size" => V::Unsigned(self.output_tab_size),
            "indent_access_spec" => V::Signed(self.indent_access_spec),
            "indent_namespace" => V::Bool(self.indent_namespace),
            "indent_label" => V::Signed(self.indent_label),
            "indent_col1_comment" => V::Bool(self.indent_col1_comment),
            "pp_indent" => V::Iarf(self.pp_indent),
            "pp_indent_at_level" => V::Bool(self.pp_indent_at_level),
            "newlines" => V::LineEnd(self.newlines),

            "align_on_tabstop" => V::Bool(self.align_on_tabstop),
            "align_number_right" => V::Bool(self.align_number_right),
            "align_typedef_span" => V::Unsigned(self.align_typedef_span),
            "align_typedef_gap" => V::Unsigned(self.align_typedef_gap),
            "align_typedef_star_style" => V::StarStyle(self.align_typedef_star_style),
            "align_typedef_amp_style" => V::StarStyle(self.align_typedef_amp_style),
            "align_left_shift" => V::Bool(self.align_left_shift),
            "align_eigen_comma_init" => V::Bool(self.align_eigen_comma_init),
            "align_assign_span" => V::Unsigned(self.align_assign_span),
            "align_assign_thresh" => V::Unsigned(self.align_assign_thresh),
            "align_assign_decl_func" => V::Unsigned(self.align_assign_decl_func),
            "align_assign_on_multi_var_defs" => V::Bool(self.align_assign_on_multi_var_defs),
            "align_enum_equ_span" => V::Unsigned(self.align_enum_equ_span),
            "align_enum_equ_thresh" => V::Unsigned(self.align_enum_equ_thresh),
            "align_var_def_span" => V::Unsigned(self.align_var_def_span),
            "align_var_def_thresh" => V::Unsigned(self.align_var_def_thresh),
            "align_var_def_gap" => V::Unsigned(self.align_var_def_gap),
            "align_var_def_star_style" => V::StarStyle(self.align_var_def_star_style),
            "align_var_def_amp_style" => V::StarStyle(self.align_var_def_amp_style),
            "align_var_def_colon" => V::Bool(self.align_var_def_colon),
            "align_var_def_colon_gap" => V::Unsigned(self.align_var_def_colon_gap),
            "align_var_def_inline" => V::Bool(self.align_var_def_inline),
            "align_var_struct_span" => V::Unsigned(self.align_var_struct_span),
            "align_var_struct_thresh" => V::Unsigned(self.align_var_struct_thresh),
            "align_var_struct_gap" => V::Unsigned(self.align_var_struct_gap),
            "align_var_class_span" => V::Unsigned(self.align_var_class_span),
            "align_var_class_thresh" => V::Unsigned(self.align_var_class_thresh),
            "align_var_class_gap" => V::Unsigned(self.align_var_class_gap),
            "align_braced_init_list_span" => V::Unsigned(self.align_braced_init_list_span),
            "align_braced_init_list_thresh" => V::Unsigned(self.align_braced_init_list_thresh),
            "align_struct_init_span" => V::Unsigned(self.align_struct_init_span),
            "align_func_proto_span" => V::Unsigned(self.align_func_proto_span),
            "align_func_proto_gap" => V::Unsigned(self.align_func_proto_gap),
            "align_mix_var_proto" => V::Bool(self.align_mix_var_proto),
            "align_func_params" => V::Bool(self.align_func_params),
            "align_func_params_span" => V::Unsigned(self.align_func_params_span),
            "align_func_params_thresh" => V::Unsigned(self.align_func_params_thresh),
            "align_func_params_gap" => V::Unsigned(self.align_func_params_gap),
            "align_same_func_call_params" => V::Bool(self.align_same_func_call_params),
            "align_same_func_call_params_span" => {
                V::Unsigned(self.align_same_func_call_params_span)
            }
            "align_same_func_call_params_thresh" => {
                V::Unsigned(self.align_same_func_call_params_thresh)
            }
            "align_oc_msg_colon_span" => V::Unsigned(self.align_oc_msg_colon_span),
            "align_oc_msg_colon_first" => V::Bool(self.align_oc_msg_colon_first),
            "align_oc_msg_spec_span" => V::Unsigned(self.align_oc_msg_spec_span),
            "align_oc_decl_colon" => V::Bool(self.align_oc_decl_colon),
            "align_asm_colon" => V::Bool(self.align_asm_colon),
            "align_right_cmt_span" => V::Unsigned(self.align_right_cmt_span),
            "align_right_cmt_at_col" => V::Unsigned(self.align_right_cmt_at_col),
            "align_right_cmt_gap" => V::Unsigned(self.align_right_cmt_gap),
            "align_right_cmt_same_level" => V::Bool(self.align_right_cmt_same_level),
            "align_pp_define_span" => V::Unsigned(self.align_pp_define_span),
            "align_pp_define_gap" => V::Unsigned(self.align_pp_define_gap),
            "align_nl_cont" => V::Bool(self.align_nl_cont),

            "nl_max" => V::Unsigned(self.nl_max),
            "nl_end_of_file" => V::Iarf(self.nl_end_of_file),
            "nl_end_of_file_min" => V::Unsigned(self.nl_end_of_file_min),
            "nl_if_brace" => V::Iarf(self.nl_if_brace),
            "nl_else_brace" => V::Iarf(self.nl_else_brace),
            "nl_brace_else" => V::Iarf(self.nl_brace_else),
            "nl_for_brace" => V::Iarf(self.nl_for_brace),
            "nl_while_brace" => V::Iarf(self.nl_while_brace),
            "nl_do_brace" => V::Iarf(self.nl_do_brace),
            "nl_brace_while" => V::Iarf(self.nl_brace_while),
            "nl_switch_brace" => V::Iarf(self.nl_switch_brace),
            "nl_fdef_brace" => V::Iarf(self.nl_fdef_brace),
            "nl_class_brace" => V::Iarf(self.nl_class_brace),
            "nl_struct_brace" => V::Iarf(self.nl_struct_brace),
            "nl_enum_brace" => V::Iarf(self.nl_enum_brace),
            "nl_namespace_brace" => V::Iarf(self.nl_namespace_brace),
            "nl_after_func_body" => V::Unsigned(self.nl_after_func_body),
            "nl_func_leave_one_liners" => V::Bool(self.nl_func_leave_one_liners),
            "nl_if_leave_one_liners" => V::Bool(self.nl_if_leave_one_liners),
            "nl_enum_leave_one_liners" => V::Bool(self.nl_enum_leave_one_liners),
            "nl_squeeze_paren_close" => V::Bool(self.nl_squeeze_paren_close),

            "code_width" => V::Unsigned(self.code_width),
            "ls_code_width" => V::Bool(self.ls_code_width),
            "ls_func_split_full" => V::Bool(self.ls_func_split_full),
            "ls_for_split_full" => V::Bool(self.ls_for_split_full),
            "pos_arith" => V::Pos(self.pos_arith),
            "pos_assign" => V::Pos(self.pos_assign),
            "pos_compare" => V::Pos(self.pos_compare),
            "pos_conditional" => V::Pos(self.pos_conditional),
            "pos_shift" => V::Pos(self.pos_shift),
            "pos_bool" => V::Pos(self.pos_bool),

            "mod_infinite_loop" => V::Unsigned(self.mod_infinite_loop),
            "mod_enum_last_comma" => V::Iarf(self.mod_enum_last_comma),

            _ => return None,
        };
        Some(v)
    }
}
