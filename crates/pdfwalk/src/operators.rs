//! The content-stream operator table.
//!
//! A fixed, immutable mapping from PDF operator mnemonics (1–3 ASCII bytes,
//! including `'` and `"`) to canonical callback identifiers. The tokenizer
//! consults [`callback_for`] to distinguish operator tokens from bare
//! keywords; mnemonics absent from the table are never operators.

/// Identifies one receiver callback fired by the content-stream interpreter.
///
/// [`Callback::name`] yields the snake_case callback name, which is the
/// stable wire contract shared with receivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Callback {
    /// `b`
    CloseFillStroke,
    /// `B`
    FillStroke,
    /// `b*`
    CloseFillStrokeWithEvenOdd,
    /// `B*`
    FillStrokeWithEvenOdd,
    /// `BDC`
    BeginMarkedContentWithPl,
    /// `BI`
    BeginInlineImage,
    /// `BMC`
    BeginMarkedContent,
    /// `BT`
    BeginTextObject,
    /// `BX`
    BeginCompatibilitySection,
    /// `c`
    AppendCurvedSegment,
    /// `cm`
    ConcatenateMatrix,
    /// `cs`
    SetNonstrokeColorSpace,
    /// `CS`
    SetStrokeColorSpace,
    /// `d`
    SetLineDash,
    /// `d0`
    SetGlyphWidth,
    /// `d1`
    SetGlyphWidthAndBoundingBox,
    /// `Do`
    InvokeXobject,
    /// `DP`
    DefineMarkedContentWithPl,
    /// `EI`
    EndInlineImage,
    /// `EMC`
    EndMarkedContent,
    /// `ET`
    EndTextObject,
    /// `EX`
    EndCompatibilitySection,
    /// `f` and `F`
    FillPathWithNonzero,
    /// `f*`
    FillPathWithEvenOdd,
    /// `g`
    SetGrayForNonstroking,
    /// `G`
    SetGrayForStroking,
    /// `gs`
    SetGraphicsStateParameters,
    /// `h`
    CloseSubpath,
    /// `i`
    SetFlatnessTolerance,
    /// `ID`
    BeginInlineImageData,
    /// `j`
    SetLineJoinStyle,
    /// `J`
    SetLineCapStyle,
    /// `K`
    SetCmykColorForStroking,
    /// `k`
    SetCmykColorForNonstroking,
    /// `l`
    AppendLine,
    /// `m`
    BeginNewSubpath,
    /// `M`
    SetMiterLimit,
    /// `MP`
    DefineMarkedContentPoint,
    /// `n`
    EndPath,
    /// `q`
    SaveGraphicsState,
    /// `Q`
    RestoreGraphicsState,
    /// `re`
    AppendRectangle,
    /// `rg`
    SetRgbColorForNonstroking,
    /// `RG`
    SetRgbColorForStroking,
    /// `ri`
    SetColorRenderingIntent,
    /// `s`
    CloseAndStrokePath,
    /// `S`
    StrokePath,
    /// `sc`
    SetColorForNonstroking,
    /// `SC`
    SetColorForStroking,
    /// `scn`
    SetColorForNonstrokingAndSpecial,
    /// `SCN`
    SetColorForStrokingAndSpecial,
    /// `sh`
    PaintAreaWithShadingPattern,
    /// `T*`
    MoveToStartOfNextLine,
    /// `Tc`
    SetCharacterSpacing,
    /// `Td`
    MoveTextPosition,
    /// `TD`
    MoveTextPositionAndSetLeading,
    /// `Tf`
    SetTextFontAndSize,
    /// `Tj`
    ShowText,
    /// `TJ`
    ShowTextWithPositioning,
    /// `TL`
    SetTextLeading,
    /// `Tm`
    SetTextMatrixAndTextLineMatrix,
    /// `Tr`
    SetTextRenderingMode,
    /// `Ts`
    SetTextRise,
    /// `Tw`
    SetWordSpacing,
    /// `Tz`
    SetHorizontalTextScaling,
    /// `v`
    AppendCurvedSegmentInitialPointReplicated,
    /// `w`
    SetLineWidth,
    /// `W`
    SetClippingPathWithNonzero,
    /// `W*`
    SetClippingPathWithEvenOdd,
    /// `y`
    AppendCurvedSegmentFinalPointReplicated,
    /// `'`
    MoveToNextLineAndShowText,
    /// `"`
    SetSpacingNextLineShowText,
}

impl Callback {
    /// The snake_case callback name, as receivers see it.
    pub fn name(self) -> &'static str {
        match self {
            Callback::CloseFillStroke => "close_fill_stroke",
            Callback::FillStroke => "fill_stroke",
            Callback::CloseFillStrokeWithEvenOdd => "close_fill_stroke_with_even_odd",
            Callback::FillStrokeWithEvenOdd => "fill_stroke_with_even_odd",
            Callback::BeginMarkedContentWithPl => "begin_marked_content_with_pl",
            Callback::BeginInlineImage => "begin_inline_image",
            Callback::BeginMarkedContent => "begin_marked_content",
            Callback::BeginTextObject => "begin_text_object",
            Callback::BeginCompatibilitySection => "begin_compatibility_section",
            Callback::AppendCurvedSegment => "append_curved_segment",
            Callback::ConcatenateMatrix => "concatenate_matrix",
            Callback::SetNonstrokeColorSpace => "set_nonstroke_color_space",
            Callback::SetStrokeColorSpace => "set_stroke_color_space",
            Callback::SetLineDash => "set_line_dash",
            Callback::SetGlyphWidth => "set_glyph_width",
            Callback::SetGlyphWidthAndBoundingBox => "set_glyph_width_and_bounding_box",
            Callback::InvokeXobject => "invoke_xobject",
            Callback::DefineMarkedContentWithPl => "define_marked_content_with_pl",
            Callback::EndInlineImage => "end_inline_image",
            Callback::EndMarkedContent => "end_marked_content",
            Callback::EndTextObject => "end_text_object",
            Callback::EndCompatibilitySection => "end_compatibility_section",
            Callback::FillPathWithNonzero => "fill_path_with_nonzero",
            Callback::FillPathWithEvenOdd => "fill_path_with_even_odd",
            Callback::SetGrayForNonstroking => "set_gray_for_nonstroking",
            Callback::SetGrayForStroking => "set_gray_for_stroking",
            Callback::SetGraphicsStateParameters => "set_graphics_state_parameters",
            Callback::CloseSubpath => "close_subpath",
            Callback::SetFlatnessTolerance => "set_flatness_tolerance",
            Callback::BeginInlineImageData => "begin_inline_image_data",
            Callback::SetLineJoinStyle => "set_line_join_style",
            Callback::SetLineCapStyle => "set_line_cap_style",
            Callback::SetCmykColorForStroking => "set_cmyk_color_for_stroking",
            Callback::SetCmykColorForNonstroking => "set_cmyk_color_for_nonstroking",
            Callback::AppendLine => "append_line",
            Callback::BeginNewSubpath => "begin_new_subpath",
            Callback::SetMiterLimit => "set_miter_limit",
            Callback::DefineMarkedContentPoint => "define_marked_content_point",
            Callback::EndPath => "end_path",
            Callback::SaveGraphicsState => "save_graphics_state",
            Callback::RestoreGraphicsState => "restore_graphics_state",
            Callback::AppendRectangle => "append_rectangle",
            Callback::SetRgbColorForNonstroking => "set_rgb_color_for_nonstroking",
            Callback::SetRgbColorForStroking => "set_rgb_color_for_stroking",
            Callback::SetColorRenderingIntent => "set_color_rendering_intent",
            Callback::CloseAndStrokePath => "close_and_stroke_path",
            Callback::StrokePath => "stroke_path",
            Callback::SetColorForNonstroking => "set_color_for_nonstroking",
            Callback::SetColorForStroking => "set_color_for_stroking",
            Callback::SetColorForNonstrokingAndSpecial => "set_color_for_nonstroking_and_special",
            Callback::SetColorForStrokingAndSpecial => "set_color_for_stroking_and_special",
            Callback::PaintAreaWithShadingPattern => "paint_area_with_shading_pattern",
            Callback::MoveToStartOfNextLine => "move_to_start_of_next_line",
            Callback::SetCharacterSpacing => "set_character_spacing",
            Callback::MoveTextPosition => "move_text_position",
            Callback::MoveTextPositionAndSetLeading => "move_text_position_and_set_leading",
            Callback::SetTextFontAndSize => "set_text_font_and_size",
            Callback::ShowText => "show_text",
            Callback::ShowTextWithPositioning => "show_text_with_positioning",
            Callback::SetTextLeading => "set_text_leading",
            Callback::SetTextMatrixAndTextLineMatrix => "set_text_matrix_and_text_line_matrix",
            Callback::SetTextRenderingMode => "set_text_rendering_mode",
            Callback::SetTextRise => "set_text_rise",
            Callback::SetWordSpacing => "set_word_spacing",
            Callback::SetHorizontalTextScaling => "set_horizontal_text_scaling",
            Callback::AppendCurvedSegmentInitialPointReplicated => {
                "append_curved_segment_initial_point_replicated"
            }
            Callback::SetLineWidth => "set_line_width",
            Callback::SetClippingPathWithNonzero => "set_clipping_path_with_nonzero",
            Callback::SetClippingPathWithEvenOdd => "set_clipping_path_with_even_odd",
            Callback::AppendCurvedSegmentFinalPointReplicated => {
                "append_curved_segment_final_point_replicated"
            }
            Callback::MoveToNextLineAndShowText => "move_to_next_line_and_show_text",
            Callback::SetSpacingNextLineShowText => "set_spacing_next_line_show_text",
        }
    }

    /// True for the show-text family, whose operands are decoded through
    /// the current font before dispatch.
    pub(crate) fn shows_text(self) -> bool {
        self.name().contains("show_text")
    }
}

/// Look up the callback for a content-stream operator mnemonic.
///
/// Returns `None` for mnemonics outside the operator table; the tokenizer
/// treats those as ordinary operand tokens.
pub fn callback_for(mnemonic: &str) -> Option<Callback> {
    let cb = match mnemonic {
        "b" => Callback::CloseFillStroke,
        "B" => Callback::FillStroke,
        "b*" => Callback::CloseFillStrokeWithEvenOdd,
        "B*" => Callback::FillStrokeWithEvenOdd,
        "BDC" => Callback::BeginMarkedContentWithPl,
        "BI" => Callback::BeginInlineImage,
        "BMC" => Callback::BeginMarkedContent,
        "BT" => Callback::BeginTextObject,
        "BX" => Callback::BeginCompatibilitySection,
        "c" => Callback::AppendCurvedSegment,
        "cm" => Callback::ConcatenateMatrix,
        "cs" => Callback::SetNonstrokeColorSpace,
        "CS" => Callback::SetStrokeColorSpace,
        "d" => Callback::SetLineDash,
        "d0" => Callback::SetGlyphWidth,
        "d1" => Callback::SetGlyphWidthAndBoundingBox,
        "Do" => Callback::InvokeXobject,
        "DP" => Callback::DefineMarkedContentWithPl,
        "EI" => Callback::EndInlineImage,
        "EMC" => Callback::EndMarkedContent,
        "ET" => Callback::EndTextObject,
        "EX" => Callback::EndCompatibilitySection,
        "f" | "F" => Callback::FillPathWithNonzero,
        "f*" => Callback::FillPathWithEvenOdd,
        "g" => Callback::SetGrayForNonstroking,
        "G" => Callback::SetGrayForStroking,
        "gs" => Callback::SetGraphicsStateParameters,
        "h" => Callback::CloseSubpath,
        "i" => Callback::SetFlatnessTolerance,
        "ID" => Callback::BeginInlineImageData,
        "j" => Callback::SetLineJoinStyle,
        "J" => Callback::SetLineCapStyle,
        "K" => Callback::SetCmykColorForStroking,
        "k" => Callback::SetCmykColorForNonstroking,
        "l" => Callback::AppendLine,
        "m" => Callback::BeginNewSubpath,
        "M" => Callback::SetMiterLimit,
        "MP" => Callback::DefineMarkedContentPoint,
        "n" => Callback::EndPath,
        "q" => Callback::SaveGraphicsState,
        "Q" => Callback::RestoreGraphicsState,
        "re" => Callback::AppendRectangle,
        "rg" => Callback::SetRgbColorForNonstroking,
        "RG" => Callback::SetRgbColorForStroking,
        "ri" => Callback::SetColorRenderingIntent,
        "s" => Callback::CloseAndStrokePath,
        "S" => Callback::StrokePath,
        "sc" => Callback::SetColorForNonstroking,
        "SC" => Callback::SetColorForStroking,
        "scn" => Callback::SetColorForNonstrokingAndSpecial,
        "SCN" => Callback::SetColorForStrokingAndSpecial,
        "sh" => Callback::PaintAreaWithShadingPattern,
        "T*" => Callback::MoveToStartOfNextLine,
        "Tc" => Callback::SetCharacterSpacing,
        "Td" => Callback::MoveTextPosition,
        "TD" => Callback::MoveTextPositionAndSetLeading,
        "Tf" => Callback::SetTextFontAndSize,
        "Tj" => Callback::ShowText,
        "TJ" => Callback::ShowTextWithPositioning,
        "TL" => Callback::SetTextLeading,
        "Tm" => Callback::SetTextMatrixAndTextLineMatrix,
        "Tr" => Callback::SetTextRenderingMode,
        "Ts" => Callback::SetTextRise,
        "Tw" => Callback::SetWordSpacing,
        "Tz" => Callback::SetHorizontalTextScaling,
        "v" => Callback::AppendCurvedSegmentInitialPointReplicated,
        "w" => Callback::SetLineWidth,
        "W" => Callback::SetClippingPathWithNonzero,
        "W*" => Callback::SetClippingPathWithEvenOdd,
        "y" => Callback::AppendCurvedSegmentFinalPointReplicated,
        "'" => Callback::MoveToNextLineAndShowText,
        "\"" => Callback::SetSpacingNextLineShowText,
        _ => return None,
    };
    Some(cb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_operators() {
        assert_eq!(callback_for("BT"), Some(Callback::BeginTextObject));
        assert_eq!(callback_for("Tf"), Some(Callback::SetTextFontAndSize));
        assert_eq!(callback_for("Tj"), Some(Callback::ShowText));
        assert_eq!(callback_for("TJ"), Some(Callback::ShowTextWithPositioning));
        assert_eq!(callback_for("ET"), Some(Callback::EndTextObject));
    }

    #[test]
    fn quote_operators() {
        assert_eq!(callback_for("'"), Some(Callback::MoveToNextLineAndShowText));
        assert_eq!(
            callback_for("\""),
            Some(Callback::SetSpacingNextLineShowText)
        );
    }

    #[test]
    fn star_operators() {
        assert_eq!(callback_for("f*"), Some(Callback::FillPathWithEvenOdd));
        assert_eq!(callback_for("W*"), Some(Callback::SetClippingPathWithEvenOdd));
        assert_eq!(callback_for("T*"), Some(Callback::MoveToStartOfNextLine));
    }

    #[test]
    fn fill_alias() {
        assert_eq!(callback_for("f"), Some(Callback::FillPathWithNonzero));
        assert_eq!(callback_for("F"), Some(Callback::FillPathWithNonzero));
    }

    #[test]
    fn case_sensitivity() {
        assert_ne!(callback_for("g"), callback_for("G"));
        assert_ne!(callback_for("sc"), callback_for("SC"));
        assert_eq!(callback_for("tj"), None);
    }

    #[test]
    fn unknown_mnemonics() {
        assert_eq!(callback_for("XYZ"), None);
        assert_eq!(callback_for(""), None);
        assert_eq!(callback_for("true"), None);
    }

    #[test]
    fn inline_image_operators() {
        assert_eq!(callback_for("BI"), Some(Callback::BeginInlineImage));
        assert_eq!(callback_for("ID"), Some(Callback::BeginInlineImageData));
        assert_eq!(callback_for("EI"), Some(Callback::EndInlineImage));
    }

    #[test]
    fn callback_names() {
        assert_eq!(Callback::ShowText.name(), "show_text");
        assert_eq!(Callback::SaveGraphicsState.name(), "save_graphics_state");
        assert_eq!(
            Callback::AppendCurvedSegmentInitialPointReplicated.name(),
            "append_curved_segment_initial_point_replicated"
        );
    }

    #[test]
    fn show_text_family() {
        assert!(Callback::ShowText.shows_text());
        assert!(Callback::ShowTextWithPositioning.shows_text());
        assert!(Callback::MoveToNextLineAndShowText.shows_text());
        assert!(Callback::SetSpacingNextLineShowText.shows_text());
        assert!(!Callback::SetTextFontAndSize.shows_text());
        assert!(!Callback::BeginTextObject.shows_text());
    }
}
