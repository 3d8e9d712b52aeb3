//! The receiver callback surface and its dispatch adapter.
//!
//! [`Receiver`] is the walker's sole extension point. Every callback has a
//! default no-op implementation, so receivers implement only the subset of
//! events they care about; everything else is silently ignored. Operator
//! callbacks uniformly receive the operand stack accumulated since the
//! previous operator; lifecycle, metadata, and resource callbacks carry
//! typed arguments.

use lopdf::{Dictionary, Object};

use crate::font::Font;
use crate::operators::Callback;
use crate::tokenizer::Operand;

/// Receives events from the page-tree walker and content-stream interpreter.
///
/// Callbacks fire serially, in document order, from a single walker. A
/// receiver that wants only text implements [`show_text`] and friends and
/// nothing else.
///
/// [`show_text`]: Receiver::show_text
#[allow(unused_variables)]
pub trait Receiver {
    // --- Lifecycle ---

    /// The walk entered the document; `root` is the catalog dictionary.
    fn begin_document(&mut self, root: &Dictionary) {}
    /// The walk finished the document.
    fn end_document(&mut self) {}
    /// Entered a `Pages` container node.
    fn begin_page_container(&mut self, node: &Dictionary) {}
    /// Left a `Pages` container node.
    fn end_page_container(&mut self) {}
    /// Entered a leaf `Page`.
    fn begin_page(&mut self, page: &Dictionary) {}
    /// Left a leaf `Page`.
    fn end_page(&mut self) {}
    /// A Form XObject invocation is about to be interpreted.
    fn begin_form_xobject(&mut self) {}
    /// A Form XObject invocation finished.
    fn end_form_xobject(&mut self) {}

    // --- Metadata ---

    /// The file's PDF version string (e.g. `"1.4"`).
    fn pdf_version(&mut self, version: &str) {}
    /// The Info dictionary, with its text strings decoded to UTF-8.
    fn metadata(&mut self, info: &Dictionary) {}
    /// The raw decoded payload of the catalog's XML metadata stream.
    fn xml_metadata(&mut self, data: &[u8]) {}
    /// The page count from the root `Pages` node.
    fn page_count(&mut self, count: i64) {}

    // --- Resources ---

    /// The `ProcSet` entry of the current resources.
    fn resource_procset(&mut self, list: &Object) {}
    /// One `XObject` resource entry, fully dereferenced.
    fn resource_xobject(&mut self, name: &str, value: &Object) {}
    /// One `ExtGState` resource entry, fully dereferenced.
    fn resource_extgstate(&mut self, name: &str, value: &Object) {}
    /// One `ColorSpace` resource entry, fully dereferenced.
    fn resource_colorspace(&mut self, name: &str, value: &Object) {}
    /// One `Pattern` resource entry, fully dereferenced.
    fn resource_pattern(&mut self, name: &str, value: &Object) {}
    /// One materialized font from the `Font` resource dictionary.
    fn resource_font(&mut self, label: &str, font: &Font) {}

    // --- Text objects and text state ---

    /// `BT` — begin a text object.
    fn begin_text_object(&mut self, operands: &[Operand]) {}
    /// `ET` — end a text object.
    fn end_text_object(&mut self, operands: &[Operand]) {}
    /// `T*` — move to the start of the next line.
    fn move_to_start_of_next_line(&mut self, operands: &[Operand]) {}
    /// `Tc` — set character spacing.
    fn set_character_spacing(&mut self, operands: &[Operand]) {}
    /// `Td` — move the text position.
    fn move_text_position(&mut self, operands: &[Operand]) {}
    /// `TD` — move the text position and set leading.
    fn move_text_position_and_set_leading(&mut self, operands: &[Operand]) {}
    /// `Tf` — select the font and size.
    fn set_text_font_and_size(&mut self, operands: &[Operand]) {}
    /// `Tj` — show a text string.
    fn show_text(&mut self, operands: &[Operand]) {}
    /// `TJ` — show text with per-element positioning.
    fn show_text_with_positioning(&mut self, operands: &[Operand]) {}
    /// `TL` — set text leading.
    fn set_text_leading(&mut self, operands: &[Operand]) {}
    /// `Tm` — set the text matrix and text line matrix.
    fn set_text_matrix_and_text_line_matrix(&mut self, operands: &[Operand]) {}
    /// `Tr` — set the text rendering mode.
    fn set_text_rendering_mode(&mut self, operands: &[Operand]) {}
    /// `Ts` — set text rise.
    fn set_text_rise(&mut self, operands: &[Operand]) {}
    /// `Tw` — set word spacing.
    fn set_word_spacing(&mut self, operands: &[Operand]) {}
    /// `Tz` — set horizontal text scaling.
    fn set_horizontal_text_scaling(&mut self, operands: &[Operand]) {}
    /// `'` — move to the next line and show text.
    fn move_to_next_line_and_show_text(&mut self, operands: &[Operand]) {}
    /// `"` — set spacing, move to the next line, and show text.
    fn set_spacing_next_line_show_text(&mut self, operands: &[Operand]) {}

    // --- Graphics state ---

    /// `q` — save the graphics state.
    fn save_graphics_state(&mut self, operands: &[Operand]) {}
    /// `Q` — restore the graphics state.
    fn restore_graphics_state(&mut self, operands: &[Operand]) {}
    /// `cm` — concatenate a matrix onto the CTM.
    fn concatenate_matrix(&mut self, operands: &[Operand]) {}
    /// `w` — set line width.
    fn set_line_width(&mut self, operands: &[Operand]) {}
    /// `J` — set line cap style.
    fn set_line_cap_style(&mut self, operands: &[Operand]) {}
    /// `j` — set line join style.
    fn set_line_join_style(&mut self, operands: &[Operand]) {}
    /// `M` — set miter limit.
    fn set_miter_limit(&mut self, operands: &[Operand]) {}
    /// `d` — set the line dash pattern.
    fn set_line_dash(&mut self, operands: &[Operand]) {}
    /// `ri` — set the color rendering intent.
    fn set_color_rendering_intent(&mut self, operands: &[Operand]) {}
    /// `i` — set the flatness tolerance.
    fn set_flatness_tolerance(&mut self, operands: &[Operand]) {}
    /// `gs` — set parameters from an `ExtGState` dictionary.
    fn set_graphics_state_parameters(&mut self, operands: &[Operand]) {}

    // --- Path construction ---

    /// `m` — begin a new subpath.
    fn begin_new_subpath(&mut self, operands: &[Operand]) {}
    /// `l` — append a straight segment.
    fn append_line(&mut self, operands: &[Operand]) {}
    /// `c` — append a cubic Bézier segment.
    fn append_curved_segment(&mut self, operands: &[Operand]) {}
    /// `v` — append a Bézier segment replicating the initial point.
    fn append_curved_segment_initial_point_replicated(&mut self, operands: &[Operand]) {}
    /// `y` — append a Bézier segment replicating the final point.
    fn append_curved_segment_final_point_replicated(&mut self, operands: &[Operand]) {}
    /// `h` — close the current subpath.
    fn close_subpath(&mut self, operands: &[Operand]) {}
    /// `re` — append a rectangle.
    fn append_rectangle(&mut self, operands: &[Operand]) {}

    // --- Path painting ---

    /// `S` — stroke the path.
    fn stroke_path(&mut self, operands: &[Operand]) {}
    /// `s` — close and stroke the path.
    fn close_and_stroke_path(&mut self, operands: &[Operand]) {}
    /// `f` / `F` — fill with the nonzero winding rule.
    fn fill_path_with_nonzero(&mut self, operands: &[Operand]) {}
    /// `f*` — fill with the even-odd rule.
    fn fill_path_with_even_odd(&mut self, operands: &[Operand]) {}
    /// `B` — fill then stroke.
    fn fill_stroke(&mut self, operands: &[Operand]) {}
    /// `b` — close, fill, then stroke.
    fn close_fill_stroke(&mut self, operands: &[Operand]) {}
    /// `B*` — fill (even-odd) then stroke.
    fn fill_stroke_with_even_odd(&mut self, operands: &[Operand]) {}
    /// `b*` — close, fill (even-odd), then stroke.
    fn close_fill_stroke_with_even_odd(&mut self, operands: &[Operand]) {}
    /// `n` — end the path without painting.
    fn end_path(&mut self, operands: &[Operand]) {}
    /// `W` — clip with the nonzero winding rule.
    fn set_clipping_path_with_nonzero(&mut self, operands: &[Operand]) {}
    /// `W*` — clip with the even-odd rule.
    fn set_clipping_path_with_even_odd(&mut self, operands: &[Operand]) {}

    // --- Color ---

    /// `CS` — set the stroking color space.
    fn set_stroke_color_space(&mut self, operands: &[Operand]) {}
    /// `cs` — set the nonstroking color space.
    fn set_nonstroke_color_space(&mut self, operands: &[Operand]) {}
    /// `G` — set gray for stroking.
    fn set_gray_for_stroking(&mut self, operands: &[Operand]) {}
    /// `g` — set gray for nonstroking.
    fn set_gray_for_nonstroking(&mut self, operands: &[Operand]) {}
    /// `RG` — set RGB for stroking.
    fn set_rgb_color_for_stroking(&mut self, operands: &[Operand]) {}
    /// `rg` — set RGB for nonstroking.
    fn set_rgb_color_for_nonstroking(&mut self, operands: &[Operand]) {}
    /// `K` — set CMYK for stroking.
    fn set_cmyk_color_for_stroking(&mut self, operands: &[Operand]) {}
    /// `k` — set CMYK for nonstroking.
    fn set_cmyk_color_for_nonstroking(&mut self, operands: &[Operand]) {}
    /// `SC` — set stroking color components.
    fn set_color_for_stroking(&mut self, operands: &[Operand]) {}
    /// `sc` — set nonstroking color components.
    fn set_color_for_nonstroking(&mut self, operands: &[Operand]) {}
    /// `SCN` — set stroking color, allowing special color spaces.
    fn set_color_for_stroking_and_special(&mut self, operands: &[Operand]) {}
    /// `scn` — set nonstroking color, allowing special color spaces.
    fn set_color_for_nonstroking_and_special(&mut self, operands: &[Operand]) {}
    /// `sh` — paint the area with a shading pattern.
    fn paint_area_with_shading_pattern(&mut self, operands: &[Operand]) {}

    // --- XObjects, inline images, marked content, glyph metrics ---

    /// `Do` — invoke a named XObject.
    fn invoke_xobject(&mut self, operands: &[Operand]) {}
    /// `BI` — begin an inline image.
    fn begin_inline_image(&mut self, operands: &[Operand]) {}
    /// `ID` — inline image data: the image dictionary and its raw bytes.
    fn begin_inline_image_data(&mut self, operands: &[Operand]) {}
    /// `EI` — end an inline image.
    fn end_inline_image(&mut self, operands: &[Operand]) {}
    /// `BMC` — begin marked content.
    fn begin_marked_content(&mut self, operands: &[Operand]) {}
    /// `BDC` — begin marked content with a property list.
    fn begin_marked_content_with_pl(&mut self, operands: &[Operand]) {}
    /// `MP` — define a marked-content point.
    fn define_marked_content_point(&mut self, operands: &[Operand]) {}
    /// `DP` — define a marked-content point with a property list.
    fn define_marked_content_with_pl(&mut self, operands: &[Operand]) {}
    /// `EMC` — end marked content.
    fn end_marked_content(&mut self, operands: &[Operand]) {}
    /// `d0` — set glyph width (Type 3 fonts).
    fn set_glyph_width(&mut self, operands: &[Operand]) {}
    /// `d1` — set glyph width and bounding box (Type 3 fonts).
    fn set_glyph_width_and_bounding_box(&mut self, operands: &[Operand]) {}

    // --- Compatibility sections ---

    /// `BX` — begin a compatibility section.
    fn begin_compatibility_section(&mut self, operands: &[Operand]) {}
    /// `EX` — end a compatibility section.
    fn end_compatibility_section(&mut self, operands: &[Operand]) {}
}

/// Route one operator callback to the matching [`Receiver`] method.
///
/// Lifecycle, metadata, and resource callbacks are invoked directly by the
/// walker; only operator-driven callbacks go through this table.
pub fn dispatch(receiver: &mut dyn Receiver, callback: Callback, operands: &[Operand]) {
    match callback {
        Callback::CloseFillStroke => receiver.close_fill_stroke(operands),
        Callback::FillStroke => receiver.fill_stroke(operands),
        Callback::CloseFillStrokeWithEvenOdd => receiver.close_fill_stroke_with_even_odd(operands),
        Callback::FillStrokeWithEvenOdd => receiver.fill_stroke_with_even_odd(operands),
        Callback::BeginMarkedContentWithPl => receiver.begin_marked_content_with_pl(operands),
        Callback::BeginInlineImage => receiver.begin_inline_image(operands),
        Callback::BeginMarkedContent => receiver.begin_marked_content(operands),
        Callback::BeginTextObject => receiver.begin_text_object(operands),
        Callback::BeginCompatibilitySection => receiver.begin_compatibility_section(operands),
        Callback::AppendCurvedSegment => receiver.append_curved_segment(operands),
        Callback::ConcatenateMatrix => receiver.concatenate_matrix(operands),
        Callback::SetNonstrokeColorSpace => receiver.set_nonstroke_color_space(operands),
        Callback::SetStrokeColorSpace => receiver.set_stroke_color_space(operands),
        Callback::SetLineDash => receiver.set_line_dash(operands),
        Callback::SetGlyphWidth => receiver.set_glyph_width(operands),
        Callback::SetGlyphWidthAndBoundingBox => {
            receiver.set_glyph_width_and_bounding_box(operands)
        }
        Callback::InvokeXobject => receiver.invoke_xobject(operands),
        Callback::DefineMarkedContentWithPl => receiver.define_marked_content_with_pl(operands),
        Callback::EndInlineImage => receiver.end_inline_image(operands),
        Callback::EndMarkedContent => receiver.end_marked_content(operands),
        Callback::EndTextObject => receiver.end_text_object(operands),
        Callback::EndCompatibilitySection => receiver.end_compatibility_section(operands),
        Callback::FillPathWithNonzero => receiver.fill_path_with_nonzero(operands),
        Callback::FillPathWithEvenOdd => receiver.fill_path_with_even_odd(operands),
        Callback::SetGrayForNonstroking => receiver.set_gray_for_nonstroking(operands),
        Callback::SetGrayForStroking => receiver.set_gray_for_stroking(operands),
        Callback::SetGraphicsStateParameters => receiver.set_graphics_state_parameters(operands),
        Callback::CloseSubpath => receiver.close_subpath(operands),
        Callback::SetFlatnessTolerance => receiver.set_flatness_tolerance(operands),
        Callback::BeginInlineImageData => receiver.begin_inline_image_data(operands),
        Callback::SetLineJoinStyle => receiver.set_line_join_style(operands),
        Callback::SetLineCapStyle => receiver.set_line_cap_style(operands),
        Callback::SetCmykColorForStroking => receiver.set_cmyk_color_for_stroking(operands),
        Callback::SetCmykColorForNonstroking => receiver.set_cmyk_color_for_nonstroking(operands),
        Callback::AppendLine => receiver.append_line(operands),
        Callback::BeginNewSubpath => receiver.begin_new_subpath(operands),
        Callback::SetMiterLimit => receiver.set_miter_limit(operands),
        Callback::DefineMarkedContentPoint => receiver.define_marked_content_point(operands),
        Callback::EndPath => receiver.end_path(operands),
        Callback::SaveGraphicsState => receiver.save_graphics_state(operands),
        Callback::RestoreGraphicsState => receiver.restore_graphics_state(operands),
        Callback::AppendRectangle => receiver.append_rectangle(operands),
        Callback::SetRgbColorForNonstroking => receiver.set_rgb_color_for_nonstroking(operands),
        Callback::SetRgbColorForStroking => receiver.set_rgb_color_for_stroking(operands),
        Callback::SetColorRenderingIntent => receiver.set_color_rendering_intent(operands),
        Callback::CloseAndStrokePath => receiver.close_and_stroke_path(operands),
        Callback::StrokePath => receiver.stroke_path(operands),
        Callback::SetColorForNonstroking => receiver.set_color_for_nonstroking(operands),
        Callback::SetColorForStroking => receiver.set_color_for_stroking(operands),
        Callback::SetColorForNonstrokingAndSpecial => {
            receiver.set_color_for_nonstroking_and_special(operands)
        }
        Callback::SetColorForStrokingAndSpecial => {
            receiver.set_color_for_stroking_and_special(operands)
        }
        Callback::PaintAreaWithShadingPattern => receiver.paint_area_with_shading_pattern(operands),
        Callback::MoveToStartOfNextLine => receiver.move_to_start_of_next_line(operands),
        Callback::SetCharacterSpacing => receiver.set_character_spacing(operands),
        Callback::MoveTextPosition => receiver.move_text_position(operands),
        Callback::MoveTextPositionAndSetLeading => {
            receiver.move_text_position_and_set_leading(operands)
        }
        Callback::SetTextFontAndSize => receiver.set_text_font_and_size(operands),
        Callback::ShowText => receiver.show_text(operands),
        Callback::ShowTextWithPositioning => receiver.show_text_with_positioning(operands),
        Callback::SetTextLeading => receiver.set_text_leading(operands),
        Callback::SetTextMatrixAndTextLineMatrix => {
            receiver.set_text_matrix_and_text_line_matrix(operands)
        }
        Callback::SetTextRenderingMode => receiver.set_text_rendering_mode(operands),
        Callback::SetTextRise => receiver.set_text_rise(operands),
        Callback::SetWordSpacing => receiver.set_word_spacing(operands),
        Callback::SetHorizontalTextScaling => receiver.set_horizontal_text_scaling(operands),
        Callback::AppendCurvedSegmentInitialPointReplicated => {
            receiver.append_curved_segment_initial_point_replicated(operands)
        }
        Callback::SetLineWidth => receiver.set_line_width(operands),
        Callback::SetClippingPathWithNonzero => receiver.set_clipping_path_with_nonzero(operands),
        Callback::SetClippingPathWithEvenOdd => receiver.set_clipping_path_with_even_odd(operands),
        Callback::AppendCurvedSegmentFinalPointReplicated => {
            receiver.append_curved_segment_final_point_replicated(operands)
        }
        Callback::MoveToNextLineAndShowText => receiver.move_to_next_line_and_show_text(operands),
        Callback::SetSpacingNextLineShowText => receiver.set_spacing_next_line_show_text(operands),
    }
}
