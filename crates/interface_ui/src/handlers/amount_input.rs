//! Amount fields formatted while typing

use rust_decimal::Decimal;

use core_kernel::{format_number, parse_amount, reformat_live_input, LiveInput};

use crate::render::{ElementId, RenderInstruction};

/// Canonical text and caret for an amount field after a keystroke
pub fn on_amount_typed(text: &str, cursor: usize) -> LiveInput {
    reformat_live_input(text, cursor)
}

/// Instructions rewriting `target` after a keystroke
pub fn render_amount_typed(target: ElementId, text: &str, cursor: usize) -> Vec<RenderInstruction> {
    let LiveInput { text, cursor } = on_amount_typed(text, cursor);
    vec![
        RenderInstruction::set_value(target, text),
        RenderInstruction::SetCursor {
            target,
            position: cursor,
        },
    ]
}

/// Grouped form of a value the page was rendered with
///
/// `None` when the field should be left untouched.
pub fn initial_amount_value(text: &str) -> Option<String> {
    let value = parse_amount(text);
    (value > Decimal::ZERO).then(|| format_number(value, 0))
}
