//! Conversion between protocol coordinates and the internal coordinate model.
//!
//! Both sides are zero-based line/character pairs, so every conversion is a
//! plain field mapping; nothing is clipped or reinterpreted.

use magik_core::position::{
    CodeAction as MagikCodeAction, Location as MagikLocation, Position as MagikPosition,
    Range as MagikRange, TextEdit as MagikTextEdit,
};
use std::collections::HashMap;
use tower_lsp_server::ls_types::{
    CodeAction, CodeActionKind, CodeActionOrCommand, Location, Position, Range, TextEdit, Uri,
    WorkspaceEdit,
};

pub fn position_from_lsp(position: Position) -> MagikPosition {
    MagikPosition::new(position.line as usize, position.character as usize)
}

pub fn position_to_lsp(position: MagikPosition) -> Position {
    Position::new(position.line as u32, position.column as u32)
}

pub fn range_from_lsp(range: Range) -> MagikRange {
    MagikRange::new(position_from_lsp(range.start), position_from_lsp(range.end))
}

pub fn range_to_lsp(range: MagikRange) -> Range {
    Range::new(position_to_lsp(range.start), position_to_lsp(range.end))
}

pub fn location_from_lsp(location: Location) -> MagikLocation {
    MagikLocation::new(location.uri, range_from_lsp(location.range))
}

pub fn location_to_lsp(location: MagikLocation) -> Location {
    Location::new(location.uri, range_to_lsp(location.range))
}

pub fn text_edit_to_lsp(edit: MagikTextEdit) -> TextEdit {
    TextEdit::new(range_to_lsp(edit.range), edit.new_text)
}

/// Turns an internal code action into a quick fix editing `uri`.
pub fn code_action_to_lsp(uri: &Uri, action: MagikCodeAction) -> CodeActionOrCommand {
    let edits = action.edits.into_iter().map(text_edit_to_lsp).collect();
    let mut changes = HashMap::new();
    changes.insert(uri.clone(), edits);

    CodeActionOrCommand::CodeAction(CodeAction {
        title: action.title,
        kind: Some(CodeActionKind::QUICKFIX),
        edit: Some(WorkspaceEdit {
            changes: Some(changes),
            ..Default::default()
        }),
        ..Default::default()
    })
}
