//! Prompt composition for migration requests

use super::request::MigrationRequest;

/// Closing instruction appended after the three document sections
pub const REPLY_INSTRUCTION: &str = "Rewrite the user's code so it uses the new SDK \
as described in the migration guide. \
Reply with the complete migrated program in a single fenced code block.";

/// Builds the completion prompt for `request`.
///
/// Sections appear in a fixed order: migration guide, SDK reference, then the
/// user's code inside a fenced block. All three are included verbatim.
pub fn compose_prompt(request: &MigrationRequest) -> String {
    format!(
        "Here is the migration guide: {guide}\n\n\
         Here is the SDK code: {reference}\n\n\
         Here is the user's code: ```{language}\n{code}\n```\n\n\
         {instruction}",
        guide = request.guide_document(),
        reference = request.reference_document(),
        language = request.language(),
        code = request.source_code(),
        instruction = REPLY_INSTRUCTION,
    )
}
