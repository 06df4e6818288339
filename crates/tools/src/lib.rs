//! Built-in tool catalog for semroute.
//!
//! Four tools: a crisis-support safety message, two generation-backed
//! emotional-support responders, and a randomized student-marks demo.
//! The descriptions matter — they are what the router embeds and
//! scores incoming context against.

pub mod marks;

use semroute_core::tool::ToolSpec;

/// The crisis-support safety message. Always static, never generated.
const CRISIS_MESSAGE: &str = "I'm really sorry you're feeling this way. You deserve support. \
     Please talk to someone you trust or contact emergency services or a \
     local helpline immediately.";

fn crisis_response(_context: &str) -> String {
    CRISIS_MESSAGE.to_string()
}

/// Build the default tool catalog, in routing tie-break order.
///
/// `SuicideHelp` is registered first so that an exact similarity tie
/// involving it always resolves toward the safety message.
pub fn default_catalog() -> Vec<ToolSpec> {
    vec![
        ToolSpec::responder(
            "SuicideHelp",
            "Handles crisis or suicidal intent messages",
            crisis_response,
        ),
        ToolSpec::generated(
            "PositivePrompt",
            "Comfort and motivational response for stress, pressure, and exhaustion",
            "You are a supportive companion. Offer brief, warm comfort and \
             motivation to someone feeling stressed or under pressure.",
        ),
        ToolSpec::generated(
            "NegativePrompt",
            "Reassurance and support for anxiety, worry, and fear",
            "You are a supportive companion. Briefly and calmly reassure \
             someone who feels anxious, worried, or afraid.",
        ),
        ToolSpec::responder(
            "StudentMarks",
            "Generates a student marks report with subject scores, total, and percentage",
            marks::marks_report,
        ),
    ]
}
