//! Prompt templates for the three generation flows

/// Maximum number of plan characters embedded in a visual-aid prompt
pub const VISUAL_AID_CONTEXT_CHARS: usize = 1000;

/// Section headings every Create New plan must contain, in order
pub const PLAN_SECTIONS: [&str; 4] = [
    "Learning Objectives",
    "Introduction (Hook)",
    "Main Activity",
    "Wrap-up",
];

/// Instruction for drafting a plan from scratch
pub fn new_plan_prompt(grade: &str, subject: &str, topic: &str) -> String {
    let sections = PLAN_SECTIONS
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Act as a friendly, expert teacher's colleague.\n\
         Draft a clear, text-based lesson plan for a {grade} class on the subject of {subject}.\n\
         The topic is: \"{topic}\".\n\
         \n\
         The lesson plan MUST include the following clearly labeled sections:\n\
         {sections}\n\
         \n\
         Keep the tone encouraging, professional, yet simple and jargon-free."
    )
}

/// Instruction sent after an attached example plan
pub fn style_match_prompt(topic: &str) -> String {
    format!(
        "I have attached an example lesson plan.\n\
         Analyze its structure, tone, and formatting style carefully.\n\
         \n\
         Create a BRAND NEW lesson plan for the topic: \"{topic}\".\n\
         \n\
         You MUST strictly mimic the structure and style of the uploaded document.\n\
         If the uploaded document has specific headers, use them.\n\
         If it uses bullet points, use them.\n\
         The goal is to make this new lesson plan look like it belongs in the same curriculum binder."
    )
}

/// Instruction for an infographic summarizing a plan.
///
/// Only the first [`VISUAL_AID_CONTEXT_CHARS`] characters of the plan are embedded.
pub fn visual_aid_prompt(plan_text: &str) -> String {
    let context = truncate_chars(plan_text, VISUAL_AID_CONTEXT_CHARS);
    format!(
        "Create a clean, professional, infographic-style flowchart image that visually \
         summarizes the key steps of the following lesson plan.\n\
         \n\
         The image should be suitable for projection on a classroom screen.\n\
         Style: Vector art, flat design, white or light background, clear arrows, educational, \
         high contrast text.\n\
         \n\
         Lesson Plan Context:\n\
         {context}... (truncated for relevance)\n\
         \n\
         Visual Flow:\n\
         1. Start/Hook\n\
         2. Activity\n\
         3. Goal/Wrap-up"
    )
}

/// First `max` characters of `text`, never splitting a UTF-8 sequence
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
