//! Prompt construction for question generation and synthesis.

use super::state::is_answered;

/// Shown to the model in place of an answer the user never gave.
pub const MISSING_ANSWER_PLACEHOLDER: &str = "No answer provided";

pub const QUESTION_SYSTEM_PROMPT: &str = "You are an expert interviewer. You ask short, \
specific, open-ended questions that draw out exactly the information needed to produce \
a requested piece of writing. You reply with JSON only.";

pub const SYNTHESIS_SYSTEM_PROMPT: &str = "You are an expert writer. You turn interview \
answers into a finished piece of writing that follows the requested format exactly. \
You reply with the finished text only, without preamble.";

/// Prompt asking for up to `num_questions` distinct questions as a JSON array.
pub fn question_generation_prompt(
    topic: &str,
    output_format_description: &str,
    num_questions: u32,
) -> String {
    format!(
        "Topic: {topic}\n\
         Desired output: {output_format_description}\n\n\
         Write {num_questions} distinct questions to ask the user so that their answers \
         contain everything needed to produce the desired output for this topic.\n\n\
         Respond with a single JSON array of exactly {num_questions} strings, one question \
         per string, and nothing else. Example: [\"First question?\", \"Second question?\"]"
    )
}

/// Prompt combining the topic, format and every question/answer pair in order.
///
/// Blank answers are replaced with [`MISSING_ANSWER_PLACEHOLDER`].
pub fn synthesis_prompt<'a>(
    topic: &str,
    output_format_description: &str,
    pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> String {
    let mut prompt = format!(
        "Topic: {topic}\n\
         Desired output: {output_format_description}\n\n\
         Interview answers:\n"
    );

    for (index, (question, answer)) in pairs.into_iter().enumerate() {
        let answer = if !is_answered(answer) {
            MISSING_ANSWER_PLACEHOLDER
        } else {
            answer
        };
        prompt.push_str(&format!("\n{}. Q: {}\n   A: {}\n", index + 1, question, answer));
    }

    prompt.push_str(
        "\nUsing only the information above, produce the desired output. \
         Where an answer is missing, make a reasonable, clearly generic choice.",
    );
    prompt
}
