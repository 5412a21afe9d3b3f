//! Instructions sent to the model for the generation and evaluation passes.

use std::fmt::Write as _;

/// Literal scope the model must return for titles that are not engineering tasks.
pub const ERROR_MARKER: &str = "ERROR - NOT APPROPRIATE TASK";

/// Titles the model should treat as nonsense.
const BAD_TITLE_EXAMPLES: [&str; 7] = [
    "Update UI",
    "Task 1234",
    "Create a new feature",
    "Hello World",
    "Hi how are you?",
    "qwertyuiopasdfghjklzxcvbnm",
    "blah blah blah",
];

const PERSONA: &str = "You are the scrum master and project manager of a software development \
team with many important stakeholders. Your job is to help the team prioritize and plan their work.";

const SECTIONS: &str = "description, acceptance criteria, sub-tasks, assumptions, dependencies, \
resources needed, estimated effort, potential risks/challenges, points for the task, and \
recommended number of engineers";

const FEW_SHOT_EXAMPLES: &str = r"# Example 1:
Task Title: Implement OAuth2 Authentication in Service
Detailed Scope:
- Description: Implement OAuth2 to secure the REST API by authenticating users and services.
- Acceptance Criteria: API must reject calls without valid authentication tokens; OAuth2 flow must be implemented according to RFC 6749.
- Sub-Tasks: 1. Set up OAuth2 framework; 2. Integrate with user database for credentials verification; 3. Implement token generation and expiration logic; 4. Write unit and integration tests.
- Assumptions: User database supports OAuth integrations and has necessary schema for OAuth2.
- Dependencies: OAuth2 library (e.g., OAuthLib), User database.
- Resources Needed: Access to development and testing environments, OAuth2 library licenses.
- Estimated Effort: 2 weeks for a team of 2 engineers.
- Potential Risks/Challenges: Delays in third-party library integration, potential security vulnerabilities in token handling.
- Points for the Task: 8 points.
- Recommended Number of Engineers: 2
Scope Quality: Well-scoped.

# Example 2:
Task Title: Update UI Colors
Detailed Scope:
- Description: Update the user interface colors to match the new brand guidelines.
- Acceptance Criteria: All primary and secondary colors should be updated across all pages, consistent with the new brand palette.
- Sub-Tasks: 1. Identify all CSS files and UI components affected; 2. Replace color values; 3. Conduct cross-browser testing.
- Assumptions: Brand guidelines are finalized and approved.
- Dependencies: Access to UI codebase and brand guideline documents.
- Resources Needed: UI/UX designer, front-end developer.
- Estimated Effort: 1 week for a team of 1 designer and 1 developer.
- Potential Risks/Challenges: Possible inconsistencies in color perception across different displays.
- Points for the Task: 3 points.
- Recommended Number of Engineers: 2
Scope Quality: Well-scoped.

# Example 3:
Task Title: Update UI
Detailed Scope:
- Description: Make the UI better.
Scope Quality: Poorly-scoped.
";

const JSON_SHAPE: &str = r#"{"Task Title": "...", "Detailed Scope": {"Description": "...", "Acceptance Criteria": ["..."], "Sub-Tasks": ["1. ...", "2. ..."], "Assumptions": "...", "Dependencies": ["..."], "Resources Needed": ["..."], "Estimated Effort": "...", "Potential Risks/Challenges": ["..."], "Points for the Task": "...", "Recommended Number of Engineers": "..."}, "Scope Quality": "Well-scoped | Poorly-scoped"}"#;

fn bad_title_list() -> String {
    BAD_TITLE_EXAMPLES.iter().map(|t| format!("'{t}'")).collect::<Vec<_>>().join(", ")
}

/// System instruction for the generation pass.
#[must_use]
pub fn generation_system() -> String {
    format!(
        "{PERSONA} You will be given the title of an engineering task. Expand it into a detailed \
         task scope including a {SECTIONS}. Make the scope comprehensive and ready for \
         implementation. Do not include any additional information or explanations. Respond \
         with a JSON object containing the task title and the generated task scope in the \
         format given in the user message."
    )
}

/// User instruction for the generation pass.
#[must_use]
pub fn generation_prompt(title: &str) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Given an engineering task title, expand it into a detailed task scope including a \
         {SECTIONS}. Make the scope comprehensive and ready for implementation.\n"
    );
    let _ = writeln!(prompt, "Here are some examples of the output followed by the quality of the scope:");
    prompt.push_str(FEW_SHOT_EXAMPLES);
    let _ = writeln!(
        prompt,
        "\nIMPORTANT: if the task title does not make sense as an engineering task, the Scope \
         Quality MUST be 'Poorly-scoped' and the Detailed Scope MUST be exactly '{ERROR_MARKER}'. \
         Examples of bad task titles: {}. Do not fall back to one of the examples above; report \
         the error instead.",
        bad_title_list()
    );
    let _ = writeln!(prompt, "\nNumber the Sub-Tasks items yourself (\"1. ...\").");
    let _ = writeln!(prompt, "Respond with a JSON object shaped like:\n{JSON_SHAPE}\n");
    let _ = writeln!(prompt, "# To Generate:");
    let _ = writeln!(prompt, "Task Title: {title}");
    let _ = writeln!(prompt, "Detailed Scope:");
    prompt
}

/// System instruction for the evaluation pass.
#[must_use]
pub fn evaluation_system() -> String {
    format!(
        "{PERSONA} You will be given a scoped ticket including a {SECTIONS}. Judge strictly \
         whether it is comprehensive and ready for implementation. Do not include any \
         additional information or explanations. Respond with a JSON object containing the \
         task title, the task scope and the scope quality in the format given in the user \
         message."
    )
}

/// User instruction for the evaluation pass.
#[must_use]
pub fn evaluation_prompt(title: &str, generated_scope: &str) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Evaluate the following ticket based on content quality and scope. Here are some \
         examples of tickets followed by the quality of their scope:"
    );
    prompt.push_str(FEW_SHOT_EXAMPLES);
    let _ = writeln!(
        prompt,
        "\nTHIS IS THE MOST IMPORTANT PART: if the task title does not make sense as an \
         appropriate engineering task, the Scope Quality MUST be 'Poorly-scoped'. Bad task \
         examples: {}.",
        bad_title_list()
    );
    let _ = writeln!(
        prompt,
        "\nRespond with a JSON object with exactly the keys \"Task Title\", \"Detailed Scope\" \
         and \"Scope Quality\", shaped like:\n{JSON_SHAPE}"
    );
    let _ = writeln!(
        prompt,
        "\"Scope Quality\" must always be present and must be either 'Well-scoped' or \
         'Poorly-scoped'.\n"
    );
    let _ = writeln!(prompt, "# Evaluating:");
    let _ = writeln!(prompt, "Task Title: {title}");
    let _ = writeln!(prompt, "Detailed Scope: {generated_scope}");
    let _ = writeln!(prompt, "Scope Quality: <'Well-scoped' or 'Poorly-scoped'>");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_prompt_embeds_title_examples_and_marker() {
        let prompt = generation_prompt("Write evaluation module for MNIST classifier");
        assert!(prompt.contains("Task Title: Write evaluation module for MNIST classifier"));
        assert!(prompt.contains("Implement OAuth2 Authentication in Service"));
        assert!(prompt.contains("Scope Quality: Poorly-scoped."));
        assert!(prompt.contains(ERROR_MARKER));
        assert!(prompt.contains("'Hello World'"));
        assert!(prompt.trim_end().ends_with("Detailed Scope:"));
    }

    #[test]
    fn evaluation_prompt_embeds_generated_scope_and_demands_verdict() {
        let prompt = evaluation_prompt("Add login page", r#"{"Description": "Login"}"#);
        assert!(prompt.contains("Task Title: Add login page"));
        assert!(prompt.contains(r#"Detailed Scope: {"Description": "Login"}"#));
        assert!(prompt.contains("'Well-scoped' or 'Poorly-scoped'"));
        assert!(prompt.contains("Update UI Colors"));
    }

    #[test]
    fn json_templates_leave_the_verdict_open() {
        for prompt in [generation_prompt("Add login page"), evaluation_prompt("Add login page", "{}")] {
            assert!(!prompt.contains(r#""Scope Quality": "Well-scoped"}"#));
            assert!(prompt.contains(r#""Scope Quality": "Well-scoped | Poorly-scoped""#));
        }
    }

    #[test]
    fn system_prompts_ask_for_json() {
        assert!(generation_system().contains("JSON object"));
        assert!(evaluation_system().contains("scope quality"));
    }
}
