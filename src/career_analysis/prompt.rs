// src/career_analysis/prompt.rs
use super::types::Profile;

pub const OUTPUT_SCHEMA: &str = r#"**CRITICAL INSTRUCTION:** Your response MUST be valid JSON in this exact structure:
[
  {
    "title": "...",
    "match_score": "...",
    "description": "...",
    "roadmap": ["...", "...", "..."],
    "resource_link": "..."
  },
  ...
]"#;

pub const RAW_JSON_INSTRUCTION: &str = "Do NOT wrap the JSON in markdown blocks (like ```json), DO NOT provide any introductory or concluding conversational text. ONLY output raw JSON.";

const FIELD_INSTRUCTIONS: &str = r#"Based on this profile, suggest 3 highly suitable and distinct career paths. For each career, provide:
1. "title": The name of the career.
2. "match_score": A percentage (e.g., "95%") indicating how well it matches their profile.
3. "description": A short, engaging sentence describing why it's a good fit.
4. "roadmap": An array of 3-4 distinct actionable steps (short strings) the student can take starting today to pursue this path.
5. "resource_link": A URL string. Create a Google search query specifically for beginner resources or roadmaps for this career. (e.g., "https://www.google.com/search?q=how+to+become+a+data+scientist+roadmap"). Format spaces with '+'."#;

/// Build the counselor instruction for `profile`.
pub fn build_prompt(profile: &Profile) -> String {
    format!(
        "\nYou are an expert AI Career Counselor. Analyze this student's profile:\n\
         - Interests: {interests}\n\
         - Strengths: {strengths}\n\
         - Preferred Work Style: {work_style}\n\
         - Core Values: {values}\n\
         \n\
         {fields}\n\
         \n\
         {schema}\n\
         \n\
         {raw_json}\n",
        interests = profile.interests().join(", "),
        strengths = profile.strengths().join(", "),
        work_style = profile.work_style(),
        values = profile.values().join(", "),
        fields = FIELD_INSTRUCTIONS,
        schema = OUTPUT_SCHEMA,
        raw_json = RAW_JSON_INSTRUCTION,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> Profile {
        Profile {
            interests: Some(vec!["Technology".to_string(), "Art".to_string()]),
            strengths: Some(vec!["Problem Solving".to_string()]),
            work_style: Some("Collaborative".to_string()),
            values: Some(vec!["Impact".to_string(), "Growth".to_string()]),
        }
    }

    #[test]
    fn test_lists_are_comma_joined() {
        let prompt = build_prompt(&sample_profile());
        assert!(prompt.contains("- Interests: Technology, Art\n"));
        assert!(prompt.contains("- Strengths: Problem Solving\n"));
        assert!(prompt.contains("- Preferred Work Style: Collaborative\n"));
        assert!(prompt.contains("- Core Values: Impact, Growth\n"));
    }

    #[test]
    fn test_empty_profile_yields_empty_joins() {
        let prompt = build_prompt(&Profile::default());
        assert!(prompt.contains("- Interests: \n"));
        assert!(prompt.contains("- Strengths: \n"));
        assert!(prompt.contains("- Preferred Work Style: Unknown\n"));
        assert!(prompt.contains("- Core Values: \n"));

        let explicit_empty = Profile {
            interests: Some(vec![]),
            strengths: Some(vec![]),
            work_style: None,
            values: Some(vec![]),
        };
        assert_eq!(build_prompt(&explicit_empty), prompt);
    }

    #[test]
    fn test_instructions_present_for_any_input() {
        for profile in [Profile::default(), sample_profile()] {
            let prompt = build_prompt(&profile);
            assert!(prompt.contains(OUTPUT_SCHEMA));
            assert!(prompt.contains(RAW_JSON_INSTRUCTION));
            assert!(prompt.contains("suggest 3 highly suitable and distinct career paths"));
            for field in ["title", "match_score", "description", "roadmap", "resource_link"] {
                assert!(prompt.contains(&format!("\"{}\":", field)));
            }
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt(&sample_profile()), build_prompt(&sample_profile()));
    }
}
