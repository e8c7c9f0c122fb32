pub mod code_review_prompt;
