// Cross-cutting prompt fragments. Service-specific prompts live next to the service.

/// Appended to any system prompt whose answer is parsed as a bare integer.
pub const INTEGER_ONLY_INSTRUCTION: &str = "\
    Respond with a single integer between 0 and 100. \
    Do NOT include a % symbol, explanation, code fences, or any other text.";
