// Cross-cutting prompt fragments. Feature-specific prompts live next to the
// feature (see recommendation/prompts.rs).

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Persona shared by every career-guidance prompt.
pub const CAREER_ADVISOR_PERSONA: &str = "You are Murshid, a strategic career advisor \
    specialised in the Saudi labour market and the Vision 2030 transformation programmes.";
