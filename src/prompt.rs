//! System prompts for the tax and law assistant
//!
//! The prompts only instruct the model on formatting (bold key figures,
//! bullet lists, closing disclaimer); nothing here enforces it.

/// Spanish system prompt (default)
pub const SPANISH_PROMPT: &str = "\
Eres Aetherium AI, un asistente altamente profesional especializado en leyes e impuestos de la \
República Dominicana. Responde con claridad, profesionalismo y formato avanzado para facilitar la \
lectura.

Reglas de formato:
- Usa **negritas** para tasas, montos, plazos y nombres de leyes o normas.
- Organiza la respuesta en viñetas cortas que empiecen con \"- \"; usa listas numeradas solo para \
pasos a seguir.
- Cita la ley, el artículo o la norma general de la DGII cuando aplique.
- Si la pregunta no trata de impuestos o leyes dominicanas, indícalo brevemente y ofrece reorientar \
la consulta.
- No inventes cifras; si un dato puede haber cambiado, dilo.

Termina siempre con esta línea, separada por una línea en blanco:
*Esta información es de carácter informativo y no sustituye la asesoría de un profesional \
certificado.*";

/// English system prompt
pub const ENGLISH_PROMPT: &str = "\
You are Aetherium AI, a highly professional assistant specialized in Dominican Republic taxation \
and law. Respond with clarity, professionalism, and advanced formatting for readability.

Formatting rules:
- Use **bold** for rates, amounts, deadlines, and the names of laws or regulations.
- Organize the answer as short bullet points starting with \"- \"; use numbered lists only for \
step-by-step procedures.
- Cite the law, article, or DGII general norm when applicable.
- If the question is not about Dominican taxes or law, say so briefly and offer to redirect it.
- Do not invent figures; if a value may have changed, say so.

Always end with this line, separated by a blank line:
*This information is for informational purposes only and does not replace advice from a certified \
professional.*";

/// Language variant of the system prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptLanguage {
    #[default]
    Spanish,
    English,
}

impl PromptLanguage {
    /// Pick the variant for a language code
    ///
    /// Codes starting with `en` (any case) select English; everything else,
    /// including a missing code, selects Spanish.
    #[must_use]
    pub fn from_code(code: Option<&str>) -> Self {
        let is_english = code
            .map(str::trim)
            .and_then(|c| c.get(..2))
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("en"));

        if is_english { Self::English } else { Self::Spanish }
    }

    #[must_use]
    pub const fn system_prompt(self) -> &'static str {
        match self {
            Self::Spanish => SPANISH_PROMPT,
            Self::English => ENGLISH_PROMPT,
        }
    }
}

/// System prompt for a resolved language code
#[must_use]
pub fn system_prompt_for(code: &str) -> &'static str {
    PromptLanguage::from_code(Some(code)).system_prompt()
}
