//! Fixed phrases the skill speaks, and speech text normalization.

pub const LAUNCH: &str = "Cuéntame.";
pub const LAUNCH_REPROMPT: &str = "¿Qué te gustaría saber?";

pub const MISSING_QUESTION: &str = "No he entendido tu pregunta. ¿Podrías repetirla?";
pub const MISSING_QUESTION_REPROMPT: &str = "¿Puedes repetir tu pregunta?";

pub const ANSWER_REPROMPT: &str = "¿Tienes alguna otra pregunta?";

pub const HELP: &str = "Puedo ayudarte respondiendo preguntas sobre muchos temas. \
Simplemente di: 'qué sabes sobre X' o 'dime sobre X'.";
pub const HELP_REPROMPT: &str = "¿En qué más puedo ayudarte?";

pub const FALLBACK: &str = "Lo siento, no estoy segura de lo que quieres decir. \
Intenta preguntarme algo diferente.";
pub const FALLBACK_REPROMPT: &str = "¿En qué más puedo ayudarte?";

pub const GOODBYE: &str = "Adiós";

/// Spoken when the backend answered with nothing usable.
pub const NO_ANSWER: &str = "Lo siento, no tengo una respuesta para eso.";

/// Spoken when the backend could not be reached or failed.
pub const BACKEND_APOLOGY: &str = "Lo siento, no puedo obtener una respuesta en este momento.";

/// Spoken when the question handler itself fails.
pub const QUESTION_ERROR: &str =
    "Hubo un problema procesando tu solicitud. Por favor, inténtalo de nuevo.";
pub const QUESTION_ERROR_REPROMPT: &str = "¿Qué deseas preguntar?";

pub const INTERNAL_ERROR: &str = "Lo siento, ha ocurrido un error interno.";
pub const INTERNAL_ERROR_REPROMPT: &str = "¿Puedes intentar nuevamente?";

/// Collapses every whitespace run (newlines included) to one space and trims.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
