// All prompt text and fixed replies for the assistant panel.

use crate::profile::ProfileStore;

/// Appended when the generation call fails for any reason.
pub const CONNECTION_ERROR_REPLY: &str = "Error de conexión. Por favor, intenta de nuevo.";

/// Appended when the call succeeds but yields no text.
pub const EMPTY_REPLY_FALLBACK: &str =
    "Lo siento, no he podido recuperar la información en este momento.";

/// Fixed rules sent ahead of every question.
pub const ASSISTANT_RULES: &str = "Rules:
1. Be professional, concise, and direct.
2. Answer in Spanish.
3. Maintain the tone of a professional recruiter/assistant.
4. Focus on medical/emergency expertise.";

/// Builds the single prompt for one user turn.
///
/// The whole profile is included every time; there is no truncation and no
/// server-side memory of earlier turns.
pub fn build_prompt(profile: &ProfileStore, question: &str) -> String {
    format!(
        "User is asking about {name}'s professional profile.\n\
         Context: {context}\n\
         \n\
         {ASSISTANT_RULES}\n\
         \n\
         Question: {question}",
        name = profile.personal_info().name,
        context = profile.context_json(),
    )
}

/// Opening assistant message shown when a panel session starts.
pub fn greeting(profile: &ProfileStore) -> String {
    let first_name = profile.personal_info().first_name();
    let company = profile.experience().first().map(|e| e.company.as_str());
    let institution = profile.education().first().map(|e| e.institution.as_str());

    let background = match (company, institution) {
        (Some(company), Some(institution)) => {
            format!(" He analizado su trayectoria en el {company} y {institution}.")
        }
        (Some(only), None) | (None, Some(only)) => {
            format!(" He analizado su trayectoria en {only}.")
        }
        (None, None) => String::new(),
    };

    format!(
        "Hola, soy el asistente inteligente de {first_name}.{background} \
         ¿Qué te gustaría saber sobre sus capacidades o formación?"
    )
}
