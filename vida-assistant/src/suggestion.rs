/// A canned prompt offered as a one-click shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub id: &'static str,
    pub label: &'static str,
    /// Sent as if the user had typed it.
    pub prompt: &'static str,
}

pub const DEFAULT_SUGGESTIONS: &[Suggestion] = &[
    Suggestion {
        id: "afiliate",
        label: "¿Cómo me afilio?",
        prompt: "Quiero afiliarme, dime los pasos.",
    },
    Suggestion {
        id: "voluntariado",
        label: "Ser voluntario",
        prompt: "¿Cómo me hago voluntario?",
    },
    Suggestion {
        id: "docs",
        label: "Ver documentos",
        prompt: "Muéstrame qué documentos oficiales hay disponibles.",
    },
    Suggestion {
        id: "eventos",
        label: "Próximos eventos",
        prompt: "¿Cuáles son los próximos eventos y fechas?",
    },
    Suggestion {
        id: "contacto",
        label: "Contacto",
        prompt: "¿Cómo puedo ponerme en contacto con ustedes?",
    },
];

pub fn find_suggestion(id: &str) -> Option<&'static Suggestion> {
    DEFAULT_SUGGESTIONS.iter().find(|s| s.id == id)
}
